use std::fs;

use super::common::*;
use crate::decision::Decision;
use crate::orders::csv_store::CsvOrderRepository;
use crate::orders::domain::{NewOrder, OrderId};
use crate::orders::repository::OrderRepository;
use crate::orders::stats::OrderStats;

fn new_order(hourly_rate: f64, decision: Decision, logged_at: &str) -> NewOrder {
    NewOrder {
        pay: 14.5,
        miles: 6.2,
        minutes: 22.0,
        hourly_rate,
        decision,
        logged_at: timestamp(logged_at),
    }
}

#[test]
fn open_creates_parent_directories_and_starts_empty() {
    let path = scratch_csv("fresh").with_extension("").join("orders.csv");
    let repository = CsvOrderRepository::open(&path).expect("store opens");

    assert!(repository.all().expect("records").is_empty());
    assert!(path.parent().expect("parent").is_dir());
    assert_eq!(repository.path(), path.as_path());
}

#[test]
fn inserted_orders_survive_a_reopen() {
    let path = scratch_csv("reopen");

    {
        let repository = CsvOrderRepository::open(&path).expect("store opens");
        let first = repository
            .insert(new_order(34.25, Decision::Take, "2025-04-10T09:30:00Z"))
            .expect("insert");
        let second = repository
            .insert(new_order(
                18.0,
                Decision::OnlyIfSlow,
                "2025-04-10T16:05:00+02:00",
            ))
            .expect("insert");
        assert_eq!(first.id, OrderId(1));
        assert_eq!(second.id, OrderId(2));
    }

    let reopened = CsvOrderRepository::open(&path).expect("store reopens");
    let records = reopened.all().expect("records");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].hourly_rate, 34.25);
    assert_eq!(records[0].decision, Decision::Take);
    assert_eq!(records[1].decision, Decision::OnlyIfSlow);
    assert_eq!(records[1].logged_at, timestamp("2025-04-10T16:05:00+02:00"));

    let third = reopened
        .insert(new_order(9.5, Decision::Decline, "2025-04-11T07:00:00Z"))
        .expect("insert after reopen");
    assert_eq!(third.id, OrderId(3));

    let contents = fs::read_to_string(&path).expect("read csv");
    let header_lines = contents
        .lines()
        .filter(|line| line.starts_with("id,"))
        .count();
    assert_eq!(header_lines, 1);
    assert_eq!(contents.lines().count(), 4);
    assert!(contents.contains("ONLY_IF_SLOW"));
}

#[test]
fn csv_backed_log_feeds_stats() {
    let path = scratch_csv("stats");
    let repository = CsvOrderRepository::open(&path).expect("store opens");

    repository
        .insert(new_order(30.0, Decision::Take, "2025-04-10T09:30:00Z"))
        .expect("insert");
    repository
        .insert(new_order(12.0, Decision::Decline, "2025-04-10T09:50:00Z"))
        .expect("insert");

    let stats = OrderStats::from_records(&repository.all().expect("records"));

    assert_eq!(stats.overall.total_orders, 2);
    assert_eq!(stats.by_hour[0].hour, "09");
    assert_eq!(stats.by_hour[0].avg_hourly, 21.0);
}

#[test]
fn malformed_files_are_reported() {
    let path = scratch_csv("corrupt");
    fs::create_dir_all(path.parent().expect("parent")).expect("scratch dir");
    fs::write(
        &path,
        "id,pay,miles,minutes,hourly_rate,decision,logged_at\n1,ten,1,1,1,TAKE,2025-01-01T00:00:00Z\n",
    )
    .expect("write csv");

    assert!(CsvOrderRepository::open(&path).is_err());
}
