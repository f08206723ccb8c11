use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::OrderRecord;
use crate::decision::{round_to_cents, Decision};

/// Number of hour buckets reported as `best_hours`.
pub const BEST_HOURS_LIMIT: usize = 3;

/// Aggregate view of the order log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStats {
    pub overall: OverallStats,
    pub best_hours: Vec<HourBucket>,
    pub by_hour: Vec<HourBucket>,
    pub by_day: Vec<DayBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallStats {
    pub avg_hourly: f64,
    pub total_orders: u64,
    pub accepted: u64,
    pub declined: u64,
    pub only_if_slow: u64,
}

/// Orders grouped by UTC hour of day (`"00"`..`"23"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBucket {
    pub hour: String,
    pub avg_hourly: f64,
    pub orders: u64,
}

/// Orders grouped by UTC calendar day (`"YYYY-MM-DD"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub day: String,
    pub avg_hourly: f64,
    pub orders: u64,
}

#[derive(Default)]
struct RateAccumulator {
    total: f64,
    orders: u64,
}

impl RateAccumulator {
    fn add(&mut self, hourly_rate: f64) {
        self.total += hourly_rate;
        self.orders += 1;
    }

    fn average(&self) -> f64 {
        if self.orders == 0 {
            0.0
        } else {
            self.total / self.orders as f64
        }
    }
}

impl OrderStats {
    pub fn from_records(records: &[OrderRecord]) -> Self {
        let mut overall = RateAccumulator::default();
        let mut decisions: BTreeMap<Decision, u64> = BTreeMap::new();
        let mut hours: BTreeMap<String, RateAccumulator> = BTreeMap::new();
        let mut days: BTreeMap<String, RateAccumulator> = BTreeMap::new();

        for record in records {
            let logged_at = record.logged_at.naive_utc();
            overall.add(record.hourly_rate);
            *decisions.entry(record.decision).or_default() += 1;
            hours
                .entry(logged_at.format("%H").to_string())
                .or_default()
                .add(record.hourly_rate);
            days.entry(logged_at.format("%Y-%m-%d").to_string())
                .or_default()
                .add(record.hourly_rate);
        }

        let count = |decision: Decision| decisions.get(&decision).copied().unwrap_or(0);

        let mut hour_rows: Vec<(String, f64, u64)> = hours
            .into_iter()
            .map(|(hour, acc)| (hour, acc.average(), acc.orders))
            .collect();
        hour_rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let by_hour: Vec<HourBucket> = hour_rows
            .into_iter()
            .map(|(hour, average, orders)| HourBucket {
                hour,
                avg_hourly: round_to_cents(average),
                orders,
            })
            .collect();

        let by_day = days
            .into_iter()
            .rev()
            .map(|(day, acc)| DayBucket {
                day,
                avg_hourly: round_to_cents(acc.average()),
                orders: acc.orders,
            })
            .collect();

        let best_hours = by_hour.iter().take(BEST_HOURS_LIMIT).cloned().collect();

        Self {
            overall: OverallStats {
                avg_hourly: round_to_cents(overall.average()),
                total_orders: overall.orders,
                accepted: count(Decision::Take),
                declined: count(Decision::Decline),
                only_if_slow: count(Decision::OnlyIfSlow),
            },
            best_hours,
            by_hour,
            by_day,
        }
    }
}
