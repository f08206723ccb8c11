use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use crate::decision::Decision;
use crate::orders::domain::{LogOrderRequest, NewOrder, OrderId, OrderRecord};
use crate::orders::repository::{OrderRepository, RepositoryError};
use crate::orders::{order_router, OrderDecisionService};

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<Vec<OrderRecord>>>,
}

impl OrderRepository for MemoryRepository {
    fn insert(&self, order: NewOrder) -> Result<OrderRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = order.into_record(OrderId(guard.len() as u64 + 1));
        guard.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

impl OrderRepository for UnavailableRepository {
    fn insert(&self, _order: NewOrder) -> Result<OrderRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }

    fn all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("disk offline".to_string()))
    }
}

pub(super) fn timestamp(raw: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(raw).expect("valid rfc3339 timestamp")
}

pub(super) fn log_request(
    pay: f64,
    minutes: f64,
    decision: Decision,
    time: Option<&str>,
) -> LogOrderRequest {
    LogOrderRequest {
        pay,
        miles: 5.0,
        minutes,
        decision,
        time: time.map(str::to_string),
    }
}

pub(super) fn record(
    id: u64,
    hourly_rate: f64,
    decision: Decision,
    logged_at: &str,
) -> OrderRecord {
    OrderRecord {
        id: OrderId(id),
        pay: 10.0,
        miles: 5.0,
        minutes: 20.0,
        hourly_rate,
        decision,
        logged_at: timestamp(logged_at),
    }
}

pub(super) fn memory_service() -> (OrderDecisionService<MemoryRepository>, MemoryRepository) {
    let repository = MemoryRepository::default();
    let service = OrderDecisionService::new(Arc::new(repository.clone()));
    (service, repository)
}

pub(super) fn memory_router() -> axum::Router {
    let (service, _) = memory_service();
    order_router(Arc::new(service))
}

pub(super) fn unavailable_router() -> axum::Router {
    order_router(Arc::new(OrderDecisionService::new(Arc::new(
        UnavailableRepository,
    ))))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Unique scratch path for CSV store tests.
pub(super) fn scratch_csv(label: &str) -> PathBuf {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("gig-decision-tests-{}", std::process::id()))
        .join(format!("{label}-{sequence}.csv"))
}
