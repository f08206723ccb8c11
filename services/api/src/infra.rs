use gig_decision::orders::{
    CsvOrderRepository, NewOrder, OrderId, OrderRecord, OrderRepository, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Order log kept for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryOrderRepository {
    records: Arc<Mutex<Vec<OrderRecord>>>,
}

impl OrderRepository for InMemoryOrderRepository {
    fn insert(&self, order: NewOrder) -> Result<OrderRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("order log lock poisoned".to_string()))?;
        let record = order.into_record(OrderId(guard.len() as u64 + 1));
        guard.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("order log lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

/// Storage picked at startup: a CSV file when configured, memory otherwise.
pub(crate) enum OrderStore {
    Memory(InMemoryOrderRepository),
    Csv(CsvOrderRepository),
}

impl OrderStore {
    pub(crate) fn open(orders_csv: Option<PathBuf>) -> Result<Self, RepositoryError> {
        match orders_csv {
            Some(path) => CsvOrderRepository::open(path).map(Self::Csv),
            None => Ok(Self::Memory(InMemoryOrderRepository::default())),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            OrderStore::Memory(_) => "memory",
            OrderStore::Csv(_) => "csv",
        }
    }
}

impl OrderRepository for OrderStore {
    fn insert(&self, order: NewOrder) -> Result<OrderRecord, RepositoryError> {
        match self {
            OrderStore::Memory(repository) => repository.insert(order),
            OrderStore::Csv(repository) => repository.insert(order),
        }
    }

    fn all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        match self {
            OrderStore::Memory(repository) => repository.all(),
            OrderStore::Csv(repository) => repository.all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use gig_decision::decision::Decision;

    fn order() -> NewOrder {
        NewOrder {
            pay: 12.0,
            miles: 4.0,
            minutes: 18.0,
            hourly_rate: 34.78,
            decision: Decision::Take,
            logged_at: DateTime::parse_from_rfc3339("2025-07-04T18:00:00Z").expect("timestamp"),
        }
    }

    #[test]
    fn memory_store_assigns_sequential_ids() {
        let store = OrderStore::open(None).expect("memory store");
        assert_eq!(store.label(), "memory");

        let first = store.insert(order()).expect("insert");
        let second = store.insert(order()).expect("insert");

        assert_eq!(first.id, OrderId(1));
        assert_eq!(second.id, OrderId(2));
        assert_eq!(store.all().expect("records").len(), 2);
    }

    #[test]
    fn csv_store_is_selected_when_a_path_is_given() {
        let path = std::env::temp_dir()
            .join(format!("gig-decision-api-{}", std::process::id()))
            .join("orders.csv");
        let store = OrderStore::open(Some(path)).expect("csv store");
        assert_eq!(store.label(), "csv");
    }
}
