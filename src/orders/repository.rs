use super::domain::{NewOrder, OrderRecord};

/// Storage abstraction for logged orders so the service can be exercised in isolation.
pub trait OrderRepository: Send + Sync {
    /// Assigns the next id and persists the order.
    fn insert(&self, order: NewOrder) -> Result<OrderRecord, RepositoryError>;
    /// Every logged order in insertion order.
    fn all(&self) -> Result<Vec<OrderRecord>, RepositoryError>;
}

/// Error enumeration for order log failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("order log unavailable: {0}")]
    Unavailable(String),
    #[error("order log io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("order log csv error: {0}")]
    Csv(#[from] csv::Error),
}
