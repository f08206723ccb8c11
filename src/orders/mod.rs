//! Everything around the decision engine: request validation, the order log, aggregate
//! stats, and the HTTP router.

pub mod csv_store;
pub mod domain;
pub mod repository;
pub mod request;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use csv_store::CsvOrderRepository;
pub use domain::{
    logged_hourly_rate, parse_logged_at, InvalidTimestamp, LogOrderRequest, LogReceipt, NewOrder,
    OrderId, OrderRecord,
};
pub use repository::{OrderRepository, RepositoryError};
pub use request::{
    DistanceUnit, EvaluateRequest, EvaluateResponse, Requirement, ValidationError,
    MILES_PER_KILOMETER,
};
pub use router::order_router;
pub use service::{OrderDecisionService, OrderServiceError};
pub use stats::{DayBucket, HourBucket, OrderStats, OverallStats, BEST_HOURS_LIMIT};
