use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use tracing::info;

use super::domain::{
    logged_hourly_rate, now, parse_logged_at, InvalidTimestamp, LogOrderRequest, LogReceipt,
    NewOrder,
};
use super::repository::{OrderRepository, RepositoryError};
use super::request::{EvaluateRequest, EvaluateResponse, ValidationError};
use super::stats::OrderStats;
use crate::decision::evaluate;

/// Service composing request validation, the decision engine, and the order log.
pub struct OrderDecisionService<R> {
    repository: Arc<R>,
}

impl<R> OrderDecisionService<R>
where
    R: OrderRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and evaluate an offer. Nothing is persisted.
    pub fn evaluate(
        &self,
        request: &EvaluateRequest,
    ) -> Result<EvaluateResponse, OrderServiceError> {
        let (offer, policy) = request.validate()?;
        let evaluation = evaluate(&offer, &policy);
        Ok(EvaluateResponse::from(&evaluation))
    }

    /// Record a decision, stamping the current UTC time when the request has none.
    pub fn log(&self, request: LogOrderRequest) -> Result<LogReceipt, OrderServiceError> {
        self.log_at(request, now())
    }

    pub fn log_at(
        &self,
        request: LogOrderRequest,
        received_at: DateTime<FixedOffset>,
    ) -> Result<LogReceipt, OrderServiceError> {
        request.validate()?;

        let logged_at = match request.time.as_deref() {
            Some(raw) => parse_logged_at(raw)?,
            None => received_at,
        };

        let order = NewOrder {
            pay: request.pay,
            miles: request.miles,
            minutes: request.minutes,
            hourly_rate: logged_hourly_rate(request.pay, request.minutes),
            decision: request.decision,
            logged_at,
        };

        let record = self.repository.insert(order)?;
        info!(
            id = record.id.0,
            decision = %record.decision,
            hourly_rate = record.hourly_rate,
            logged_at = %record.logged_at.to_rfc3339(),
            "order logged"
        );

        Ok(LogReceipt::ok(record.id))
    }

    pub fn stats(&self) -> Result<OrderStats, OrderServiceError> {
        let records = self.repository.all()?;
        Ok(OrderStats::from_records(&records))
    }
}

/// Error raised by the order service.
#[derive(Debug, thiserror::Error)]
pub enum OrderServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Timestamp(#[from] InvalidTimestamp),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
