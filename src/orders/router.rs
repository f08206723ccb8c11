use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

use super::domain::{LogOrderRequest, LogReceipt};
use super::repository::OrderRepository;
use super::request::{EvaluateRequest, EvaluateResponse};
use super::service::OrderDecisionService;
use super::stats::OrderStats;
use crate::error::AppError;

/// Router builder exposing the calculate, log, and stats endpoints.
pub fn order_router<R>(service: Arc<OrderDecisionService<R>>) -> Router
where
    R: OrderRepository + 'static,
{
    Router::new()
        .route("/calculate", post(calculate_handler::<R>))
        .route("/log", post(log_handler::<R>))
        .route("/stats", get(stats_handler::<R>))
        .with_state(service)
}

pub(crate) async fn calculate_handler<R>(
    State(service): State<Arc<OrderDecisionService<R>>>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, AppError>
where
    R: OrderRepository + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.evaluate(&request)?))
}

pub(crate) async fn log_handler<R>(
    State(service): State<Arc<OrderDecisionService<R>>>,
    payload: Result<Json<LogOrderRequest>, JsonRejection>,
) -> Result<Json<LogReceipt>, AppError>
where
    R: OrderRepository + 'static,
{
    let Json(request) = payload?;
    Ok(Json(service.log(request)?))
}

pub(crate) async fn stats_handler<R>(
    State(service): State<Arc<OrderDecisionService<R>>>,
) -> Result<Json<OrderStats>, AppError>
where
    R: OrderRepository + 'static,
{
    Ok(Json(service.stats()?))
}
