use crate::cli::ServeArgs;
use crate::infra::{AppState, OrderStore};
use crate::routes::with_order_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use gig_decision::config::AppConfig;
use gig_decision::error::AppError;
use gig_decision::orders::OrderDecisionService;
use gig_decision::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.orders_csv.take() {
        config.storage.orders_csv = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = OrderStore::open(config.storage.orders_csv.clone())?;
    let store_kind = store.label();
    let order_service = Arc::new(OrderDecisionService::new(Arc::new(store)));

    let app = with_order_routes(order_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, order_store = store_kind, "offer decision service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
