use crate::cli::ServeArgs;
use crate::infra::{build_advisor, AppState};
use crate::routes::with_advisor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use policy_advisor::config::AppConfig;
use policy_advisor::error::AppError;
use policy_advisor::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let advisor = Arc::new(build_advisor(&config, args.catalog.take()));
    // The service still starts without a catalog; requests report data unavailable.
    let catalog_ready = match advisor.catalog().load() {
        Ok(records) => {
            info!(policies = records.len(), "policy catalog warmed");
            true
        }
        Err(err) => {
            warn!(error = %err, "policy catalog unavailable at startup");
            false
        }
    };

    let app = with_advisor_routes(advisor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(catalog_ready, Ordering::Release);

    info!(?config.environment, %addr, catalog_ready, "policy advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
