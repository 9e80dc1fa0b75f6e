use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidateDirectory, TracingNotifier};
use crate::routes::with_shortlist_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recruiter::config::AppConfig;
use recruiter::error::AppError;
use recruiter::telemetry;
use recruiter::workflows::shortlist::{HttpCvBlinder, JsonFileCartStore, ShortlistService};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryCandidateDirectory::default());
    let blinder = Arc::new(HttpCvBlinder::new(&config.blind_service)?);
    let notifier = Arc::new(TracingNotifier);
    let store = JsonFileCartStore::new(config.cart_storage.path.clone());
    let service = Arc::new(ShortlistService::open(directory, blinder, notifier, store));

    let app = with_shortlist_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "shortlist service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
