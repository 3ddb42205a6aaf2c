use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDraftRepository, JsonContextRenderer};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use patent_filing::config::AppConfig;
use patent_filing::error::AppError;
use patent_filing::telemetry;
use patent_filing::workflows::drafting::{BoilerplateGenerator, DraftingService};
use patent_filing::workflows::filing::FilingService;
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

    let rules = Arc::new(config.filing.rules()?);
    info!(
        fee_schedule = ?config.filing.fee_schedule_path,
        offline_surcharge_percent = config.filing.offline_surcharge_percent,
        "filing rules loaded"
    );
    let filing_service = Arc::new(FilingService::new(rules, Arc::new(JsonContextRenderer)));
    let drafting_service = Arc::new(DraftingService::new(
        Arc::new(InMemoryDraftRepository::default()),
        Arc::new(BoilerplateGenerator),
    ));

    let app = with_service_routes(filing_service, drafting_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "patent filing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
