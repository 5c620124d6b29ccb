//! cardio-intake server binary.
//!
//! Loads configuration, installs tracing, wires the prediction service and
//! session store into the router and serves it.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cardio_intake::adapters::{
    app_router, HttpPredictionService, HttpPredictorConfig, InMemorySessionStore, IntakeAppState,
    MockPredictionService,
};
use cardio_intake::config::{
    AppConfig, LogFormat, PredictionConfig, PredictionProvider, ServerConfig,
};
use cardio_intake::ports::{PredictionError, PredictionService};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let predictor = build_predictor(&config.prediction)?;
    let info = predictor.service_info();
    info!(provider = %info.name, model = %info.model, "prediction service ready");

    let store = InMemorySessionStore::new().with_ttl(config.intake.session_ttl());
    tokio::spawn(store.clone().run_sweeper(config.intake.sweep_interval()));

    let state = IntakeAppState::new(Arc::new(store), predictor)
        .with_max_message_chars(config.intake.max_message_chars)
        .with_prediction_timeout(config.prediction.budget());
    let app = app_router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "cardio-intake listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.environment.log_format() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

fn build_predictor(
    config: &PredictionConfig,
) -> Result<Arc<dyn PredictionService>, PredictionError> {
    match config.provider {
        PredictionProvider::Mock => Ok(Arc::new(
            MockPredictionService::new().with_default_probability(config.mock_probability),
        )),
        PredictionProvider::Http => {
            // validate() guarantees an endpoint for the http provider
            let endpoint = config.endpoint.clone().unwrap_or_default();
            let mut http = HttpPredictorConfig::new(endpoint)
                .with_timeout(config.timeout())
                .with_max_retries(config.max_retries);
            if let Some(key) = config.api_key() {
                http = http.with_api_key(key);
            }
            Ok(Arc::new(HttpPredictionService::new(http)?))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
