//! urlsentry entrypoint: load config and classifier once, then serve HTTP
//! until Ctrl+C.

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use urlsentry::{
    config::ServiceConfig,
    logging::StructuredLogger,
    model::{Classifier, OnnxClassifier},
    server::{self, AppState},
    service::ClassificationService,
};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    StructuredLogger::init(&config.log).context("installing log subscriber")?;

    info!(
        bind = %config.bind_addr,
        model_path = %config.model_path.display(),
        probe = ?config.probe.mode,
        "urlsentry starting"
    );

    let classifier: Option<Arc<dyn Classifier>> = match OnnxClassifier::load(&config.model_path) {
        Ok(Some(c)) => Some(Arc::new(c)),
        Ok(None) => None,
        Err(e) => {
            error!(path = %config.model_path.display(), error = %e, "failed to load model; classification disabled");
            None
        }
    };

    let service = ClassificationService::from_config(&config, classifier)
        .context("building reputation probe")?;
    let app = server::router(Arc::new(AppState::new(service)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("urlsentry stopped");
    Ok(())
}
