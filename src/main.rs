use frame_ingest::{
    app::{
        config::IngestConfig,
        constant::{PKG_NAME, PKG_VERSION},
        model::AppState,
        route::create_router,
    },
    core::ingest::Ingestor,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn core::error::Error + Send + Sync + 'static>> {
    // 加载环境变量
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = IngestConfig::load()?;

    let ingestor =
        Ingestor::new(&config.log_path, config.sync, Arc::new(config.preview_output));
    if config.create_parent_dirs {
        ingestor.ensure_parent_dir()?;
    }

    let state = Arc::new(AppState::new(ingestor));
    let app = create_router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(
        "{PKG_NAME} v{PKG_VERSION} listening on http://{}{} -> {}",
        listener.local_addr()?,
        config.ingest_path(),
        config.log_path.display()
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e}");
            core::future::pending::<()>().await
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                core::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = core::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
