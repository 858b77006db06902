use rag_assistant::api::{create_router, AppState};
use rag_assistant::cli;
use rag_assistant::infrastructure::{AppConfig, OllamaSessionFactory};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Arc::new(AppConfig::from_env());

    // Arguments mean a one-shot CLI run; otherwise serve HTTP indefinitely.
    if std::env::args().len() > 1 {
        return cli::run(config).await;
    }

    let sessions = Arc::new(OllamaSessionFactory::new(config.clone()));
    let state = AppState::new(config.clone(), sessions);
    let app = create_router(state);

    let addr = SocketAddr::new(config.host.parse()?, config.port);
    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
