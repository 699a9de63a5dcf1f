use anyhow::Context;

use rxstock_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rxstock_observability::init();

    let config = AppConfig::from_env();
    let addr = config.addr;

    let services = std::sync::Arc::new(rxstock_api::app::services::build_services(&config));
    let app = rxstock_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
