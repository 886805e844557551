use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::config::ServerConfig;
use todo_server::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;
    init_logging(&config.log)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    todo_server::run(listener, todo_server::service(&config.jwt_secret)).await?;
    Ok(())
}
