use anyhow::Context;
use navmenu_server::{bind, telemetry, MenuStore, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = ServerConfig::command().get_matches();
    let config = ServerConfig::from_matches(&matches);

    telemetry::init(config.log_format).context("failed to install tracing subscriber")?;

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
        }
    };

    let (addr, server) = bind(&config, MenuStore::new(), shutdown)
        .with_context(|| format!("cannot listen on {}", config.addr))?;
    info!(%addr, body_limit = config.body_limit, "navmenu server listening");

    server.await;
    Ok(())
}
