use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::info;
use question_relay::{build_app, config::AppConfig, run_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Variables may also come straight from the environment.
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!("relaying to {}", config.upstream.url);

    let state = AppState::from_config(&config).context("failed to set up upstream client")?;
    let app = build_app(state);

    run_server(app, config.socket_addr())
        .await
        .with_context(|| format!("server on {} failed", config.socket_addr()))
}
