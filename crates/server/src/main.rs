mod api;
mod app_config;
mod cli;
mod router;
mod session;
mod state;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command};

async fn serve(mut config: docubot_core::Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.log_summary();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let port = config.server.port;
    let idle_ttl = config.server.session_idle_ttl();
    let state = app_config::build_app_state(config);
    if let Some(ttl) = idle_ttl {
        state::spawn_session_eviction(state.clone(), ttl);
    }
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", port);
    info!("API docs at http://localhost:{}/docs", port);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Cli::parse();
    let config = app_config::load_config();

    match args.command {
        Command::Serve { host, port } => serve(config, host, port).await?,
        Command::Analyze { file, summarize, top, wordcloud, csv } => {
            cli::run_analyze(&config, &file, summarize, top, wordcloud.as_deref(), csv.as_deref())
                .await?
        }
        Command::Lookup { term } => cli::run_lookup(&config, &term.join(" ")).await?,
    }

    Ok(())
}
