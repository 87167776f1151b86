mod app;
mod commands;
mod line;
mod reply;
mod responder;
mod settings;
mod teams;
mod webhook;

use crate::app::App;
use crate::settings::Settings;
use anyhow::Context;
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    // A missing .env file is fine; the real environment still applies.
    dotenv::dotenv().ok();
    let settings = Settings::from_env()?;

    env_logger::Builder::new()
        .filter_level(settings.log_level)
        .format_timestamp_secs()
        .init();

    let app = Arc::new(App::new(&settings));
    info!(
        "answering for civil dates in {}, upstream timeout {:?}, odds {}",
        app.responder.zone().name(),
        app.responder.upstream_timeout(),
        if settings.odds_api_key.is_some() { "enabled" } else { "not configured" },
    );

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("could not bind {}", settings.bind_addr))?;
    info!("listening on {} (POST /callback)", settings.bind_addr);

    axum::serve(listener, webhook::router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("webhook server stopped")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("could not listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("mlbbot {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "mlbbot - LINE bot answering with MLB games and point spreads

Usage:
  mlbbot
  mlbbot --help
  mlbbot --version

Commands understood in chat:
  今日賽事 / 今日赛事   today's games and scores
  明日賽事 / 明日赛事   tomorrow's games
  明日賠率 / 明日赔率   tomorrow's point spreads

Environment (a .env file is read if present):
  CHANNEL_ACCESS_TOKEN      LINE channel access token (required)
  CHANNEL_SECRET            LINE channel secret (required)
  ODDS_API_KEY              The Odds API key (optional)
  PORT                      Listen port (default 8000)
  BIND_HOST                 Listen address (default 0.0.0.0)
  MLBBOT_TIMEZONE           Civil time zone for dates (default Asia/Taipei)
  MLBBOT_HTTP_TIMEOUT_SECS  Timeout for every upstream call (default 10)
  MLBBOT_LOG                Log level (default info)
  MLB_SCHEDULE_URL          Schedule API base URL
  ODDS_API_URL              Odds API base URL
  LINE_API_URL              LINE API base URL"
}
