use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use certdesk::cli::{self, Cli};
use certdesk::config::AppConfig;
use certdesk::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "certdesk=warn".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    let config = AppConfig::new_from_env()?;
    let state = AppState::from_config(config)?;

    if let Err(err) = cli::run(&state, args.command).await {
        error!("command failed: {}", err);
        eprintln!("{}", cli::describe_error(&err));
        std::process::exit(1);
    }

    Ok(())
}
