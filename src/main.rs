use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vidsieve::app::{AppContext, AppState};
use vidsieve::cli::{commands, Cli, Commands};
use vidsieve::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Search { query, pages, json } => {
            let ctx = AppContext::new(config)?;
            let mut state = ctx.load_state()?;
            commands::search(&ctx, &mut state, &query, pages.max(1), json).await?;
        }
        Commands::Terms { list, action } => {
            let mut state = AppState::load(AppContext::open_store(&config)?)?;
            commands::terms(&mut state, list, action)?;
        }
        Commands::Favorites { action } => {
            let mut state = AppState::load(AppContext::open_store(&config)?)?;
            commands::favorites(&mut state, action)?;
        }
        Commands::History { action } => {
            let mut state = AppState::load(AppContext::open_store(&config)?)?;
            commands::history(&mut state, action)?;
        }
        Commands::Tui => {
            let ctx = AppContext::new(config)?;
            vidsieve::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
