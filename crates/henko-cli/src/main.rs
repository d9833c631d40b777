mod job;
mod scheduler;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "henko")]
#[command(about = "Bot de producto del día para la tienda Henko Lencería")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one scrape-and-send cycle immediately, then exit
    Once,
    /// Run the persistent daily scheduler (the default)
    Start,
    /// Show the most recent send history
    History {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = henko_core::load_or_init(&cli.config)?;
    config.apply_env_overrides();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Once) => job::run_cycle(&config).await,
        Some(Commands::History { limit }) => show_history(&config, limit),
        Some(Commands::Start) | None => scheduler::run(config).await,
    }
}

fn show_history(config: &henko_core::BotConfig, limit: usize) -> anyhow::Result<()> {
    let store = henko_core::HistoryStore::new(
        config.history_path.clone(),
        henko_core::DEFAULT_HISTORY_CAP,
    );
    let events = store.recent(limit)?;
    if events.is_empty() {
        println!("no hay productos enviados todavía");
        return Ok(());
    }
    for event in events {
        println!(
            "{}  {}  {}  {}",
            event.sent_at.format("%Y-%m-%d %H:%M"),
            event.product_id,
            event.price,
            event.name
        );
        println!("    {}", event.link);
    }
    Ok(())
}
