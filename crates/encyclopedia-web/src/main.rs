//! Encyclopedia
//!
//! Web server and command-line interface for a small flat-file wiki.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use encyclopedia_core::{Config, EntryStore, Wiki};

mod output;
mod routes;
mod templates;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "encyclopedia")]
#[command(about = "Encyclopedia - a flat-file markdown wiki")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve {
        /// Address to listen on, e.g. 127.0.0.1:8000
        #[arg(long)]
        bind: Option<String>,
        /// Directory holding the entry files
        #[arg(long)]
        entries_dir: Option<PathBuf>,
    },
    /// List all entries
    #[command(alias = "ls")]
    List,
    /// Show configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        None => serve(config, None, None).await,
        Some(Commands::Serve { bind, entries_dir }) => serve(config, bind, entries_dir).await,
        Some(Commands::List) => {
            let store = EntryStore::open(&config.entries_dir)?;
            output.print_entries(&store.list_entries()?)
        }
        Some(Commands::Config { command }) => match command.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => output.print_config(&config),
            ConfigCommands::Path => {
                let path = cli.config.unwrap_or_else(Config::config_file_path);
                println!("{}", path.display());
                Ok(())
            }
        },
    }
}

async fn serve(
    mut config: Config,
    bind: Option<String>,
    entries_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(bind) = bind {
        config.bind_address = bind;
    }
    if let Some(dir) = entries_dir {
        config.entries_dir = dir;
    }

    init_logging(&config);

    let store = EntryStore::open(&config.entries_dir).with_context(|| {
        format!(
            "Failed to open entries directory {:?}",
            config.entries_dir
        )
    })?;
    let entries_dir = store.root().to_path_buf();
    let app = routes::router(Wiki::new(store));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_address))?;

    info!("Encyclopedia running at http://{}", config.bind_address);
    info!("Entries directory: {:?}", entries_dir);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Initialize logging to stderr
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &Config) {
    let log_level = config.log_level();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "encyclopedia_core={},encyclopedia={},tower_http={}",
            log_level, log_level, log_level
        ))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
