//! Shelfview CLI - Browse and prune a product catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # First page of the catalog
//! shelf list
//!
//! # Shirts in the "clothing" category, most expensive first, page 2
//! shelf list --search shirt --category clothing --sort price_desc --page 2
//!
//! # Delete a product and show the resulting page
//! shelf delete 42
//!
//! # List categories
//! shelf categories
//!
//! # Interactive session
//! shelf browse
//! ```
//!
//! # Commands
//!
//! - `list` - Print one page of the derived product list
//! - `delete` - Delete a product, then print the page
//! - `categories` - Print every category in the catalog
//! - `browse` - Read commands from stdin and redraw after each one

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfview_catalog::CatalogConfig;

mod commands;
mod render;

use commands::ViewArgs;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "Shelfview catalog browser")]
struct Cli {
    /// Catalog service base URL (overrides `CATALOG_BASE_URL`)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of products
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Delete a product, then print the page
    Delete {
        /// Product id
        id: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print every category in the catalog
    Categories,
    /// Interactive session reading commands from stdin
    Browse,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: Option<&CatalogConfig>) -> Option<sentry::ClientInitGuard> {
    let dsn = config?.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Load configuration, applying the `--base-url` override.
fn load_config(base_url: Option<&str>) -> Result<CatalogConfig, Box<dyn std::error::Error>> {
    let config = CatalogConfig::from_env()?;
    Ok(match base_url {
        Some(raw) => config.with_base_url(raw)?,
        None => config,
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration is needed for Sentry init, which must precede tracing
    let config = load_config(cli.base_url.as_deref());
    let _sentry_guard = init_sentry(config.as_ref().ok());

    // Defaults to info level for our crates if RUST_LOG is not set.
    // Logs go to stderr; stdout carries the listing.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shelfview_cli=info,shelfview_catalog=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli.command, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &CatalogConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(base_url = %config.base_url, "Using catalog service");
    match command {
        Commands::List { view } => commands::list::list(config, &view).await?,
        Commands::Delete { id, view } => commands::list::delete(config, &id, &view).await?,
        Commands::Categories => commands::list::categories(config).await?,
        Commands::Browse => commands::browse::run(config).await?,
    }
    Ok(())
}
