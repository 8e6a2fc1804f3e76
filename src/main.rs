//! # Portfolio CLI (`folio`)
//!
//! Renders, queries, and serves the portfolio page.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./config/folio.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio tags` | List every tag used by the catalog |
//! | `folio search [query] [--tag T]` | List matching projects in catalog order |
//! | `folio render [--output PATH]` | Write the full HTML page |
//! | `folio export [--output PATH]` | Write the catalog as JSON |
//! | `folio theme show\|set\|toggle` | Inspect or change the stored theme |
//! | `folio serve` | Start the HTTP server |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use portfolio::{config, export, search, server, site, theme_cmd};
use portfolio_core::models::{FilterState, TagSelection};
use portfolio_core::theme::Theme;

/// Portfolio CLI: project cards with search, tag filtering, and a
/// persisted light/dark theme.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist, built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "folio",
    about = "Portfolio: project cards with search, tag filtering, and a persisted theme",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/folio.toml")]
    config: PathBuf,

    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tag index, one tag per line.
    Tags,

    /// Search the catalog.
    ///
    /// Matches the query case-insensitively against title, description,
    /// bullets, and tags. Results keep catalog order.
    Search {
        /// Free-text query. Empty matches everything.
        query: Option<String>,

        /// Only projects carrying this tag (`all` for no restriction).
        #[arg(long)]
        tag: Option<String>,

        /// Print the structured response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render the full HTML page.
    Render {
        /// Output file. Prints to stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Pre-fill the search field.
        #[arg(long)]
        query: Option<String>,

        /// Pre-select a tag.
        #[arg(long)]
        tag: Option<String>,
    },

    /// Export the catalog and tag index as JSON.
    Export {
        /// Output file. Prints to stdout when omitted.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Inspect or change the persisted theme.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Start the HTTP server on `[server].bind`.
    Serve,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the stored theme (`light` when unset).
    Show,
    /// Store a theme.
    Set {
        /// `light` or `dark`.
        theme: Theme,
    },
    /// Flip between light and dark.
    Toggle,
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("portfolio=debug,folio=debug,info")
        } else {
            EnvFilter::new("portfolio=info,folio=info,warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let cfg = config::load_or_default(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Tags => {
            search::run_tags(&cfg)?;
        }
        Commands::Search { query, tag, json } => {
            search::run_search(&cfg, query, tag, json)?;
        }
        Commands::Render { output, query, tag } => {
            let state = FilterState::new(
                TagSelection::from_param(tag.as_deref()),
                query.unwrap_or_default(),
            );
            site::run_render(&cfg, output.as_deref(), &state)?;
        }
        Commands::Export { output } => {
            export::run_export(&cfg, output.as_deref())?;
        }
        Commands::Theme { action } => match action {
            ThemeAction::Show => theme_cmd::run_theme_show(&cfg)?,
            ThemeAction::Set { theme } => theme_cmd::run_theme_set(&cfg, theme)?,
            ThemeAction::Toggle => theme_cmd::run_theme_toggle(&cfg)?,
        },
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
