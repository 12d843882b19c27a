//! Tourism Dashboard CLI
//!
//! Command-line entry point:
//! - Serve the dashboard API
//! - Render chart specifications for a view state
//! - List governorate selector options
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tourism_dashboard::api::{serve, AppState};
use tourism_dashboard::config::{generate_default_config, Config, LoggingConfig};
use tourism_dashboard::dataset::{load_dataset, Dataset};
use tourism_dashboard::pipeline::{
    governorate_options, Dashboard, DashboardState, DistributionView, GovernorateSelection,
    OptionScope, ProportionView,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tourism-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tourism in Lebanon: governorate attraction and tourism index charts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset path, overriding the config
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print both chart specifications as JSON
    Render {
        /// Governorate for the attraction proportion chart
        #[arg(long, default_value = "All")]
        governorate: String,
        /// Governorate for the tourism index chart
        #[arg(long, default_value = "All")]
        index_governorate: String,
        /// Lower tourism index bound
        #[arg(long)]
        min: Option<f64>,
        /// Upper tourism index bound
        #[arg(long)]
        max: Option<f64>,
        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },

    /// List governorate selector options
    Options {
        /// Which rows feed the selector
        #[arg(long, value_enum, default_value_t = Scope::All)]
        scope: Scope,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Scope {
    All,
    GovernorateLevel,
}

impl From<Scope> for OptionScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => OptionScope::All,
            Scope::GovernorateLevel => OptionScope::GovernorateLevel,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        command,
        config: config_path,
        dataset: dataset_path,
    } = Cli::parse();

    match command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write config to {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Serve { host, port } => {
            let (mut config, dataset) = setup(config_path.as_deref(), dataset_path.as_deref())?;
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = port {
                config.api.port = port;
            }

            let state = AppState::with_charts(Arc::new(dataset), &config.charts);
            serve(state, &config.api).await?;
        }

        Commands::Render {
            governorate,
            index_governorate,
            min,
            max,
            compact,
        } => {
            let (config, dataset) = setup(config_path.as_deref(), dataset_path.as_deref())?;
            let state = DashboardState {
                proportion: ProportionView {
                    governorate: GovernorateSelection::parse(Some(&governorate)),
                },
                distribution: DistributionView {
                    governorate: GovernorateSelection::parse(Some(&index_governorate)),
                    min,
                    max,
                },
            };

            let dashboard = Dashboard::new()
                .with_bin_count(config.charts.bin_count)
                .with_governorate_level_only(config.charts.governorate_level_only);
            let output = dashboard.render(&dataset, &state)?;

            let json = if compact {
                serde_json::to_string(&output)?
            } else {
                serde_json::to_string_pretty(&output)?
            };
            println!("{}", json);
        }

        Commands::Options { scope } => {
            let (_, dataset) = setup(config_path.as_deref(), dataset_path.as_deref())?;
            for option in governorate_options(&dataset, scope.into()) {
                println!("{}", option);
            }
        }
    }

    Ok(())
}

/// Load config, start logging and load the dataset
fn setup(config_path: Option<&Path>, dataset_path: Option<&Path>) -> anyhow::Result<(Config, Dataset)> {
    // Config messages are emitted before the configured subscriber exists
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tourism_dashboard=info".into()),
        )
        .with_writer(std::io::stderr)
        .finish();

    let mut config = tracing::subscriber::with_default(bootstrap, || match config_path {
        Some(path) => Config::load_with_env(path),
        None => Config::load_default(),
    })?;
    if let Some(path) = dataset_path {
        config.dataset.path = path.display().to_string();
    }

    init_tracing(&config.logging);
    tracing::info!("Tourism dashboard v{}", env!("CARGO_PKG_VERSION"));

    let dataset = load_dataset(&config.dataset)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset.path))?;

    Ok((config, dataset))
}

/// Initialize the tracing subscriber from logging config.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("tourism_dashboard={},tower_http=debug", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so `render` output stays valid JSON
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
