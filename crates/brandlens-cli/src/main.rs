mod citations;
mod metrics;
mod observations;
mod scope_args;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::metrics::{MetricsCommands, RankingMode};
use crate::observations::ObservationCommands;
use crate::scope_args::{BrandInfoArgs, ScopeArgs};

#[derive(Debug, Parser)]
#[command(name = "brandlens")]
#[command(about = "Brand visibility metrics, rankings, and citation analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Load observation rows into the fact store
    Observations {
        #[command(subcommand)]
        command: ObservationCommands,
    },
    /// Single-brand visibility metrics
    Metrics {
        #[command(subcommand)]
        command: MetricsCommands,
    },
    /// Rank every brand in scope by total mentions
    Ranking {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Rank brands independently on each observation date
    RankingOverTime {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// List the brands observed for one prompt, model, and day
    BrandInfo {
        #[command(flatten)]
        args: BrandInfoArgs,
    },
    /// Analyze which domains the answers in scope cite
    Citations {
        #[command(flatten)]
        scope: ScopeArgs,
        /// Domain of the target brand (e.g. nike.com)
        #[arg(long)]
        domain: String,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("brandlens: no command given; see `brandlens --help`");
        return Ok(());
    };

    let config = brandlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = brandlens_db::PoolConfig::from_app_config(&config);
    let pool = brandlens_db::connect_pool(&config.database_url, pool_config)?;

    match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => {
                brandlens_db::ping(&pool).await?;
                println!("database ok");
            }
            DbCommands::Migrate => {
                let applied = brandlens_db::run_migrations(&pool).await?;
                println!("applied {applied} migration(s)");
            }
        },
        Commands::Observations { command } => match command {
            ObservationCommands::Import { path } => {
                observations::run_import(&pool, &path).await?;
            }
        },
        Commands::Metrics { command } => metrics::run_metric(&pool, command).await?,
        Commands::Ranking { scope } => {
            metrics::run_ranking(&pool, scope, RankingMode::Snapshot).await?;
        }
        Commands::RankingOverTime { scope } => {
            metrics::run_ranking(&pool, scope, RankingMode::OverTime).await?;
        }
        Commands::BrandInfo { args } => metrics::run_brand_info(&pool, &args).await?,
        Commands::Citations { scope, domain } => {
            citations::run_citations(&pool, &config, scope, &domain).await?;
        }
    }

    Ok(())
}

/// Print `data` to stdout wrapped in a `{"data": ...}` envelope.
///
/// # Errors
///
/// Returns an error if `data` cannot be serialized.
pub(crate) fn print_data<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(&serde_json::json!({ "data": data }))?;
    println!("{body}");
    Ok(())
}
