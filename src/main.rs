use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

use event_lead_ingest::config::Config;
use event_lead_ingest::constants::DEFAULT_DATA_DIR;
use event_lead_ingest::loader::Loader;
use event_lead_ingest::logging;
use event_lead_ingest::storage::{PgStorage, Storage};
use event_lead_ingest::tagger::{IndustryTagger, NoopTagger, OpenAiTagger};

#[derive(Parser)]
#[command(name = "event_lead_ingest")]
#[command(about = "Load event, company and people CSV exports into Postgres")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the Events, Companies and People tables if missing
    SetupDb,
    /// Normalize the CSV files and insert them
    Load {
        /// Directory holding events_info.csv, company_info.csv and people_info.csv
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
        /// Do not call the industry classifier; events are stored untagged
        #[arg(long)]
        skip_tagging: bool,
    },
    /// Run setup-db then load
    Run {
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,
        #[arg(long)]
        skip_tagging: bool,
    },
}

impl Commands {
    fn needs_tagger(&self) -> bool {
        match self {
            Commands::SetupDb => false,
            Commands::Load { skip_tagging, .. } | Commands::Run { skip_tagging, .. } => !skip_tagging,
        }
    }
}

async fn load(
    data_dir: &Path,
    config: &Config,
    storage: Arc<dyn Storage>,
) -> anyhow::Result<()> {
    let tagger: Arc<dyn IndustryTagger> = match &config.tagger {
        Some(tagger_config) => Arc::new(
            OpenAiTagger::new(tagger_config).context("Failed to build industry tagger client")?,
        ),
        None => {
            warn!("Industry tagging disabled; events will be stored without tags");
            Arc::new(NoopTagger)
        }
    };

    info!(data_dir = %data_dir.display(), "📥 Loading input files");
    let loader = Loader::new(storage, tagger);
    let report = loader
        .run_dir(data_dir)
        .await
        .with_context(|| format!("Failed to read input from {}", data_dir.display()))?;

    info!(
        failed_rows = report.total_failed(),
        tagging_failures = report.tagging_failures,
        revenue_failures = report.revenue_failures,
        "✅ Load finished"
    );
    Ok(())
}

async fn execute(command: &Commands, config: &Config, storage: Arc<dyn Storage>) -> anyhow::Result<()> {
    match command {
        Commands::SetupDb => {
            storage.create_schema().await.context("Failed to create tables")?;
        }
        Commands::Load { data_dir, .. } => {
            load(data_dir, config, storage).await?;
        }
        Commands::Run { data_dir, .. } => {
            storage.create_schema().await.context("Failed to create tables")?;
            load(data_dir, config, storage).await?;
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.command.needs_tagger()).context("Failed to load configuration")?;

    let storage = Arc::new(
        PgStorage::connect(&config.database)
            .await
            .context("Failed to connect to the database")?,
    );

    let result = execute(&cli.command, &config, storage.clone()).await;
    storage.close().await;
    result
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _guard = logging::init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}
