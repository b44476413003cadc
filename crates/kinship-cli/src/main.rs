//! Kinship CLI - Command line interface for the family tree

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{completions, config as config_cmd, lineage, parent, person};
use config::{Backend, Config};
use kinship_storage::{FamilyRepository, FamilyService, JsonFileStorage};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kinship")]
#[command(author, version, about = "Family tree with validated parent relationships")]
pub struct Cli {
    /// Data directory
    #[arg(short, long, global = true, env = "KINSHIP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, global = true, value_enum)]
    pub backend: Option<Backend>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true, value_enum)]
    pub format: OutputFormat,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Data directory: flag, then config file, then the platform default
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| config.data_dir.clone())
    }

    pub fn backend(&self, config: &Config) -> Backend {
        self.backend.unwrap_or(config.backend)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage persons
    Person(person::PersonArgs),
    /// Manage parent links
    Parent(parent::ParentArgs),
    /// Show a person's ancestors and descendants by generation
    Tree {
        /// Person id
        id: String,
    },
    /// List a person's ancestors, nearest first
    Ancestors {
        /// Person id
        id: String,
    },
    /// List a person's descendants, nearest first
    Descendants {
        /// Person id
        id: String,
    },
    /// Start the HTTP API server
    Serve {
        /// Address to listen on
        #[arg(long)]
        addr: Option<String>,
    },
    /// Manage configuration
    Config(config_cmd::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the family service over the selected backend
pub struct AppContext {
    pub service: Arc<FamilyService<dyn FamilyRepository>>,
    pub config: Config,
}

impl AppContext {
    pub async fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let data_dir = cli.data_dir(&config);
        std::fs::create_dir_all(&data_dir)?;

        let repo: Arc<dyn FamilyRepository> = match cli.backend(&config) {
            Backend::Json => {
                let path = data_dir.join("persons.json");
                tracing::debug!("Using JSON file at: {:?}", path);
                Arc::new(JsonFileStorage::new(path))
            }
            Backend::Redb => open_redb(&data_dir)?,
        };

        if !repo.health_check().await? {
            anyhow::bail!("Storage at {} is not available", data_dir.display());
        }

        Ok(Self {
            service: Arc::new(FamilyService::new(repo)),
            config,
        })
    }
}

#[cfg(feature = "redb")]
fn open_redb(data_dir: &std::path::Path) -> anyhow::Result<Arc<dyn FamilyRepository>> {
    let path = data_dir.join("kinship.redb");
    tracing::debug!("Using database at: {:?}", path);
    Ok(Arc::new(kinship_storage::RedbStorage::open(&path)?))
}

#[cfg(not(feature = "redb"))]
fn open_redb(_data_dir: &std::path::Path) -> anyhow::Result<Arc<dyn FamilyRepository>> {
    anyhow::bail!("This build of kinship was compiled without the redb backend")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kinship CLI");

    // Commands that never touch storage
    match &cli.command {
        Commands::Config(args) => return config_cmd::run(args),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli, Config::load()).await?;

    match &cli.command {
        Commands::Person(args) => person::run(args, &cli, &ctx).await?,
        Commands::Parent(args) => parent::run(args, &cli, &ctx).await?,
        Commands::Tree { id } => lineage::run_tree(id, &cli, &ctx).await?,
        Commands::Ancestors { id } => lineage::run_ancestors(id, &cli, &ctx).await?,
        Commands::Descendants { id } => lineage::run_descendants(id, &cli, &ctx).await?,
        Commands::Serve { addr } => {
            let addr = addr.clone().unwrap_or_else(|| ctx.config.server_addr.clone());
            kinship_server::run_server(ctx.service.clone(), &addr).await?;
        }
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
