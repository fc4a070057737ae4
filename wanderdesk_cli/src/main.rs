mod commands;
mod notifier;
mod output;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use wanderdesk_lib::config::AdminConfig;
use wanderdesk_lib::Layout;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "wanderdesk")]
#[command(about = "Manage travel-platform listings from the command line")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Listing layout: table or cards
    #[arg(long, default_value = "table", global = true)]
    layout: String,

    /// Config file [default: ./wanderdesk.toml if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the resources this client manages
    Resources,
    /// Describe the form fields of a resource
    Fields(commands::catalog::FieldsArgs),
    /// List records of a resource
    List(commands::list::ListArgs),
    /// Create a record
    Create(commands::mutate::CreateArgs),
    /// Update a record, starting from its current values
    Update(commands::mutate::UpdateArgs),
    /// Delete a record
    Delete(commands::delete::DeleteArgs),
    /// Publish or unpublish a record
    Publish(commands::publish::PublishArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wanderdesk=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format: OutputFormat = cli.output.parse().map_err(|e: String| anyhow!(e))?;
    let layout: Layout = cli
        .layout
        .parse()
        .map_err(|_| anyhow!("unknown layout '{}'. Valid values: table, cards", cli.layout))?;

    match &cli.command {
        Commands::Resources => commands::catalog::run_resources(format)?,
        Commands::Fields(args) => commands::catalog::run_fields(args, format)?,
        command => {
            let config = AdminConfig::load(cli.config.as_deref())?;
            tracing::debug!("Using API at {}", config.base_url);
            match command {
                Commands::List(args) => commands::list::run(args, &config, format, layout).await?,
                Commands::Create(args) => commands::mutate::run_create(args, &config).await?,
                Commands::Update(args) => commands::mutate::run_update(args, &config).await?,
                Commands::Delete(args) => commands::delete::run(args, &config).await?,
                Commands::Publish(args) => commands::publish::run(args, &config).await?,
                Commands::Resources | Commands::Fields(_) => {}
            }
        }
    }

    Ok(())
}
