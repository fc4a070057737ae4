use anyhow::Result;
use clap::Args;
use wanderdesk_lib::config::AdminConfig;
use wanderdesk_lib::Resource;

#[derive(Args)]
pub struct PublishArgs {
    /// Resource the record belongs to
    #[arg(value_parser = super::parse_resource)]
    pub resource: Resource,

    /// Record id
    pub id: String,

    /// Unpublish instead
    #[arg(long)]
    pub off: bool,
}

pub async fn run(args: &PublishArgs, config: &AdminConfig) -> Result<()> {
    let id = super::parse_id(&args.id)?;
    let mut page = super::open_page(args.resource, config)?;
    page.set_published(&id, !args.off).await?;
    Ok(())
}
