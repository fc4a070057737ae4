use anyhow::Result;
use clap::Args;
use wanderdesk_lib::config::AdminConfig;
use wanderdesk_lib::{Layout, ListingView, PageQuery, Resource};

use crate::output::{render_listing, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Resource to list (e.g. flights, packages, gifts)
    #[arg(value_parser = super::parse_resource)]
    pub resource: Resource,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page [default: from config]
    #[arg(long)]
    pub limit: Option<u32>,
}

pub async fn run(
    args: &ListArgs,
    config: &AdminConfig,
    format: OutputFormat,
    layout: Layout,
) -> Result<()> {
    let query = requested_query(args, config)?;
    let mut page = super::open_page(args.resource, config)?.with_limit(query.limit());
    page.open_page(query.page()).await?;

    let view = ListingView::build(page.config(), page.items());
    println!(
        "{}",
        render_listing(&view, page.config(), &page.items(), format, layout)?
    );

    let pagination = page.pagination();
    eprintln!(
        "Page {} of {} ({} total)",
        pagination.page(),
        pagination.total_pages(),
        pagination.total_records()
    );
    Ok(())
}

/// The page and limit asked for on the command line, limit falling back to
/// the configured default.
fn requested_query(args: &ListArgs, config: &AdminConfig) -> Result<PageQuery> {
    let limit = args.limit.unwrap_or(config.default_limit);
    Ok(PageQuery::new(args.page, limit)?)
}
