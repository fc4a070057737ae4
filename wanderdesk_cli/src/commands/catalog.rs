use anyhow::Result;
use clap::Args;
use wanderdesk_lib::{catalog, config_for, Resource};

use crate::output::{render_fields, render_resources, OutputFormat};

#[derive(Args)]
pub struct FieldsArgs {
    /// Resource whose form fields to describe (e.g. flights, gifts)
    #[arg(value_parser = super::parse_resource)]
    pub resource: Resource,
}

pub fn run_resources(format: OutputFormat) -> Result<()> {
    println!("{}", render_resources(&catalog(), format)?);
    Ok(())
}

pub fn run_fields(args: &FieldsArgs, format: OutputFormat) -> Result<()> {
    let config = config_for(args.resource);
    println!("{}", render_fields(&config.fields, format)?);
    Ok(())
}
