use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use wanderdesk_lib::config::AdminConfig;
use wanderdesk_lib::types::FileUpload;
use wanderdesk_lib::{AdminError, ListingForm, Resource};

#[derive(Args)]
pub struct CreateArgs {
    /// Resource to add a record to
    #[arg(value_parser = super::parse_resource)]
    pub resource: Resource,

    #[command(flatten)]
    pub values: ValueArgs,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Resource the record belongs to
    #[arg(value_parser = super::parse_resource)]
    pub resource: Resource,

    /// Record id
    pub id: String,

    #[command(flatten)]
    pub values: ValueArgs,
}

#[derive(Args)]
pub struct ValueArgs {
    /// Field value as name=value (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Upload a file into a file field as name=PATH (repeatable)
    #[arg(long = "file", value_name = "NAME=PATH")]
    pub file: Vec<String>,
}

pub async fn run_create(args: &CreateArgs, config: &AdminConfig) -> Result<()> {
    let mut page = super::open_page(args.resource, config)?;
    page.open_create();
    fill(page.form_mut(), &args.values)?;
    submit(&mut page).await
}

pub async fn run_update(args: &UpdateArgs, config: &AdminConfig) -> Result<()> {
    let id = super::parse_id(&args.id)?;
    let mut page = super::open_page(args.resource, config)?;
    page.open_edit(&id).await?;
    fill(page.form_mut(), &args.values)?;
    submit(&mut page).await
}

fn fill(form: Option<&mut ListingForm>, values: &ValueArgs) -> Result<()> {
    let form = form.ok_or_else(|| anyhow!("form did not open"))?;
    for pair in &values.set {
        let (name, raw) = split_pair(pair)?;
        if let Err(e) = form.set_input(name, raw) {
            return Err(describe(e, form));
        }
    }
    for pair in &values.file {
        let (name, path) = split_pair(pair)?;
        let path = PathBuf::from(path);
        let upload = FileUpload::from_path(&path)
            .with_context(|| format!("could not read {}", path.display()))?;
        form.attach_file(name, upload)?;
    }
    Ok(())
}

async fn submit(page: &mut super::ConsolePage) -> Result<()> {
    match page.submit_form().await {
        Ok(()) => Ok(()),
        Err(err @ AdminError::ValidationFailed(_)) => match page.form() {
            Some(form) => Err(describe(err, form)),
            None => Err(err.into()),
        },
        Err(err) => Err(err.into()),
    }
}

/// Spells out every flagged field for validation failures.
fn describe(err: AdminError, form: &ListingForm) -> anyhow::Error {
    if !matches!(err, AdminError::ValidationFailed(_)) || form.errors().is_empty() {
        return err.into();
    }
    let lines: Vec<String> = form
        .errors()
        .iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect();
    anyhow!("{}\n{}", err, lines.join("\n"))
}

fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => bail!("expected NAME=VALUE, got '{}'", pair),
    }
}
