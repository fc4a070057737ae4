//! CLI subcommand implementations.

pub mod catalog;
pub mod delete;
pub mod list;
pub mod mutate;
pub mod publish;

use anyhow::{bail, Result};
use wanderdesk_lib::config::AdminConfig;
use wanderdesk_lib::types::RecordId;
use wanderdesk_lib::{config_for, AdminClient, PageController, Resource};

use crate::notifier::ConsoleNotifier;

pub type ConsolePage = PageController<AdminClient, ConsoleNotifier>;

/// clap value parser for resource names.
pub fn parse_resource(raw: &str) -> std::result::Result<Resource, String> {
    raw.parse().map_err(|_| {
        let known: Vec<&str> = Resource::ALL.iter().map(|r| r.path()).collect();
        format!("unknown resource '{}'. Known: {}", raw, known.join(", "))
    })
}

pub fn parse_id(raw: &str) -> Result<RecordId> {
    match raw.parse() {
        Ok(id) => Ok(id),
        Err(()) => bail!("record id must not be empty"),
    }
}

/// A page controller for `resource` wired to the HTTP backend.
pub fn open_page(resource: Resource, config: &AdminConfig) -> Result<ConsolePage> {
    let client = AdminClient::from_config(config)?;
    Ok(PageController::new(config_for(resource), client, ConsoleNotifier)?
        .with_limit(config.default_limit))
}
