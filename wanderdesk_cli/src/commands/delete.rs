use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use wanderdesk_lib::config::AdminConfig;
use wanderdesk_lib::Resource;

#[derive(Args)]
pub struct DeleteArgs {
    /// Resource the record belongs to
    #[arg(value_parser = super::parse_resource)]
    pub resource: Resource,

    /// Record id
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub async fn run(args: &DeleteArgs, config: &AdminConfig) -> Result<()> {
    let id = super::parse_id(&args.id)?;
    let mut page = super::open_page(args.resource, config)?;
    page.request_delete(id.clone());

    if !args.yes {
        let prompt = format!("Delete {} {}? [y/N] ", args.resource, id);
        let stdin = std::io::stdin();
        if !confirm(&prompt, &mut stdin.lock(), &mut std::io::stderr())? {
            page.cancel_delete();
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    page.confirm_delete().await?;
    Ok(())
}

fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> bool {
        let mut out = Vec::new();
        confirm("Delete? ", &mut text.as_bytes(), &mut out).unwrap()
    }

    #[test]
    fn only_yes_confirms() {
        assert!(answer("y\n"));
        assert!(answer("YES\n"));
        assert!(!answer("\n"));
        assert!(!answer("no\n"));
        assert!(!answer(""));
    }
}
