use std::str::FromStr;

use anyhow::Result;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use wanderdesk_lib::{Card, FieldDescriptor, Layout, ListingView, ResourceConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "unknown output format '{}'. Valid values: table, json, csv, markdown",
                other
            )),
        }
    }
}

#[derive(Tabled, Serialize)]
struct ResourceRow {
    #[tabled(rename = "Resource")]
    #[serde(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Record")]
    #[serde(rename = "Record")]
    singular: String,
    #[tabled(rename = "Paginated")]
    #[serde(rename = "Paginated")]
    paginated: String,
    #[tabled(rename = "Publish field")]
    #[serde(rename = "Publish field")]
    publish_field: String,
    #[tabled(rename = "Fields")]
    #[serde(rename = "Fields")]
    fields: usize,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    field_type: String,
    #[tabled(rename = "Required")]
    #[serde(rename = "Required")]
    required: String,
    #[tabled(rename = "Options")]
    #[serde(rename = "Options")]
    options: String,
}

// -- Row builders --

fn build_resource_rows(configs: &[ResourceConfig]) -> Vec<ResourceRow> {
    configs
        .iter()
        .map(|c| ResourceRow {
            resource: c.resource.to_string(),
            singular: c.singular.clone(),
            paginated: yes_no(c.paginated),
            publish_field: c.publish_field.clone().unwrap_or_else(|| "-".to_string()),
            fields: c.fields.len(),
        })
        .collect()
}

fn build_field_rows(fields: &[FieldDescriptor]) -> Vec<FieldRow> {
    fields
        .iter()
        .map(|f| FieldRow {
            name: f.name.clone(),
            label: f.label.clone(),
            field_type: f.field_type.to_string(),
            required: yes_no(f.required),
            options: f
                .options
                .iter()
                .map(|o| o.value.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect()
}

fn yes_no(flag: bool) -> String {
    (if flag { "yes" } else { "no" }).to_string()
}

// -- Rendering --

fn render_rows<T: Tabled + Serialize>(rows: Vec<T>, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => Table::new(rows).to_string(),
        OutputFormat::Markdown => Table::new(rows).with(Style::markdown()).to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&rows)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(Vec::new());
            for row in &rows {
                wtr.serialize(row)?;
            }
            csv_string(wtr)?
        }
    })
}

pub fn render_resources(configs: &[ResourceConfig], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(configs)?),
        _ => render_rows(build_resource_rows(configs), format),
    }
}

pub fn render_fields(fields: &[FieldDescriptor], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(fields)?),
        _ => render_rows(build_field_rows(fields), format),
    }
}

/// Renders a listing. JSON output carries the raw records rather than the
/// display cells, so it round-trips into other tools.
pub fn render_listing<T: Serialize>(
    view: &ListingView,
    config: &ResourceConfig,
    raw: &T,
    format: OutputFormat,
    layout: Layout,
) -> Result<String> {
    if view.is_empty() && format != OutputFormat::Json {
        return Ok(format!("No {} found.", config.resource));
    }
    Ok(match (format, layout) {
        (OutputFormat::Json, _) => serde_json::to_string_pretty(raw)?,
        (OutputFormat::Csv, _) => listing_csv(view)?,
        (OutputFormat::Table, Layout::Cards) | (OutputFormat::Markdown, Layout::Cards) => {
            render_cards(&view.cards(config))
        }
        (OutputFormat::Table, Layout::Table) => listing_table(view).to_string(),
        (OutputFormat::Markdown, Layout::Table) => {
            listing_table(view).with(Style::markdown()).to_string()
        }
    })
}

fn listing_table(view: &ListingView) -> Table {
    let mut builder = Builder::default();
    builder.push_record(view.headers.iter().cloned());
    for row in &view.rows {
        builder.push_record(row.cells.iter().cloned());
    }
    builder.build()
}

fn listing_csv(view: &ListingView) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&view.headers)?;
    for row in &view.rows {
        wtr.write_record(&row.cells)?;
    }
    csv_string(wtr)
}

fn csv_string(mut wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    wtr.flush()?;
    let bytes = wtr.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}

fn render_cards(cards: &[Card]) -> String {
    let mut out = String::new();
    for card in cards {
        match card.badge {
            Some(badge) => out.push_str(&format!("== {} [{}]\n", card.title, badge)),
            None => out.push_str(&format!("== {}\n", card.title)),
        }
        let width = card.lines.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (label, value) in &card.lines {
            out.push_str(&format!("   {:<width$}  {}\n", label, value, width = width));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}
