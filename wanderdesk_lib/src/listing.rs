//! Turns fetched records into table rows or cards.

use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;
use wanderdesk_api::types::{Record, RecordId};

use crate::resources::ResourceConfig;

/// How a listing is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Table,
    Cards,
}

impl FromStr for Layout {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Layout::Table),
            "cards" | "card" => Ok(Layout::Cards),
            _ => Err(()),
        }
    }
}

/// One listing row: display cells in column order plus the affordance data
/// (id for edit/delete, publish state for the toggle).
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ListingRow {
    #[serde(skip)]
    pub id: Option<RecordId>,
    pub cells: Vec<String>,
    pub published: Option<bool>,
}

/// A card: title line, optional status badge and labelled lines.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Card {
    pub title: String,
    pub badge: Option<&'static str>,
    pub lines: Vec<(String, String)>,
}

/// Records of one resource, normalised for display.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ListingView {
    pub headers: Vec<String>,
    pub rows: Vec<ListingRow>,
}

impl ListingView {
    pub fn build(config: &ResourceConfig, records: &[Record]) -> Self {
        let headers = config.columns.iter().map(|c| c.header.clone()).collect();
        let rows = records
            .iter()
            .map(|record| {
                let published = config.published(record);
                let cells = config
                    .columns
                    .iter()
                    .map(|column| {
                        if config.publish_field.as_deref() == Some(column.key.as_str()) {
                            publish_badge(published).unwrap_or_default().to_string()
                        } else {
                            format_cell(record.get(&column.key))
                        }
                    })
                    .collect();
                ListingRow {
                    id: record.id(),
                    cells,
                    published,
                }
            })
            .collect();
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Card layout. The first non-ID column titles the card; the publish
    /// column becomes the badge.
    pub fn cards(&self, config: &ResourceConfig) -> Vec<Card> {
        let title_index = config
            .columns
            .iter()
            .position(|c| c.key != "id")
            .unwrap_or(0);
        self.rows
            .iter()
            .map(|row| {
                let title = row.cells.get(title_index).cloned().unwrap_or_default();
                let lines = config
                    .columns
                    .iter()
                    .zip(&row.cells)
                    .enumerate()
                    .filter(|(i, (column, cell))| {
                        *i != title_index
                            && !cell.is_empty()
                            && config.publish_field.as_deref() != Some(column.key.as_str())
                    })
                    .map(|(_, (column, cell))| (column.header.clone(), cell.clone()))
                    .collect();
                Card {
                    title,
                    badge: publish_badge(row.published),
                    lines,
                }
            })
            .collect()
    }
}

fn publish_badge(published: Option<bool>) -> Option<&'static str> {
    published.map(|p| if p { "Published" } else { "Draft" })
}

/// Plain-text rendering of one record value.
pub fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => (if *b { "yes" } else { "no" }).to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| format_cell(Some(v)))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}
