//! Read-only export of the board as JSON or a Markdown report.

use crate::board::{domain::Board, ports::ExportError, snapshot::CURRENT_VERSION};
use chrono::{DateTime, SecondsFormat, Utc};
use minijinja::Environment;
use serde::{Deserialize, Serialize};

const REPORT_TEMPLATE: &str = "# Order board export

Exported {{ exportDate }} (schema {{ version }})
{% for column in columns %}
## {{ column.title }} ({{ column.items | length }})
{% for item in column.items %}
- #{{ item.id }} {{ item.text }}{% if item.modified %} _(updated {{ item.modified }})_{% endif %}
{%- else %}
_No orders_
{%- endfor %}
{% endfor %}";

/// Output format of an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// The stored blob shape plus an export date.
    #[default]
    Json,
    /// A human-readable Markdown report.
    Markdown,
}

impl ExportFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    /// Returns the media type of documents in this format.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Markdown => "text/markdown",
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output format.
    pub format: ExportFormat,
    /// Adds a human-readable `modified` field next to each epoch timestamp.
    /// Markdown reports always include it.
    pub human_readable_timestamps: bool,
}

/// A rendered export, ready to hand to a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    /// Suggested file name, e.g. `dl-orders-2026-10-16.json`.
    pub file_name: String,
    /// Output format.
    pub format: ExportFormat,
    /// Document body.
    pub contents: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardExport<'a> {
    columns: Vec<ExportColumn<'a>>,
    export_date: String,
    version: &'static str,
}

#[derive(Serialize)]
struct ExportColumn<'a> {
    id: usize,
    name: &'a str,
    title: &'a str,
    items: Vec<ExportItem<'a>>,
}

#[derive(Serialize)]
struct ExportItem<'a> {
    id: u64,
    text: &'a str,
    timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
}

/// Renders an export of `board` as of `now`. The board is not modified.
///
/// # Errors
///
/// Returns [`ExportError::Render`] when serialization or templating fails.
pub fn render_export(
    board: &Board,
    options: &ExportOptions,
    now: DateTime<Utc>,
) -> Result<ExportDocument, ExportError> {
    let readable = options.human_readable_timestamps || options.format == ExportFormat::Markdown;
    let export = BoardExport {
        columns: board
            .columns()
            .iter()
            .map(|column| ExportColumn {
                id: column.id().value(),
                name: column.definition().name(),
                title: column.title(),
                items: column
                    .items()
                    .iter()
                    .map(|item| ExportItem {
                        id: item.id().value(),
                        text: item.text().as_str(),
                        timestamp: item.timestamp().timestamp_millis(),
                        modified: readable
                            .then(|| item.timestamp().format("%Y-%m-%d %H:%M UTC").to_string()),
                    })
                    .collect(),
            })
            .collect(),
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: CURRENT_VERSION,
    };

    let contents = match options.format {
        ExportFormat::Json => serde_json::to_string_pretty(&export)
            .map_err(|err| ExportError::Render(err.to_string()))?,
        ExportFormat::Markdown => Environment::new()
            .render_str(REPORT_TEMPLATE, &export)
            .map_err(|err| ExportError::Render(err.to_string()))?,
    };

    Ok(ExportDocument {
        file_name: format!(
            "dl-orders-{}.{}",
            now.format("%Y-%m-%d"),
            options.format.extension()
        ),
        format: options.format,
        contents,
    })
}
