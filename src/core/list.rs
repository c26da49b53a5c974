use crate::core::Resource;
use crate::utils::error::{BankError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ACTIONS_HEADER: &str = "Actions";
pub const ROW_ACTIONS: &str = "[Edit] [Delete]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(BankError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Expected table, csv or json".to_string(),
            }),
        }
    }
}

/// One rendered table row; `id` is what the Edit/Delete actions hand back to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<Id> {
    pub id: Id,
    pub cells: Vec<String>,
}

pub struct ListView<'a, R: Resource> {
    records: &'a [R],
}

impl<'a, R: Resource> ListView<'a, R> {
    pub fn new(records: &'a [R]) -> Self {
        Self { records }
    }

    pub fn headers() -> Vec<&'static str> {
        R::columns().iter().map(|c| c.header).collect()
    }

    pub fn rows(&self) -> Vec<Row<R::Id>> {
        let columns = R::columns();
        self.records
            .iter()
            .map(|record| Row {
                id: record.id().clone(),
                cells: columns.iter().map(|c| (c.cell)(record)).collect(),
            })
            .collect()
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(self.render_table()),
            OutputFormat::Csv => self.render_csv(),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self.records)?),
        }
    }

    pub fn render_table(&self) -> String {
        if self.records.is_empty() {
            return format!("No {} found.", R::LABELS.plural);
        }

        let mut headers: Vec<String> = Self::headers().iter().map(|h| h.to_string()).collect();
        headers.push(ACTIONS_HEADER.to_string());

        let body: Vec<Vec<String>> = self
            .rows()
            .into_iter()
            .map(|row| {
                let mut cells = row.cells;
                cells.push(ROW_ACTIONS.to_string());
                cells
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for cells in &body {
            for (i, cell) in cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut lines = vec![format_line(&headers, &widths)];
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        lines.push(separator.join("-+-"));
        for cells in &body {
            lines.push(format_line(cells, &widths));
        }
        lines.join("\n")
    }

    /// CSV export without the actions column.
    pub fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(Self::headers())?;
        for row in self.rows() {
            writer.write_record(&row.cells)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        String::from_utf8(bytes).map_err(|e| BankError::ConfigError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
