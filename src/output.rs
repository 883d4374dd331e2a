//! Output formats for collections
//!
//! Tables are rendered by each view; this module covers the machine formats
//! (`json`, `csv`) and the shared cell helpers.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::models::{
    EmailCampaignLog, WhatsAppCampaignLog, WhatsAppContact, WhatsAppTemplate,
};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("Invalid format: {}. Use: table, json, csv", other)),
        }
    }
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8")]
    Encoding,
}

/// A record that can be written as one CSV row
pub trait CsvRow {
    fn headers() -> &'static [&'static str];
    fn record(&self) -> Vec<String>;
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_csv<R: CsvRow>(rows: &[R]) -> Result<String, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(R::headers())?;
    for row in rows {
        writer.write_record(row.record())?;
    }
    let bytes = writer.into_inner().map_err(|e| OutputError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| OutputError::Encoding)
}

/// Local wall-clock rendering used in tables, e.g. `Mar 4, 2025 10:15`
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string()
}

/// Cut a cell to `width` characters, marking the cut with `…`
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn opt_time(dt: &Option<DateTime<Utc>>) -> String {
    dt.map(|d| d.to_rfc3339()).unwrap_or_default()
}

impl CsvRow for EmailCampaignLog {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "status",
            "template_name",
            "template_id",
            "domain_name",
            "total_emails",
            "successful_emails",
            "failed_emails",
            "deliverable_emails",
            "undeliverable_emails",
            "created_at",
        ]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status.to_string(),
            self.template_name.clone(),
            self.template_id.clone(),
            self.domain_name.clone(),
            self.total_emails.to_string(),
            self.successful_emails.to_string(),
            self.failed_emails.to_string(),
            self.deliverable_list().join(";"),
            self.undeliverable_list().join(";"),
            self.created_at.to_rfc3339(),
        ]
    }
}

impl CsvRow for WhatsAppCampaignLog {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "status",
            "template_name",
            "template_id",
            "mobile_number",
            "scheduled_time",
            "sent_at",
            "error_message",
            "created_at",
        ]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.status.to_string(),
            self.template_name.clone(),
            self.template_id.clone(),
            self.mobile_number.clone(),
            self.scheduled_time.to_rfc3339(),
            opt_time(&self.sent_at),
            self.error_message.clone().unwrap_or_default(),
            self.created_at.to_rfc3339(),
        ]
    }
}

impl CsvRow for WhatsAppTemplate {
    fn headers() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn record(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone()]
    }
}

impl CsvRow for WhatsAppContact {
    fn headers() -> &'static [&'static str] {
        &["name", "phone"]
    }

    fn record(&self) -> Vec<String> {
        vec![self.name.clone(), self.phone.clone()]
    }
}
