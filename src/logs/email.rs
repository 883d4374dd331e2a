//! Email campaign log table

use std::fmt::Write;

use super::ExpandedRows;
use crate::api::CampaignApi;
use crate::forms::EmailSubmitOutcome;
use crate::models::{CampaignId, EmailCampaignLog};
use crate::notify::{Notification, Toasts};
use crate::output::{format_timestamp, truncate};

#[derive(Debug, Clone, Default)]
pub struct EmailLogTable {
    logs: Vec<EmailCampaignLog>,
    expanded: ExpandedRows,
}

impl EmailLogTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logs(logs: Vec<EmailCampaignLog>) -> Self {
        Self {
            logs,
            expanded: ExpandedRows::default(),
        }
    }

    pub fn logs(&self) -> &[EmailCampaignLog] {
        &self.logs
    }

    /// Refetch every log; on failure the previous rows stay
    pub async fn refresh(&mut self, api: &dyn CampaignApi, toasts: &mut Toasts) -> bool {
        match api.email_logs().await {
            Ok(logs) => {
                tracing::debug!(count = logs.len(), "Fetched email campaign logs");
                self.logs = logs;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch email campaign logs");
                toasts.push(Notification::error("Failed to fetch campaign logs"));
                false
            }
        }
    }

    /// Reload the rows once a send went through so the new campaign shows up
    pub async fn refresh_after_send(
        &mut self,
        outcome: &EmailSubmitOutcome,
        api: &dyn CampaignApi,
        toasts: &mut Toasts,
    ) -> bool {
        outcome.succeeded() && self.refresh(api, toasts).await
    }

    pub fn toggle(&mut self, id: CampaignId) -> bool {
        self.expanded.toggle(id)
    }

    pub fn is_expanded(&self, id: CampaignId) -> bool {
        self.expanded.contains(id)
    }

    pub fn expand_all(&mut self) {
        self.expanded.expand_all(self.logs.iter().map(|l| l.id));
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.logs.is_empty() {
            out.push_str("No campaign logs found\n");
            out.push_str("Send your first email campaign to see logs here\n");
            return out;
        }

        let _ = writeln!(
            out,
            "{:<6} {:<11} {:<22} {:<18} {:<16} {:>6} {:>7} {:>6}  {}",
            "ID", "Status", "Template", "Domain", "Template ID", "Total", "Success", "Failed", "Created"
        );
        out.push_str(&"-".repeat(118));
        out.push('\n');

        for log in &self.logs {
            let marker = if self.is_expanded(log.id) { "▾" } else { "▸" };
            let _ = writeln!(
                out,
                "{:<6} {:<11} {:<22} {:<18} {:<16} {:>6} {:>7} {:>6}  {} {}",
                log.id,
                log.status.as_str().to_uppercase(),
                truncate(&log.template_name, 22),
                truncate(&log.domain_name, 18),
                truncate(&log.template_id, 16),
                log.total_emails,
                log.successful_emails,
                log.failed_emails,
                format_timestamp(&log.created_at),
                marker
            );

            if self.is_expanded(log.id) {
                render_details(&mut out, log);
            }
        }

        out
    }
}

fn render_details(out: &mut String, log: &EmailCampaignLog) {
    let deliverable = log.deliverable_list();
    let undeliverable = log.undeliverable_list();

    let _ = writeln!(out, "       Deliverable ({}):", deliverable.len());
    if deliverable.is_empty() {
        let _ = writeln!(out, "         none");
    }
    for email in &deliverable {
        let _ = writeln!(out, "         {}", email);
    }

    let _ = writeln!(out, "       Undeliverable ({}):", undeliverable.len());
    if undeliverable.is_empty() {
        let _ = writeln!(out, "         none");
    }
    for email in &undeliverable {
        let _ = writeln!(out, "         {}", email);
    }

    if let Some(error) = log.error_message.as_deref().filter(|e| !e.is_empty()) {
        let _ = writeln!(out, "       Error: {}", error);
    }
}
