//! WhatsApp campaign log table and its per-row actions

use chrono::Duration;
use std::fmt::Write;

use super::ExpandedRows;
use crate::api::{CampaignApi, FollowUp};
use crate::config::WhatsAppConfig;
use crate::forms::WhatsAppSubmitOutcome;
use crate::models::{CampaignId, WhatsAppCampaignLog, WhatsAppStatus};
use crate::notify::{Notification, Toasts};
use crate::output::{format_timestamp, truncate};

/// Action offered on a WhatsApp log row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    SendNow,
    Cancel,
    FollowUp(FollowUp),
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::SendNow => "send-now",
            RowAction::Cancel => "cancel",
            RowAction::FollowUp(FollowUp::Second) => "followup second",
            RowAction::FollowUp(FollowUp::Third) => "followup third",
        }
    }

    fn success_message(&self) -> &'static str {
        match self {
            RowAction::SendNow => "Message sent",
            RowAction::Cancel => "Removed from schedule",
            RowAction::FollowUp(FollowUp::Second) => "Second reminder sent",
            RowAction::FollowUp(FollowUp::Third) => "Third reminder sent",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            RowAction::SendNow => "Failed to send",
            RowAction::Cancel => "Failed to remove",
            RowAction::FollowUp(FollowUp::Second) => "Failed to send second",
            RowAction::FollowUp(FollowUp::Third) => "Failed to send third",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WhatsAppLogTable {
    config: WhatsAppConfig,
    logs: Vec<WhatsAppCampaignLog>,
    expanded: ExpandedRows,
}

impl WhatsAppLogTable {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            config,
            logs: Vec::new(),
            expanded: ExpandedRows::default(),
        }
    }

    pub fn with_logs(config: WhatsAppConfig, logs: Vec<WhatsAppCampaignLog>) -> Self {
        Self {
            config,
            logs,
            expanded: ExpandedRows::default(),
        }
    }

    pub fn logs(&self) -> &[WhatsAppCampaignLog] {
        &self.logs
    }

    pub fn get(&self, id: CampaignId) -> Option<&WhatsAppCampaignLog> {
        self.logs.iter().find(|l| l.id == id)
    }

    /// Refetch every log; on failure the previous rows stay
    pub async fn refresh(&mut self, api: &dyn CampaignApi, toasts: &mut Toasts) -> bool {
        match api.whatsapp_logs().await {
            Ok(logs) => {
                tracing::debug!(count = logs.len(), "Fetched WhatsApp campaign logs");
                self.logs = logs;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch WhatsApp campaign logs");
                toasts.push(Notification::error("Failed to fetch campaign logs"));
                false
            }
        }
    }

    /// Reload the rows once at least one message was scheduled
    pub async fn refresh_after_send(
        &mut self,
        outcome: &WhatsAppSubmitOutcome,
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

    fn is_followup_base(&self, log: &WhatsAppCampaignLog) -> bool {
        log.template_name == self.config.followup_template && log.status != WhatsAppStatus::Success
    }

    /// Actions offered for a row, in display order
    pub fn actions_for(&self, log: &WhatsAppCampaignLog) -> Vec<RowAction> {
        let mut actions = Vec::new();
        if log.status == WhatsAppStatus::Scheduled {
            actions.push(RowAction::SendNow);
            actions.push(RowAction::Cancel);
        }
        if self.is_followup_base(log) {
            actions.push(RowAction::FollowUp(FollowUp::Second));
            actions.push(RowAction::FollowUp(FollowUp::Third));
        }
        actions
    }

    /// Run a row action, then refetch the whole table on success
    ///
    /// Actions not offered for the row are refused without contacting the
    /// backend. `reason` is only sent with [`RowAction::Cancel`].
    pub async fn perform(
        &mut self,
        api: &dyn CampaignApi,
        id: CampaignId,
        action: RowAction,
        reason: Option<&str>,
        toasts: &mut Toasts,
    ) -> bool {
        let Some(log) = self.get(id) else {
            toasts.push(Notification::error(format!("Campaign {} not found", id)));
            return false;
        };

        if !self.actions_for(log).contains(&action) {
            toasts.push(Notification::error(format!(
                "Cannot {} campaign {} ({}, status {})",
                action.label(),
                id,
                log.template_name,
                log.status
            )));
            return false;
        }

        let result = match action {
            RowAction::SendNow => api.send_whatsapp_now(id).await.map(|_| ()),
            RowAction::Cancel => api.cancel_whatsapp_campaign(id, reason).await.map(|_| ()),
            RowAction::FollowUp(which) => api.send_whatsapp_followup(id, which).await.map(|_| ()),
        };

        match result {
            Ok(()) => {
                tracing::info!(campaign_id = id, action = action.label(), "Row action completed");
                toasts.push(Notification::success(action.success_message()));
                self.refresh(api, toasts).await;
                true
            }
            Err(e) => {
                tracing::warn!(campaign_id = id, action = action.label(), error = %e, "Row action failed");
                toasts.push(Notification::from_api_error(&e, action.failure_message()));
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if self.logs.is_empty() {
            out.push_str("No campaign logs found\n");
            out.push_str("Send your first WhatsApp campaign to see logs here\n");
            return out;
        }

        let _ = writeln!(
            out,
            "{:<6} {:<11} {:<24} {:<16} {:<20} {:<19} {:<19} {}",
            "ID", "Status", "Template", "Template ID", "Mobile Number", "Scheduled", "Sent At", "Created"
        );
        out.push_str(&"-".repeat(138));
        out.push('\n');

        for log in &self.logs {
            let marker = if self.is_expanded(log.id) { "▾" } else { "▸" };
            let sent_at = log
                .sent_at
                .as_ref()
                .map(format_timestamp)
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "{:<6} {:<11} {:<24} {:<16} {:<20} {:<19} {:<19} {} {}",
                log.id,
                log.status.as_str().to_uppercase(),
                truncate(&log.template_name, 24),
                truncate(&log.template_id, 16),
                truncate(&log.mobile_number, 20),
                format_timestamp(&log.scheduled_time),
                sent_at,
                format_timestamp(&log.created_at),
                marker
            );

            if self.is_expanded(log.id) {
                self.render_details(&mut out, log);
            }
        }

        out
    }

    fn render_details(&self, out: &mut String, log: &WhatsAppCampaignLog) {
        match log.error_message.as_deref().filter(|e| !e.is_empty()) {
            Some(error) => {
                let _ = writeln!(out, "       Error Message: {}", error);
            }
            None => {
                let _ = writeln!(out, "       No additional details available");
            }
        }

        if !log.parameters.is_empty() {
            let params: Vec<String> = log
                .parameters
                .iter()
                .map(|p| format!("{{{{{}}}}} = {}", p.name, p.value))
                .collect();
            let _ = writeln!(out, "       Parameters: {}", params.join(", "));
        }
        if let Some(reason) = &log.cancellation_reason {
            let _ = writeln!(out, "       Cancellation reason: {}", reason);
        }
        if let Some(received) = &log.received_message {
            let _ = writeln!(out, "       Last reply: {}", received);
        }

        let actions = self.actions_for(log);
        if !actions.is_empty() {
            let labels: Vec<&str> = actions.iter().map(RowAction::label).collect();
            let _ = writeln!(out, "       Actions: {}", labels.join(" | "));
        }

        if self.is_followup_base(log) {
            let _ = writeln!(
                out,
                "       Will be auto-sent: second at {} (+4 days), third at {} (+10 days)",
                format_timestamp(&(log.scheduled_time + Duration::days(4))),
                format_timestamp(&(log.scheduled_time + Duration::days(10)))
            );
        }
    }
}
