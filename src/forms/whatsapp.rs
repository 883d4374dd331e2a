//! WhatsApp campaign form
//!
//! Recipients are the selected provider contacts (in selection order) plus
//! one optional manually typed number. Each recipient receives one send per
//! time planned by the template's [`SchedulePolicy`].

use chrono::{DateTime, Utc};

use super::schedule::{parse_schedule_time, policy_for};
use super::FormError;
use crate::api::{CampaignApi, SendWhatsAppRequest};
use crate::config::WhatsAppConfig;
use crate::models::{WhatsAppContact, WhatsAppTemplate};
use crate::notify::Notification;

/// State of the "send WhatsApp campaign" form
#[derive(Debug, Clone)]
pub struct WhatsAppForm {
    config: WhatsAppConfig,
    templates: Vec<WhatsAppTemplate>,
    contacts: Vec<WhatsAppContact>,
    selected: Vec<String>,
    pub template_name: String,
    pub template_id: String,
    /// Raw schedule time as typed, parsed on submit
    pub scheduled_time: String,
    pub manual_number: String,
    /// Value for placeholder `{{2}}`
    pub param_one: String,
    /// Value for placeholder `{{3}}`
    pub param_two: String,
}

/// Result of submitting the WhatsApp form
#[derive(Debug, Clone)]
pub struct WhatsAppSubmitOutcome {
    /// Scheduling calls the backend accepted
    pub successful: usize,
    /// Scheduling calls that failed
    pub failed: usize,
    pub notification: Notification,
}

impl WhatsAppSubmitOutcome {
    /// At least one planned send was accepted
    pub fn succeeded(&self) -> bool {
        self.successful > 0
    }

    fn rejected(error: FormError) -> Self {
        Self {
            successful: 0,
            failed: 0,
            notification: Notification::error(error.to_string()),
        }
    }
}

impl WhatsAppForm {
    pub fn new(config: WhatsAppConfig) -> Self {
        let param = config.default_parameter_value.clone();
        Self {
            config,
            templates: Vec::new(),
            contacts: Vec::new(),
            selected: Vec::new(),
            template_name: String::new(),
            template_id: String::new(),
            scheduled_time: String::new(),
            manual_number: String::new(),
            param_one: param.clone(),
            param_two: param,
        }
    }

    /// Store fetched templates, selecting the first one if nothing is selected
    pub fn load_templates(&mut self, templates: Vec<WhatsAppTemplate>) {
        self.templates = templates;
        if self.template_name.is_empty() {
            if let Some(first) = self.templates.first() {
                self.template_name = first.name.clone();
                self.template_id = first.id.clone();
            }
        }
    }

    pub fn load_contacts(&mut self, contacts: Vec<WhatsAppContact>) {
        self.contacts = contacts;
    }

    pub fn templates(&self) -> &[WhatsAppTemplate] {
        &self.templates
    }

    pub fn contacts(&self) -> &[WhatsAppContact] {
        &self.contacts
    }

    /// Select a loaded template by name; returns false if it is unknown
    pub fn select_template(&mut self, name: &str) -> bool {
        let Some(template) = self.templates.iter().find(|t| t.name == name) else {
            return false;
        };
        self.template_name = template.name.clone();
        self.template_id = template.id.clone();
        if !self.is_triple_schedule() {
            self.reset_parameters();
        }
        true
    }

    pub fn is_triple_schedule(&self) -> bool {
        self.template_name == self.config.triple_schedule_template
    }

    pub fn toggle_contact(&mut self, phone: &str) {
        if let Some(pos) = self.selected.iter().position(|p| p == phone) {
            self.selected.remove(pos);
        } else {
            self.selected.push(phone.to_string());
        }
    }

    /// Select every contact, or clear the selection if all are selected
    pub fn toggle_all_contacts(&mut self) {
        if self.selected.len() == self.contacts.len() {
            self.selected.clear();
        } else {
            self.selected = self.contacts.iter().map(|c| c.phone.clone()).collect();
        }
    }

    pub fn selected_contacts(&self) -> &[String] {
        &self.selected
    }

    /// Selected contacts followed by the trimmed manual number, if any
    pub fn recipients(&self) -> Vec<String> {
        let mut recipients = self.selected.clone();
        let manual = self.manual_number.trim();
        if !manual.is_empty() {
            recipients.push(manual.to_string());
        }
        recipients
    }

    /// Every scheduling request this submission would issue, in order
    pub fn build_requests(&self, now: DateTime<Utc>) -> Result<Vec<SendWhatsAppRequest>, FormError> {
        if self.template_name.is_empty()
            || self.template_id.is_empty()
            || self.scheduled_time.is_empty()
        {
            return Err(FormError::MissingFields);
        }

        let base = parse_schedule_time(&self.scheduled_time, now)?;

        let recipients = self.recipients();
        if recipients.is_empty() {
            return Err(FormError::NoRecipients);
        }

        let policy = policy_for(&self.template_name, &self.config);
        let parameters = policy.parameters(&self.param_one, &self.param_two);
        let plan = policy.plan(base)?;

        Ok(recipients
            .iter()
            .flat_map(|number| {
                plan.iter().map(|at| SendWhatsAppRequest {
                    template_name: self.template_name.clone(),
                    template_id: self.template_id.clone(),
                    mobile_number: number.clone(),
                    scheduled_time: *at,
                    parameters: parameters.clone(),
                })
            })
            .collect())
    }

    /// Issue every planned send sequentially and summarize the results
    ///
    /// Every failed call, rejected or transport, counts once and the next
    /// planned send proceeds.
    pub async fn submit(&mut self, api: &dyn CampaignApi, now: DateTime<Utc>) -> WhatsAppSubmitOutcome {
        let requests = match self.build_requests(now) {
            Ok(requests) => requests,
            Err(e) => return WhatsAppSubmitOutcome::rejected(e),
        };

        let mut successful = 0;
        let mut failed = 0;

        for request in &requests {
            match api.send_whatsapp_campaign(request).await {
                Ok(receipt) => {
                    tracing::debug!(
                        campaign_id = receipt.campaign_id,
                        mobile_number = %request.mobile_number,
                        scheduled_time = %request.scheduled_time,
                        "WhatsApp message scheduled"
                    );
                    successful += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        mobile_number = %request.mobile_number,
                        error = %e,
                        "WhatsApp send failed"
                    );
                    failed += 1;
                }
            }
        }

        tracing::info!(
            template = %self.template_name,
            recipients = self.recipients().len(),
            successful,
            failed,
            "WhatsApp campaign submitted"
        );

        let notification = if successful > 0 {
            let mut message = format!("Successfully sent to {} contact(s)", successful);
            if failed > 0 {
                message.push_str(&format!(", {} failed", failed));
            }
            Notification::success(message)
        } else {
            Notification::error("Failed to send to all contacts")
        };

        self.reset();

        WhatsAppSubmitOutcome {
            successful,
            failed,
            notification,
        }
    }

    /// Back to the first template with an empty schedule and selection
    ///
    /// The manual number survives a reset.
    pub fn reset(&mut self) {
        match self.templates.first() {
            Some(first) => {
                self.template_name = first.name.clone();
                self.template_id = first.id.clone();
            }
            None => {
                self.template_name.clear();
                self.template_id.clear();
            }
        }
        self.scheduled_time.clear();
        self.selected.clear();
        self.reset_parameters();
    }

    fn reset_parameters(&mut self) {
        self.param_one = self.config.default_parameter_value.clone();
        self.param_two = self.config.default_parameter_value.clone();
    }
}
