//! Email campaign form

use serde::{Deserialize, Serialize};

use super::FormError;
use crate::api::{
    ApiError, CampaignApi, EmailPreview, EmailSendSummary, PreviewEmailRequest, SendEmailRequest,
};
use crate::notify::Notification;

const SEND_FAILED: &str = "Failed to send campaign";
const SEND_UNREACHABLE: &str =
    "Failed to send campaign. Please check your email provider configuration.";

/// Fields of the "send email campaign" form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailForm {
    pub domain_name: String,
    pub template_name: String,
    pub template_id: String,
    /// Comma-separated recipient addresses
    pub recipients: String,
}

/// Result of submitting the email form
#[derive(Debug, Clone)]
pub struct EmailSubmitOutcome {
    pub summary: Option<EmailSendSummary>,
    pub notification: Notification,
}

impl EmailSubmitOutcome {
    pub fn succeeded(&self) -> bool {
        self.summary.is_some()
    }
}

impl EmailForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// All four fields must be non-empty
    pub fn validate(&self) -> Result<(), FormError> {
        let fields = [
            &self.domain_name,
            &self.template_name,
            &self.template_id,
            &self.recipients,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }

    pub fn to_request(&self) -> Result<SendEmailRequest, FormError> {
        self.validate()?;
        Ok(SendEmailRequest {
            domain_name: self.domain_name.clone(),
            template_name: self.template_name.clone(),
            template_id: self.template_id.clone(),
            recipients: self.recipients.clone(),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Send the campaign; the form is cleared only when the backend accepts it
    pub async fn submit(&mut self, api: &dyn CampaignApi) -> EmailSubmitOutcome {
        let request = match self.to_request() {
            Ok(request) => request,
            Err(e) => {
                return EmailSubmitOutcome {
                    summary: None,
                    notification: Notification::error(e.to_string()),
                }
            }
        };

        match api.send_email_campaign(&request).await {
            Ok(summary) => {
                tracing::info!(
                    campaign_id = summary.campaign_id,
                    total = summary.total,
                    successful = summary.successful,
                    failed = summary.failed,
                    "Email campaign sent"
                );
                self.reset();
                EmailSubmitOutcome {
                    notification: Notification::success(format!(
                        "Campaign sent! {}/{} emails delivered successfully",
                        summary.successful, summary.total
                    )),
                    summary: Some(summary),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, template = %request.template_name, "Email campaign failed");
                let fallback = match &e {
                    ApiError::Rejected { .. } => SEND_FAILED,
                    _ => SEND_UNREACHABLE,
                };
                EmailSubmitOutcome {
                    summary: None,
                    notification: Notification::from_api_error(&e, fallback),
                }
            }
        }
    }

    /// Ask the backend what `recipient` would receive, without sending
    pub async fn preview(
        &self,
        api: &dyn CampaignApi,
        recipient: &str,
    ) -> Result<EmailPreview, Notification> {
        let fields = [&self.domain_name, &self.template_name, &self.template_id];
        if fields.iter().any(|f| f.is_empty()) || recipient.trim().is_empty() {
            return Err(Notification::error(FormError::MissingFields.to_string()));
        }

        let request = PreviewEmailRequest {
            domain_name: self.domain_name.clone(),
            template_name: self.template_name.clone(),
            template_id: self.template_id.clone(),
            recipient: recipient.trim().to_string(),
        };

        api.preview_email(&request)
            .await
            .map_err(|e| Notification::from_api_error(&e, "Failed to preview campaign"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{FailMode, MockApi};

    fn filled() -> EmailForm {
        EmailForm {
            domain_name: "example.com".to_string(),
            template_name: "Welcome Email".to_string(),
            template_id: "d-1234".to_string(),
            recipients: "a@example.com, b@example.com".to_string(),
        }
    }

    #[test]
    fn test_validate_requires_every_field() {
        assert!(filled().validate().is_ok());

        let mut form = filled();
        form.template_id.clear();
        assert_eq!(form.validate(), Err(FormError::MissingFields));

        assert_eq!(EmailForm::new().validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn test_validate_does_not_check_formats() {
        let mut form = filled();
        form.recipients = "not-an-email".to_string();
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn test_submit_success_resets_form() {
        let api = MockApi::new();
        let mut form = filled();

        let outcome = form.submit(&api).await;

        assert!(!outcome.notification.is_error());
        assert_eq!(
            outcome.notification.message,
            "Campaign sent! 2/2 emails delivered successfully"
        );
        assert_eq!(outcome.summary.unwrap().total, 2);
        assert_eq!(form, EmailForm::default());

        let sent = api.sent_emails.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipients, "a@example.com, b@example.com");
    }

    #[tokio::test]
    async fn test_submit_invalid_sends_nothing() {
        let api = MockApi::new();
        let mut form = filled();
        form.domain_name.clear();

        let outcome = form.submit(&api).await;

        assert_eq!(outcome.notification.message, "Please fill in all fields");
        assert!(api.sent_emails.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_form() {
        let api = MockApi::failing(FailMode::Rejected("Invalid template".to_string()));
        let mut form = filled();

        let outcome = form.submit(&api).await;

        assert!(outcome.notification.is_error());
        assert_eq!(outcome.notification.message, "Invalid template");
        assert_eq!(form, filled());

        let api = MockApi::failing(FailMode::Timeout);
        let outcome = form.submit(&api).await;
        assert_eq!(outcome.notification.message, SEND_UNREACHABLE);
    }

    #[tokio::test]
    async fn test_preview() {
        let api = MockApi::new();
        let preview = filled().preview(&api, " c@example.com ").await.unwrap();
        assert_eq!(preview.recipient, "c@example.com");
        assert_eq!(preview.from_email, "noreply@example.com");

        let err = filled().preview(&api, "").await.unwrap_err();
        assert!(err.is_error());
    }
}
