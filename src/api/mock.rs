//! In-memory [`CampaignApi`] double for unit tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::CampaignApi;
use crate::models::*;

#[derive(Debug, Clone)]
pub(crate) enum FailMode {
    Rejected(String),
    Timeout,
}

impl FailMode {
    fn to_error(&self) -> ApiError {
        match self {
            FailMode::Rejected(message) => ApiError::Rejected {
                message: message.clone(),
            },
            FailMode::Timeout => ApiError::Timeout,
        }
    }
}

#[derive(Default)]
pub(crate) struct MockApi {
    pub email_logs: Mutex<Vec<EmailCampaignLog>>,
    pub whatsapp_logs: Mutex<Vec<WhatsAppCampaignLog>>,
    pub templates: Vec<WhatsAppTemplate>,
    pub contacts: Vec<WhatsAppContact>,
    pub sent_emails: Mutex<Vec<SendEmailRequest>>,
    pub sent_whatsapp: Mutex<Vec<SendWhatsAppRequest>>,
    pub actions: Mutex<Vec<String>>,
    /// Every call fails this way when set
    pub fail: Mutex<Option<FailMode>>,
    /// WhatsApp sends to these numbers fail this way
    pub fail_numbers: Mutex<Vec<(String, FailMode)>>,
    pub log_fetches: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mode: FailMode) -> Self {
        let api = Self::default();
        *api.fail.lock().unwrap() = Some(mode);
        api
    }

    fn check(&self) -> ApiResult<()> {
        match self.fail.lock().unwrap().as_ref() {
            Some(mode) => Err(mode.to_error()),
            None => Ok(()),
        }
    }

    pub fn fetches(&self) -> usize {
        self.log_fetches.load(Ordering::SeqCst)
    }

    pub fn actions(&self) -> Vec<String> {
        self.actions.lock().unwrap().clone()
    }

    pub fn sent_whatsapp(&self) -> Vec<SendWhatsAppRequest> {
        self.sent_whatsapp.lock().unwrap().clone()
    }
}

#[async_trait]
impl CampaignApi for MockApi {
    async fn send_email_campaign(&self, request: &SendEmailRequest) -> ApiResult<EmailSendSummary> {
        self.check()?;
        self.sent_emails.lock().unwrap().push(request.clone());
        let total = crate::models::split_list(Some(&request.recipients)).len() as u64;
        Ok(EmailSendSummary {
            campaign_id: 1,
            total,
            successful: total,
            failed: 0,
            status: EmailStatus::Success,
        })
    }

    async fn preview_email(&self, request: &PreviewEmailRequest) -> ApiResult<EmailPreview> {
        self.check()?;
        Ok(EmailPreview {
            recipient: request.recipient.clone(),
            deliverability: "deliverable".to_string(),
            template: PreviewTemplate {
                id: request.template_id.clone(),
                name: request.template_name.clone(),
            },
            from_email: format!("noreply@{}", request.domain_name),
        })
    }

    async fn email_logs(&self) -> ApiResult<Vec<EmailCampaignLog>> {
        self.log_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.email_logs.lock().unwrap().clone())
    }

    async fn send_whatsapp_campaign(
        &self,
        request: &SendWhatsAppRequest,
    ) -> ApiResult<WhatsAppSendReceipt> {
        self.check()?;
        let failure = self
            .fail_numbers
            .lock()
            .unwrap()
            .iter()
            .find(|(number, _)| *number == request.mobile_number)
            .map(|(_, mode)| mode.to_error());
        self.sent_whatsapp.lock().unwrap().push(request.clone());
        if let Some(error) = failure {
            return Err(error);
        }
        Ok(WhatsAppSendReceipt {
            campaign_id: self.sent_whatsapp.lock().unwrap().len() as CampaignId,
            status: WhatsAppStatus::Scheduled,
            scheduled_time: Some(request.scheduled_time),
        })
    }

    async fn whatsapp_templates(&self) -> ApiResult<Vec<WhatsAppTemplate>> {
        self.check()?;
        Ok(self.templates.clone())
    }

    async fn whatsapp_contacts(&self) -> ApiResult<Vec<WhatsAppContact>> {
        self.check()?;
        Ok(self.contacts.clone())
    }

    async fn whatsapp_logs(&self) -> ApiResult<Vec<WhatsAppCampaignLog>> {
        self.log_fetches.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.whatsapp_logs.lock().unwrap().clone())
    }

    async fn send_whatsapp_now(&self, id: CampaignId) -> ApiResult<serde_json::Value> {
        self.check()?;
        self.actions.lock().unwrap().push(format!("send_now:{}", id));
        Ok(serde_json::json!({ "campaign_id": id, "status": "success" }))
    }

    async fn send_whatsapp_followup(
        &self,
        id: CampaignId,
        which: FollowUp,
    ) -> ApiResult<serde_json::Value> {
        self.check()?;
        self.actions
            .lock()
            .unwrap()
            .push(format!("followup:{}:{}", id, which));
        Ok(serde_json::Value::Null)
    }

    async fn cancel_whatsapp_campaign(
        &self,
        id: CampaignId,
        reason: Option<&str>,
    ) -> ApiResult<CancelReceipt> {
        self.check()?;
        self.actions
            .lock()
            .unwrap()
            .push(format!("cancel:{}:{}", id, reason.unwrap_or("-")));
        Ok(CancelReceipt {
            campaign_id: id,
            status: WhatsAppStatus::Cancelled,
        })
    }
}
