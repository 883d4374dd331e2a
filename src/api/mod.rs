//! Campaign Backend API
//!
//! Client side of the marketing backend's REST surface.
//!
//! # Endpoints
//!
//! ## Email
//! - `POST /emails/campaigns/send_email/` - Send a template email campaign
//! - `POST /emails/campaigns/preview/` - Check one recipient without sending
//! - `GET /emails/campaigns/logs/` - All email campaign logs
//!
//! ## WhatsApp
//! - `POST /whatsapp/campaigns/send_message/` - Send or schedule one message
//! - `GET /whatsapp/campaigns/templates/` - Approved templates
//! - `GET /whatsapp/campaigns/contacts/` - Provider contacts
//! - `GET /whatsapp/campaigns/logs/` - All WhatsApp campaign logs
//! - `POST /whatsapp/campaigns/{id}/send_now/` - Send a scheduled message now
//! - `POST /whatsapp/campaigns/{id}/send_followup/` - Send a reminder follow-up
//! - `POST /whatsapp/campaigns/{id}/cancel/` - Remove from the schedule
//!
//! Every response is `{success: bool, data?: any, error?: string}`.

mod client;
pub mod dto;
pub mod error;
#[cfg(test)]
pub(crate) mod mock;

pub use client::BackendClient;
pub use dto::*;
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::models::{
    CampaignId, EmailCampaignLog, WhatsAppCampaignLog, WhatsAppContact, WhatsAppTemplate,
};

/// One operation per backend endpoint
///
/// Forms, log tables and the shell only talk to the backend through this
/// trait, so they can run against an in-memory double in tests.
#[async_trait]
pub trait CampaignApi: Send + Sync {
    async fn send_email_campaign(&self, request: &SendEmailRequest) -> ApiResult<EmailSendSummary>;

    async fn preview_email(&self, request: &PreviewEmailRequest) -> ApiResult<EmailPreview>;

    async fn email_logs(&self) -> ApiResult<Vec<EmailCampaignLog>>;

    async fn send_whatsapp_campaign(
        &self,
        request: &SendWhatsAppRequest,
    ) -> ApiResult<WhatsAppSendReceipt>;

    async fn whatsapp_templates(&self) -> ApiResult<Vec<WhatsAppTemplate>>;

    async fn whatsapp_contacts(&self) -> ApiResult<Vec<WhatsAppContact>>;

    async fn whatsapp_logs(&self) -> ApiResult<Vec<WhatsAppCampaignLog>>;

    async fn send_whatsapp_now(&self, id: CampaignId) -> ApiResult<serde_json::Value>;

    async fn send_whatsapp_followup(
        &self,
        id: CampaignId,
        which: FollowUp,
    ) -> ApiResult<serde_json::Value>;

    async fn cancel_whatsapp_campaign(
        &self,
        id: CampaignId,
        reason: Option<&str>,
    ) -> ApiResult<CancelReceipt>;
}
