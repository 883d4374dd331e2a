//! Data Transfer Objects
//!
//! Request bodies and response payloads for the campaign backend.
//! Every response is wrapped in the `{success, data?, error?}` envelope.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::models::{CampaignId, EmailStatus, TemplateParameter, WhatsAppStatus};

/// Response envelope shared by all backend endpoints
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

// ============================================
// EMAIL DTOs
// ============================================

/// Body of `POST /emails/campaigns/send_email/`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SendEmailRequest {
    pub domain_name: String,
    pub template_name: String,
    pub template_id: String,
    /// Comma-separated recipient addresses
    pub recipients: String,
}

/// Delivery counts reported after an email campaign was sent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailSendSummary {
    pub campaign_id: CampaignId,
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub status: EmailStatus,
}

/// Body of `POST /emails/campaigns/preview/`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PreviewEmailRequest {
    pub domain_name: String,
    pub template_name: String,
    pub template_id: String,
    pub recipient: String,
}

/// What a single recipient would receive, without sending anything
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailPreview {
    pub recipient: String,
    /// "deliverable", "undeliverable" or "unknown"
    pub deliverability: String,
    pub template: PreviewTemplate,
    pub from_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewTemplate {
    pub id: String,
    pub name: String,
}

// ============================================
// WHATSAPP DTOs
// ============================================

/// Body of `POST /whatsapp/campaigns/send_message/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SendWhatsAppRequest {
    pub template_name: String,
    pub template_id: String,
    pub mobile_number: String,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub scheduled_time: DateTime<Utc>,
    pub parameters: Vec<TemplateParameter>,
}

/// Acknowledgement of a WhatsApp send or schedule request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhatsAppSendReceipt {
    pub campaign_id: CampaignId,
    pub status: WhatsAppStatus,
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
}

/// Which reminder of the payment series to send immediately
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FollowUp {
    Second,
    Third,
}

impl FollowUp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUp::Second => "second",
            FollowUp::Third => "third",
        }
    }
}

impl std::fmt::Display for FollowUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FollowUp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "second" | "2" => Ok(FollowUp::Second),
            "third" | "3" => Ok(FollowUp::Third),
            other => Err(format!("Invalid follow-up: {}. Use: second, third", other)),
        }
    }
}

/// Body of `POST /whatsapp/campaigns/{id}/send_followup/`
#[derive(Debug, Clone, Serialize)]
pub struct FollowUpRequest {
    pub which: FollowUp,
}

/// Body of `POST /whatsapp/campaigns/{id}/cancel/`
#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Acknowledgement of a cancelled WhatsApp campaign
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancelReceipt {
    pub campaign_id: CampaignId,
    pub status: WhatsAppStatus,
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2025-01-02T03:04:05.000Z`
pub fn serialize_iso_millis<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}
