//! WhatsApp campaign records, templates and contacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{string_or_number, CampaignId};

/// One scheduled WhatsApp template message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhatsAppCampaignLog {
    pub id: CampaignId,
    pub template_name: String,
    #[serde(default)]
    pub template_id: String,
    pub mobile_number: String,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
    pub status: WhatsAppStatus,
    #[serde(default)]
    pub parameters: Vec<TemplateParameter>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    /// Last inbound message from the recipient, if any
    #[serde(default)]
    pub received_message: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a WhatsApp campaign
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WhatsAppStatus {
    Pending,
    Scheduled,
    Processing,
    Success,
    Failed,
    Cancelled,
    Other(String),
}

impl WhatsAppStatus {
    pub fn as_str(&self) -> &str {
        match self {
            WhatsAppStatus::Pending => "pending",
            WhatsAppStatus::Scheduled => "scheduled",
            WhatsAppStatus::Processing => "processing",
            WhatsAppStatus::Success => "success",
            WhatsAppStatus::Failed => "failed",
            WhatsAppStatus::Cancelled => "cancelled",
            WhatsAppStatus::Other(s) => s,
        }
    }
}

impl From<String> for WhatsAppStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => WhatsAppStatus::Pending,
            "scheduled" => WhatsAppStatus::Scheduled,
            "processing" => WhatsAppStatus::Processing,
            "success" => WhatsAppStatus::Success,
            "failed" => WhatsAppStatus::Failed,
            "cancelled" => WhatsAppStatus::Cancelled,
            _ => WhatsAppStatus::Other(s),
        }
    }
}

impl From<WhatsAppStatus> for String {
    fn from(status: WhatsAppStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for WhatsAppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named value substituted into a template placeholder (`{{name}}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateParameter {
    pub name: String,
    pub value: String,
}

impl TemplateParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Approved message template known to the messaging provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhatsAppTemplate {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

/// Address book entry from the messaging provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhatsAppContact {
    #[serde(default)]
    pub name: String,
    pub phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scheduled_log() {
        let json = r#"{
            "id": 7,
            "template_name": "payment_reminder_first",
            "template_id": "tpl-1",
            "mobile_number": "+919999999999",
            "scheduled_time": "2025-05-01T09:00:00Z",
            "sent_at": null,
            "status": "scheduled",
            "parameters": [{"name": "2", "value": "https://example.com"}],
            "created_at": "2025-04-30T18:00:00Z"
        }"#;

        let log: WhatsAppCampaignLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.status, WhatsAppStatus::Scheduled);
        assert!(log.sent_at.is_none());
        assert_eq!(log.parameters, vec![TemplateParameter::new("2", "https://example.com")]);
        assert!(log.cancellation_reason.is_none());
    }

    #[test]
    fn test_template_id_accepts_numbers() {
        let t: WhatsAppTemplate = serde_json::from_str(r#"{"id": 42, "name": "promo"}"#).unwrap();
        assert_eq!(t.id, "42");

        let t: WhatsAppTemplate =
            serde_json::from_str(r#"{"id": "abc", "name": "promo"}"#).unwrap();
        assert_eq!(t.id, "abc");
    }
}
