//! Email campaign log records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{split_list, CampaignId};

/// One email campaign run as logged by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailCampaignLog {
    pub id: CampaignId,
    #[serde(default)]
    pub domain_name: String,
    pub template_name: String,
    #[serde(default)]
    pub template_id: String,
    /// Comma-separated recipient list as submitted
    #[serde(default)]
    pub recipients: Option<String>,
    pub status: EmailStatus,
    #[serde(default)]
    pub total_emails: u64,
    #[serde(default)]
    pub successful_emails: u64,
    #[serde(default)]
    pub failed_emails: u64,
    /// Comma-separated addresses that passed verification
    #[serde(default)]
    pub deliverable_emails: Option<String>,
    /// Comma-separated addresses that failed verification
    #[serde(default)]
    pub undeliverable_emails: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl EmailCampaignLog {
    pub fn deliverable_list(&self) -> Vec<String> {
        split_list(self.deliverable_emails.as_deref())
    }

    pub fn undeliverable_list(&self) -> Vec<String> {
        split_list(self.undeliverable_emails.as_deref())
    }

    pub fn recipient_list(&self) -> Vec<String> {
        split_list(self.recipients.as_deref())
    }
}

/// Lifecycle state of an email campaign
///
/// Unknown values from newer backends are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmailStatus {
    Pending,
    Processing,
    Success,
    Failed,
    Partial,
    Other(String),
}

impl EmailStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EmailStatus::Pending => "pending",
            EmailStatus::Processing => "processing",
            EmailStatus::Success => "success",
            EmailStatus::Failed => "failed",
            EmailStatus::Partial => "partial",
            EmailStatus::Other(s) => s,
        }
    }
}

impl From<String> for EmailStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => EmailStatus::Pending,
            "processing" => EmailStatus::Processing,
            "success" => EmailStatus::Success,
            "failed" => EmailStatus::Failed,
            "partial" => EmailStatus::Partial,
            _ => EmailStatus::Other(s),
        }
    }
}

impl From<EmailStatus> for String {
    fn from(status: EmailStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_log() {
        let json = r#"{
            "id": 12,
            "domain_name": "example.com",
            "template_name": "Welcome Email",
            "template_id": "d-123",
            "recipients": "a@example.com, b@example.com",
            "status": "partial",
            "total_emails": 2,
            "successful_emails": 1,
            "failed_emails": 1,
            "deliverable_emails": "a@example.com",
            "undeliverable_emails": "b@example.com",
            "error_message": null,
            "created_at": "2025-03-04T10:15:30.123456+00:00",
            "updated_at": "2025-03-04T10:15:31Z"
        }"#;

        let log: EmailCampaignLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.id, 12);
        assert_eq!(log.status, EmailStatus::Partial);
        assert_eq!(log.deliverable_list(), vec!["a@example.com"]);
        assert_eq!(log.undeliverable_list(), vec!["b@example.com"]);
        assert_eq!(log.recipient_list().len(), 2);
        assert_eq!(log.created_at.date_naive().to_string(), "2025-03-04");
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status: EmailStatus = serde_json::from_str("\"bounced\"").unwrap();
        assert_eq!(status, EmailStatus::Other("bounced".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"bounced\"");
    }
}
