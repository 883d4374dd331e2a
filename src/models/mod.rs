//! Campaign records as the backend sends them
//!
//! - `EmailCampaignLog`: one email campaign run and its delivery counts
//! - `WhatsAppCampaignLog`: one scheduled WhatsApp template message
//! - `WhatsAppTemplate` / `WhatsAppContact`: pick lists for the WhatsApp form
//!
//! The client never owns or persists these; they are refetched whenever a
//! view needs them.

mod email;
mod whatsapp;

pub use email::{EmailCampaignLog, EmailStatus};
pub use whatsapp::{
    TemplateParameter, WhatsAppCampaignLog, WhatsAppContact, WhatsAppStatus, WhatsAppTemplate,
};

use serde::{Deserialize, Deserializer};

/// Backend campaign identifier
pub type CampaignId = i64;

/// Split a comma-joined address list, trimming entries and dropping blanks
pub fn split_list(joined: Option<&str>) -> Vec<String> {
    joined
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Accept identifiers sent either as JSON strings or numbers
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(Some(" a@x.com, b@x.com ,, ")),
            vec!["a@x.com".to_string(), "b@x.com".to_string()]
        );
        assert!(split_list(Some("")).is_empty());
        assert!(split_list(None).is_empty());
    }
}
