//! Campaign Backend REST Client
//!
//! HTTP client for the marketing backend. One request per call: no retry,
//! no caching, no batching.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use super::CampaignApi;
use crate::config::BackendConfig;
use crate::models::{
    CampaignId, EmailCampaignLog, WhatsAppCampaignLog, WhatsAppContact, WhatsAppTemplate,
};

/// reqwest-backed implementation of [`CampaignApi`]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the configured base URL and request timeout
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send::<(), T>(Method::GET, path, None).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn send<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let url = self.url(path);
        let request_id = Uuid::new_v4().to_string();

        tracing::debug!(request_id = %request_id, method = %method, url = %url, "Sending backend request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Content-Type", "application/json")
            .header("X-Request-Id", &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(e, &url))?;

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            status = status.as_u16(),
            "Backend responded"
        );

        if !status.is_success() {
            let error = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&text)
                .ok()
                .and_then(|envelope| envelope.error);
            return Err(ApiError::Status {
                status: status.as_u16(),
                error,
                body: text,
            });
        }

        decode_envelope(&text)
    }
}

/// Unwrap a 2xx `{success, data?, error?}` body
pub(crate) fn decode_envelope<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(ApiError::Rejected {
            message: envelope.error.unwrap_or_default(),
        });
    }

    match envelope.data {
        Some(data) => Ok(data),
        // Endpoints with free-form payloads may legitimately omit `data`
        None => serde_json::from_value(serde_json::Value::Null)
            .map_err(|_| ApiError::Decode("response is missing `data`".to_string())),
    }
}

#[async_trait]
impl CampaignApi for BackendClient {
    async fn send_email_campaign(&self, request: &SendEmailRequest) -> ApiResult<EmailSendSummary> {
        self.post("/emails/campaigns/send_email/", request).await
    }

    async fn preview_email(&self, request: &PreviewEmailRequest) -> ApiResult<EmailPreview> {
        self.post("/emails/campaigns/preview/", request).await
    }

    async fn email_logs(&self) -> ApiResult<Vec<EmailCampaignLog>> {
        self.get("/emails/campaigns/logs/").await
    }

    async fn send_whatsapp_campaign(
        &self,
        request: &SendWhatsAppRequest,
    ) -> ApiResult<WhatsAppSendReceipt> {
        self.post("/whatsapp/campaigns/send_message/", request).await
    }

    async fn whatsapp_templates(&self) -> ApiResult<Vec<WhatsAppTemplate>> {
        self.get("/whatsapp/campaigns/templates/").await
    }

    async fn whatsapp_contacts(&self) -> ApiResult<Vec<WhatsAppContact>> {
        self.get("/whatsapp/campaigns/contacts/").await
    }

    async fn whatsapp_logs(&self) -> ApiResult<Vec<WhatsAppCampaignLog>> {
        self.get("/whatsapp/campaigns/logs/").await
    }

    async fn send_whatsapp_now(&self, id: CampaignId) -> ApiResult<serde_json::Value> {
        self.post(
            &format!("/whatsapp/campaigns/{}/send_now/", id),
            &serde_json::json!({}),
        )
        .await
    }

    async fn send_whatsapp_followup(
        &self,
        id: CampaignId,
        which: FollowUp,
    ) -> ApiResult<serde_json::Value> {
        self.post(
            &format!("/whatsapp/campaigns/{}/send_followup/", id),
            &FollowUpRequest { which },
        )
        .await
    }

    async fn cancel_whatsapp_campaign(
        &self,
        id: CampaignId,
        reason: Option<&str>,
    ) -> ApiResult<CancelReceipt> {
        let body = CancelRequest {
            reason: reason.map(str::to_string),
        };
        self.post(&format!("/whatsapp/campaigns/{}/cancel/", id), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> BackendClient {
        BackendClient::new(&BackendConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 10,
        })
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let c = client("http://localhost:8000/api/");
        assert_eq!(c.base_url(), "http://localhost:8000/api");
        assert_eq!(
            c.url("/emails/campaigns/logs/"),
            "http://localhost:8000/api/emails/campaigns/logs/"
        );
        assert_eq!(
            c.url("whatsapp/campaigns/3/cancel/"),
            "http://localhost:8000/api/whatsapp/campaigns/3/cancel/"
        );
    }

    #[test]
    fn test_decode_success_envelope() {
        let summary: EmailSendSummary = decode_envelope(
            r#"{"success": true, "message": "ok", "data": {"campaign_id": 4, "total": 3, "successful": 2, "failed": 1, "status": "partial"}}"#,
        )
        .unwrap();
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn test_decode_rejected_envelope() {
        let err = decode_envelope::<EmailSendSummary>(
            r#"{"success": false, "error": "SendGrid key missing"}"#,
        )
        .unwrap_err();
        assert_eq!(err.backend_message(), Some("SendGrid key missing"));
    }

    #[test]
    fn test_decode_missing_data() {
        let value: serde_json::Value = decode_envelope(r#"{"success": true}"#).unwrap();
        assert!(value.is_null());

        let err = decode_envelope::<EmailSendSummary>(r#"{"success": true}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode_envelope::<serde_json::Value>("<html>502</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
