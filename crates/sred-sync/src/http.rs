//! HTTP client for the report AI server's health, generate, improve and feedback endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sred_core::{FeedbackRecord, GeneratedSections, ProjectInput, Section, SectionSelector};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
    pub model_error: Option<String>,
    /// `"ai"` when a fine-tuned model is loaded, `"template"` otherwise.
    pub mode: String,
}

/// `POST /generate` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub section: SectionSelector,
    pub project: ProjectInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub mode: String,
    pub sections: GeneratedSections,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImproveResponse {
    pub success: bool,
    pub mode: String,
    pub improved: String,
}

#[derive(Serialize)]
struct ImproveRequest<'a> {
    text: &'a str,
    section: String,
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    accepted: u64,
}

/// Client for the report AI server.
pub struct AiClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for AiClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL.to_string())
    }
}

impl AiClient {
    /// `base_url` should be like `http://localhost:5000` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<HealthStatus, SyncError> {
        let url = format!("{}/health", self.base_url);
        info!(url = %url, "checking report server health");
        let resp = self.client.get(&url).send().await?;
        let health: HealthStatus = decode(resp).await?;
        info!(mode = %health.mode, model_loaded = health.model_loaded, "report server healthy");
        Ok(health)
    }

    /// Draft T661 sections remotely (model or server-side templates).
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, SyncError> {
        let url = format!("{}/generate", self.base_url);
        info!(url = %url, section = request.section.as_str(), "requesting generation");
        let resp = self.client.post(&url).json(request).send().await?;
        let result: GenerateResponse = decode(resp).await?;
        info!(mode = %result.mode, "generation complete");
        Ok(result)
    }

    pub async fn improve(&self, text: &str, section: Section) -> Result<ImproveResponse, SyncError> {
        let url = format!("{}/improve", self.base_url);
        let body = ImproveRequest {
            text,
            section: section.line().to_string(),
        };
        info!(url = %url, line = section.line(), "requesting improvement");
        let resp = self.client.post(&url).json(&body).send().await?;
        let result: ImproveResponse = decode(resp).await?;
        info!(mode = %result.mode, "improvement complete");
        Ok(result)
    }

    /// Pull all feedback the server holds.
    pub async fn pull_feedback(&self) -> Result<Vec<FeedbackRecord>, SyncError> {
        let url = format!("{}/feedback", self.base_url);
        info!(url = %url, "pulling feedback");
        let resp = self.client.get(&url).send().await?;
        let records: Vec<FeedbackRecord> = decode(resp).await?;
        info!(count = records.len(), "pulled feedback");
        Ok(records)
    }

    /// Push feedback records. Returns the number accepted by the server.
    pub async fn push_feedback(&self, records: &[FeedbackRecord]) -> Result<u64, SyncError> {
        let url = format!("{}/feedback", self.base_url);
        info!(url = %url, count = records.len(), "pushing feedback");
        let resp = self.client.post(&url).json(records).send().await?;
        let result: PushResponse = decode(resp).await?;
        info!(accepted = result.accepted, "push complete");
        Ok(result.accepted)
    }
}

/// Read a successful response body as `T`; anything else becomes [`SyncError::Server`].
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, SyncError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SyncError::Server {
            status: status.as_u16(),
            body,
        });
    }
    parse_body(&resp.text().await?)
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = AiClient::new("http://localhost:5000/".into());
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(AiClient::default().base_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn health_parses_template_mode() {
        let json = r#"{
            "status": "ok",
            "model_loaded": false,
            "model_error": "Model not found at ./ai/output/merged",
            "mode": "template"
        }"#;
        let health: HealthStatus = serde_json::from_str(json).unwrap();
        assert!(!health.model_loaded);
        assert_eq!(health.mode, "template");
        assert!(health.model_error.is_some());
    }

    #[test]
    fn generate_request_shape() {
        let request = GenerateRequest {
            section: SectionSelector::Line246,
            project: ProjectInput {
                why_not_standard: "no method existed".into(),
                ..Default::default()
            },
            max_tokens: None,
            temperature: Some(0.5),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["section"], "246");
        assert_eq!(json["project"]["whyNotStandard"], "no method existed");
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["temperature"], 0.5);
    }

    #[test]
    fn generate_response_with_partial_sections() {
        let json = r#"{
            "success": true,
            "mode": "ai",
            "sections": { "line244": "LINE 244 - ..." }
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert!(resp.sections.line242.is_none());
        assert_eq!(resp.sections.get(Section::Uncertainty), Some("LINE 244 - ..."));
    }

    #[test]
    fn improve_request_uses_line_number() {
        let body = ImproveRequest {
            text: "draft",
            section: Section::Advancement.line().to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["section"], "242");
        assert_eq!(json["text"], "draft");
    }

    #[test]
    fn malformed_body_is_a_json_error() {
        let err = parse_body::<HealthStatus>("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
        assert!(err.to_string().starts_with("JSON parse error"));

        let err = parse_body::<PushResponse>(r#"{"accepted": "three"}"#).unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
        assert_eq!(parse_body::<PushResponse>(r#"{"accepted": 3}"#).unwrap().accepted, 3);
    }

    #[test]
    fn feedback_array_roundtrip() {
        let json = r#"[{
            "id": "fb-1",
            "report_id": "rpt-1",
            "section": "advancement",
            "paragraph_index": 0,
            "paragraph": "The technological advancement sought was...",
            "rating": "up",
            "created_at": "2026-10-16T09:00:00Z"
        }]"#;
        let records: Vec<FeedbackRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 1);
        let back = serde_json::to_string(&records).unwrap();
        let again: Vec<FeedbackRecord> = serde_json::from_str(&back).unwrap();
        assert_eq!(records, again);
    }
}
