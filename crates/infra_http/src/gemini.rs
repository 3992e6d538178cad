//! Gemini `generateContent` adapter for the treatment advisor port

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_assessment::{AdvisorContext, TreatmentAdvisor};

use crate::client::{UpstreamClient, UpstreamConfig};

pub const DEFAULT_LLM_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    client: UpstreamClient,
    base_url: String,
    model: String,
    api_key: String,
    source_name: String,
}

impl GeminiAdvisor {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        config: UpstreamConfig,
    ) -> Result<Self, PortError> {
        let model = model.into();
        Ok(Self {
            client: UpstreamClient::new("gemini", config)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            source_name: format!("gemini:{}", model),
            model,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl DomainPort for GeminiAdvisor {}

#[async_trait]
impl TreatmentAdvisor for GeminiAdvisor {
    #[instrument(skip(self, context), fields(model = %self.model, condition = %context.primary_condition))]
    async fn narrative(&self, context: &AdvisorContext) -> Result<String, PortError> {
        let request = GenerateRequest::from_prompt(context.prompt());
        let response: GenerateResponse = self
            .client
            .post_json(&self.endpoint(), &[("key", self.api_key.as_str())], &request)
            .await?;

        let text = response.text()?;
        debug!(chars = text.len(), "Narrative generated");
        Ok(text)
    }

    fn name(&self) -> &str {
        &self.source_name
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    /// Text of the first candidate, with its parts joined
    ///
    /// # Errors
    ///
    /// `PortError::Transformation` when no candidate carries text
    pub fn text(self) -> Result<String, PortError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(PortError::transformation("No narrative text in model response"));
        }
        Ok(text.to_string())
    }
}
