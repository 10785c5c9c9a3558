use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::domain::Level;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("GEMINI_API_KEY value is missing")]
    MissingApiKey,
    #[error("Gemini API call failed: {0}")]
    Request(String),
    #[error("Gemini API returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GeneratorError {
    fn from(value: reqwest::Error) -> Self {
        Self::Request(value.to_string())
    }
}

/// Produces the raw `(sentence @ Verdict) | ...` string for an article.
#[async_trait]
pub trait StatementGenerator: Send + Sync {
    async fn generate_statements(&self, article: &str, level: Level)
        -> Result<String, GeneratorError>;
}

pub fn build_prompt(article: &str, level: Level) -> String {
    format!(
        "# Article Content:\n{article}\n\n\
         # Difficulty: {level}\n\n\
         Generate 4 statements based on the text:\n\
         - 1 fake statement (False)\n\
         - 3 true statements (True)\n\n\
         # Rules\n\
         - Sentences must not exceed 25 words.\n\
         - The fake statement must be first.\n\
         - Use the difficulty level to control subtlety.\n\n\
         # Output Format (Strictly Adhere to this):\n\
         (fake_sentence @ False) | (fact_1 @ True) | (fact_2 @ True) | (fact_3 @ True)"
    )
}

pub struct GeminiClient {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(
        http: Client,
        api_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key,
            model: model.into(),
            temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text parts of the first candidate.
pub(crate) fn response_text(res: GenerateContentResponse) -> Option<String> {
    let content = res.candidates.into_iter().next()?.content?;
    let text: String = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    (!text.trim().is_empty()).then_some(text)
}

#[async_trait]
impl StatementGenerator for GeminiClient {
    async fn generate_statements(
        &self,
        article: &str,
        level: Level,
    ) -> Result<String, GeneratorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GeneratorError::MissingApiKey)?;

        let prompt = build_prompt(article, level);
        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        debug!(model = %self.model, %level, prompt_len = prompt.len(), "calling gemini");
        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            error!(%status, detail = %detail, "gemini call rejected");
            return Err(GeneratorError::Request(format!("status {status}: {detail}")));
        }

        let parsed: GenerateContentResponse = res.json().await?;
        response_text(parsed).ok_or(GeneratorError::EmptyResponse)
    }
}

#[cfg(test)]
#[path = "tests/gemini_tests.rs"]
mod tests;
