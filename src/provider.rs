//! Text provider abstraction for producing test-procedure drafts.
//!
//! Two providers exist: a deterministic mock that renders a fixture from the
//! project, and a live provider that calls an OpenAI-compatible chat
//! completion endpoint. The set is closed; [`Provider`] dispatches between
//! them without string lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use ureq::Agent;

use crate::domain::{Project, TestType};

const MOCK_TEMPLATE: &str = include_str!("../templates/mock/procedure.md");

/// Model name reported by the mock provider
pub const MOCK_MODEL: &str = "mock";

/// Failure reported by a text provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
    #[error("Authentication failed. Check OPENAI_API_KEY env var")]
    Unauthorized,
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("Failed to render mock procedure: {0}")]
    Template(String),
}

impl ProviderError {
    /// Transport failures, rate limiting and server errors may succeed on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Transport(_) => true,
            ProviderError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Which provider to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mock,
    Live,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Mock => write!(f, "mock"),
            ProviderKind::Live => write!(f, "live"),
        }
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "live" => Ok(Self::Live),
            _ => Err(format!("Unknown provider '{}'. Valid providers: mock, live", s)),
        }
    }
}

/// Provider configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    #[serde(default)]
    pub live: LiveConfig,
}

/// Settings for the live (OpenAI-compatible) provider
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Falls back to `OPENAI_API_KEY` when unset
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl LiveConfig {
    /// Validate ranges
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!(
                "provider.live.temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            );
        }
        if !(100..=4000).contains(&self.max_tokens) {
            anyhow::bail!(
                "provider.live.max_tokens must be between 100 and 4000, got {}",
                self.max_tokens
            );
        }
        if !(5..=300).contains(&self.timeout_secs) {
            anyhow::bail!(
                "provider.live.timeout_secs must be between 5 and 300, got {}",
                self.timeout_secs
            );
        }
        Ok(())
    }
}

/// Token counts reported for one completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input + self.output
    }
}

/// Everything a provider may condition its text on
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub project: &'a Project,
    pub test_type: TestType,
}

/// Raw provider output
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    pub usage: Option<TokenUsage>,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// Trait for text providers
pub trait TextProvider {
    /// Produce the complete text for a request. Output is returned whole;
    /// nothing downstream consumes partial text.
    fn generate(&self, request: &CompletionRequest<'_>) -> Result<Completion, ProviderError>;

    fn name(&self) -> &'static str;
}

/// Deterministic provider rendering a complete procedure from the project.
#[derive(Debug, Clone, Default)]
pub struct MockProvider;

#[derive(Serialize)]
struct MockSignal {
    id: String,
    kind: &'static str,
    range: String,
    accuracy: String,
    requirements: Vec<String>,
}

/// Rough token estimate (4 bytes per token)
fn estimate_tokens(text: &str) -> u64 {
    (text.len() as u64).div_ceil(4)
}

impl TextProvider for MockProvider {
    fn generate(&self, request: &CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        let project = request.project;
        let signals: Vec<MockSignal> = project
            .signals()
            .iter()
            .map(|s| MockSignal {
                id: s.id.to_string(),
                kind: s.signal_type.label(),
                range: s.range.clone(),
                accuracy: s
                    .accuracy
                    .clone()
                    .unwrap_or_else(|| "the specified accuracy".to_string()),
                requirements: project
                    .requirements_for(&s.id)
                    .map(|r| r.id().to_string())
                    .collect(),
            })
            .collect();

        let mut context = tera::Context::new();
        context.insert("test_type", request.test_type.title());
        context.insert("project_id", project.project_id());
        context.insert("system_name", project.system());
        context.insert("environment", project.environment());
        context.insert("signal_count", &project.signal_count());
        context.insert("signals", &signals);

        let content = tera::Tera::one_off(MOCK_TEMPLATE, &context, false)
            .map_err(|e| ProviderError::Template(e.to_string()))?;

        Ok(Completion {
            usage: Some(TokenUsage {
                input: estimate_tokens(request.prompt),
                output: estimate_tokens(&content),
            }),
            content,
            model: MOCK_MODEL.to_string(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// OpenAI-compatible chat completion provider
#[derive(Debug, Clone)]
pub struct OpenaiProvider {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl OpenaiProvider {
    /// Build from config. The key comes from `api_key` (explicit) or the
    /// config, in that order.
    pub fn from_config(config: &LiveConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        let api_key = api_key
            .or_else(|| config.api_key.clone())
            .filter(|k| !k.trim().is_empty())
            .ok_or(ProviderError::MissingApiKey)?;

        validate_endpoint(&config.endpoint)?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ProviderError> {
    let url = url::Url::parse(endpoint)
        .map_err(|_| ProviderError::InvalidEndpoint(endpoint.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ProviderError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(())
}

/// Extract the completion from a chat completion response body
fn parse_chat_response(json: &serde_json::Value, fallback_model: &str) -> Result<Completion, ProviderError> {
    let choice = json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|choices| choices.first())
        .ok_or_else(|| ProviderError::Malformed("missing choices".to_string()))?;

    let content = choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or_default()
        .to_string();

    if content.trim().is_empty() {
        return Err(ProviderError::EmptyResponse("OpenAI API"));
    }

    let finish_reason = choice
        .get("finish_reason")
        .and_then(|f| f.as_str())
        .map(str::to_string);

    let usage = json.get("usage").map(|u| TokenUsage {
        input: u.get("prompt_tokens").and_then(|t| t.as_u64()).unwrap_or(0),
        output: u
            .get("completion_tokens")
            .and_then(|t| t.as_u64())
            .unwrap_or(0),
    });

    let model = json
        .get("model")
        .and_then(|m| m.as_str())
        .unwrap_or(fallback_model)
        .to_string();

    Ok(Completion {
        content,
        usage,
        model,
        finish_reason,
    })
}

impl TextProvider for OpenaiProvider {
    fn generate(&self, request: &CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": "You are an expert industrial test engineer writing formal acceptance test procedures."
                },
                {
                    "role": "user",
                    "content": request.prompt
                }
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        debug!(url = %url, model = %self.model, "sending chat completion request");

        let agent: Agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&request_body)
            .map_err(|e| match e {
                ureq::Error::Status(401, _) => ProviderError::Unauthorized,
                ureq::Error::Status(status, response) => ProviderError::Http {
                    status,
                    message: response.status_text().to_string(),
                },
                ureq::Error::Transport(transport) => ProviderError::Transport(transport.to_string()),
            })?;

        let json: serde_json::Value = response
            .into_json()
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        let completion = parse_chat_response(&json, &self.model)?;

        info!(
            model = %completion.model,
            finish_reason = completion.finish_reason.as_deref().unwrap_or("unknown"),
            "chat completion received"
        );

        Ok(completion)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

/// The closed set of providers, selected by configuration.
#[derive(Debug, Clone)]
pub enum Provider {
    Mock(MockProvider),
    Live(OpenaiProvider),
}

impl Provider {
    /// Build the configured provider. `api_key` overrides the configured key.
    pub fn from_config(config: &ProviderConfig, api_key: Option<String>) -> Result<Self, ProviderError> {
        match config.kind {
            ProviderKind::Mock => Ok(Provider::Mock(MockProvider)),
            ProviderKind::Live => Ok(Provider::Live(OpenaiProvider::from_config(
                &config.live,
                api_key,
            )?)),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Mock(_) => ProviderKind::Mock,
            Provider::Live(_) => ProviderKind::Live,
        }
    }
}

impl TextProvider for Provider {
    fn generate(&self, request: &CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        match self {
            Provider::Mock(p) => p.generate(request),
            Provider::Live(p) => p.generate(request),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Provider::Mock(p) => p.name(),
            Provider::Live(p) => p.name(),
        }
    }
}
