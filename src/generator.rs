//! Test procedure generation: prompt, provider call, metadata.
//!
//! The generator owns the retry loop and cost accounting. The text it
//! returns is complete before anything validates it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::thread;
use std::time::Instant;
use tracing::{info, warn};

use crate::domain::{Project, TestType};
use crate::pricing::calculate_cost;
use crate::prompts::{PromptBuilder, DEFAULT_VERSION};
use crate::provider::{CompletionRequest, TextProvider, TokenUsage};
use crate::retry::{decide_retry, RetryDecision, RetryPolicy};
use crate::validation::DEFAULT_REQUIRED_SECTIONS;

/// Knobs for one generation run
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub test_type: TestType,
    pub prompt_version: String,
    /// Section markers the prompt asks the provider to include
    pub required_sections: Vec<String>,
    pub retry: RetryPolicy,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            test_type: TestType::default(),
            prompt_version: DEFAULT_VERSION.to_string(),
            required_sections: DEFAULT_REQUIRED_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Facts about how a generation was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationMetadata {
    pub provider: &'static str,
    pub model: String,
    pub test_type: TestType,
    pub prompt_version: &'static str,
    pub tokens: Option<TokenUsage>,
    pub cost_usd: f64,
    pub elapsed_ms: u64,
    pub attempts: usize,
    pub finish_reason: Option<String>,
}

/// A generated procedure together with its metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub content: String,
    pub metadata: GenerationMetadata,
}

/// High-level test procedure generator
pub struct TestGenerator<P: TextProvider> {
    provider: P,
    prompts: PromptBuilder,
    options: GenerationOptions,
}

impl<P: TextProvider> TestGenerator<P> {
    pub fn new(provider: P, options: GenerationOptions) -> Result<Self> {
        Ok(Self {
            provider,
            prompts: PromptBuilder::new()?,
            options,
        })
    }

    /// Generate a procedure for `project`, retrying transient provider failures.
    pub fn generate(&self, project: &Project) -> Result<Generation> {
        let test_type = self.options.test_type;
        info!(
            project_id = project.project_id(),
            test_type = %test_type,
            signal_count = project.signal_count(),
            provider = self.provider.name(),
            "starting test generation"
        );

        let start = Instant::now();
        let (prompt, prompt_version) = self.prompts.build(
            project,
            test_type,
            &self.options.prompt_version,
            &self.options.required_sections,
        )?;

        let request = CompletionRequest {
            prompt: &prompt,
            project,
            test_type,
        };

        let mut attempts = 0;
        let completion = loop {
            attempts += 1;
            match self.provider.generate(&request) {
                Ok(completion) => break completion,
                Err(err) => match decide_retry(attempts, &err, &self.options.retry) {
                    RetryDecision::Retry(delay) => {
                        warn!(
                            attempt = attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "provider call failed, retrying"
                        );
                        thread::sleep(delay);
                    }
                    RetryDecision::GiveUp(reason) => {
                        return Err(err).with_context(|| {
                            format!(
                                "Generation failed for project {} ({})",
                                project.project_id(),
                                reason
                            )
                        });
                    }
                },
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let cost_usd = completion
            .usage
            .as_ref()
            .map(|usage| calculate_cost(&completion.model, usage))
            .unwrap_or(0.0);

        let metadata = GenerationMetadata {
            provider: self.provider.name(),
            model: completion.model,
            test_type,
            prompt_version,
            tokens: completion.usage,
            cost_usd,
            elapsed_ms,
            attempts,
            finish_reason: completion.finish_reason,
        };

        info!(
            model = %metadata.model,
            tokens = metadata.tokens.map(|t| t.total()).unwrap_or(0),
            cost_usd = metadata.cost_usd,
            elapsed_ms = metadata.elapsed_ms,
            attempts = metadata.attempts,
            "generation completed"
        );

        Ok(Generation {
            content: completion.content,
            metadata,
        })
    }
}
