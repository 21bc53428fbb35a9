//! Plain Markdown output.

use anyhow::Result;

use super::{compliance_annex, DocumentRenderer, RenderContext};
use crate::validation::ValidationResult;

/// Writes the procedure as Markdown, optionally followed by the annex
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    compliance_annex: bool,
}

impl MarkdownRenderer {
    pub fn new(compliance_annex: bool) -> Self {
        Self { compliance_annex }
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn render(
        &self,
        content: &str,
        result: &ValidationResult,
        context: &RenderContext<'_>,
    ) -> Result<Vec<u8>> {
        let mut document = content.trim_end().to_string();
        document.push('\n');

        if self.compliance_annex {
            document.push_str("\n---\n\n");
            document.push_str(&compliance_annex(result, context));
        }

        Ok(document.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
