//! Standalone HTML output.
//!
//! Markdown is converted with pulldown-cmark and placed in an embedded Tera
//! page template.

use anyhow::{Context, Result};
use tera::Tera;

use super::{compliance_annex, DocumentRenderer, RenderContext};
use crate::validation::ValidationResult;

const PAGE_HTML: &str = include_str!("../../templates/report/page.html");

/// Convert markdown to HTML using pulldown-cmark
fn markdown_to_html(markdown: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let parser = Parser::new_ext(markdown, Options::all());
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Writes the procedure as a self-contained HTML page
pub struct HtmlRenderer {
    tera: Tera,
    compliance_annex: bool,
}

impl HtmlRenderer {
    pub fn new(compliance_annex: bool) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template("page.html", PAGE_HTML)
            .context("Failed to load report page template")?;
        Ok(Self {
            tera,
            compliance_annex,
        })
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(
        &self,
        content: &str,
        result: &ValidationResult,
        context: &RenderContext<'_>,
    ) -> Result<Vec<u8>> {
        let annex_html = if self.compliance_annex {
            Some(markdown_to_html(&compliance_annex(result, context)))
        } else {
            None
        };

        let mut ctx = tera::Context::new();
        ctx.insert("title", &context.title());
        ctx.insert("project_id", context.project.project_id());
        ctx.insert("system_name", context.project.system());
        ctx.insert("test_type", context.test_type.title());
        ctx.insert("generated_at", &context.timestamp());
        ctx.insert("passed", &result.passed());
        ctx.insert("coverage_pct", &format!("{:.1}", result.coverage_pct()));
        ctx.insert("body_html", &markdown_to_html(content));
        ctx.insert("annex_html", &annex_html);
        ctx.insert("version", env!("CARGO_PKG_VERSION"));

        let page = self
            .tera
            .render("page.html", &ctx)
            .context("Failed to render report page")?;

        Ok(page.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}
