//! `testproc generate`: generate, validate and render one procedure.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use testproc::config::Config;
use testproc::domain::{Project, TestType};
use testproc::formatters::{format_generation_metadata, format_validation_report};
use testproc::generator::{GenerationOptions, TestGenerator};
use testproc::provider::{Provider, ProviderKind};
use testproc::render::{output_file_name, OutputFormat, RenderContext};
use testproc::ui::{self, colors};
use testproc::validation::Validator;

use super::api_key_from_env;

/// Flags for `generate`; `None` means "use the config value"
pub struct GenerateArgs {
    pub project: PathBuf,
    pub test_type: Option<TestType>,
    pub provider: Option<ProviderKind>,
    pub prompt_version: Option<String>,
    pub out: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub allow_failed: bool,
    pub json: bool,
}

/// Returns whether validation passed.
pub fn cmd_generate(config: &Config, args: GenerateArgs) -> Result<bool> {
    let project = Project::load(&args.project)?;

    let mut provider_config = config.provider.clone();
    if let Some(kind) = args.provider {
        provider_config.kind = kind;
    }
    let api_key = provider_config.live.api_key.clone().or_else(api_key_from_env);
    let provider = Provider::from_config(&provider_config, api_key)
        .context("Failed to configure text provider")?;

    let options = GenerationOptions {
        test_type: args.test_type.unwrap_or(config.generation.test_type),
        prompt_version: args
            .prompt_version
            .unwrap_or_else(|| config.generation.prompt_version.clone()),
        required_sections: config.validation.required_sections.clone(),
        retry: config.generation.retry.clone(),
    };
    let test_type = options.test_type;

    let generator = TestGenerator::new(provider, options)?;

    let pb = if args.json {
        indicatif::ProgressBar::hidden()
    } else {
        ui::spinner(format!(
            "Generating {} for {}",
            test_type,
            project.project_id()
        ))
    };
    let generation = generator.generate(&project);
    pb.finish_and_clear();
    let generation = generation?;

    let result = Validator::new(config.validation.clone()).validate(&generation.content, &project);

    let mut written: Option<PathBuf> = None;
    if result.passed() || args.allow_failed {
        let format = args.format.unwrap_or(config.output.format);
        let renderer = format.renderer(config.output.compliance_annex)?;
        let context = RenderContext::new(&project, test_type).with_generation(&generation.metadata);
        let bytes = renderer.render(&generation.content, &result, &context)?;

        let dir = args.out.unwrap_or_else(|| config.output.resolved_dir());
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let path = dir.join(output_file_name(
            project.project_id(),
            test_type,
            renderer.extension(),
        ));
        fs::write(&path, bytes)
            .with_context(|| format!("Failed to write document to {}", path.display()))?;

        info!(path = %path.display(), format = %format, "document written");
        written = Some(path);
    }

    if args.json {
        let output = serde_json::json!({
            "metadata": generation.metadata,
            "validation": result,
            "output": written.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(result.passed());
    }

    println!(
        "{} Generated {} procedure for {}",
        ui::status_icon(true),
        test_type,
        colors::identifier(project.project_id())
    );
    println!("{}", format_generation_metadata(&generation.metadata));
    println!();
    println!("{}", format_validation_report(&result));
    println!();

    match written {
        Some(path) => println!(
            "{} Wrote {}",
            "→".cyan(),
            colors::success(&path.display().to_string())
        ),
        None => println!(
            "{} Validation failed; document not rendered (use --allow-failed to render anyway)",
            ui::status_icon(false)
        ),
    }

    Ok(result.passed())
}
