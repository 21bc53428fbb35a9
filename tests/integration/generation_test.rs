//! End-to-end generation with the mock provider

use crate::support::builders::ProjectBuilder;

use testproc::domain::{sample_project, SignalType, TestType};
use testproc::generator::{GenerationOptions, TestGenerator};
use testproc::provider::{MockProvider, Provider, ProviderConfig};
use testproc::render::{OutputFormat, RenderContext};
use testproc::validation::validate_all;

#[test]
fn test_mock_generation_validates_for_every_test_type() {
    let project = sample_project().unwrap();
    for test_type in TestType::ALL {
        let options = GenerationOptions {
            test_type,
            ..GenerationOptions::default()
        };
        let generation = TestGenerator::new(MockProvider, options)
            .unwrap()
            .generate(&project)
            .unwrap();
        assert!(generation.content.contains(test_type.title()));

        let result = validate_all(&generation.content, &project);
        assert!(result.passed(), "{}: {:?}", test_type, result.errors());
        assert_eq!(result.coverage_pct(), 100.0);
    }
}

#[test]
fn test_mock_generation_scales_with_signals() {
    let mut builder = ProjectBuilder::new("P-BIG").with_system("Water Treatment Skid");
    for i in 0..25 {
        builder = builder.with_signal(&format!("AI-{:03}", i), SignalType::Analog);
    }
    let project = builder.with_requirement("REQ-01", &["AI-000"]).build();

    let provider = Provider::from_config(&ProviderConfig::default(), None).unwrap();
    let generation = TestGenerator::new(provider, GenerationOptions::default())
        .unwrap()
        .generate(&project)
        .unwrap();

    let result = validate_all(&generation.content, &project);
    assert!(result.passed());
    assert_eq!(result.covered_signals().len(), 25);
}

#[test]
fn test_generated_document_renders_in_both_formats() {
    let project = sample_project().unwrap();
    let generation = TestGenerator::new(MockProvider, GenerationOptions::default())
        .unwrap()
        .generate(&project)
        .unwrap();
    let result = validate_all(&generation.content, &project);
    let context = RenderContext::new(&project, TestType::Fat).with_generation(&generation.metadata);

    let html = OutputFormat::Html
        .renderer(true)
        .unwrap()
        .render(&generation.content, &result, &context)
        .unwrap();
    let html = String::from_utf8(html).unwrap();
    assert!(html.contains("status-passed"));
    assert!(html.contains("| Model |") || html.contains("<td>Model</td>"));

    let markdown = OutputFormat::Markdown
        .renderer(false)
        .unwrap()
        .render(&generation.content, &result, &context)
        .unwrap();
    assert_eq!(
        String::from_utf8(markdown).unwrap().trim_end(),
        generation.content.trim_end()
    );
}
