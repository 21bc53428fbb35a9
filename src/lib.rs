//! # testproc - Test Procedure Generation and Validation
//!
//! testproc drafts Factory/Site Acceptance Test procedures for industrial
//! systems with a text provider, then checks every draft deterministically
//! against the project it was written for before it is rendered.
//!
//! ## Core Concepts
//!
//! - **Projects**: a system under test with its signals and requirements
//! - **Providers**: a deterministic mock or an OpenAI-compatible live service
//! - **Validation**: signal coverage plus required document sections
//!
//! ## Modules
//!
//! - [`domain`] - Project, signal and requirement model with invariants
//! - [`validation`] - Coverage and structure checks (`validate_all`)
//! - [`prompts`] - Versioned prompt templates
//! - [`provider`] - Text provider abstraction
//! - [`generator`] - Prompt, provider call, retries and cost metadata
//! - [`render`] - HTML and Markdown output with a compliance annex
//! - [`config`] - Configuration management
//!
//! ## Example
//!
//! ```
//! use testproc::domain::{Project, Signal, SignalId, SignalType};
//! use testproc::validation::validate_all;
//!
//! let project = Project::new(
//!     "P-1",
//!     "Cooling Skid",
//!     "Workshop",
//!     vec![
//!         Signal::new(SignalId::new("SIG-TMP-01").unwrap(), SignalType::Temperature, "0-100 C"),
//!         Signal::new(SignalId::new("SIG-PRS-02").unwrap(), SignalType::Pressure, "0-10 bar"),
//!     ],
//!     vec![],
//! )
//! .unwrap();
//!
//! let result = validate_all("Test covers SIG-TMP-01 only.", &project);
//! assert!(!result.passed());
//! assert_eq!(result.coverage_pct(), 50.0);
//! assert_eq!(result.missing_signals()[0].as_str(), "SIG-PRS-02");
//! ```

pub mod config;
pub mod domain;
pub mod formatters;
pub mod generator;
pub mod pricing;
pub mod prompts;
pub mod provider;
pub mod render;
pub mod retry;
pub mod ui;
pub mod validation;
