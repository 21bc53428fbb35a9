//! Domain model: projects, signals and requirements.
//!
//! Values are validated when constructed and read-only afterwards; an
//! invalid project is reported as a [`ProjectError`] and never exists.

pub mod lint;
pub mod project;
pub mod requirement;
pub mod sample;
pub mod signal;

pub use lint::{lint_project, untraced_signals};
pub use project::{Project, ProjectError, TestType};
pub use requirement::{Priority, Requirement};
pub use sample::{sample_project, SAMPLE_PROJECT_JSON};
pub use signal::{Signal, SignalId, SignalType};
