//! Shared builders and fixtures for integration tests

pub mod builders;
pub mod fixtures;
