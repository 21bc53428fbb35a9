//! Range checks for loaded configuration.

use anyhow::Result;

use super::{Config, OutputConfig};

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dir.trim().is_empty() {
            anyhow::bail!("output.dir must not be empty");
        }
        Ok(())
    }
}

impl Config {
    /// Validate every section. Called on load; invalid values fail loading.
    pub fn validate(&self) -> Result<()> {
        self.provider.live.validate()?;
        self.generation.retry.validate()?;
        self.validation.validate()?;
        self.output.validate()
    }
}
