//! `testproc prompts`: list bundled prompt versions.

use anyhow::Result;
use colored::Colorize;

use testproc::prompts::{list_versions, DEFAULT_VERSION};

pub fn cmd_prompts() -> Result<()> {
    for (version, description) in list_versions() {
        let marker = if version == DEFAULT_VERSION {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{:<6} {}{}", version.cyan(), description, marker);
    }
    Ok(())
}
