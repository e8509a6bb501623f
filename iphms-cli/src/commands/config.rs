use std::fs;

use anyhow::{Context as _, Result};
use clap::ValueEnum;
use shared::config::ClientConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Toml => "iphms.toml",
            Self::Json => "iphms.json",
        }
    }

    fn render(self, config: &ClientConfig) -> Result<String> {
        Ok(match self {
            Self::Toml => toml::to_string_pretty(config)?,
            Self::Json => serde_json::to_string_pretty(config)?,
        })
    }
}

/// Write the default configuration to `iphms.<format>` in the current directory.
///
/// # Errors
/// Returns an error if serialization or writing the file fails.
pub fn generate_config(format: ConfigFormat) -> Result<()> {
    let file_name = format.file_name();
    let serialized = format.render(&ClientConfig::with_defaults())?;
    fs::write(file_name, serialized)
        .with_context(|| format!("failed to write configuration file {file_name}"))?;
    println!("Configuration file '{file_name}' generated successfully.");
    Ok(())
}
