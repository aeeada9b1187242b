//! Report configuration files
//!
//! A TOML file with optional `[grid]` and `[export]` tables; anything left
//! out keeps its built-in default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thirdnight_core::ReportConfig;
use tracing::debug;

/// Load and validate the configuration, or the defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    let Some(path) = path else {
        return Ok(ReportConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    debug!(
        path = %path.display(),
        rooms = config.grid.room_count(),
        skip_rows = config.export.skip_rows,
        "loaded config"
    );
    Ok(config)
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<ReportConfig> {
    let config: ReportConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}
