mod config;

pub use config::Config;

use std::path::PathBuf;

/// Returns `~/.config/placario[-dev]/` based on PLACARIO_ENV.
///
/// Set PLACARIO_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PLACARIO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("placario-dev")
    } else {
        base_dir.join("placario")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
