pub mod schema;

pub use schema::{PulseConfig, ServerConfig};

use pulse_core::{PulseError, Result};
use std::path::{Path, PathBuf};

/// Read the dashboard settings from `path`.
///
/// A missing file is not an error: the server then listens on the built-in
/// default address. Unreadable or malformed files are.
pub fn load(path: impl AsRef<Path>) -> Result<PulseConfig> {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(
                "No pulse config at '{}'; listening on {}.",
                path.display(),
                ServerConfig::default().bind_addr()
            );
            return Ok(PulseConfig::default());
        }
        Err(e) => {
            return Err(PulseError::Config(format!(
                "reading '{}': {e}",
                path.display()
            )))
        }
    };

    toml::from_str(&raw)
        .map_err(|e| PulseError::Config(format!("'{}' is not valid pulse TOML: {e}", path.display())))
}

/// `pulse/pulse.toml` under `$XDG_CONFIG_HOME`, or under `~/.config` when
/// that is unset.
pub fn default_path() -> PathBuf {
    let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::var_os("HOME")
            .map_or_else(|| PathBuf::from("."), PathBuf::from)
            .join(".config"),
    };
    config_home.join("pulse").join("pulse.toml")
}
