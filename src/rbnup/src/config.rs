// SPDX-FileCopyrightText: 2026 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for rbnup.
//!
//! Config is loaded from `rbnup.toml`. Default search order:
//! 1. Path specified via `--config` CLI argument
//! 2. `./rbnup.toml`
//! 3. `~/.config/rbnup/rbnup.toml`
//! 4. `/etc/rbnup/rbnup.toml`
//!
//! A missing file falls back to defaults; a present but unreadable or
//! malformed file is a startup error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, String),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, String),
}

/// Uplink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UplinkConfig {
    /// Software identifier sent in every datagram
    pub software_id: String,
    /// Operator callsign for the status datagram (ignored by RBN Aggregator)
    pub operator_callsign: String,
    /// Operator grid square for the status datagram (ignored by RBN Aggregator)
    pub operator_grid: String,
    /// Additional 4 kHz channel window bases in Hz, merged with the builtin plan
    pub extra_channels_hz: Vec<u32>,
    /// Delay after a status datagram before the decode follows, in milliseconds
    pub status_pacing_ms: u64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            software_id: "QMTECH FT8 RX 1.0".to_string(),
            operator_callsign: "AB1CDE".to_string(),
            operator_grid: "AB12".to_string(),
            extra_channels_hz: Vec::new(),
            status_pacing_ms: 1,
            log_level: None,
        }
    }
}

/// Returns the default search paths for `rbnup.toml`
/// (current directory → XDG config → /etc).
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("rbnup.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("rbnup").join("rbnup.toml"));
    }
    paths.push(PathBuf::from("/etc/rbnup/rbnup.toml"));
    paths
}

impl UplinkConfig {
    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    /// Load from the explicit path when given, otherwise search the default
    /// paths and load the first file found. Returns `(config, path)` or
    /// `(Default::default(), None)` when no config file exists.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load_from_file(path)?, Some(path.to_path_buf())));
        }
        for path in config_search_paths() {
            if path.exists() {
                return Ok((Self::load_from_file(&path)?, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    /// Render the default configuration as an example TOML document.
    pub fn example_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_stock_receiver() {
        let cfg = UplinkConfig::default();
        assert_eq!(cfg.software_id, "QMTECH FT8 RX 1.0");
        assert_eq!(cfg.operator_callsign, "AB1CDE");
        assert_eq!(cfg.operator_grid, "AB12");
        assert_eq!(cfg.status_pacing_ms, 1);
        assert!(cfg.extra_channels_hz.is_empty());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "software_id = \"MY RX 2.0\"").unwrap();
        writeln!(file, "extra_channels_hz = [7071000]").unwrap();
        file.flush().unwrap();

        let cfg = UplinkConfig::load_from_file(file.path()).unwrap();
        assert_eq!(cfg.software_id, "MY RX 2.0");
        assert_eq!(cfg.extra_channels_hz, vec![7_071_000]);
        assert_eq!(cfg.operator_callsign, "AB1CDE");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "software_id = [not toml").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            UplinkConfig::load_from_file(file.path()),
            Err(ConfigError::Parse(_, _))
        ));
    }

    #[test]
    fn example_toml_round_trips() {
        let cfg: UplinkConfig = toml::from_str(&UplinkConfig::example_toml()).unwrap();
        assert_eq!(cfg.software_id, UplinkConfig::default().software_id);
    }
}
