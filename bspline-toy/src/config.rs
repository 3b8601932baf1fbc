//! Startup configuration, read from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use bspline::{DrainOrder, Params};

use crate::save::BoxErr;
use crate::state::clamp_params;

const FILE_NAME: &str = "bspline-toy.toml";

/// Initial parameters and appearance.
///
/// Every field is optional in the file; missing ones take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToyConfig {
    pub order: usize,
    pub step: f64,
    /// Per-axis distance, in curve units, within which a click removes a point.
    pub epsilon: f64,
    /// Order in which clicks queued during one frame are applied.
    pub drain_order: DrainOrder,
    /// Background color as RGB in `0.0..=1.0`.
    pub background: [f32; 3],
}

impl Default for ToyConfig {
    fn default() -> Self {
        let params = Params::default();
        ToyConfig {
            order: params.order,
            step: params.step,
            epsilon: params.epsilon,
            drain_order: params.drain_order,
            background: [0.45, 0.55, 0.60],
        }
    }
}

impl ToyConfig {
    /// Load the configuration, falling back to defaults if the file is
    /// missing or malformed.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("bad config file {}, using defaults: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no config file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), BoxErr> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("saved config to {}", path.display());
        Ok(())
    }

    /// `bspline-toy.toml` next to the executable.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."))
            .join(FILE_NAME)
    }

    /// The pass parameters this configuration starts with.
    pub fn params(&self) -> Params {
        clamp_params(Params {
            order: self.order,
            step: self.step,
            epsilon: self.epsilon,
            drain_order: self.drain_order,
            marker: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file() {
        let config: ToyConfig = toml::from_str("order = 3\ndrain_order = \"fifo\"\n").unwrap();
        assert_eq!(config.order, 3);
        assert_eq!(config.drain_order, DrainOrder::Fifo);
        assert_eq!(config.background, ToyConfig::default().background);
    }

    #[test]
    fn params_are_clamped() {
        let config = ToyConfig {
            order: 0,
            step: 5.0,
            ..ToyConfig::default()
        };
        let params = config.params();
        assert_eq!(params.order, 2);
        assert_eq!(params.step, 1.0);
    }

    #[test]
    fn round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("bspline-toy-{}.toml", std::process::id()));
        let config = ToyConfig {
            order: 5,
            epsilon: 0.25,
            ..ToyConfig::default()
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(ToyConfig::load_from_file(&path), config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = Path::new("/nonexistent/bspline-toy.toml");
        assert_eq!(ToyConfig::load_from_file(path), ToyConfig::default());
    }
}
