// Viewer tunables, stored as JSON in localStorage.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{clog, cwarn};

pub const CONFIG_STORAGE_KEY: &str = "av_viewer_config";

/// Zoom never goes below identity.
pub const MIN_SCALE: f64 = 1.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid viewer config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_scale must be finite and >= 1, got {0}")]
    MaxScale(f64),
    #[error("{name} must be finite and positive, got {value}")]
    Sensitivity { name: &'static str, value: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub max_scale: f64,
    /// Scale change per unit of wheel `deltaY`.
    pub wheel_sensitivity: f64,
    /// Scale change per pixel of pinch distance change.
    pub pinch_sensitivity: f64,
    /// Re-clamp the offset after a wheel step. Off keeps wheel zoom unclamped.
    pub clamp_after_wheel: bool,
    /// CSS transition used whenever no drag is in progress.
    pub transition: String,
    pub debug_log: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_scale: 4.0,
            wheel_sensitivity: 0.002,
            pinch_sensitivity: 0.01,
            clamp_after_wheel: false,
            transition: "transform 0.5s cubic-bezier(0.4, 0, 0.2, 1)".to_string(),
            debug_log: false,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: ViewerConfig = serde_json::from_str(raw)?;
        cfg.validated()
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        if !self.max_scale.is_finite() || self.max_scale < MIN_SCALE {
            return Err(ConfigError::MaxScale(self.max_scale));
        }
        for (name, value) in [
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("pinch_sensitivity", self.pinch_sensitivity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Sensitivity { name, value });
            }
        }
        Ok(self)
    }

    /// Reads the stored config, falling back to defaults when absent or invalid.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .and_then(|store| store.get_item(CONFIG_STORAGE_KEY).ok().flatten());
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(cfg) => {
                if cfg.debug_log {
                    clog(&format!("viewer config loaded: {:?}", cfg));
                }
                cfg
            }
            Err(e) => {
                cwarn(&format!("{}; using defaults", e));
                Self::default()
            }
        }
    }
}
