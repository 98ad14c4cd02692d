use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Main configuration for the Doodle-Compositor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scratch and output directory layout
    pub staging: StagingConfig,

    /// Output encoder settings
    pub encoder: EncoderConfig,

    /// Overlay caching settings
    pub overlay: OverlayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            staging: StagingConfig::default(),
            encoder: EncoderConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.encoder.validate()?;
        self.overlay.validate()?;
        Ok(())
    }
}

/// Directory roles used while a job is in flight
///
/// The scratch root holds per-job raw-frame and processed-frame staging;
/// the output directory receives the final encoded artifact. Staging is
/// cleared at the start of each run, output is not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Root directory for per-job frame staging
    pub scratch_root: PathBuf,

    /// Directory for final encoded outputs
    pub output_dir: PathBuf,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            scratch_root: PathBuf::from("scratch"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Output encoder settings
///
/// Defaults are the fixed quality configuration the pipeline was tuned
/// with: H.264, slow preset, CRF 16, yuv420p.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Video codec passed to the external encoder
    pub codec: String,

    /// Encoder speed/quality preset
    pub preset: String,

    /// Constant-rate-factor quality target (0-51, lower is higher quality)
    pub crf: u8,

    /// Output pixel format
    pub pix_fmt: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            preset: "slow".to_string(),
            crf: 16,
            pix_fmt: "yuv420p".to_string(),
        }
    }
}

impl EncoderConfig {
    fn validate(&self) -> Result<()> {
        if self.crf > 51 {
            return Err(ConfigError::InvalidValue {
                key: "encoder.crf".to_string(),
                value: self.crf.to_string(),
            }
            .into());
        }

        if self.codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "encoder.codec".to_string(),
                value: self.codec.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Overlay caching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// How many consecutive frames share one doodle layer
    pub frames_per_update: usize,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            frames_per_update: 6,
        }
    }
}

impl OverlayConfig {
    fn validate(&self) -> Result<()> {
        if self.frames_per_update == 0 {
            return Err(ConfigError::InvalidValue {
                key: "overlay.frames_per_update".to_string(),
                value: self.frames_per_update.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
