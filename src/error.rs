use serde::Serialize;
use thiserror::Error;

/// Main error type for the Doodle-Compositor library
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the external decode/probe/encode tooling
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Video decode failed: {reason}")]
    DecodeFailed { reason: String },

    #[error("No frames extracted")]
    NoFramesExtracted,

    #[error("Frame rate probe failed: {reason}")]
    ProbeFailed { reason: String },

    #[error("Frame rate not parseable: {output:?}")]
    ProbeUnparsable { output: String },

    #[error("Video encode failed: {reason}")]
    EncodeFailed { reason: String },

    #[error("External tool not available: {tool}")]
    ToolUnavailable { tool: String },
}

/// Errors from the per-frame image filters
#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Failed to load frame image: {path}")]
    LoadFailed { path: String },

    #[error("Failed to save frame image: {path}")]
    SaveFailed { path: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using PipelineError
pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Codec(CodecError::NoFramesExtracted) => "No frames extracted".to_string(),
            Self::Codec(CodecError::ToolUnavailable { tool }) => {
                format!("'{}' was not found. Please install FFmpeg.", tool)
            }
            Self::Filter(FilterError::LoadFailed { path }) => {
                format!(
                    "Could not load frame '{}'. The decode step may have produced a corrupt image.",
                    path
                )
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }

    /// Convert into the report shape returned at the service boundary
    pub fn to_report(&self) -> FailureReport {
        FailureReport {
            error: self.user_message(),
        }
    }
}

/// Structured failure report: the only error shape that leaves the pipeline
/// boundary. Serialized as `{"error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub error: String,
}
