use thiserror::Error;

/// Errors raised when building or configuring an automaton.
#[derive(Debug, Error)]
pub enum AutomatonError {
    #[error("{axis} must be at least 1, got {value}")]
    InvalidDimension { axis: &'static str, value: usize },
    #[error("grid of {width}x{height}x{depth} cells does not fit in memory")]
    VolumeOverflow {
        width: usize,
        height: usize,
        depth: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AutomatonError>;
