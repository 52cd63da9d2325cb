use crate::pipeline::PassId;
use thiserror::Error;

/// Failures while reading or writing a [`crate::config::PlanetGenConfig`] file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// A pass list that cannot run in the given order.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("pass '{pass}' requires '{requires}' to run before it")]
    MissingDependency { pass: PassId, requires: PassId },
    #[error("pass '{0}' appears more than once")]
    DuplicatePass(PassId),
}
