mod operation_limits;

pub use operation_limits::OperationLimits;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration of the execution engine.
#[derive(Debug, Default, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Structural limits checked before an operation executes.
    pub operation_limits: OperationLimits,
    /// Adds the error code to the `extensions` of every error in the response.
    pub expose_error_codes: bool,
    /// Emits a trace event for every resolved field. Noisy, meant for debugging.
    pub field_tracing: bool,
}

impl Config {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }
}
