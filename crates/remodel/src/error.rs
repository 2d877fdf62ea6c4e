use thiserror::Error;

/// Failures surfaced to callers of the conversion API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A custom mapping was rejected at registration time.
    #[error("invalid mapping: {0}")]
    InvalidMapping(String),

    #[error("cannot create instance of {ty}: {reason}")]
    InstanceCreation { ty: String, reason: String },

    /// No converter handles the pair.
    #[error("no converter from {from} to {to}")]
    ConversionImpossible { from: String, to: String },

    /// A structural converter was given a target with the wrong generic arity.
    #[error("{converter} cannot convert to {to}: {reason}")]
    UnsupportedTarget { converter: &'static str, to: String, reason: String },

    /// Two donor keys became equal after key conversion.
    #[error("duplicate key `{key}` while converting to {to}")]
    DuplicateKey { key: String, to: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    pub fn invalid_mapping(message: impl Into<String>) -> Self {
        Self::InvalidMapping(message.into())
    }

    pub fn impossible(from: impl ToString, to: impl ToString) -> Self {
        Self::ConversionImpossible { from: from.to_string(), to: to.to_string() }
    }
}

// ─────────────────────────────────────────────────────────────────────────────

/// Raised by accessor bodies. The engine logs it and skips the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{method}] {message}")]
pub struct AccessError {
    pub method:  String,
    pub message: String,
}

impl AccessError {
    pub fn new(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self { method: method.into(), message: message.into() }
    }
}
