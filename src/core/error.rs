use thiserror::Error;

/// Errors that can occur during configuration, validation, or emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ZugferdError {
    /// Document version outside the supported 1–3 range.
    #[error("unsupported document version: {0}")]
    UnsupportedVersion(u8),

    /// Unknown compliance mode.
    #[error("unsupported document mode: {0}")]
    UnsupportedMode(String),

    /// Mode/version combination that no profile defines.
    #[error("incompatible mode/version combination: {mode} requires version >= 2, got {version}")]
    IncompatibleMode { mode: String, version: u8 },

    /// One or more business-rule violations.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A monetary field that cannot be parsed as an exact decimal.
    #[error("malformed amount in {field}: {value:?}")]
    Amount { field: String, value: String },

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}
