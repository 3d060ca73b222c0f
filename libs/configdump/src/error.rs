//! Error types for config dump inspection.

use thiserror::Error;

/// Result alias for config dump operations.
pub type Result<T> = std::result::Result<T, ConfigDumpError>;

/// Errors raised while extracting or rendering listeners.
///
/// Variants wrapping another error leave it to [`std::error::Error::source`]
/// rather than repeating it in their message.
#[derive(Debug, Error)]
pub enum ConfigDumpError {
    /// No config dump was supplied.
    #[error("config writer has not been primed")]
    NotPrimed,

    /// The raw bytes are not a config dump.
    #[error("error unmarshalling config dump")]
    Prime(#[source] prost::DecodeError),

    /// The dump has no usable listener section.
    #[error("listener dump: {0}")]
    Retrieval(String),

    /// A listener entry could not be decoded.
    #[error("unmarshal listener")]
    Decode(#[source] prost::DecodeError),

    /// The listener section decoded but held no listeners.
    #[error("no listeners found")]
    NoListeners,

    /// Writing to the output sink failed.
    #[error("failed to write listeners")]
    Render(#[from] std::io::Error),

    /// The listener schema could not be loaded for JSON rendering.
    #[error("listener schema: {0}")]
    Schema(String),

    /// JSON serialization failed.
    #[error("failed to marshal listeners")]
    Serialize(#[from] serde_json::Error),
}
