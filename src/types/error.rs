use thiserror::Error;

/// Failure while turning an error context into report text.
///
/// The public `build_*` functions never return this: they log it and hand
/// back an empty string. The `try_build_*` variants expose it for callers
/// that want to tell "empty" apart from "failed".
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),
}
