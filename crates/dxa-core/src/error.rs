//! Error types for the core model

/// Errors raised while building core model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Namespace prefix is neither `tcm` nor `ish`
    #[error("unknown content namespace: '{0}'")]
    UnknownNamespace(String),

    /// Binary reference string is empty
    #[error("binary reference is empty")]
    EmptyReference,
}
