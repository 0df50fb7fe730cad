//! Error type shared by the animated components.

/// Errors raised when an animated component is constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NebulaError {
    /// A configuration value violates a precondition of the component.
    #[error("invalid {field}: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl NebulaError {
    /// Shorthand for building an [`NebulaError::InvalidConfig`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the nebula crates.
pub type Result<T> = std::result::Result<T, NebulaError>;
