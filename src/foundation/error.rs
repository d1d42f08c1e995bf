/// Convenience result type used across Layerforge.
pub type LayerforgeResult<T> = Result<T, LayerforgeError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum LayerforgeError {
    /// Invalid user-provided catalog data or generation options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested collection size exceeds the number of distinct reachable combinations.
    #[error(
        "capacity error: requested {requested} unique combinations but only {available} are possible"
    )]
    Capacity {
        /// Requested collection size.
        requested: u64,
        /// Number of distinct combinations the catalog can produce.
        available: u64,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerforgeError {
    /// Build a [`LayerforgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerforgeError::Capacity`] value.
    pub fn capacity(requested: u64, available: u64) -> Self {
        Self::Capacity {
            requested,
            available,
        }
    }

    /// Build a [`LayerforgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
