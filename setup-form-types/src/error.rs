/// Error type for form operations.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// User cancelled the form (Ctrl+C, Escape, etc.)
    #[error("Form cancelled by user")]
    Cancelled,

    /// Backend-specific failure (I/O, option lookup, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl FormError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
