//! Style error types.

/// Errors that can occur when loading style manifests or building appearances.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// Failed to read the manifest from disk.
    #[error("failed to read style manifest: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse style manifest: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// An appearance was declared without a name.
    #[error("appearance name must not be empty")]
    EmptyName,
}
