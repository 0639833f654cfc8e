use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the installer backend.
/// Every fatal failure surfaces as an `InstallerError`; the recoverable
/// mod-loader outcome travels as data through `ProcessOutput` instead.
#[derive(Debug, Error)]
pub enum InstallerError {
    // ── User abort ──────────────────────────────────────
    // Not a fault: the top-level handler exits cleanly on this.
    #[error("installation declined by user")]
    UserDeclined,

    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Archive ─────────────────────────────────────────
    #[error("Zip extraction error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid archive entry path: {0}")]
    UnsafeArchiveEntry(String),
}

/// Convenience alias used throughout the crate.
pub type InstallerResult<T> = Result<T, InstallerError>;

impl From<std::io::Error> for InstallerError {
    fn from(source: std::io::Error) -> Self {
        InstallerError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl InstallerError {
    /// Whether this error is the quiet "user said no" outcome rather than
    /// a genuine failure.
    pub fn is_user_declined(&self) -> bool {
        matches!(self, InstallerError::UserDeclined)
    }
}
