//! Error types for page boot and host services.
//!
//! Behaviors themselves never fail: a missing element disables the feature and
//! a failed DOM write is logged. Errors surface only where the host can refuse
//! something (storage, clipboard) or where the browser shell cannot start.

/// Error returned while booting the page or talking to host services.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// `window` is not available (not running in a browser main thread).
    #[error("window is unavailable")]
    MissingWindow,
    /// `window.document` is not available.
    #[error("document is unavailable")]
    MissingDocument,
    /// A JavaScript call threw; carries the stringified exception.
    #[error("javascript error: {0}")]
    Js(String),
    /// The embedded page configuration was not valid JSON for [`crate::config::PageConfig`].
    #[error("invalid page configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// The preference store rejected a write (quota, private mode, ...).
    #[error("storage write failed for key {key}: {reason}")]
    Storage { key: String, reason: String },
}

/// Error returned by [`crate::host::Clipboard::write_text`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// The clipboard API is not exposed in this context (insecure origin, old browser).
    #[error("clipboard API is unavailable")]
    Unavailable,
    /// The write was rejected, typically for lack of permission.
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}
