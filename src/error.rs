//! Error types shared by the value model, store, walkers and commands.

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, AppDataError>;

/// Errors produced while parsing, walking, persisting and exporting
/// application data.
#[derive(Debug, Error)]
pub enum AppDataError {
    /// A type name or stored value has no kind mapping, or the kind cannot be
    /// used for the requested operation.
    #[error("Unknown type ({0})")]
    UnsupportedType(String),

    /// A literal could not be converted into the requested kind.
    #[error("Invalid data ({text}) for the type ({kind})")]
    Format { kind: String, text: String },

    /// A package, container or value that had to exist does not.
    #[error("{what} not found ({name})")]
    NotFound { what: &'static str, name: String },

    /// An interactive confirmation was declined, or the overwrite policy
    /// refused to replace existing data.
    #[error("The operation was canceled {0}.")]
    UserCancelled(CancelReason),

    /// A `ROOT\container` path could not be interpreted.
    #[error("Invalid path ({0})")]
    InvalidPath(String),

    /// Persisted settings could not be decoded.
    #[error("corrupt settings store: {0}")]
    Store(#[from] serde_json::Error),

    /// Archive creation failed.
    #[error("archive: {0}")]
    Archive(String),

    /// Filesystem or stream failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an operation was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user answered "No" to a prompt.
    ByUser,
    /// `--overwrite=no` was in effect.
    OverwriteNo,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::ByUser => f.write_str("by the user"),
            CancelReason::OverwriteNo => f.write_str("(--overwrite=no)"),
        }
    }
}

impl AppDataError {
    pub(crate) fn format(kind: impl Into<String>, text: impl Into<String>) -> Self {
        AppDataError::Format {
            kind: kind.into(),
            text: text.into(),
        }
    }

    pub(crate) fn not_found(what: &'static str, name: impl Into<String>) -> Self {
        AppDataError::NotFound {
            what,
            name: name.into(),
        }
    }

    pub(crate) fn archive(msg: impl Into<String>) -> Self {
        AppDataError::Archive(msg.into())
    }
}
