//! Error taxonomy shared by fetchers, extractors, and adapters
//!
//! All fallible operations return [`crate::Result`], whose error type is
//! [`ohno::AppError`]. Errors that callers need to react to are created with a
//! [`HarvestError`] as their source, so that [`ErrorKind::of`] can classify them after
//! any amount of added context.

use strum::Display;

/// Classified failure causes.
#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    /// A network or filesystem flake; retrying may succeed.
    #[error("transient failure: {0}")]
    Transient(String),

    /// An explicitly requested commit or a required path does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The surrounding context was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// The surrounding context's deadline passed.
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl HarvestError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transient(_) | Self::DeadlineExceeded => ErrorKind::Transient,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Coarse classification of an [`ohno::AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ErrorKind {
    Transient,
    NotFound,
    Cancelled,
    Other,
}

impl ErrorKind {
    /// Classify an error by searching its source chain for a [`HarvestError`].
    #[must_use]
    pub fn of(err: &ohno::AppError) -> Self {
        let mut source = err.source();
        while let Some(e) = source {
            if let Some(harvest_err) = e.downcast_ref::<HarvestError>() {
                return harvest_err.kind();
            }

            source = e.source();
        }

        Self::Other
    }
}
