use thiserror::Error;

/// Fatal, startup-time errors. Per-candidate problems (IDNA rejection,
/// NXDOMAIN, query failure) are never surfaced as `AppError` — they're
/// filtered or discarded in place, per the "per-candidate errors never
/// abort the run" policy.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("missing file: {0}: {1}")]
    MissingFile(String, std::io::Error),

    #[error("invalid nameserver {0:?}: not an IP address")]
    InvalidNameserver(String),
}

impl AppError {
    /// Process exit code for this error, per the CLI surface's contract:
    /// non-zero on invalid domain or missing dictionary/public-suffix file.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidDomain(_) => 1,
            AppError::MissingFile(_, _) => 2,
            AppError::InvalidNameserver(_) => 3,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
