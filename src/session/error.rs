use std::fmt;
use std::path::PathBuf;

use crate::store::StoreError;

/// Represents the different types of errors that can occur while classifying.
#[derive(Debug)]
pub enum SessionError {
    /// A required input file (manifest, truth table, option table) is missing
    NotFound { what: &'static str, path: PathBuf },
    /// An option table exists but its contents are unusable
    Catalog(String),
    /// The external displayer failed for a cutout
    Display(String),
    /// The interactive input source failed or ran dry
    Input(String),
    /// A session was assembled without a required collaborator
    Build(String),
    /// A file read failed after the file was found
    Io(String),
    /// The result store failed to persist or load records
    Store(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { what, path } => write!(f, "{} not found: {}", what, path.display()),
            Self::Catalog(msg) => write!(f, "Option table error: {}", msg),
            Self::Display(msg) => write!(f, "Display error: {}", msg),
            Self::Input(msg) => write!(f, "Input error: {}", msg),
            Self::Build(msg) => write!(f, "Build error: {}", msg),
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Store(err) => write!(f, "Result store error: {}", err),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        SessionError::Store(err)
    }
}
