use thiserror::Error;

/// Errors raised when a document does not have the shape FHIR promises.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarmonizationError {
    #[error("expected {expected} at '{path}'")]
    UnexpectedType { path: String, expected: &'static str },
}

impl HarmonizationError {
    pub(crate) fn unexpected(path: impl Into<String>, expected: &'static str) -> Self {
        HarmonizationError::UnexpectedType {
            path: path.into(),
            expected,
        }
    }

    /// JSON path of the offending value, e.g. `entry[2].resource.name[0].family`.
    pub fn path(&self) -> &str {
        match self {
            HarmonizationError::UnexpectedType { path, .. } => path.as_str(),
        }
    }
}
