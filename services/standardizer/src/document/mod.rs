use thiserror::Error;

mod validator;

pub use validator::{validate_document, RESOURCE_TYPE_FIELD};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentValidationError {
    #[error("Must provide a FHIR resource or bundle")]
    MissingResourceType,
}
