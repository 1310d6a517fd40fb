use serde_json::{Map, Value};
use tracing::debug;

use super::DocumentValidationError;

/// Field every FHIR resource and bundle carries.
pub const RESOURCE_TYPE_FIELD: &str = "resourceType";

/// Accepts `data` only when it names a non-null `resourceType`. Nothing else
/// about the document is inspected.
pub fn validate_document(data: &Map<String, Value>) -> Result<(), DocumentValidationError> {
    match data.get(RESOURCE_TYPE_FIELD) {
        None | Some(Value::Null) => Err(DocumentValidationError::MissingResourceType),
        Some(resource_type) => {
            debug!(resource_type = %resource_type, "document accepted");
            Ok(())
        }
    }
}
