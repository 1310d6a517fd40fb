pub mod api;
pub mod config;
pub mod document;
pub mod standardization;

pub use api::{create_router, ApiError, ErrorResponse, HealthResponse};
pub use config::StandardizerConfig;
pub use document::{validate_document, DocumentValidationError};
pub use standardization::{
    Standardization, StandardizationError, StandardizationKind, StandardizationPlan,
};
