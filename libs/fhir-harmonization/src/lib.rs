//! FHIR harmonization routines for PHDI.
//!
//! This crate standardizes demographic fields inside FHIR JSON documents:
//! - **Names**: `Patient.name[].family` and `Patient.name[].given[]` are
//!   cleaned of digits, trimmed and re-cased.
//! - **Phones**: `Patient.telecom[]` entries with `system == "phone"` are
//!   rewritten to E.164, using the patient's address countries as context.
//!
//! Both entry points accept either a single resource or a `Bundle`, in which
//! case every `entry[].resource` is visited. Resources other than `Patient`
//! pass through untouched.
//!
//! ## Usage
//!
//! ```rust
//! use phdi_fhir_harmonization::{standardize_names, NameOptions};
//! use serde_json::json;
//!
//! let mut patient = json!({
//!     "resourceType": "Patient",
//!     "name": [{ "family": " doe2 ", "given": ["john"] }]
//! });
//!
//! let standardized = standardize_names(&mut patient, &NameOptions::default()).unwrap();
//! assert_eq!(standardized["name"][0]["family"], "DOE");
//! ```

pub mod country;
pub mod error;
pub mod names;
pub mod phones;
mod resource;

pub use country::{calling_code, country_alpha2};
pub use error::HarmonizationError;
pub use names::{
    standardize_name, standardize_names, standardize_names_in_place, NameCase, NameOptions,
};
pub use phones::{
    standardize_phone, standardize_phones, standardize_phones_in_place, PhoneOptions,
};

/// Country assumed when a patient record carries no usable address country.
pub const DEFAULT_COUNTRY: &str = "US";

pub type Result<T> = std::result::Result<T, HarmonizationError>;
