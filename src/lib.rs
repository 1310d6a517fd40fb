//! Shared fixtures for the PHDI standardization workspace benches and tests.

pub mod bench_support;

pub use phdi_fhir_harmonization;
pub use phdi_standardizer;
