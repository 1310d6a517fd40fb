use std::fmt;

use phdi_fhir_harmonization::{
    standardize_names_in_place, standardize_phones_in_place, HarmonizationError, NameOptions,
    PhoneOptions,
};
use serde_json::Value;
use thiserror::Error;

mod parameters;
mod pipeline;

pub use parameters::{NameParameters, PhoneParameters};
pub use pipeline::StandardizationPlan;

const SUPPORTED_LIST: &str = "standardize_names, standardize_phones";

/// Names of the standardizations this service can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardizationKind {
    Names,
    Phones,
}

impl StandardizationKind {
    pub const SUPPORTED: [StandardizationKind; 2] =
        [StandardizationKind::Names, StandardizationKind::Phones];

    pub fn name(&self) -> &'static str {
        match self {
            StandardizationKind::Names => "standardize_names",
            StandardizationKind::Phones => "standardize_phones",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|kind| kind.name() == name)
    }

    pub fn supported_names() -> Vec<&'static str> {
        Self::SUPPORTED.iter().map(StandardizationKind::name).collect()
    }
}

impl fmt::Display for StandardizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StandardizationError {
    #[error(
        "unsupported standardization '{requested}' requested; currently supported standardizations include: {}",
        SUPPORTED_LIST
    )]
    Unsupported { requested: String },
    #[error("invalid parameters for '{kind}': {reason}")]
    InvalidParameters {
        kind: StandardizationKind,
        reason: String,
    },
}

impl StandardizationError {
    /// Request field the error refers to, e.g. `standardizations.standardize_names`.
    pub fn field(&self) -> String {
        match self {
            StandardizationError::Unsupported { requested } => {
                format!("standardizations.{requested}")
            }
            StandardizationError::InvalidParameters { kind, .. } => {
                format!("standardizations.{kind}")
            }
        }
    }
}

/// A validated standardization with its resolved options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Standardization {
    Names(NameOptions),
    Phones(PhoneOptions),
}

impl Standardization {
    /// Validates `name` against the supported set and `parameters` against
    /// that standardization's schema.
    pub fn parse(name: &str, parameters: Value) -> Result<Self, StandardizationError> {
        let kind = StandardizationKind::from_name(name).ok_or_else(|| {
            StandardizationError::Unsupported {
                requested: name.to_string(),
            }
        })?;

        if !parameters.is_object() {
            return Err(StandardizationError::InvalidParameters {
                kind,
                reason: "parameters must be a JSON object".to_string(),
            });
        }

        let invalid = |err: serde_json::Error| StandardizationError::InvalidParameters {
            kind,
            reason: err.to_string(),
        };

        match kind {
            StandardizationKind::Names => serde_json::from_value::<NameParameters>(parameters)
                .map(|params| Standardization::Names(params.into_options()))
                .map_err(invalid),
            StandardizationKind::Phones => serde_json::from_value::<PhoneParameters>(parameters)
                .map(|params| Standardization::Phones(params.into_options()))
                .map_err(invalid),
        }
    }

    pub fn kind(&self) -> StandardizationKind {
        match self {
            Standardization::Names(_) => StandardizationKind::Names,
            Standardization::Phones(_) => StandardizationKind::Phones,
        }
    }

    /// Standardizes `document` in place. The request owns its document, so
    /// `overwrite` never needs a copy here.
    pub fn apply(&self, document: &mut Value) -> Result<(), HarmonizationError> {
        match self {
            Standardization::Names(options) => standardize_names_in_place(document, options),
            Standardization::Phones(_) => standardize_phones_in_place(document),
        }
    }
}
