use phdi_fhir_harmonization::{NameCase, NameOptions, PhoneOptions};
use serde::{Deserialize, Serialize};

/// Parameters accepted by `standardize_names`. Absent or null fields take the
/// defaults of [`NameOptions`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameParameters {
    pub trim: Option<bool>,
    pub overwrite: Option<bool>,
    pub case: Option<NameCase>,
    pub remove_numbers: Option<bool>,
}

impl NameParameters {
    pub fn into_options(self) -> NameOptions {
        let defaults = NameOptions::default();
        NameOptions {
            trim: self.trim.unwrap_or(defaults.trim),
            overwrite: self.overwrite.unwrap_or(defaults.overwrite),
            case: self.case.unwrap_or(defaults.case),
            remove_numbers: self.remove_numbers.unwrap_or(defaults.remove_numbers),
        }
    }
}

/// Parameters accepted by `standardize_phones`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhoneParameters {
    pub overwrite: Option<bool>,
}

impl PhoneParameters {
    pub fn into_options(self) -> PhoneOptions {
        PhoneOptions {
            overwrite: self.overwrite.unwrap_or(PhoneOptions::default().overwrite),
        }
    }
}
