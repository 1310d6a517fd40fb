use phdi_fhir_harmonization::NameCase;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::standardization::{NameParameters, PhoneParameters};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizeRequest {
    pub data: Map<String, Value>,
    pub standardizations: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizeNamesRequest {
    pub data: Map<String, Value>,
    #[serde(default)]
    pub trim: Option<bool>,
    #[serde(default)]
    pub overwrite: Option<bool>,
    #[serde(default)]
    pub case: Option<NameCase>,
    #[serde(default)]
    pub remove_numbers: Option<bool>,
}

impl StandardizeNamesRequest {
    pub fn into_parts(self) -> (Map<String, Value>, NameParameters) {
        let parameters = NameParameters {
            trim: self.trim,
            overwrite: self.overwrite,
            case: self.case,
            remove_numbers: self.remove_numbers,
        };
        (self.data, parameters)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardizePhonesRequest {
    pub data: Map<String, Value>,
    #[serde(default)]
    pub overwrite: Option<bool>,
}

impl StandardizePhonesRequest {
    pub fn into_parts(self) -> (Map<String, Value>, PhoneParameters) {
        let parameters = PhoneParameters {
            overwrite: self.overwrite,
        };
        (self.data, parameters)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(default)]
    pub details: Option<Value>,
}
