use phdi_fhir_harmonization::HarmonizationError;
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{Standardization, StandardizationError};

/// An ordered list of standardizations, validated as a whole before any of
/// them runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardizationPlan {
    steps: Vec<Standardization>,
}

impl StandardizationPlan {
    /// Validates every requested standardization in request order. The first
    /// invalid entry fails the whole plan.
    pub fn parse(requested: Map<String, Value>) -> Result<Self, StandardizationError> {
        let steps = requested
            .into_iter()
            .map(|(name, parameters)| Standardization::parse(&name, parameters))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[Standardization] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs each step on the output of the previous one.
    pub fn apply(&self, mut document: Value) -> Result<Value, HarmonizationError> {
        for step in &self.steps {
            debug!(standardization = %step.kind(), "applying standardization");
            step.apply(&mut document)?;
        }
        info!(steps = self.steps.len(), "standardization plan applied");
        Ok(document)
    }
}
