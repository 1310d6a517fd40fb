use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;
use tracing::{info, instrument};

use crate::document::validate_document;
use crate::standardization::{Standardization, StandardizationPlan};

use super::error::ApiResult;
use super::types::{
    HealthResponse, StandardizeNamesRequest, StandardizePhonesRequest, StandardizeRequest,
};

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// Applies the requested standardizations, in request order, to `data`.
#[instrument(skip_all)]
pub async fn standardize(
    payload: Result<Json<StandardizeRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    validate_document(&request.data)?;
    let plan = StandardizationPlan::parse(request.standardizations)?;

    info!(steps = plan.steps().len(), "standardize request validated");

    let result = plan.apply(Value::Object(request.data))?;
    Ok(Json(result))
}

/// Standardizes the names in the provided FHIR bundle or resource.
#[instrument(skip_all)]
pub async fn standardize_names_only(
    payload: Result<Json<StandardizeNamesRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let (data, parameters) = request.into_parts();
    validate_document(&data)?;

    let standardization = Standardization::Names(parameters.into_options());
    run_single(standardization, data)
}

/// Standardizes the phone numbers in the provided FHIR bundle or resource.
#[instrument(skip_all)]
pub async fn standardize_phones_only(
    payload: Result<Json<StandardizePhonesRequest>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(request) = payload?;
    let (data, parameters) = request.into_parts();
    validate_document(&data)?;

    let standardization = Standardization::Phones(parameters.into_options());
    run_single(standardization, data)
}

fn run_single(
    standardization: Standardization,
    data: serde_json::Map<String, Value>,
) -> ApiResult<Value> {
    let mut document = Value::Object(data);
    standardization.apply(&mut document)?;
    info!(standardization = %standardization.kind(), "standardization applied");
    Ok(Json(document))
}
