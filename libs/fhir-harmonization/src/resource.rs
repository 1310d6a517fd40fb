use serde_json::{Map, Value};

use crate::{HarmonizationError, Result};

const BUNDLE: &str = "Bundle";
const PATIENT: &str = "Patient";

/// Calls `visit` for every Patient resource in `data`, which is either a
/// single resource or a Bundle. Returns the number of patients visited.
pub(crate) fn for_each_patient<F>(data: &mut Value, mut visit: F) -> Result<usize>
where
    F: FnMut(&mut Map<String, Value>, &str) -> Result<()>,
{
    let root = data
        .as_object_mut()
        .ok_or_else(|| HarmonizationError::unexpected("$", "an object"))?;

    if resource_type(root) != Some(BUNDLE) {
        return visit_if_patient(root, "", &mut visit);
    }

    let entries = match root.get_mut("entry") {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(HarmonizationError::unexpected("entry", "an array")),
    };

    let mut visited = 0;
    for (index, entry) in entries.iter_mut().enumerate() {
        let entry_path = format!("entry[{index}]");
        let entry = entry
            .as_object_mut()
            .ok_or_else(|| HarmonizationError::unexpected(entry_path.clone(), "an object"))?;

        match entry.get_mut("resource") {
            None | Some(Value::Null) => {}
            Some(Value::Object(resource)) => {
                let resource_path = format!("{entry_path}.resource");
                visited += visit_if_patient(resource, &resource_path, &mut visit)?;
            }
            Some(_) => {
                return Err(HarmonizationError::unexpected(
                    format!("{entry_path}.resource"),
                    "an object",
                ))
            }
        }
    }

    Ok(visited)
}

fn visit_if_patient<F>(resource: &mut Map<String, Value>, path: &str, visit: &mut F) -> Result<usize>
where
    F: FnMut(&mut Map<String, Value>, &str) -> Result<()>,
{
    if resource_type(resource) != Some(PATIENT) {
        return Ok(0);
    }
    visit(resource, path)?;
    Ok(1)
}

fn resource_type(resource: &Map<String, Value>) -> Option<&str> {
    resource.get("resourceType").and_then(Value::as_str)
}

/// Returns the array stored under `field`, treating a missing or null value
/// as empty.
pub(crate) fn array_field<'a>(
    resource: &'a mut Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a mut [Value]> {
    match resource.get_mut(field) {
        None | Some(Value::Null) => Ok(&mut []),
        Some(Value::Array(items)) => Ok(items.as_mut_slice()),
        Some(_) => Err(HarmonizationError::unexpected(join(path, field), "an array")),
    }
}

pub(crate) fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}
