use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::resource::{array_field, for_each_patient, join};
use crate::{HarmonizationError, Result};

static DECIMAL_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("valid digit regex"));

/// Letter case applied to standardized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameCase {
    #[default]
    Upper,
    Lower,
    Title,
}

impl NameCase {
    pub const ALL: [NameCase; 3] = [NameCase::Upper, NameCase::Lower, NameCase::Title];

    pub fn as_str(&self) -> &'static str {
        match self {
            NameCase::Upper => "upper",
            NameCase::Lower => "lower",
            NameCase::Title => "title",
        }
    }

    fn apply(&self, value: &str) -> String {
        match self {
            NameCase::Upper => value.to_uppercase(),
            NameCase::Lower => value.to_lowercase(),
            NameCase::Title => title_case(value),
        }
    }
}

impl fmt::Display for NameCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameCase {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        NameCase::ALL
            .into_iter()
            .find(|case| case.as_str() == value)
            .ok_or_else(|| format!("unknown case '{value}', expected one of: upper, lower, title"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameOptions {
    pub trim: bool,
    /// When false the input document is left untouched and a standardized
    /// copy is returned.
    pub overwrite: bool,
    pub case: NameCase,
    pub remove_numbers: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            trim: true,
            overwrite: true,
            case: NameCase::Upper,
            remove_numbers: true,
        }
    }
}

/// Standardizes a single name string.
pub fn standardize_name(raw: &str, options: &NameOptions) -> String {
    let mut name = if options.remove_numbers {
        DECIMAL_DIGIT_RE.replace_all(raw, "").into_owned()
    } else {
        raw.to_string()
    };

    if options.trim {
        name = name.trim().to_string();
    }

    options.case.apply(&name)
}

/// Standardizes `family` and `given` names of every Patient in `data`.
pub fn standardize_names(data: &mut Value, options: &NameOptions) -> Result<Value> {
    if options.overwrite {
        standardize_names_in_place(data, options)?;
        Ok(data.clone())
    } else {
        let mut copy = data.clone();
        standardize_names_in_place(&mut copy, options)?;
        Ok(copy)
    }
}

/// Standardizes names directly in `data`, ignoring `options.overwrite`.
pub fn standardize_names_in_place(data: &mut Value, options: &NameOptions) -> Result<()> {
    let patients = for_each_patient(data, |patient, path| {
        standardize_patient_names(patient, path, options)
    })?;
    debug!(patients, case = %options.case, "standardized patient names");
    Ok(())
}

fn standardize_patient_names(
    patient: &mut Map<String, Value>,
    path: &str,
    options: &NameOptions,
) -> Result<()> {
    let names_path = join(path, "name");
    for (index, name) in array_field(patient, "name", path)?.iter_mut().enumerate() {
        let name_path = format!("{names_path}[{index}]");
        let name = name
            .as_object_mut()
            .ok_or_else(|| HarmonizationError::unexpected(name_path.clone(), "an object"))?;

        match name.get_mut("family") {
            None | Some(Value::Null) => {}
            Some(Value::String(family)) => *family = standardize_name(family, options),
            Some(_) => {
                return Err(HarmonizationError::unexpected(
                    join(&name_path, "family"),
                    "a string",
                ))
            }
        }

        let given_path = join(&name_path, "given");
        for (position, given) in array_field(name, "given", &name_path)?
            .iter_mut()
            .enumerate()
        {
            match given {
                Value::String(given) => *given = standardize_name(given, options),
                _ => {
                    return Err(HarmonizationError::unexpected(
                        format!("{given_path}[{position}]"),
                        "a string",
                    ))
                }
            }
        }
    }
    Ok(())
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `o'neil-SMITH` becomes `O'Neil-Smith`.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_alphabetic = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(ch);
            previous_alphabetic = false;
        }
    }
    result
}
