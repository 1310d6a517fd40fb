use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::country::{calling_code, country_alpha2};
use crate::resource::{array_field, for_each_patient, join};
use crate::{HarmonizationError, Result, DEFAULT_COUNTRY};

const NANP_CALLING_CODE: &str = "1";
const MIN_E164_DIGITS: usize = 8;
const MAX_E164_DIGITS: usize = 15;
const MIN_NATIONAL_DIGITS: usize = 6;
/// A number written with its calling code but no `+` keeps at least this
/// many digits once the code is removed.
const MIN_PREFIXED_NATIONAL_DIGITS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneOptions {
    /// When false the input document is left untouched and a standardized
    /// copy is returned.
    pub overwrite: bool,
}

impl Default for PhoneOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:ext\.?|extension|x|#)\s*\d+\s*$").expect("valid extension regex")
});

/// Formats `raw` as E.164, trying each alpha-2 country in `countries` as the
/// dialing context (`US` when empty). Returns `None` when no country yields a
/// plausible number.
pub fn standardize_phone(raw: &str, countries: &[&str]) -> Option<String> {
    let without_extension = EXTENSION_RE.replace(raw, "");
    let trimmed = without_extension.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    if trimmed.starts_with('+') {
        return international(&digits);
    }
    if let Some(rest) = digits.strip_prefix("00") {
        return international(rest);
    }

    let fallback = [DEFAULT_COUNTRY];
    let countries = if countries.is_empty() {
        &fallback[..]
    } else {
        countries
    };

    countries
        .iter()
        .filter_map(|country| calling_code(country))
        .find_map(|code| national(&digits, code))
}

fn international(digits: &str) -> Option<String> {
    if !(MIN_E164_DIGITS..=MAX_E164_DIGITS).contains(&digits.len()) {
        return None;
    }
    if let Some(national) = digits.strip_prefix(NANP_CALLING_CODE) {
        return nanp(national);
    }
    Some(format!("+{digits}"))
}

fn national(digits: &str, code: &str) -> Option<String> {
    if code == NANP_CALLING_CODE {
        let national = match digits.strip_prefix(NANP_CALLING_CODE) {
            Some(rest) if digits.len() == 11 => rest,
            _ => digits,
        };
        return nanp(national);
    }

    let national = match digits.strip_prefix(code) {
        Some(rest) if rest.len() >= MIN_PREFIXED_NATIONAL_DIGITS => rest,
        _ => digits,
    };
    let national = national.strip_prefix('0').unwrap_or(national);
    let total = code.len() + national.len();
    if national.len() < MIN_NATIONAL_DIGITS || !(MIN_E164_DIGITS..=MAX_E164_DIGITS).contains(&total)
    {
        return None;
    }
    Some(format!("+{code}{national}"))
}

/// NANP numbers are ten digits and neither the area code nor the exchange
/// may start with 0 or 1.
fn nanp(national: &str) -> Option<String> {
    let bytes = national.as_bytes();
    if bytes.len() != 10 || bytes[0] < b'2' || bytes[3] < b'2' {
        return None;
    }
    Some(format!("+{NANP_CALLING_CODE}{national}"))
}

/// Rewrites every Patient `telecom` phone value in `data` to E.164.
pub fn standardize_phones(data: &mut Value, options: &PhoneOptions) -> Result<Value> {
    if options.overwrite {
        standardize_phones_in_place(data)?;
        Ok(data.clone())
    } else {
        let mut copy = data.clone();
        standardize_phones_in_place(&mut copy)?;
        Ok(copy)
    }
}

/// Rewrites phone values directly in `data`.
pub fn standardize_phones_in_place(data: &mut Value) -> Result<()> {
    let mut standardized = 0usize;
    let mut skipped = 0usize;
    let patients = for_each_patient(data, |patient, path| {
        let countries = patient_countries(patient);
        let telecom_path = join(path, "telecom");

        for (index, telecom) in array_field(patient, "telecom", path)?
            .iter_mut()
            .enumerate()
        {
            let contact_path = format!("{telecom_path}[{index}]");
            let contact = telecom
                .as_object_mut()
                .ok_or_else(|| HarmonizationError::unexpected(contact_path.clone(), "an object"))?;
            if contact.get("system").and_then(Value::as_str) != Some("phone") {
                continue;
            }

            match contact.get_mut("value") {
                None | Some(Value::Null) => {}
                Some(Value::String(value)) => match standardize_phone(value, &countries) {
                    Some(formatted) => {
                        *value = formatted;
                        standardized += 1;
                    }
                    None => {
                        debug!(path = %contact_path, "phone number left unchanged");
                        skipped += 1;
                    }
                },
                Some(_) => {
                    return Err(HarmonizationError::unexpected(
                        join(&contact_path, "value"),
                        "a string",
                    ))
                }
            }
        }
        Ok(())
    })?;

    debug!(patients, standardized, skipped, "standardized patient phones");
    Ok(())
}

/// Alpha-2 codes of the patient's address countries, in address order.
fn patient_countries(patient: &Map<String, Value>) -> Vec<&'static str> {
    let mut countries = Vec::new();
    let addresses = patient
        .get("address")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for address in addresses {
        let resolved = address
            .get("country")
            .and_then(Value::as_str)
            .and_then(country_alpha2);
        if let Some(code) = resolved {
            if !countries.contains(&code) {
                countries.push(code);
            }
        }
    }
    countries
}
