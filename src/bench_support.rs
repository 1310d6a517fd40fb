use phdi_standardizer::StandardizationPlan;
use serde_json::{json, Value};

const FAMILY_NAMES: [&str; 4] = [" doe2 ", "o'neil-SMITH", "garcía", "nguyen 3rd"];
const GIVEN_NAMES: [&str; 4] = ["john ", "MARY ann", " josé1", "an"];
const PHONES: [(&str, &str); 4] = [
    ("(555) 654-1234", "USA"),
    ("020 7946 0958", "United Kingdom"),
    ("55 1234 5678", "MX"),
    ("+1 555 987 6543 ext. 12", "Canada"),
];

/// A Patient resource whose names and phones all need standardizing.
pub fn patient_fixture(index: usize) -> Value {
    let (phone, country) = PHONES[index % PHONES.len()];
    json!({
        "resourceType": "Patient",
        "id": format!("patient-{index}"),
        "name": [{
            "use": "official",
            "family": FAMILY_NAMES[index % FAMILY_NAMES.len()],
            "given": [GIVEN_NAMES[index % GIVEN_NAMES.len()], "middle4"]
        }],
        "telecom": [
            { "system": "phone", "value": phone, "use": "home" },
            { "system": "email", "value": format!("patient{index}@example.org") }
        ],
        "address": [{ "line": ["123 Fake St"], "country": country }]
    })
}

/// A batch Bundle of `patients` Patients interleaved with Observations.
pub fn bundle_fixture(patients: usize) -> Value {
    let entries: Vec<Value> = (0..patients)
        .flat_map(|index| {
            [
                json!({ "resource": patient_fixture(index) }),
                json!({
                    "resource": {
                        "resourceType": "Observation",
                        "id": format!("observation-{index}"),
                        "subject": { "reference": format!("Patient/patient-{index}") }
                    }
                }),
            ]
        })
        .collect();

    json!({ "resourceType": "Bundle", "type": "batch", "entry": entries })
}

pub struct StandardizationBenchFixture {
    pub plan: StandardizationPlan,
    pub document: Value,
}

impl StandardizationBenchFixture {
    /// Builds a names-then-phones plan over a bundle of `patients` Patients.
    pub fn new(patients: usize) -> Self {
        let requested = json!({
            "standardize_names": { "case": "title" },
            "standardize_phones": {}
        });
        let requested = requested
            .as_object()
            .cloned()
            .expect("fixture standardizations are an object");
        let plan = StandardizationPlan::parse(requested).expect("fixture plan is valid");

        Self {
            plan,
            document: bundle_fixture(patients),
        }
    }
}
