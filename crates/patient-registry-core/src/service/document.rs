//! Mapping between stored documents and patient models.
//!
//! Documents are decoded through an all-optional intermediate so that a
//! record written by an older client (or by hand) still loads: missing
//! fields fall back to empty values instead of failing the whole read.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::db::{DbError, DbResult, Document};
use crate::models::{Address, BloodType, Patient, PatientFormData, PatientListItem, NOT_AVAILABLE};

/// Document field holding the creation timestamp.
pub const CREATED_AT: &str = "createdAt";
/// Document field holding the last update timestamp.
pub const UPDATED_AT: &str = "updatedAt";

/// Intermediate struct for document mapping.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PatientDocument {
    name: Option<String>,
    birth_date: Option<String>,
    weight_kg: Option<f64>,
    height_m: Option<f64>,
    blood_type: Option<String>,
    address: Option<AddressDocument>,
    phones: Option<Vec<String>>,
    emails: Option<Vec<String>>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AddressDocument {
    street: Option<String>,
    number: Option<String>,
    neighborhood: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

impl From<AddressDocument> for Address {
    fn from(doc: AddressDocument) -> Self {
        Address {
            street: doc.street.unwrap_or_default(),
            number: doc.number.unwrap_or_default(),
            neighborhood: doc.neighborhood.unwrap_or_default(),
            city: doc.city.unwrap_or_default(),
            state: doc.state.unwrap_or_default(),
        }
    }
}

fn decode(document: Document) -> DbResult<(String, PatientDocument)> {
    if !document.data.is_object() {
        return Err(DbError::Constraint(format!(
            "patient document {} is not an object",
            document.id
        )));
    }
    let decoded = serde_json::from_value(document.data)?;
    Ok((document.id, decoded))
}

/// Decode a full patient record.
pub fn to_patient(document: Document) -> DbResult<Patient> {
    let (id, doc) = decode(document)?;

    let blood_type = match doc.blood_type.as_deref() {
        None => BloodType::default(),
        Some(label) => label.parse::<BloodType>().unwrap_or_else(|e| {
            log::warn!("patient {}: {}, using default", id, e);
            BloodType::default()
        }),
    };

    Ok(Patient {
        data: PatientFormData {
            name: doc.name.unwrap_or_default(),
            birth_date: doc.birth_date.unwrap_or_default(),
            weight_kg: doc.weight_kg.unwrap_or_default(),
            height_m: doc.height_m.unwrap_or_default(),
            blood_type,
            address: doc.address.map(Address::from).unwrap_or_default(),
            phones: doc.phones.unwrap_or_default(),
            emails: doc.emails.unwrap_or_default(),
        },
        created_at: doc.created_at.unwrap_or_default(),
        updated_at: doc.updated_at.unwrap_or_default(),
        id,
    })
}

/// Project a document to a list row.
///
/// Neighborhood and city fall back to [`NOT_AVAILABLE`] when absent or empty.
pub fn to_list_item(document: Document) -> DbResult<PatientListItem> {
    let (id, doc) = decode(document)?;
    let address = doc.address.unwrap_or_default();

    Ok(PatientListItem {
        id,
        name: doc.name.unwrap_or_default(),
        birth_date: doc.birth_date.unwrap_or_default(),
        neighborhood: or_not_available(address.neighborhood),
        city: or_not_available(address.city),
    })
}

fn or_not_available(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Top-level document fields for a patient's writable data.
pub fn to_fields(data: &PatientFormData) -> DbResult<Map<String, Value>> {
    match serde_json::to_value(data)? {
        Value::Object(fields) => Ok(fields),
        other => Err(DbError::Constraint(format!(
            "patient data serialized to non-object: {}",
            other
        ))),
    }
}
