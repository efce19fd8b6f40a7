//! Patient models.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use super::BloodType;

/// Postal address of a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    /// Two-letter state code (e.g., "MA")
    pub state: String,
}

/// Writable patient fields, as collected by the registration form.
///
/// Field names are camelCase on the wire because this is also the shape
/// stored in the document collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientFormData {
    pub name: String,
    /// ISO calendar date (`YYYY-MM-DD`); empty until filled in
    pub birth_date: String,
    pub weight_kg: f64,
    pub height_m: f64,
    pub blood_type: BloodType,
    pub address: Address,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl Default for PatientFormData {
    /// Blank form: one empty phone row and one empty email row.
    fn default() -> Self {
        Self {
            name: String::new(),
            birth_date: String::new(),
            weight_kg: 0.0,
            height_m: 0.0,
            blood_type: BloodType::default(),
            address: Address::default(),
            phones: vec![String::new()],
            emails: vec![String::new()],
        }
    }
}

impl PatientFormData {
    /// Copy with blank phone and email entries removed.
    pub fn without_blank_contacts(&self) -> Self {
        Self {
            phones: non_blank(&self.phones),
            emails: non_blank(&self.emails),
            ..self.clone()
        }
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .collect()
}

/// A stored patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Store-assigned identifier, immutable after creation
    pub id: String,
    #[serde(flatten)]
    pub data: PatientFormData,
    /// Creation timestamp (RFC 3339, UTC)
    pub created_at: String,
    /// Last update timestamp (RFC 3339, UTC)
    pub updated_at: String,
}

impl Patient {
    /// Form data pre-populated for editing.
    ///
    /// Empty phone/email lists become a single blank row so the form always
    /// has one input to show.
    pub fn to_form_data(&self) -> PatientFormData {
        let mut data = self.data.clone();
        if data.phones.is_empty() {
            data.phones.push(String::new());
        }
        if data.emails.is_empty() {
            data.emails.push(String::new());
        }
        data
    }
}

/// Current time as a fixed-width RFC 3339 UTC timestamp.
///
/// Fixed width keeps lexical and chronological order identical.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
