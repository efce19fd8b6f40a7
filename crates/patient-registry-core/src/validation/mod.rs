//! Patient record validation and derived display values.
//!
//! Everything here is a pure function. [`validate_patient`] reports every
//! violated rule, in a fixed order, rather than stopping at the first one.

mod contact;
mod metrics;

pub use contact::*;
pub use metrics::*;

use thiserror::Error;

use crate::models::PatientFormData;

/// Upper bound (inclusive) for weight in kilograms.
pub const MAX_WEIGHT_KG: f64 = 999.0;
/// Upper bound (inclusive) for height in meters.
pub const MAX_HEIGHT_M: f64 = 3.0;

/// A violated field rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Birth date is required")]
    BirthDateRequired,

    #[error("Weight must be between 0.1 and 999 kg")]
    WeightOutOfRange,

    #[error("Height must be between 0.1 and 3 meters")]
    HeightOutOfRange,

    #[error("Street is required")]
    StreetRequired,

    #[error("City is required")]
    CityRequired,

    #[error("State must have 2 characters")]
    StateLength,

    #[error("At least one phone is required")]
    PhoneRequired,

    #[error("At least one email is required")]
    EmailRequired,
}

/// Check a patient record, returning every violated rule.
///
/// An empty vector means the record may be persisted.
pub fn validate_patient(data: &PatientFormData) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&data.name) {
        errors.push(ValidationError::NameRequired);
    }
    if data.birth_date.is_empty() {
        errors.push(ValidationError::BirthDateRequired);
    }
    // NaN fails both comparisons, so it is rejected too
    if !(data.weight_kg > 0.0 && data.weight_kg <= MAX_WEIGHT_KG) {
        errors.push(ValidationError::WeightOutOfRange);
    }
    if !(data.height_m > 0.0 && data.height_m <= MAX_HEIGHT_M) {
        errors.push(ValidationError::HeightOutOfRange);
    }
    if is_blank(&data.address.street) {
        errors.push(ValidationError::StreetRequired);
    }
    if is_blank(&data.address.city) {
        errors.push(ValidationError::CityRequired);
    }
    if data.address.state.chars().count() != 2 {
        errors.push(ValidationError::StateLength);
    }
    if data.phones.iter().all(|p| is_blank(p)) {
        errors.push(ValidationError::PhoneRequired);
    }
    if data.emails.iter().all(|e| is_blank(e)) {
        errors.push(ValidationError::EmailRequired);
    }

    errors
}

/// Human-readable messages for a list of violations.
pub fn error_messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
