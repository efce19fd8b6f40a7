//! List view projection of a patient.

use serde::{Deserialize, Serialize};

/// Placeholder shown when a patient has no neighborhood or city on file.
pub const NOT_AVAILABLE: &str = "N/A";

/// Reduced patient record used by the patient list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientListItem {
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub neighborhood: String,
    pub city: String,
}

impl PatientListItem {
    /// Case-insensitive substring match against name, city or neighborhood.
    ///
    /// An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.city.to_lowercase().contains(&term)
            || self.neighborhood.to_lowercase().contains(&term)
    }
}
