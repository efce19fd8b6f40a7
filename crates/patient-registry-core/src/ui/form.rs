//! Create/edit form state.

use super::{messages, Interaction, Route};
use crate::db::DocumentStore;
use crate::models::{Patient, PatientFormData};
use crate::service::PatientService;
use crate::validation::{validate_patient, ValidationError};

/// Whether the form creates a new patient or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; see [`PatientForm::errors`]. Nothing was written.
    Invalid,
    /// Written; the id is the created or edited patient.
    Saved { id: String },
    /// The store rejected the write.
    Failed,
}

/// Registration form for one patient.
///
/// Phone and email lists always keep at least one (possibly blank) row.
#[derive(Debug, Clone)]
pub struct PatientForm {
    mode: FormMode,
    data: PatientFormData,
    errors: Vec<ValidationError>,
    submitting: bool,
}

impl PatientForm {
    /// Blank form for a new patient.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            data: PatientFormData::default(),
            errors: Vec::new(),
            submitting: false,
        }
    }

    /// Form pre-filled from an existing patient.
    pub fn edit(patient: &Patient) -> Self {
        Self {
            mode: FormMode::Edit {
                id: patient.id.clone(),
            },
            data: patient.to_form_data(),
            errors: Vec::new(),
            submitting: false,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Register Patient",
            FormMode::Edit { .. } => "Edit Patient",
        }
    }

    pub fn data(&self) -> &PatientFormData {
        &self.data
    }

    /// Direct access to the fields for text inputs.
    pub fn data_mut(&mut self) -> &mut PatientFormData {
        &mut self.data
    }

    /// Errors from the last submit attempt.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// State input: upper-cased, at most two characters.
    pub fn set_state(&mut self, value: &str) {
        self.data.address.state = value.to_uppercase().chars().take(2).collect();
    }

    pub fn add_phone(&mut self) {
        self.data.phones.push(String::new());
    }

    /// Returns `false` if there is no row at `index`.
    pub fn set_phone(&mut self, index: usize, value: &str) -> bool {
        set_row(&mut self.data.phones, index, value)
    }

    pub fn can_remove_phone(&self) -> bool {
        self.data.phones.len() > 1
    }

    /// Remove a phone row. Refused when it is the last one.
    pub fn remove_phone(&mut self, index: usize) -> bool {
        remove_row(&mut self.data.phones, index)
    }

    pub fn add_email(&mut self) {
        self.data.emails.push(String::new());
    }

    /// Returns `false` if there is no row at `index`.
    pub fn set_email(&mut self, index: usize, value: &str) -> bool {
        set_row(&mut self.data.emails, index, value)
    }

    pub fn can_remove_email(&self) -> bool {
        self.data.emails.len() > 1
    }

    /// Remove an email row. Refused when it is the last one.
    pub fn remove_email(&mut self, index: usize) -> bool {
        remove_row(&mut self.data.emails, index)
    }

    /// Validate and save.
    ///
    /// On validation failure the errors are kept for display and nothing is
    /// written. Otherwise blank phone/email rows are dropped, the patient is
    /// created or updated, the user is told the outcome, and on success the
    /// host is sent back to the patient list.
    pub fn submit<S: DocumentStore>(
        &mut self,
        service: &PatientService<S>,
        ui: &mut dyn Interaction,
    ) -> SubmitOutcome {
        let errors = validate_patient(&self.data);
        if !errors.is_empty() {
            log::debug!("form rejected with {} validation errors", errors.len());
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }

        self.submitting = true;
        self.errors.clear();
        let cleaned = self.data.without_blank_contacts();

        let result = match &self.mode {
            FormMode::Create => service
                .create_patient(&cleaned)
                .map(|id| (id, messages::PATIENT_CREATED)),
            FormMode::Edit { id } => service
                .update_patient(id, &cleaned)
                .map(|()| (id.clone(), messages::PATIENT_UPDATED)),
        };

        let outcome = match result {
            Ok((id, message)) => {
                ui.alert(message);
                ui.navigate(Route::PatientList);
                SubmitOutcome::Saved { id }
            }
            Err(e) => {
                log::error!("form submit failed: {}", e);
                ui.alert(match self.mode {
                    FormMode::Create => messages::CREATE_FAILED,
                    FormMode::Edit { .. } => messages::UPDATE_FAILED,
                });
                SubmitOutcome::Failed
            }
        };

        self.submitting = false;
        outcome
    }
}

impl Default for PatientForm {
    fn default() -> Self {
        Self::create()
    }
}

fn set_row(rows: &mut [String], index: usize, value: &str) -> bool {
    match rows.get_mut(index) {
        Some(row) => {
            *row = value.to_string();
            true
        }
        None => false,
    }
}

fn remove_row(rows: &mut Vec<String>, index: usize) -> bool {
    if rows.len() <= 1 || index >= rows.len() {
        return false;
    }
    rows.remove(index);
    true
}
