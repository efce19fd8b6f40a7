//! Edit route entry point.

use super::{messages, Interaction, PatientForm, Route};
use crate::db::DocumentStore;
use crate::service::PatientService;

/// Load a patient for the edit screen.
///
/// When the patient is missing, or the load fails, the user is told and the
/// host is sent back to the list; no form is produced.
pub fn load_for_edit<S: DocumentStore>(
    service: &PatientService<S>,
    id: &str,
    ui: &mut dyn Interaction,
) -> Option<PatientForm> {
    let message = match service.get_patient(id) {
        Ok(Some(patient)) => return Some(PatientForm::edit(&patient)),
        Ok(None) => {
            log::warn!("edit requested for unknown patient {}", id);
            messages::NOT_FOUND
        }
        Err(e) => {
            log::error!("loading patient {} for edit failed: {}", id, e);
            messages::LOAD_FAILED
        }
    };

    ui.alert(message);
    ui.navigate(Route::PatientList);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, DbError, DbResult, Document, Query};
    use crate::models::PatientFormData;
    use crate::ui::testing::Recorder;
    use crate::ui::FormMode;
    use serde_json::{Map, Value};

    struct OfflineStore;

    impl DocumentStore for OfflineStore {
        fn add_document(&self, _: &str, _: &Value) -> DbResult<String> {
            Err(DbError::Constraint("offline".into()))
        }
        fn get_document(&self, _: &str, _: &str) -> DbResult<Option<Document>> {
            Err(DbError::Constraint("offline".into()))
        }
        fn list_documents(&self, _: &str) -> DbResult<Vec<Document>> {
            Err(DbError::Constraint("offline".into()))
        }
        fn query_documents(&self, _: &str, _: &Query) -> DbResult<Vec<Document>> {
            Err(DbError::Constraint("offline".into()))
        }
        fn update_document(&self, _: &str, _: &str, _: &Map<String, Value>) -> DbResult<()> {
            Err(DbError::Constraint("offline".into()))
        }
        fn delete_document(&self, _: &str, _: &str) -> DbResult<bool> {
            Err(DbError::Constraint("offline".into()))
        }
    }

    #[test]
    fn test_loads_existing_patient() {
        let service = PatientService::new(Database::open_in_memory().unwrap());
        let data = PatientFormData {
            name: "Ana".into(),
            phones: vec![],
            ..PatientFormData::default()
        };
        let id = service.create_patient(&data).unwrap();
        let mut ui = Recorder::default();

        let form = load_for_edit(&service, &id, &mut ui).unwrap();
        assert_eq!(form.mode(), &FormMode::Edit { id });
        assert_eq!(form.data().name, "Ana");
        // Stored without phones, shown with one blank row
        assert_eq!(form.data().phones, vec![String::new()]);
        assert!(ui.alerts.is_empty());
        assert!(ui.routes.is_empty());
    }

    #[test]
    fn test_missing_patient_redirects() {
        let service = PatientService::new(Database::open_in_memory().unwrap());
        let mut ui = Recorder::default();

        assert!(load_for_edit(&service, "missing", &mut ui).is_none());
        assert_eq!(ui.alerts, vec![messages::NOT_FOUND]);
        assert_eq!(ui.routes, vec![Route::PatientList]);
    }

    #[test]
    fn test_load_failure_redirects() {
        let service = PatientService::new(OfflineStore);
        let mut ui = Recorder::default();

        assert!(load_for_edit(&service, "any", &mut ui).is_none());
        assert_eq!(ui.alerts, vec![messages::LOAD_FAILED]);
        assert_eq!(ui.routes, vec![Route::PatientList]);
    }
}
