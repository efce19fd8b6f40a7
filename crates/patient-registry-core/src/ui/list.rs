//! Patient list screen.

use super::{messages, Interaction, Route};
use crate::db::DocumentStore;
use crate::models::PatientListItem;
use crate::service::PatientService;
use crate::validation::{compute_age, parse_birth_date};

/// Rows whose name, city or neighborhood contains `term` (case-insensitive).
pub fn filter_items<'a>(items: &'a [PatientListItem], term: &str) -> Vec<&'a PatientListItem> {
    items.iter().filter(|item| item.matches(term)).collect()
}

/// Age shown next to a row, if its birth date parses.
pub fn display_age(item: &PatientListItem) -> Option<i32> {
    parse_birth_date(&item.birth_date).map(compute_age)
}

/// Loaded patients plus the current search term.
///
/// Filtering happens in memory on every call; only [`load`](Self::load)
/// touches the store.
#[derive(Debug, Clone, Default)]
pub struct PatientListView {
    items: Vec<PatientListItem>,
    search: String,
}

impl PatientListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every patient. On failure the user is alerted and the
    /// previously loaded rows stay.
    pub fn load<S: DocumentStore>(&mut self, service: &PatientService<S>, ui: &mut dyn Interaction) -> bool {
        match service.list_patients() {
            Ok(items) => {
                log::debug!("patient list loaded with {} rows", items.len());
                self.items = items;
                true
            }
            Err(e) => {
                log::error!("patient list load failed: {}", e);
                ui.alert(messages::LIST_FAILED);
                false
            }
        }
    }

    /// All loaded rows, ignoring the search term.
    pub fn items(&self) -> &[PatientListItem] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Rows matching the current search term.
    pub fn visible(&self) -> Vec<&PatientListItem> {
        filter_items(&self.items, &self.search)
    }

    /// Header line, e.g. `3 patients registered`.
    pub fn summary(&self) -> String {
        match self.items.len() {
            1 => "1 patient registered".to_string(),
            n => format!("{} patients registered", n),
        }
    }

    /// Placeholder text when no row is visible.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.visible().is_empty() {
            None
        } else if self.search.is_empty() {
            Some(messages::NO_PATIENTS)
        } else {
            Some(messages::NO_MATCHES)
        }
    }

    pub fn edit_route(item: &PatientListItem) -> Route {
        Route::EditPatient(item.id.clone())
    }

    /// Ask for confirmation, delete, then reload the whole list.
    ///
    /// Returns `true` only if the delete went through.
    pub fn delete<S: DocumentStore>(
        &mut self,
        service: &PatientService<S>,
        ui: &mut dyn Interaction,
        id: &str,
        name: &str,
    ) -> bool {
        if !ui.confirm(&messages::confirm_delete(name)) {
            return false;
        }

        match service.delete_patient(id) {
            Ok(()) => {
                ui.alert(messages::PATIENT_DELETED);
                self.load(service, ui);
                true
            }
            Err(e) => {
                log::error!("delete of patient {} failed: {}", id, e);
                ui.alert(messages::DELETE_FAILED);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeleteMode, RegistryConfig};
    use crate::db::Database;
    use crate::models::{Address, PatientFormData};
    use crate::ui::testing::Recorder;

    fn item(id: &str, name: &str, city: &str, neighborhood: &str) -> PatientListItem {
        PatientListItem {
            id: id.into(),
            name: name.into(),
            birth_date: "2000-06-15".into(),
            neighborhood: neighborhood.into(),
            city: city.into(),
        }
    }

    fn seeded_service(delete_mode: DeleteMode) -> (PatientService<Database>, Vec<String>) {
        let config = RegistryConfig {
            delete_mode,
            ..RegistryConfig::default()
        };
        let service = PatientService::with_config(Database::open_in_memory().unwrap(), &config);
        let ids = [("Bruno", "Acailandia", "Vila Nova"), ("Ana", "Sao Luis", "Centro")]
            .iter()
            .map(|(name, city, neighborhood)| {
                let data = PatientFormData {
                    name: name.to_string(),
                    address: Address {
                        city: city.to_string(),
                        neighborhood: neighborhood.to_string(),
                        ..Address::default()
                    },
                    ..PatientFormData::default()
                };
                service.create_patient(&data).unwrap()
            })
            .collect();
        (service, ids)
    }

    #[test]
    fn test_filter_items() {
        let items = vec![
            item("1", "Ana", "Sao Luis", "Centro"),
            item("2", "Bruno", "Acailandia", "Vila Nova"),
        ];

        let by_name = filter_items(&items, "ana");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Ana");

        let by_city = filter_items(&items, "ACAI");
        assert_eq!(by_city.len(), 1);
        assert_eq!(by_city[0].name, "Bruno");

        assert_eq!(filter_items(&items, "vila").len(), 1);
        assert_eq!(filter_items(&items, "").len(), 2);
        assert!(filter_items(&items, "xyz").is_empty());
    }

    #[test]
    fn test_display_age() {
        assert!(display_age(&item("1", "Ana", "", "")).unwrap() >= 24);
        let mut undated = item("1", "Ana", "", "");
        undated.birth_date.clear();
        assert_eq!(display_age(&undated), None);
    }

    #[test]
    fn test_load_and_search() {
        let (service, _) = seeded_service(DeleteMode::Touch);
        let mut ui = Recorder::default();
        let mut view = PatientListView::new();

        assert!(view.load(&service, &mut ui));
        assert_eq!(view.summary(), "2 patients registered");
        assert_eq!(view.items()[0].name, "Ana");
        assert_eq!(view.empty_message(), None);

        view.set_search("centro");
        let visible = view.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Ana");

        view.set_search("nobody");
        assert_eq!(view.empty_message(), Some(messages::NO_MATCHES));
    }

    #[test]
    fn test_empty_list_message() {
        let service = PatientService::new(Database::open_in_memory().unwrap());
        let mut ui = Recorder::default();
        let mut view = PatientListView::new();

        view.load(&service, &mut ui);
        assert_eq!(view.summary(), "0 patients registered");
        assert_eq!(view.empty_message(), Some(messages::NO_PATIENTS));
    }

    #[test]
    fn test_summary_singular() {
        let mut view = PatientListView::new();
        view.items = vec![item("1", "Ana", "Sao Luis", "Centro")];
        assert_eq!(view.summary(), "1 patient registered");
    }

    #[test]
    fn test_edit_route() {
        let row = item("abc", "Ana", "Sao Luis", "Centro");
        assert_eq!(PatientListView::edit_route(&row).path(), "/patients/abc/edit");
    }

    #[test]
    fn test_delete_declined() {
        let (service, ids) = seeded_service(DeleteMode::Remove);
        let mut ui = Recorder::default();
        let mut view = PatientListView::new();
        view.load(&service, &mut ui);

        assert!(!view.delete(&service, &mut ui, &ids[0], "Bruno"));
        assert_eq!(ui.confirms, vec!["Do you really want to delete patient Bruno?"]);
        assert!(ui.alerts.is_empty());
        assert_eq!(service.count_patients().unwrap(), 2);
    }

    #[test]
    fn test_delete_touch_reloads_but_keeps_row() {
        let (service, ids) = seeded_service(DeleteMode::Touch);
        let mut ui = Recorder::accepting();
        let mut view = PatientListView::new();
        view.load(&service, &mut ui);

        assert!(view.delete(&service, &mut ui, &ids[0], "Bruno"));
        assert_eq!(ui.alerts, vec![messages::PATIENT_DELETED]);
        assert_eq!(view.items().len(), 2);
    }

    #[test]
    fn test_delete_remove_reloads_without_row() {
        let (service, ids) = seeded_service(DeleteMode::Remove);
        let mut ui = Recorder::accepting();
        let mut view = PatientListView::new();
        view.load(&service, &mut ui);

        assert!(view.delete(&service, &mut ui, &ids[0], "Bruno"));
        let names: Vec<_> = view.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ana"]);
    }

    #[test]
    fn test_delete_failure_alerts() {
        let (service, _) = seeded_service(DeleteMode::Touch);
        let mut ui = Recorder::accepting();
        let mut view = PatientListView::new();

        assert!(!view.delete(&service, &mut ui, "missing", "Ghost"));
        assert_eq!(ui.alerts, vec![messages::DELETE_FAILED]);
    }
}
