//! Screen state for a patient registry front end.
//!
//! These types hold what a screen shows and react to user actions; drawing
//! is left to the host. Dialogs and navigation go through [`Interaction`],
//! which the host implements with its own blocking confirm/alert boxes and
//! router.

mod edit;
mod form;
mod landing;
mod list;

pub use edit::*;
pub use form::*;
pub use landing::*;
pub use list::*;

use crate::db::DocumentStore;
use crate::service::PatientService;

/// User-facing dialog texts.
pub mod messages {
    pub const PATIENT_CREATED: &str = "Patient registered successfully!";
    pub const PATIENT_UPDATED: &str = "Patient updated successfully!";
    pub const CREATE_FAILED: &str = "Error registering patient";
    pub const UPDATE_FAILED: &str = "Error updating patient";
    pub const PATIENT_DELETED: &str = "Patient deleted successfully";
    pub const DELETE_FAILED: &str = "Error deleting patient";
    pub const LIST_FAILED: &str = "Error loading patients";
    pub const LOAD_FAILED: &str = "Error loading patient";
    pub const NOT_FOUND: &str = "Patient not found";
    pub const NO_PATIENTS: &str = "No patients registered";
    pub const NO_MATCHES: &str = "No patients found";

    pub fn confirm_delete(name: &str) -> String {
        format!("Do you really want to delete patient {}?", name)
    }
}

/// Navigation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    PatientList,
    NewPatient,
    EditPatient(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::PatientList => "/patients".to_string(),
            Route::NewPatient => "/patients/new".to_string(),
            Route::EditPatient(id) => format!("/patients/{}/edit", id),
        }
    }

    /// Parse a path produced by [`Route::path`]. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["patients"] => Some(Route::PatientList),
            ["patients", "new"] => Some(Route::NewPatient),
            ["patients", id, "edit"] => Some(Route::EditPatient((*id).to_string())),
            _ => None,
        }
    }
}

/// Blocking dialogs and navigation provided by the host.
pub trait Interaction {
    /// Ask a yes/no question; `true` means the user agreed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a notice and wait for acknowledgment.
    fn alert(&mut self, message: &str);

    fn navigate(&mut self, route: Route);
}

/// A screen opened from a route.
#[derive(Debug)]
pub enum Screen {
    Landing(LandingPage),
    List(PatientListView),
    Form(PatientForm),
}

impl Screen {
    /// Build and load the screen for `route`.
    ///
    /// Returns `None` when the screen redirected elsewhere instead (an edit
    /// route for a patient that does not exist).
    pub fn open<S: DocumentStore>(
        route: &Route,
        service: &PatientService<S>,
        ui: &mut dyn Interaction,
    ) -> Option<Screen> {
        match route {
            Route::Home => Some(Screen::Landing(LandingPage)),
            Route::PatientList => {
                let mut view = PatientListView::new();
                view.load(service, ui);
                Some(Screen::List(view))
            }
            Route::NewPatient => Some(Screen::Form(PatientForm::create())),
            Route::EditPatient(id) => load_for_edit(service, id, ui).map(Screen::Form),
        }
    }
}
