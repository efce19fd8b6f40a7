//! Patient data access.
//!
//! [`PatientService`] is the only code that talks to the document store.
//! Store failures are logged here and surfaced as one of a few fixed,
//! user-facing [`ServiceError`]s; the original error stays reachable through
//! [`std::error::Error::source`].

mod document;
mod ordering;

pub use document::{to_fields, to_list_item, to_patient, CREATED_AT, UPDATED_AT};
pub use ordering::*;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::{DeleteMode, RegistryConfig, DEFAULT_COLLECTION};
use crate::db::{DbError, DocumentStore, Query};
use crate::models::{now_timestamp, Patient, PatientFormData, PatientListItem};

/// User-facing data access failures.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Error loading patients")]
    LoadList(#[source] DbError),

    #[error("Error loading patient")]
    Load(#[source] DbError),

    #[error("Error creating patient")]
    Create(#[source] DbError),

    #[error("Error updating patient")]
    Update(#[source] DbError),

    #[error("Error deleting patient")]
    Delete(#[source] DbError),

    #[error("Error searching patients")]
    Search(#[source] DbError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Log the store error, then wrap it in the given user-facing variant.
fn logged(action: &'static str, wrap: fn(DbError) -> ServiceError) -> impl FnOnce(DbError) -> ServiceError {
    move |e| {
        log::error!("{} failed: {}", action, e);
        wrap(e)
    }
}

/// CRUD operations on the patient collection.
pub struct PatientService<S> {
    store: S,
    collection: String,
    delete_mode: DeleteMode,
}

impl<S: DocumentStore> PatientService<S> {
    /// Service over the default collection, with touch-only delete.
    pub fn new(store: S) -> Self {
        Self {
            store,
            collection: DEFAULT_COLLECTION.to_string(),
            delete_mode: DeleteMode::default(),
        }
    }

    /// Service using the collection and delete behaviour from `config`.
    pub fn with_config(store: S, config: &RegistryConfig) -> Self {
        Self {
            store,
            collection: config.collection.clone(),
            delete_mode: config.delete_mode,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn delete_mode(&self) -> DeleteMode {
        self.delete_mode
    }

    /// All patients as list rows, sorted by name.
    ///
    /// Reads the whole collection. Documents that cannot be decoded are
    /// skipped with a warning rather than failing the list.
    pub fn list_patients(&self) -> ServiceResult<Vec<PatientListItem>> {
        let documents = self
            .store
            .list_documents(&self.collection)
            .map_err(logged("list patients", ServiceError::LoadList))?;
        log::debug!("fetched {} patient documents", documents.len());

        let mut items: Vec<PatientListItem> = documents
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                to_list_item(doc)
                    .map_err(|e| log::warn!("skipping patient document {}: {}", id, e))
                    .ok()
            })
            .collect();

        items.sort_by(|a, b| compare_names(&a.name, &b.name));
        Ok(items)
    }

    /// Number of patients in the collection.
    pub fn count_patients(&self) -> ServiceResult<usize> {
        self.store
            .list_documents(&self.collection)
            .map(|docs| docs.len())
            .map_err(logged("count patients", ServiceError::LoadList))
    }

    /// One patient by id; `Ok(None)` when there is no such patient.
    pub fn get_patient(&self, id: &str) -> ServiceResult<Option<Patient>> {
        let document = self
            .store
            .get_document(&self.collection, id)
            .map_err(logged("get patient", ServiceError::Load))?;

        document
            .map(to_patient)
            .transpose()
            .map_err(logged("decode patient", ServiceError::Load))
    }

    /// Store a new patient, stamping both timestamps. Returns the new id.
    pub fn create_patient(&self, data: &PatientFormData) -> ServiceResult<String> {
        let mut fields = to_fields(data).map_err(logged("encode patient", ServiceError::Create))?;
        let now = now_timestamp();
        fields.insert(CREATED_AT.into(), Value::String(now.clone()));
        fields.insert(UPDATED_AT.into(), Value::String(now));

        let id = self
            .store
            .add_document(&self.collection, &Value::Object(fields))
            .map_err(logged("create patient", ServiceError::Create))?;
        log::info!("created patient {}", id);
        Ok(id)
    }

    /// Overwrite a patient's fields and refresh `updatedAt`.
    ///
    /// Fails when the patient does not exist.
    pub fn update_patient(&self, id: &str, data: &PatientFormData) -> ServiceResult<()> {
        let mut fields = to_fields(data).map_err(logged("encode patient", ServiceError::Update))?;
        fields.insert(UPDATED_AT.into(), Value::String(now_timestamp()));

        self.store
            .update_document(&self.collection, id, &fields)
            .map_err(logged("update patient", ServiceError::Update))?;
        log::info!("updated patient {}", id);
        Ok(())
    }

    /// Delete action for a patient.
    ///
    /// With [`DeleteMode::Touch`] the document stays and only `updatedAt`
    /// changes; with [`DeleteMode::Remove`] it is removed. Either way a
    /// missing patient is an error.
    pub fn delete_patient(&self, id: &str) -> ServiceResult<()> {
        match self.delete_mode {
            DeleteMode::Touch => {
                let mut fields = Map::new();
                fields.insert(UPDATED_AT.into(), Value::String(now_timestamp()));
                self.store
                    .update_document(&self.collection, id, &fields)
                    .map_err(logged("delete patient", ServiceError::Delete))?;
                log::info!("delete of patient {} recorded as timestamp touch", id);
            }
            DeleteMode::Remove => {
                let removed = self
                    .store
                    .delete_document(&self.collection, id)
                    .map_err(logged("delete patient", ServiceError::Delete))?;
                if !removed {
                    let missing = DbError::NotFound(format!("{}/{}", self.collection, id));
                    return Err(logged("delete patient", ServiceError::Delete)(missing));
                }
                log::info!("removed patient {}", id);
            }
        }
        Ok(())
    }

    /// Patients living in `city` (exact match), ordered by name in the store.
    pub fn find_by_city(&self, city: &str) -> ServiceResult<Vec<PatientListItem>> {
        let query = Query::new().where_eq("address.city", city).order_by("name");
        let documents = self
            .store
            .query_documents(&self.collection, &query)
            .map_err(logged("find patients by city", ServiceError::Search))?;

        documents
            .into_iter()
            .map(to_list_item)
            .collect::<Result<Vec<_>, _>>()
            .map_err(logged("decode patients", ServiceError::Search))
    }
}
