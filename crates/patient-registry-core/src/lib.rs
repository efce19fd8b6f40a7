//! Patient Registry Core Library
//!
//! Clinic patient registration: list, search, create, edit and delete
//! patient records (personal data, address, phones, emails) kept in a
//! document collection.
//!
//! # Architecture
//!
//! ```text
//!   Landing ──► Patient List ──────────────► Create / Edit Form
//!                  │   ▲  search (in memory)        │
//!                  │   └──────── navigate back ◄────┤
//!                  │                                │ validate
//!                  ▼                                ▼
//!        ┌───────────────────────────────────────────────────┐
//!        │          PatientService (data access)             │
//!        │  list · get · create · update · delete · by city  │
//!        └─────────────────────────┬─────────────────────────┘
//!                                  │ DocumentStore
//!                                  ▼
//!                    SQLite JSON document collection
//! ```
//!
//! # Modules
//!
//! - [`db`]: Document store on SQLite
//! - [`models`]: Domain types (Patient, Address, BloodType, PatientListItem)
//! - [`validation`]: Record validation, phone/email checks, age and BMI
//! - [`service`]: Data access with user-facing error mapping
//! - [`ui`]: Screen state for the form, list, edit and landing screens
//! - [`config`]: Registry configuration

pub mod config;
pub mod db;
pub mod models;
pub mod service;
pub mod ui;
pub mod validation;

// Re-export commonly used types
pub use config::{DeleteMode, RegistryConfig};
pub use db::{Database, DocumentStore};
pub use models::{Address, BloodType, Patient, PatientFormData, PatientListItem};
pub use service::{PatientService, ServiceError};
pub use validation::ValidationError;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum RegistryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    ServiceError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for RegistryError {
    fn from(e: db::DbError) -> Self {
        RegistryError::DatabaseError(e.to_string())
    }
}

impl From<ServiceError> for RegistryError {
    fn from(e: ServiceError) -> Self {
        // Display is the generic user-facing message; the cause was logged
        RegistryError::ServiceError(e.to_string())
    }
}

impl From<config::ConfigError> for RegistryError {
    fn from(e: config::ConfigError) -> Self {
        RegistryError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for RegistryError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        RegistryError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a registry database at the given path.
#[uniffi::export]
pub fn open_registry(path: String) -> Result<Arc<PatientRegistryCore>, RegistryError> {
    let db = Database::open(&path)?;
    Ok(PatientRegistryCore::wrap(PatientService::new(db)))
}

/// Create an in-memory registry (for testing).
#[uniffi::export]
pub fn open_registry_in_memory() -> Result<Arc<PatientRegistryCore>, RegistryError> {
    let db = Database::open_in_memory()?;
    Ok(PatientRegistryCore::wrap(PatientService::new(db)))
}

/// Open a registry described by a JSON config.
#[uniffi::export]
pub fn open_registry_with_config(config_json: String) -> Result<Arc<PatientRegistryCore>, RegistryError> {
    let config = RegistryConfig::from_json_str(&config_json)?;
    let db = match &config.database_path {
        Some(path) => Database::open(path)?,
        None => Database::open_in_memory()?,
    };
    Ok(PatientRegistryCore::wrap(PatientService::with_config(db, &config)))
}

// =========================================================================
// Display Helpers (exported to FFI)
// =========================================================================

/// Validation messages for a record; empty when it may be saved.
#[uniffi::export]
pub fn validate_patient(data: FfiPatientFormData) -> Result<Vec<String>, RegistryError> {
    let data = PatientFormData::try_from(data)?;
    Ok(validation::error_messages(&validation::validate_patient(&data)))
}

#[uniffi::export]
pub fn is_valid_email(email: String) -> bool {
    validation::is_valid_email(&email)
}

#[uniffi::export]
pub fn is_valid_phone(phone: String) -> bool {
    validation::is_valid_phone(&phone)
}

#[uniffi::export]
pub fn format_phone(phone: String) -> String {
    validation::format_phone(&phone)
}

/// Age in whole years from a `YYYY-MM-DD` birth date.
#[uniffi::export]
pub fn compute_age(birth_date: String) -> Result<i32, RegistryError> {
    validation::parse_birth_date(&birth_date)
        .map(validation::compute_age)
        .ok_or_else(|| RegistryError::InvalidInput(format!("Invalid birth date: {}", birth_date)))
}

#[uniffi::export]
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> f64 {
    validation::compute_bmi(weight_kg, height_m)
}

/// Rows whose name, city or neighborhood contains `term`.
#[uniffi::export]
pub fn filter_patients(items: Vec<FfiPatientListItem>, term: String) -> Vec<FfiPatientListItem> {
    let items: Vec<PatientListItem> = items.into_iter().map(Into::into).collect();
    ui::filter_items(&items, &term)
        .into_iter()
        .cloned()
        .map(Into::into)
        .collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe registry wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PatientRegistryCore {
    service: Arc<Mutex<PatientService<Database>>>,
}

impl PatientRegistryCore {
    fn wrap(service: PatientService<Database>) -> Arc<Self> {
        Arc::new(Self {
            service: Arc::new(Mutex::new(service)),
        })
    }
}

#[uniffi::export]
impl PatientRegistryCore {
    /// All patients sorted by name.
    pub fn list_patients(&self) -> Result<Vec<FfiPatientListItem>, RegistryError> {
        let service = self.service.lock()?;
        let items = service.list_patients()?;
        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, RegistryError> {
        let service = self.service.lock()?;
        let patient = service.get_patient(&id)?;
        Ok(patient.map(|p| p.into()))
    }

    /// Create a new patient and return its ID.
    ///
    /// Callers validate first; this stores whatever it is given.
    pub fn create_patient(&self, data: FfiPatientFormData) -> Result<String, RegistryError> {
        let data = PatientFormData::try_from(data)?;
        let service = self.service.lock()?;
        Ok(service.create_patient(&data)?)
    }

    /// Overwrite an existing patient.
    pub fn update_patient(&self, id: String, data: FfiPatientFormData) -> Result<(), RegistryError> {
        let data = PatientFormData::try_from(data)?;
        let service = self.service.lock()?;
        Ok(service.update_patient(&id, &data)?)
    }

    /// Delete action (see [`DeleteMode`]).
    pub fn delete_patient(&self, id: String) -> Result<(), RegistryError> {
        let service = self.service.lock()?;
        Ok(service.delete_patient(&id)?)
    }

    /// Patients living in the given city, ordered by name.
    pub fn find_by_city(&self, city: String) -> Result<Vec<FfiPatientListItem>, RegistryError> {
        let service = self.service.lock()?;
        let items = service.find_by_city(&city)?;
        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    pub fn count_patients(&self) -> Result<u32, RegistryError> {
        let service = self.service.lock()?;
        Ok(service.count_patients()? as u32)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe address.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAddress {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl From<Address> for FfiAddress {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            number: address.number,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
        }
    }
}

impl From<FfiAddress> for Address {
    fn from(address: FfiAddress) -> Self {
        Address {
            street: address.street,
            number: address.number,
            neighborhood: address.neighborhood,
            city: address.city,
            state: address.state,
        }
    }
}

/// FFI-safe writable patient fields.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientFormData {
    pub name: String,
    pub birth_date: String,
    pub weight_kg: f64,
    pub height_m: f64,
    /// One of `A+`, `A-`, `B+`, `B-`, `AB+`, `AB-`, `O+`, `O-`
    pub blood_type: String,
    pub address: FfiAddress,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl TryFrom<FfiPatientFormData> for PatientFormData {
    type Error = RegistryError;

    fn try_from(data: FfiPatientFormData) -> Result<Self, Self::Error> {
        let blood_type = data
            .blood_type
            .parse::<BloodType>()
            .map_err(|e| RegistryError::InvalidInput(e.to_string()))?;

        Ok(PatientFormData {
            name: data.name,
            birth_date: data.birth_date,
            weight_kg: data.weight_kg,
            height_m: data.height_m,
            blood_type,
            address: data.address.into(),
            phones: data.phones,
            emails: data.emails,
        })
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub weight_kg: f64,
    pub height_m: f64,
    pub blood_type: String,
    pub address: FfiAddress,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            name: patient.data.name,
            birth_date: patient.data.birth_date,
            weight_kg: patient.data.weight_kg,
            height_m: patient.data.height_m,
            blood_type: patient.data.blood_type.to_string(),
            address: patient.data.address.into(),
            phones: patient.data.phones,
            emails: patient.data.emails,
            created_at: patient.created_at,
            updated_at: patient.updated_at,
        }
    }
}

/// FFI-safe list row.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientListItem {
    pub id: String,
    pub name: String,
    pub birth_date: String,
    pub neighborhood: String,
    pub city: String,
}

impl From<PatientListItem> for FfiPatientListItem {
    fn from(item: PatientListItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            birth_date: item.birth_date,
            neighborhood: item.neighborhood,
            city: item.city,
        }
    }
}

impl From<FfiPatientListItem> for PatientListItem {
    fn from(item: FfiPatientListItem) -> Self {
        PatientListItem {
            id: item.id,
            name: item.name,
            birth_date: item.birth_date,
            neighborhood: item.neighborhood,
            city: item.city,
        }
    }
}
