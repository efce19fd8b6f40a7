//! Domain models for the patient registry.

mod blood_type;
mod list_item;
mod patient;

pub use blood_type::*;
pub use list_item::*;
pub use patient::*;
