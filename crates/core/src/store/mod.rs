//! Record store abstraction and its backends.
//!
//! The store is the only shared state in the service. Each operation is atomic for the single
//! record it touches; nothing here spans several records.
//!
//! Identifier assignment is part of the store contract ([`RecordStore::create`]) so that
//! reading the current maximum identifier and inserting the new record happen under one lock.
//! Two concurrent creates against the same store therefore never receive the same identifier.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::doctor::{Doctor, DoctorUpdate, NewDoctor};
use crate::error::DoctorResult;
use crate::identifier::DoctorId;

/// Durable keyed storage for doctor records.
///
/// Implementations are synchronous; every call completes in one round trip to the backing
/// medium.
pub trait RecordStore: Send + Sync {
    /// Inserts a record under its own identifier. Fails with `Conflict` if the id is taken.
    fn insert(&self, doctor: &Doctor) -> DoctorResult<()>;

    /// Assigns the next identifier and inserts the record as one atomic step.
    fn create(&self, draft: NewDoctor) -> DoctorResult<Doctor>;

    fn get(&self, id: &DoctorId) -> DoctorResult<Option<Doctor>>;

    /// All records in store order (ascending identifier for the bundled backends).
    fn list_all(&self) -> DoctorResult<Vec<Doctor>>;

    /// Applies `changes` and returns the updated record, or `None` if the id is absent.
    fn update(&self, id: &DoctorId, changes: &DoctorUpdate) -> DoctorResult<Option<Doctor>>;

    /// Removes a record. Returns `false` if the id was absent.
    fn delete(&self, id: &DoctorId) -> DoctorResult<bool>;

    fn find_by_specialty_substring(
        &self,
        text: &str,
        case_insensitive: bool,
    ) -> DoctorResult<Vec<Doctor>>;

    /// Raw identifier strings as held by the backing medium, unvalidated.
    fn ids(&self) -> DoctorResult<Vec<String>>;
}

pub(crate) fn specialty_matches(doctor: &Doctor, text: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        doctor
            .specialty
            .to_lowercase()
            .contains(&text.to_lowercase())
    } else {
        doctor.specialty.contains(text)
    }
}
