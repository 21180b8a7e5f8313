//! Doctor service.
//!
//! Validates caller input and runs each operation against the record store. Every operation
//! touches exactly one record; nothing here is retried.

use crate::doctor::{Doctor, DoctorDraft, DoctorPatch};
use crate::error::{DoctorError, DoctorResult};
use crate::identifier::{next_id, DoctorId};
use crate::store::RecordStore;
use std::sync::Arc;

/// Pure doctor data operations - no API concerns
#[derive(Clone)]
pub struct DoctorService {
    store: Arc<dyn RecordStore>,
}

impl DoctorService {
    /// Creates a service over an already-opened store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Validates `draft`, assigns the next identifier and persists the record.
    ///
    /// # Errors
    ///
    /// Returns `DoctorError` if:
    /// - any required member is missing or invalid (`Validation`, listing each one),
    /// - a stored identifier is malformed (`MalformedIdentifier`),
    /// - the store fails to write.
    pub fn create(&self, draft: DoctorDraft) -> DoctorResult<Doctor> {
        let new_doctor = draft.validate()?;
        let doctor = self.store.create(new_doctor)?;
        tracing::info!(id = %doctor.id, "doctor created");
        Ok(doctor)
    }

    /// All records in store order. An empty store yields an empty list.
    pub fn list_all(&self) -> DoctorResult<Vec<Doctor>> {
        self.store.list_all()
    }

    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id. An id that is not well formed cannot
    /// belong to any record and is also reported as `NotFound`.
    pub fn get(&self, id: &str) -> DoctorResult<Doctor> {
        let doctor_id = lookup_id(id)?;
        self.store
            .get(&doctor_id)?
            .ok_or_else(|| DoctorError::NotFound(id.to_owned()))
    }

    /// Applies the `phone` and `availability` members present in `patch`.
    ///
    /// Existence is checked before the patch contents, so an unknown id is always `NotFound`
    /// even when the patch is also invalid.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `Validation`, or a store failure.
    pub fn update(&self, id: &str, patch: DoctorPatch) -> DoctorResult<Doctor> {
        let doctor_id = lookup_id(id)?;
        let not_found = || DoctorError::NotFound(id.to_owned());

        let changes = match patch.validate() {
            Ok(changes) => changes,
            Err(e) => {
                self.store.get(&doctor_id)?.ok_or_else(not_found)?;
                return Err(e);
            }
        };

        if changes.is_empty() {
            return self.store.get(&doctor_id)?.ok_or_else(not_found);
        }

        let doctor = self
            .store
            .update(&doctor_id, &changes)?
            .ok_or_else(not_found)?;
        tracing::info!(id = %doctor.id, "doctor updated");
        Ok(doctor)
    }

    /// Case-insensitive substring search over `specialty`. The query is matched as given,
    /// surrounding whitespace included.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an absent or blank query and `NoMatches` when nothing matches.
    pub fn search_by_specialty(&self, query: Option<&str>) -> DoctorResult<Vec<Doctor>> {
        let query = query.unwrap_or_default();
        if query.trim().is_empty() {
            return Err(DoctorError::invalid_field("specialty", "is required"));
        }

        let doctors = self.store.find_by_specialty_substring(query, true)?;
        if doctors.is_empty() {
            return Err(DoctorError::NoMatches(query.to_owned()));
        }
        Ok(doctors)
    }

    /// Removes a record and returns the identifier that was deleted.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    pub fn delete(&self, id: &str) -> DoctorResult<DoctorId> {
        let doctor_id = lookup_id(id)?;
        if !self.store.delete(&doctor_id)? {
            return Err(DoctorError::NotFound(id.to_owned()));
        }
        tracing::info!(id = %doctor_id, "doctor deleted");
        Ok(doctor_id)
    }

    /// The identifier the next create would receive if nothing else is created first.
    ///
    /// # Errors
    ///
    /// Returns `MalformedIdentifier` if the store holds an identifier of the wrong shape.
    pub fn next_id(&self) -> DoctorResult<DoctorId> {
        next_id(self.store.ids()?)
    }
}

fn lookup_id(id: &str) -> DoctorResult<DoctorId> {
    DoctorId::parse(id).map_err(|_| DoctorError::NotFound(id.to_owned()))
}
