use super::{specialty_matches, RecordStore};
use crate::doctor::{Doctor, DoctorUpdate, NewDoctor};
use crate::error::{DoctorError, DoctorResult};
use crate::identifier::{next_after, DoctorId};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Volatile store keyed by identifier. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<DoctorId, Doctor>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, doctor: &Doctor) -> DoctorResult<()> {
        let mut records = self.records.write();
        if records.contains_key(&doctor.id) {
            return Err(DoctorError::Conflict(doctor.id.to_string()));
        }
        records.insert(doctor.id, doctor.clone());
        Ok(())
    }

    fn create(&self, draft: NewDoctor) -> DoctorResult<Doctor> {
        let mut records = self.records.write();
        let id = next_after(records.keys().next_back().copied())?;
        let doctor = draft.into_doctor(id);
        records.insert(id, doctor.clone());
        Ok(doctor)
    }

    fn get(&self, id: &DoctorId) -> DoctorResult<Option<Doctor>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn list_all(&self) -> DoctorResult<Vec<Doctor>> {
        Ok(self.records.read().values().cloned().collect())
    }

    fn update(&self, id: &DoctorId, changes: &DoctorUpdate) -> DoctorResult<Option<Doctor>> {
        let mut records = self.records.write();
        Ok(records.get_mut(id).map(|doctor| {
            changes.apply(doctor);
            doctor.clone()
        }))
    }

    fn delete(&self, id: &DoctorId) -> DoctorResult<bool> {
        Ok(self.records.write().remove(id).is_some())
    }

    fn find_by_specialty_substring(
        &self,
        text: &str,
        case_insensitive: bool,
    ) -> DoctorResult<Vec<Doctor>> {
        Ok(self
            .records
            .read()
            .values()
            .filter(|d| specialty_matches(d, text, case_insensitive))
            .cloned()
            .collect())
    }

    fn ids(&self) -> DoctorResult<Vec<String>> {
        Ok(self.records.read().keys().map(ToString::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor::DoctorDraft;
    use std::sync::Arc;

    fn draft(name: &str, specialty: &str) -> NewDoctor {
        DoctorDraft {
            name: Some(name.into()),
            specialty: Some(specialty.into()),
            availability: Some("available".into()),
            experience: Some("5".into()),
            phone: Some(100.into()),
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        for n in 1..=12 {
            let doctor = store.create(draft("Doc", "Cardiology")).unwrap();
            assert_eq!(doctor.id.to_string(), format!("scd{n}"));
        }
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let store = MemoryStore::new();
        let doctor = store.create(draft("A", "Cardiology")).unwrap();
        let err = store.insert(&doctor).unwrap_err();
        assert!(matches!(err, DoctorError::Conflict(_)));
    }

    #[test]
    fn create_continues_after_inserted_id() {
        let store = MemoryStore::new();
        let seeded = draft("Seed", "Oncology").into_doctor(DoctorId::from_number(41).unwrap());
        store.insert(&seeded).unwrap();
        let next = store.create(draft("B", "Oncology")).unwrap();
        assert_eq!(next.id.to_string(), "scd42");
    }

    #[test]
    fn update_and_delete_report_absence() {
        let store = MemoryStore::new();
        let missing = DoctorId::from_number(9).unwrap();
        assert!(store
            .update(&missing, &DoctorUpdate::default())
            .unwrap()
            .is_none());
        assert!(!store.delete(&missing).unwrap());
    }

    #[test]
    fn specialty_search_respects_case_flag() {
        let store = MemoryStore::new();
        store.create(draft("A", "Cardiology")).unwrap();
        store.create(draft("B", "Neurology")).unwrap();

        let found = store.find_by_specialty_substring("card", true).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].specialty, "Cardiology");
        assert!(store
            .find_by_specialty_substring("card", false)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn concurrent_creates_never_share_an_id() {
        let store = Arc::new(MemoryStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| store.create(draft("C", "Dermatology")).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<DoctorId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert_eq!(ids.last().map(DoctorId::number), Some(200));
    }
}
