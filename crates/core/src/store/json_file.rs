//! File-backed record store.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//!   doctors/
//!     scd1.json
//!     scd2.json
//! ```
//!
//! Each record is one pretty-printed JSON document named after its identifier. Writes go to a
//! hidden temporary file in the same directory and are moved into place with `rename`, so a
//! reader never observes a half-written record and a failed write leaves the previous state.
//!
//! Writers inside one process are serialised by a mutex. Several processes sharing a directory
//! are not coordinated.

use super::{specialty_matches, RecordStore};
use crate::constants::{DOCTORS_DIR_NAME, RECORD_EXTENSION};
use crate::doctor::{Doctor, DoctorUpdate, NewDoctor};
use crate::error::{DoctorError, DoctorResult};
use crate::identifier::{next_id, DoctorId};
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (and creates if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageDirCreation` if the records directory cannot be created.
    pub fn open(root: &Path) -> DoctorResult<Self> {
        let dir = root.join(DOCTORS_DIR_NAME);
        fs::create_dir_all(&dir).map_err(DoctorError::StorageDirCreation)?;
        tracing::debug!("doctor records stored under {}", dir.display());
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn records_dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &DoctorId) -> PathBuf {
        self.dir.join(format!("{id}.{RECORD_EXTENSION}"))
    }

    /// Reads the record stored under `id`. A file whose contents carry another id is an error.
    fn read_record(&self, id: &DoctorId) -> DoctorResult<Option<Doctor>> {
        let contents = match fs::read(self.record_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DoctorError::FileRead(e)),
        };
        let doctor: Doctor =
            serde_json::from_slice(&contents).map_err(DoctorError::Deserialization)?;
        if doctor.id != *id {
            return Err(DoctorError::IdMismatch {
                stored_as: id.to_string(),
                found: doctor.id.to_string(),
            });
        }
        Ok(Some(doctor))
    }

    fn write_record(&self, doctor: &Doctor) -> DoctorResult<()> {
        let bytes = serde_json::to_vec_pretty(doctor).map_err(DoctorError::Serialization)?;
        let target = self.record_path(&doctor.id);
        let tmp = self
            .dir
            .join(format!(".{}.{RECORD_EXTENSION}.tmp", doctor.id));

        let written = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &target));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!("failed to remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(DoctorError::FileWrite(e));
        }
        Ok(())
    }

    /// Identifier strings taken from the names of `*.json` files, in directory order.
    fn stored_ids(&self) -> DoctorResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(DoctorError::FileRead)? {
            let path = entry.map_err(DoctorError::FileRead)?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_owned());
            }
        }
        Ok(ids)
    }

    /// Every readable record in ascending identifier order.
    ///
    /// Files whose name is not an identifier, or whose contents cannot be parsed, are logged and
    /// skipped.
    fn load_all(&self) -> DoctorResult<Vec<Doctor>> {
        let mut ids: Vec<DoctorId> = Vec::new();
        for raw in self.stored_ids()? {
            match DoctorId::parse(&raw) {
                Ok(id) => ids.push(id),
                Err(_) => tracing::warn!("skipping non-doctor file {raw}.{RECORD_EXTENSION}"),
            }
        }
        ids.sort();

        let mut doctors = Vec::with_capacity(ids.len());
        for id in ids {
            match self.read_record(&id) {
                Ok(Some(doctor)) => doctors.push(doctor),
                // Deleted between listing and reading.
                Ok(None) => {}
                Err(e) => tracing::warn!("skipping {id}.{RECORD_EXTENSION}: {e}"),
            }
        }
        Ok(doctors)
    }
}

impl RecordStore for JsonFileStore {
    fn insert(&self, doctor: &Doctor) -> DoctorResult<()> {
        let _guard = self.write_lock.lock();
        if self.record_path(&doctor.id).exists() {
            return Err(DoctorError::Conflict(doctor.id.to_string()));
        }
        self.write_record(doctor)
    }

    fn create(&self, draft: NewDoctor) -> DoctorResult<Doctor> {
        let _guard = self.write_lock.lock();
        let id = next_id(self.stored_ids()?)?;
        let doctor = draft.into_doctor(id);
        self.write_record(&doctor)?;
        Ok(doctor)
    }

    fn get(&self, id: &DoctorId) -> DoctorResult<Option<Doctor>> {
        self.read_record(id)
    }

    fn list_all(&self) -> DoctorResult<Vec<Doctor>> {
        self.load_all()
    }

    fn update(&self, id: &DoctorId, changes: &DoctorUpdate) -> DoctorResult<Option<Doctor>> {
        let _guard = self.write_lock.lock();
        let Some(mut doctor) = self.read_record(id)? else {
            return Ok(None);
        };
        changes.apply(&mut doctor);
        self.write_record(&doctor)?;
        Ok(Some(doctor))
    }

    fn delete(&self, id: &DoctorId) -> DoctorResult<bool> {
        let _guard = self.write_lock.lock();
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DoctorError::FileRemove(e)),
        }
    }

    fn find_by_specialty_substring(
        &self,
        text: &str,
        case_insensitive: bool,
    ) -> DoctorResult<Vec<Doctor>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|d| specialty_matches(d, text, case_insensitive))
            .collect())
    }

    fn ids(&self) -> DoctorResult<Vec<String>> {
        self.stored_ids()
    }
}
