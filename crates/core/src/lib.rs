//! # Doctor Core
//!
//! Core business logic for the doctor directory.
//!
//! This crate contains pure data operations:
//! - Doctor identifiers (`scd<n>`) and next-identifier derivation
//! - Input schemas and validation for creating and updating doctors
//! - The record store contract with in-memory and JSON-file backends
//! - [`DoctorService`], which orchestrates create/read/update/search/delete
//!
//! **No API concerns**: HTTP routing, JSON envelopes, and status codes belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod doctor;
pub mod error;
pub mod identifier;
pub mod service;
pub mod store;

pub use config::{CoreConfig, StoreLocation};
pub use doctor::{
    Doctor, DoctorDraft, DoctorPatch, DoctorUpdate, NewDoctor, PhoneInput, TextInput,
};
pub use doctor_types::NonEmptyText;
pub use error::{DoctorError, DoctorResult, FieldError};
pub use identifier::DoctorId;
pub use service::DoctorService;
pub use store::{JsonFileStore, MemoryStore, RecordStore};
