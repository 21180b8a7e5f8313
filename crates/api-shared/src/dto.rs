//! Wire types for the doctor directory API.
//!
//! Request types mirror the core input schemas but carry OpenAPI metadata; they convert into
//! `DoctorDraft` / `DoctorPatch` before reaching the service. Response types are built from core
//! records so the wire format does not depend on how records are stored.

use doctor_core::{Doctor, DoctorDraft, DoctorPatch, FieldError, PhoneInput, TextInput};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DOCTOR_ADDED: &str = "Doctor added successfully";
pub const DOCTOR_UPDATED: &str = "Doctor data updated successfully";
pub const DOCTOR_NOT_FOUND: &str = "Doctor not found";
pub const SPECIALTY_REQUIRED: &str = "Specialty query parameter is required";

pub fn doctor_deleted(id: &str) -> String {
    format!("Doctor with ID {id} has been deleted successfully")
}

pub fn no_doctors_with_specialty(specialty: &str) -> String {
    format!("No doctors found with specialty \"{specialty}\"")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DoctorRes {
    #[schema(example = "scd1")]
    pub id: String,
    #[schema(example = "A. Lee")]
    pub name: String,
    #[schema(example = "Cardiology")]
    pub specialty: String,
    #[schema(example = "available")]
    pub availability: String,
    #[schema(example = "10")]
    pub experience: String,
    #[schema(example = 5551234)]
    pub phone: i64,
}

impl From<Doctor> for DoctorRes {
    fn from(doctor: Doctor) -> Self {
        Self {
            id: doctor.id.to_string(),
            name: doctor.name,
            specialty: doctor.specialty,
            availability: doctor.availability,
            experience: doctor.experience,
            phone: doctor.phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListDoctorsRes {
    pub doctors: Vec<DoctorRes>,
}

impl From<Vec<Doctor>> for ListDoctorsRes {
    fn from(doctors: Vec<Doctor>) -> Self {
        Self {
            doctors: doctors.into_iter().map(DoctorRes::from).collect(),
        }
    }
}

/// Creation body. Every member is required; absent members are reported together.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateDoctorReq {
    #[schema(value_type = Option<String>, example = "A. Lee")]
    pub name: Option<TextInput>,
    #[schema(value_type = Option<String>, example = "Cardiology")]
    pub specialty: Option<TextInput>,
    #[schema(value_type = Option<String>, example = "available")]
    pub availability: Option<TextInput>,
    #[schema(value_type = Option<String>, example = "10")]
    pub experience: Option<TextInput>,
    /// Integer, or a string of digits.
    #[schema(value_type = Option<i64>, example = 5551234)]
    pub phone: Option<PhoneInput>,
}

impl From<CreateDoctorReq> for DoctorDraft {
    fn from(req: CreateDoctorReq) -> Self {
        Self {
            name: req.name,
            specialty: req.specialty,
            availability: req.availability,
            experience: req.experience,
            phone: req.phone,
        }
    }
}

/// Update body. Only `phone` and `availability` are applied; other members are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateDoctorReq {
    #[schema(value_type = Option<i64>, example = 5550000)]
    pub phone: Option<PhoneInput>,
    #[schema(value_type = Option<String>, example = "busy")]
    pub availability: Option<TextInput>,
}

impl From<UpdateDoctorReq> for DoctorPatch {
    fn from(req: UpdateDoctorReq) -> Self {
        Self {
            phone: req.phone,
            availability: req.availability,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DoctorMessageRes {
    pub message: String,
    pub doctor: DoctorRes,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorRes {
    pub field: String,
    pub reason: String,
}

impl From<FieldError> for FieldErrorRes {
    fn from(e: FieldError) -> Self {
        Self {
            field: e.field,
            reason: e.reason,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldErrorRes>,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the specialty.
    pub specialty: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_empty_field_list() {
        let json = serde_json::to_value(ErrorRes::new(DOCTOR_NOT_FOUND)).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Doctor not found" }));
    }

    #[test]
    fn create_request_tolerates_missing_members() {
        let req: CreateDoctorReq = serde_json::from_str(r#"{"name":"A. Lee"}"#).unwrap();
        let draft = DoctorDraft::from(req);
        assert_eq!(draft.name, Some(TextInput::from("A. Lee")));
        assert!(draft.phone.is_none());
    }

    #[test]
    fn update_request_drops_unknown_members() {
        let req: UpdateDoctorReq =
            serde_json::from_str(r#"{"name":"x","availability":"busy"}"#).unwrap();
        let patch = DoctorPatch::from(req);
        assert_eq!(patch.availability, Some(TextInput::from("busy")));
        assert!(patch.phone.is_none());
    }

    #[test]
    fn messages_match_published_wording() {
        assert_eq!(
            doctor_deleted("scd3"),
            "Doctor with ID scd3 has been deleted successfully"
        );
        assert_eq!(
            no_doctors_with_specialty("card"),
            "No doctors found with specialty \"card\""
        );
    }
}
