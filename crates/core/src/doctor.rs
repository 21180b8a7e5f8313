//! Doctor records and the input schemas used to create and update them.
//!
//! Callers never build a [`Doctor`] directly from request data. Creation input arrives as a
//! [`DoctorDraft`] in which every member is optional, so that a missing member can be reported
//! alongside every other problem instead of failing deserialisation at the first one.
//! [`DoctorDraft::validate`] turns it into a [`NewDoctor`], which only lacks an identifier.
//!
//! Updates follow the same split: [`DoctorPatch`] is what callers send and [`DoctorUpdate`] is
//! what the store applies. A patch only knows about `phone` and `availability`; anything else in
//! the input is dropped during deserialisation.

use crate::constants::{
    AVAILABILITY_MAX_LEN, EXPERIENCE_MAX_LEN, NAME_MAX_LEN, SPECIALTY_MAX_LEN,
};
use crate::error::{DoctorError, DoctorResult, FieldError};
use crate::identifier::DoctorId;
use doctor_types::{bounded_text, NonEmptyText};
use serde::{Deserialize, Serialize};

/// A stored doctor record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty: String,
    pub availability: String,
    pub experience: String,
    pub phone: i64,
}

/// A text member as supplied by a caller.
///
/// A value of the wrong JSON type is kept as `Invalid` so validation can name the member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextInput {
    Text(String),
    Invalid(serde_json::Value),
}

impl TextInput {
    fn into_text(self) -> Result<String, String> {
        match self {
            TextInput::Text(s) => Ok(s),
            TextInput::Invalid(_) => Err("must be a string".to_owned()),
        }
    }
}

impl From<String> for TextInput {
    fn from(s: String) -> Self {
        TextInput::Text(s)
    }
}

impl From<&str> for TextInput {
    fn from(s: &str) -> Self {
        TextInput::Text(s.to_owned())
    }
}

/// A phone number as supplied by a caller.
///
/// Accepts a non-negative JSON integer or a string of ASCII digits. Anything else is kept so validation can
/// name the field instead of rejecting the whole body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PhoneInput {
    Number(i64),
    Text(String),
    Invalid(serde_json::Value),
}

impl PhoneInput {
    fn parse(self) -> Result<i64, &'static str> {
        match self {
            PhoneInput::Number(n) if n < 0 => Err("must be numeric"),
            PhoneInput::Number(n) => Ok(n),
            PhoneInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return Err("must be numeric");
                }
                s.parse::<i64>().map_err(|_| "is out of range")
            }
            PhoneInput::Invalid(_) => Err("must be an integer"),
        }
    }
}

impl From<i64> for PhoneInput {
    fn from(n: i64) -> Self {
        PhoneInput::Number(n)
    }
}

/// Unvalidated creation input. Every member is optional here and required by `validate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorDraft {
    pub name: Option<TextInput>,
    pub specialty: Option<TextInput>,
    pub availability: Option<TextInput>,
    pub experience: Option<TextInput>,
    pub phone: Option<PhoneInput>,
}

/// Creation input that passed validation; it becomes a [`Doctor`] once an identifier is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoctor {
    pub name: NonEmptyText,
    pub specialty: NonEmptyText,
    pub availability: String,
    pub experience: String,
    pub phone: i64,
}

impl NewDoctor {
    pub fn into_doctor(self, id: DoctorId) -> Doctor {
        Doctor {
            id,
            name: self.name.into_inner(),
            specialty: self.specialty.into_inner(),
            availability: self.availability,
            experience: self.experience,
            phone: self.phone,
        }
    }
}

fn required<T>(errors: &mut Vec<FieldError>, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.push(FieldError::missing(field));
    }
    value
}

fn non_empty(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<TextInput>,
    max: usize,
) -> Option<NonEmptyText> {
    let value = required(errors, field, value)?;
    value
        .into_text()
        .and_then(|s| NonEmptyText::with_max_len(s, max).map_err(|e| e.to_string()))
        .map_err(|reason| errors.push(FieldError::new(field, reason)))
        .ok()
}

fn free_text(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<TextInput>,
    max: usize,
) -> Option<String> {
    value?
        .into_text()
        .and_then(|s| bounded_text(s, max).map_err(|e| e.to_string()))
        .map_err(|reason| errors.push(FieldError::new(field, reason)))
        .ok()
}

fn phone(errors: &mut Vec<FieldError>, value: Option<PhoneInput>) -> Option<i64> {
    value?
        .parse()
        .map_err(|reason| errors.push(FieldError::new("phone", reason)))
        .ok()
}

impl DoctorDraft {
    /// Checks every member and collects all problems before failing.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::Validation`] listing each missing or invalid member.
    pub fn validate(self) -> DoctorResult<NewDoctor> {
        let mut errors = Vec::new();

        let name = non_empty(&mut errors, "name", self.name, NAME_MAX_LEN);
        let specialty = non_empty(&mut errors, "specialty", self.specialty, SPECIALTY_MAX_LEN);
        let availability = required(&mut errors, "availability", self.availability);
        let availability = free_text(&mut errors, "availability", availability, AVAILABILITY_MAX_LEN);
        let experience = required(&mut errors, "experience", self.experience);
        let experience = free_text(&mut errors, "experience", experience, EXPERIENCE_MAX_LEN);
        let phone_value = required(&mut errors, "phone", self.phone);
        let phone = phone(&mut errors, phone_value);

        match (name, specialty, availability, experience, phone) {
            (Some(name), Some(specialty), Some(availability), Some(experience), Some(phone))
                if errors.is_empty() =>
            {
                Ok(NewDoctor {
                    name,
                    specialty,
                    availability,
                    experience,
                    phone,
                })
            }
            _ => Err(DoctorError::Validation(errors)),
        }
    }
}

/// Unvalidated update input. Members other than `phone` and `availability` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoctorPatch {
    pub phone: Option<PhoneInput>,
    pub availability: Option<TextInput>,
}

/// A validated set of changes to apply to one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorUpdate {
    pub phone: Option<i64>,
    pub availability: Option<String>,
}

impl DoctorPatch {
    /// # Errors
    ///
    /// Returns [`DoctorError::Validation`] if a present member is invalid.
    pub fn validate(self) -> DoctorResult<DoctorUpdate> {
        let mut errors = Vec::new();
        let phone = phone(&mut errors, self.phone);
        let availability = free_text(
            &mut errors,
            "availability",
            self.availability,
            AVAILABILITY_MAX_LEN,
        );

        if !errors.is_empty() {
            return Err(DoctorError::Validation(errors));
        }
        Ok(DoctorUpdate {
            phone,
            availability,
        })
    }
}

impl DoctorUpdate {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.availability.is_none()
    }

    pub fn apply(&self, doctor: &mut Doctor) {
        if let Some(phone) = self.phone {
            doctor.phone = phone;
        }
        if let Some(availability) = &self.availability {
            doctor.availability = availability.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> DoctorDraft {
        DoctorDraft {
            name: Some("A. Lee".into()),
            specialty: Some("Cardiology".into()),
            availability: Some("available".into()),
            experience: Some("10".into()),
            phone: Some(5551234.into()),
        }
    }

    fn fields(err: DoctorError) -> Vec<String> {
        match err {
            DoctorError::Validation(fields) => fields.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn complete_draft_validates() {
        let new = full_draft().validate().unwrap();
        assert_eq!(new.name.as_str(), "A. Lee");
        assert_eq!(new.phone, 5551234);
    }

    #[test]
    fn every_missing_field_is_listed() {
        let err = DoctorDraft::default().validate().unwrap_err();
        assert_eq!(
            fields(err),
            ["name", "specialty", "availability", "experience", "phone"]
        );
    }

    #[test]
    fn blank_name_and_specialty_are_rejected() {
        let draft = DoctorDraft {
            name: Some("  ".into()),
            specialty: Some(String::new().into()),
            ..full_draft()
        };
        assert_eq!(fields(draft.validate().unwrap_err()), ["name", "specialty"]);
    }

    #[test]
    fn empty_availability_is_allowed() {
        let draft = DoctorDraft {
            availability: Some(String::new().into()),
            ..full_draft()
        };
        assert_eq!(draft.validate().unwrap().availability, "");
    }

    #[test]
    fn over_long_fields_are_rejected() {
        let draft = DoctorDraft {
            experience: Some("x".repeat(EXPERIENCE_MAX_LEN + 1).into()),
            ..full_draft()
        };
        assert_eq!(fields(draft.validate().unwrap_err()), ["experience"]);
    }

    #[test]
    fn phone_accepts_numeric_strings_only() {
        let draft: DoctorDraft = serde_json::from_str(
            r#"{"name":"B","specialty":"Neurology","availability":"busy","experience":"3","phone":"0207"}"#,
        )
        .unwrap();
        assert_eq!(draft.validate().unwrap().phone, 207);

        let draft: DoctorDraft = serde_json::from_str(
            r#"{"name":"B","specialty":"Neurology","availability":"busy","experience":"3","phone":"555-1234"}"#,
        )
        .unwrap();
        assert_eq!(fields(draft.validate().unwrap_err()), ["phone"]);
    }

    #[test]
    fn phone_of_wrong_type_is_a_field_error() {
        let draft: DoctorDraft = serde_json::from_str(
            r#"{"name":"B","specialty":"Neurology","availability":"busy","experience":"3","phone":[1]}"#,
        )
        .unwrap();
        assert_eq!(fields(draft.validate().unwrap_err()), ["phone"]);
    }

    #[test]
    fn negative_phone_number_is_rejected() {
        let draft = DoctorDraft {
            phone: Some((-5).into()),
            ..full_draft()
        };
        assert_eq!(fields(draft.validate().unwrap_err()), ["phone"]);
    }

    #[test]
    fn text_members_of_wrong_type_are_field_errors() {
        let draft: DoctorDraft = serde_json::from_str(
            r#"{"name":5,"specialty":"Neurology","availability":true,"experience":"3","phone":1}"#,
        )
        .unwrap();
        let err = draft.validate().unwrap_err();
        let DoctorError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            errors,
            [
                FieldError::new("name", "must be a string"),
                FieldError::new("availability", "must be a string"),
            ]
        );

        let patch: DoctorPatch = serde_json::from_str(r#"{"availability":5}"#).unwrap();
        assert_eq!(fields(patch.validate().unwrap_err()), ["availability"]);
    }

    #[test]
    fn patch_ignores_other_members() {
        let patch: DoctorPatch =
            serde_json::from_str(r#"{"name":"x","experience":"99","id":"scd7"}"#).unwrap();
        assert!(patch.validate().unwrap().is_empty());
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut doctor = full_draft()
            .validate()
            .unwrap()
            .into_doctor(DoctorId::FIRST);
        let before = doctor.clone();

        DoctorUpdate {
            phone: Some(555),
            availability: None,
        }
        .apply(&mut doctor);

        assert_eq!(doctor.phone, 555);
        assert_eq!(doctor.availability, before.availability);
        assert_eq!(doctor.name, before.name);
        assert_eq!(doctor.experience, before.experience);
    }

    #[test]
    fn doctor_serialises_with_string_id() {
        let doctor = full_draft()
            .validate()
            .unwrap()
            .into_doctor(DoctorId::FIRST);
        let json = serde_json::to_value(&doctor).unwrap();
        assert_eq!(json["id"], "scd1");
        assert_eq!(json["phone"], 5551234);
    }
}
