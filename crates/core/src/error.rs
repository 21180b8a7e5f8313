use serde::Serialize;

/// One rejected input member and why it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, thiserror::Error)]
pub enum DoctorError {
    #[error("invalid input: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("doctor not found: {0}")]
    NotFound(String),
    #[error("no doctors found with specialty \"{0}\"")]
    NoMatches(String),
    #[error("stored identifier is malformed: {0:?}")]
    MalformedIdentifier(String),

    #[error("doctor already exists: {0}")]
    Conflict(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read doctor record: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write doctor record: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to remove doctor record: {0}")]
    FileRemove(std::io::Error),
    #[error("failed to serialize doctor: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize doctor: {0}")]
    Deserialization(serde_json::Error),
    #[error("record stored as {stored_as} contains id {found}")]
    IdMismatch { stored_as: String, found: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DoctorError {
    /// Convenience constructor for a single rejected field.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, reason)])
    }

    /// True for failures originating in the record store rather than in caller input.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::Conflict(_)
                | Self::StorageDirCreation(_)
                | Self::FileRead(_)
                | Self::FileWrite(_)
                | Self::FileRemove(_)
                | Self::Serialization(_)
                | Self::Deserialization(_)
                | Self::IdMismatch { .. }
        )
    }
}

pub type DoctorResult<T> = std::result::Result<T, DoctorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_every_field() {
        let err = DoctorError::Validation(vec![
            FieldError::missing("name"),
            FieldError::new("phone", "must be an integer"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: name is required; phone must be an integer"
        );
    }

    #[test]
    fn store_errors_are_classified() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert!(DoctorError::FileWrite(io).is_store_error());
        assert!(DoctorError::Conflict("scd1".into()).is_store_error());
        assert!(DoctorError::IdMismatch {
            stored_as: "scd3".into(),
            found: "scd5".into(),
        }
        .is_store_error());
        assert!(!DoctorError::NotFound("scd1".into()).is_store_error());
        assert!(!DoctorError::MalformedIdentifier("x".into()).is_store_error());
    }
}
