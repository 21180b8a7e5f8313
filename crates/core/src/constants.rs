//! Constants used throughout the doctor core crate.

/// Prefix shared by every doctor identifier.
pub const DOCTOR_ID_PREFIX: &str = "scd";

/// Directory name for doctor records inside a file-backed store.
pub const DOCTORS_DIR_NAME: &str = "doctors";

/// Extension of a stored doctor record.
pub const RECORD_EXTENSION: &str = "json";

/// Connection string used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "file:doctor_data";

/// Column limits carried over from the original relational schema.
pub const NAME_MAX_LEN: usize = 100;
pub const SPECIALTY_MAX_LEN: usize = 100;
pub const AVAILABILITY_MAX_LEN: usize = 20;
pub const EXPERIENCE_MAX_LEN: usize = 20;
