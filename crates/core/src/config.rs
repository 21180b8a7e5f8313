//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into core services. Request
//! handling never reads environment variables.

use crate::constants::DEFAULT_DATABASE_URL;
use crate::error::{DoctorError, DoctorResult};
use crate::store::{JsonFileStore, MemoryStore, RecordStore};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Where doctor records live, parsed from a connection string.
///
/// | Connection string          | Backend                         |
/// |----------------------------|---------------------------------|
/// | `memory:` / `memory://`    | [`MemoryStore`]                 |
/// | `file:<path>`, `file://<path>` | [`JsonFileStore`] at `<path>` |
/// | `<path>` (no scheme)       | [`JsonFileStore`] at `<path>`   |
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty string, an empty file path, or an unknown scheme.
    pub fn parse(url: &str) -> DoctorResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(DoctorError::InvalidConfig(
                "database url cannot be empty".into(),
            ));
        }

        let Some((scheme, rest)) = split_scheme(url) else {
            return Ok(Self::File(PathBuf::from(url)));
        };

        match scheme.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => {
                let path = rest.strip_prefix("//").unwrap_or(rest);
                if path.is_empty() {
                    return Err(DoctorError::InvalidConfig(
                        "file database url must include a path".into(),
                    ));
                }
                Ok(Self::File(PathBuf::from(path)))
            }
            other => Err(DoctorError::InvalidConfig(format!(
                "unsupported database scheme '{other}' (expected 'memory:' or 'file:')"
            ))),
        }
    }

    /// Opens the backend this location names.
    ///
    /// # Errors
    ///
    /// Propagates backend initialisation failures such as `StorageDirCreation`.
    pub fn open(&self) -> DoctorResult<Arc<dyn RecordStore>> {
        match self {
            Self::Memory => Ok(Arc::new(MemoryStore::new())),
            Self::File(root) => Ok(Arc::new(JsonFileStore::open(root)?)),
        }
    }
}

impl FromStr for StoreLocation {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Splits `scheme:rest`. Single-letter schemes are treated as drive letters, not schemes.
fn split_scheme(url: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = url.split_once(':')?;
    let looks_like_scheme = scheme.len() > 1
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    looks_like_scheme.then_some((scheme, rest))
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store: StoreLocation,
}

impl CoreConfig {
    pub fn new(store: StoreLocation) -> Self {
        Self { store }
    }

    /// Builds the configuration from an optional `DATABASE_URL` value.
    ///
    /// `None` or a blank value falls back to [`DEFAULT_DATABASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the value cannot be parsed.
    pub fn from_database_url(value: Option<String>) -> DoctorResult<Self> {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let location = StoreLocation::parse(value.as_deref().unwrap_or(DEFAULT_DATABASE_URL))?;
        Ok(Self::new(location))
    }

    pub fn store(&self) -> &StoreLocation {
        &self.store
    }

    /// Root directory of a file-backed store, if that is the configured backend.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.store {
            StoreLocation::File(root) => Some(root.as_path()),
            StoreLocation::Memory => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_locations() {
        assert_eq!(StoreLocation::parse("memory:").unwrap(), StoreLocation::Memory);
        assert_eq!(StoreLocation::parse("MEMORY://").unwrap(), StoreLocation::Memory);
        assert_eq!(
            StoreLocation::parse("file:///var/lib/doctors").unwrap(),
            StoreLocation::File(PathBuf::from("/var/lib/doctors"))
        );
        assert_eq!(
            StoreLocation::parse("file:data").unwrap(),
            StoreLocation::File(PathBuf::from("data"))
        );
        assert_eq!(
            StoreLocation::parse("./doctor_data").unwrap(),
            StoreLocation::File(PathBuf::from("./doctor_data"))
        );
        assert_eq!(
            StoreLocation::parse(r"C:\doctors").unwrap(),
            StoreLocation::File(PathBuf::from(r"C:\doctors"))
        );
    }

    #[test]
    fn rejects_unknown_schemes_and_empty_values() {
        assert!(matches!(
            StoreLocation::parse("postgres://localhost/doctors"),
            Err(DoctorError::InvalidConfig(_))
        ));
        assert!(StoreLocation::parse("  ").is_err());
        assert!(StoreLocation::parse("file:").is_err());
    }

    #[test]
    fn missing_database_url_uses_default() {
        let cfg = CoreConfig::from_database_url(None).unwrap();
        assert_eq!(cfg.data_dir(), Some(Path::new("doctor_data")));

        let cfg = CoreConfig::from_database_url(Some("   ".into())).unwrap();
        assert_eq!(cfg.store(), &StoreLocation::File(PathBuf::from("doctor_data")));
    }
}
