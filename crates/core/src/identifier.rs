//! Doctor identifiers and next-identifier derivation.
//!
//! Every doctor is keyed by an identifier of the form `scd<n>` where `n` is a positive decimal
//! integer without leading zeros, for example `scd1` or `scd42`.
//!
//! ## Ordering
//! Identifiers are ordered by their numeric suffix, never by their string form: `scd10` comes
//! after `scd9`. [`DoctorId`] implements `Ord` accordingly so that stores can keep records in a
//! `BTreeMap<DoctorId, _>` and get assignment order for free.
//!
//! ## Next identifier
//! [`next_id`] scans the identifiers currently held by a store, picks the numerically highest
//! and returns its successor. A store holding an identifier of any other shape makes the scan
//! fail with [`DoctorError::MalformedIdentifier`] instead of guessing.

use crate::constants::DOCTOR_ID_PREFIX;
use crate::error::{DoctorError, DoctorResult};
use std::{fmt, str::FromStr};

/// A validated doctor identifier (`scd` followed by a positive integer).
///
/// Once constructed the identifier is guaranteed to be canonical, so its string form
/// round-trips through [`DoctorId::parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DoctorId(u64);

impl DoctorId {
    /// The identifier handed out when a store is empty.
    pub const FIRST: DoctorId = DoctorId(1);

    /// Builds an identifier from its numeric suffix. Zero is not a valid suffix.
    pub fn from_number(number: u64) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }

    /// Parses an identifier that must already be in canonical form.
    ///
    /// Rejects a missing or differently-cased prefix, an empty suffix, non-digit characters,
    /// signs, leading zeros, zero itself, and suffixes that overflow `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::MalformedIdentifier`] carrying the rejected input.
    pub fn parse(input: &str) -> DoctorResult<Self> {
        let malformed = || DoctorError::MalformedIdentifier(input.to_owned());

        let digits = input.strip_prefix(DOCTOR_ID_PREFIX).ok_or_else(malformed)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if digits.starts_with('0') {
            return Err(malformed());
        }

        let number = digits.parse::<u64>().map_err(|_| malformed())?;
        Self::from_number(number).ok_or_else(malformed)
    }

    /// Returns the numeric suffix.
    pub fn number(&self) -> u64 {
        self.0
    }

    /// Returns the identifier that follows this one.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::MalformedIdentifier`] if the suffix cannot be incremented.
    pub fn next(&self) -> DoctorResult<Self> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or_else(|| DoctorError::MalformedIdentifier(self.to_string()))
    }
}

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DOCTOR_ID_PREFIX, self.0)
    }
}

impl FromStr for DoctorId {
    type Err = DoctorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for DoctorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for DoctorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DoctorId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Derives the identifier for the next record from the identifiers a store currently holds.
///
/// Every stored identifier is parsed, so a single malformed entry fails the whole derivation.
///
/// # Errors
///
/// Returns [`DoctorError::MalformedIdentifier`] if any stored identifier is not canonical, or if
/// the highest identifier cannot be incremented.
pub fn next_id<I, S>(stored: I) -> DoctorResult<DoctorId>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut highest: Option<DoctorId> = None;
    for raw in stored {
        let id = DoctorId::parse(raw.as_ref())?;
        highest = highest.max(Some(id));
    }
    next_after(highest)
}

/// Returns the identifier following `highest`, or [`DoctorId::FIRST`] if there is none.
pub fn next_after(highest: Option<DoctorId>) -> DoctorResult<DoctorId> {
    match highest {
        Some(id) => id.next(),
        None => Ok(DoctorId::FIRST),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_starts_at_scd1() {
        let id = next_id(Vec::<String>::new()).unwrap();
        assert_eq!(id.to_string(), "scd1");
    }

    #[test]
    fn uses_numeric_not_lexicographic_maximum() {
        let id = next_id(["scd9", "scd10", "scd2"]).unwrap();
        assert_eq!(id.to_string(), "scd11");
    }

    #[test]
    fn ordering_follows_suffix_value() {
        let nine = DoctorId::parse("scd9").unwrap();
        let ten = DoctorId::parse("scd10").unwrap();
        assert!(ten > nine);
    }

    #[test]
    fn malformed_stored_id_fails_the_scan() {
        let err = next_id(["scd1", "doc7"]).unwrap_err();
        assert!(matches!(err, DoctorError::MalformedIdentifier(ref s) if s == "doc7"));
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        for bad in [
            "", "scd", "scd0", "scd01", "SCD1", "scd-1", "scd+1", "scd1a", " scd1", "scd1 ",
            "scd99999999999999999999",
        ] {
            assert!(DoctorId::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn parse_round_trips_display() {
        let id = DoctorId::parse("scd123").unwrap();
        assert_eq!(id.number(), 123);
        assert_eq!(id.to_string(), "scd123");
    }

    #[test]
    fn increment_overflow_is_reported() {
        let max = DoctorId::from_number(u64::MAX).unwrap();
        assert!(matches!(
            max.next(),
            Err(DoctorError::MalformedIdentifier(_))
        ));
    }

    #[test]
    fn zero_is_not_a_valid_suffix() {
        assert!(DoctorId::from_number(0).is_none());
    }
}
