//! Implementation of the canonical record identifier.

use crate::{IdError, IdResult};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// HMS's canonical record identifier (32 lowercase hex characters, no hyphens).
///
/// This wrapper guarantees that once constructed, the contained identifier is
/// in canonical form. Collections key their records by this type; it is the
/// only value the storage layer compares when looking a record up.
///
/// # Construction
/// - [`RecordId::new`] generates a fresh identifier (for newly created records).
/// - [`RecordId::parse`] validates an externally supplied identifier.
///
/// # Errors
/// [`RecordId::parse`] returns [`IdError::InvalidInput`] if the input is not
/// already canonical.
///
/// # Display format
/// When displayed or converted to a string, `RecordId` always produces the
/// canonical 32-character lowercase hex form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a new random identifier in canonical form.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates an externally supplied identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] unless the input is exactly 32
    /// lowercase hex characters.
    pub fn parse(input: &str) -> IdResult<Self> {
        if !Self::is_canonical(input) {
            return Err(IdError::InvalidInput(format!(
                "identifier '{input}' is not in canonical form (32 lowercase hex characters)"
            )));
        }
        let uuid = Uuid::parse_str(input)
            .map_err(|e| IdError::InvalidInput(format!("identifier '{input}': {e}")))?;
        Ok(Self(uuid))
    }

    /// Returns true if `input` is in canonical identifier form.
    ///
    /// Purely syntactic: exactly 32 bytes, all lowercase hex. Fast enough to
    /// use as a pre-check before [`parse`](RecordId::parse).
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    /// Formats the identifier in canonical form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_canonical_and_unique() {
        let a = RecordId::new();
        let b = RecordId::new();
        assert_ne!(a, b);
        assert!(RecordId::is_canonical(&a.to_string()));
        assert_eq!(a.to_string().len(), 32);
    }

    #[test]
    fn parse_accepts_canonical_form() {
        let id = RecordId::parse("550e8400e29b41d4a716446655440000").expect("canonical id");
        assert_eq!(id.to_string(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        let cases = [
            "550e8400-e29b-41d4-a716-446655440000", // hyphenated
            "550E8400E29B41D4A716446655440000",     // uppercase
            "550e8400e29b41d4a71644665544000",      // too short
            "550e8400e29b41d4a7164466554400000",    // too long
            "zz0e8400e29b41d4a716446655440000",     // non-hex
            "",
        ];
        for input in cases {
            assert!(RecordId::parse(input).is_err(), "should reject {input:?}");
        }
    }

    #[test]
    fn round_trips_through_serde_as_string() {
        let id = RecordId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{id}\""));
        let back: RecordId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
