//! Validated primitive types shared across the HMS workspace.
//!
//! The data service itself performs no field validation (that is the caller's
//! responsibility), so these types live at the edges: request parsing in the
//! REST layer, argument handling in the CLI, and the handful of entity fields
//! whose textual format is fixed (clock times, currency amounts).

use serde::{Deserialize, Serialize};

/// Errors raised when constructing a validated primitive.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The input text was empty or contained only whitespace.
    #[error("text cannot be empty")]
    EmptyText,
    /// The input was not a valid `HH:MM` clock time.
    #[error("invalid clock time '{0}', expected HH:MM")]
    InvalidClockTime(String),
    /// The amount was negative or not a finite number.
    #[error("invalid money amount {0}, expected a finite non-negative value")]
    InvalidAmount(f64),
}

/// A string guaranteed to contain at least one non-whitespace character.
///
/// Input is trimmed during construction; an empty or whitespace-only value is
/// rejected. Used for required fields that the calling layer validates before
/// handing data to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::EmptyText`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper, yielding the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NonEmptyText::new(s)
    }
}

impl Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A wall-clock time of day in `HH:MM` form.
///
/// Doctor schedule windows and appointment times use this format on the wire.
/// The wrapper guarantees hours in `00..=23` and minutes in `00..=59` once
/// constructed, and always renders back to zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Creates a clock time from hour and minute components.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidClockTime`] if either component is out of
    /// range.
    pub fn new(hour: u8, minute: u8) -> Result<Self, TypeError> {
        if hour > 23 || minute > 59 {
            return Err(TypeError::InvalidClockTime(format!("{hour:02}:{minute:02}")));
        }
        Ok(Self { hour, minute })
    }

    /// Parses a `HH:MM` string.
    ///
    /// Both components must be exactly two digits; anything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidClockTime`] on malformed input.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let reject = || TypeError::InvalidClockTime(input.to_owned());

        let (h, m) = input.split_once(':').ok_or_else(reject)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(reject());
        }
        let hour: u8 = h.parse().map_err(|_| reject())?;
        let minute: u8 = m.parse().map_err(|_| reject())?;
        Self::new(hour, minute).map_err(|_| reject())
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for ClockTime {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse(s)
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ClockTime::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A non-negative currency amount.
///
/// Billing amounts are plain JSON numbers on the wire; this wrapper rejects
/// negative and non-finite values at construction so a `Money` in hand is
/// always safe to sum.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Money(f64);

impl Money {
    /// Creates a `Money` from a raw amount.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidAmount`] if the value is negative, NaN or
    /// infinite.
    pub fn new(amount: f64) -> Result<Self, TypeError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(TypeError::InvalidAmount(amount));
        }
        Ok(Self(amount))
    }

    /// A zero amount.
    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Sum of two amounts. Non-negative finite inputs keep the invariant.
    pub fn add(&self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_rejects_blank() {
        let text = NonEmptyText::new("  Jane  ").expect("valid text");
        assert_eq!(text.as_str(), "Jane");

        assert!(NonEmptyText::new("").is_err());
        assert!(NonEmptyText::new("   \t").is_err());
    }

    #[test]
    fn clock_time_parses_and_renders_padded() {
        let t = ClockTime::parse("09:05").expect("valid time");
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 5);
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn clock_time_rejects_malformed_input() {
        for bad in ["24:00", "12:60", "9:00", "12:5", "noon", "12-30", ""] {
            assert!(ClockTime::parse(bad).is_err(), "should reject {bad:?}");
        }
    }

    #[test]
    fn clock_time_round_trips_through_json() {
        let t = ClockTime::new(17, 30).expect("valid time");
        let json = serde_json::to_string(&t).expect("serialize");
        assert_eq!(json, "\"17:30\"");
        let back: ClockTime = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, t);
    }

    #[test]
    fn money_rejects_negative_and_non_finite() {
        assert!(Money::new(-0.01).is_err());
        assert!(Money::new(f64::NAN).is_err());
        assert!(Money::new(f64::INFINITY).is_err());
        assert!(Money::new(0.0).is_ok());
    }

    #[test]
    fn money_serialises_as_plain_number() {
        let m = Money::new(250.0).expect("valid amount");
        assert_eq!(serde_json::to_string(&m).expect("serialize"), "250.0");

        let back: Money = serde_json::from_str("99.5").expect("deserialize");
        assert_eq!(back.amount(), 99.5);
        assert!(serde_json::from_str::<Money>("-1").is_err());
    }
}
