//! Codec for the timestamps found in Twilio API payloads.
//!
//! # Design
//! Twilio does not use RFC 3339. Timestamps are RFC 1123 with a numeric zone,
//! e.g. `Thu, 01 Jan 1970 00:00:00 +0000`, which serde cannot map onto a
//! date-time type on its own. `Timestamp` wraps an `OffsetDateTime` and owns
//! both directions of the conversion. `encode` writes the quotes itself so the
//! bytes placed into a JSON document match the layout exactly.

use std::fmt::{Display, Formatter};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::{datetime, format_description};
use time::OffsetDateTime;

use crate::error::TimestampError;

/// `Mon, 02 Jan 2006 15:04:05 -0700`
const LAYOUT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

/// Smallest year the wire format can carry (RFC 2822 section 3.3).
pub const MIN_YEAR: i32 = 1900;
/// Largest year that still fits the four digit year field.
pub const MAX_YEAR: i32 = 9999;

/// Token Twilio sends in place of a timestamp that was never set.
const NULL_TOKEN: &str = "null";

/// An instant as exchanged with the Twilio API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// The value a `null` timestamp decodes to: `0001-01-01 00:00:00 UTC`.
    pub const ZERO: Self = Self(datetime!(0001-01-01 0:00 UTC));

    pub const fn new(value: OffsetDateTime) -> Self {
        Self(value)
    }

    pub const fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }

    pub const fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Decode a timestamp from its textual form.
    ///
    /// Surrounding `"` characters are stripped first, so both a raw JSON
    /// token and a bare string are accepted. The literal `null` decodes to
    /// [`Timestamp::ZERO`].
    pub fn decode(input: &str) -> Result<Self, TimestampError> {
        let text = input.trim_matches('"');
        if text == NULL_TOKEN {
            return Ok(Self::ZERO);
        }
        let parsed = OffsetDateTime::parse(text, LAYOUT)?;
        Ok(Self(parsed))
    }

    /// Encode the timestamp as a quoted JSON string value.
    ///
    /// Fails when the year is outside `[MIN_YEAR, MAX_YEAR]`; the value is
    /// never clamped.
    pub fn encode(&self) -> Result<Vec<u8>, TimestampError> {
        let text = self.format()?;
        let mut out = Vec::with_capacity(text.len() + 2);
        out.push(b'"');
        out.extend_from_slice(text.as_bytes());
        out.push(b'"');
        Ok(out)
    }

    /// Render the unquoted layout, enforcing the same year range as `encode`.
    pub fn format(&self) -> Result<String, TimestampError> {
        let year = self.0.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TimestampError::OutOfRange { year });
        }
        Ok(self.0.format(LAYOUT)?)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(value: OffsetDateTime) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.format() {
            Ok(text) => f.write_str(&text),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = self.format().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(TimestampVisitor)
    }
}

struct TimestampVisitor;

impl<'de> Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("an RFC 1123 timestamp with a numeric zone, or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Timestamp::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Timestamp::ZERO)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Timestamp::decode(value).map_err(E::custom)
    }
}
