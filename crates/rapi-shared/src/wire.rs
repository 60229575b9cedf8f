//! Mapping between domain entities and the server's JSON wire format.
//!
//! Entities declare their wire keys with serde attributes; this module holds
//! the presence policy those attributes point at. A missing key and an
//! explicit `null` both decode to the field's default, identifiers decode
//! from canonical UUID text with the empty string meaning "no identifier",
//! and timestamps are parsed with fractional seconds discarded.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::WireError;

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Decode one entity from a JSON value.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, WireError> {
    Ok(serde_json::from_value(value)?)
}

/// Decode a JSON array of entities. `null` decodes to an empty list.
pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, WireError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

/// Encode an outbound payload.
pub fn encode<T: Serialize>(value: &T) -> Result<Value, WireError> {
    Ok(serde_json::to_value(value)?)
}

/// Parse a textual identifier. Empty input means "no identifier".
pub fn parse_id(raw: &str) -> Result<Option<Uuid>, WireError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(raw)
        .map(Some)
        .map_err(|source| WireError::Identifier {
            value: raw.to_string(),
            source,
        })
}

/// Parse a server timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` (or a space instead of `T`), optionally
/// followed by `Z` or a `±HH:MM` offset. Any fractional-second component is
/// dropped before parsing. Values without an offset are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Result<Option<DateTime<Utc>>, WireError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let mut text = strip_fraction(raw);
    if text.len() > 10 && text.as_bytes()[10] == b' ' {
        text.replace_range(10..11, "T");
    }

    let invalid = || WireError::Timestamp(raw.to_string());
    // "YYYY-MM-DDTHH:MM:SS" is 19 characters; anything after is the offset
    let Some(offset) = text.get(19..) else {
        return Err(invalid());
    };

    if offset.is_empty() {
        let naive = NaiveDateTime::parse_from_str(&text, NAIVE_FORMAT).map_err(|_| invalid())?;
        return Ok(Some(Utc.from_utc_datetime(&naive)));
    }

    DateTime::parse_from_rfc3339(&text)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| invalid())
}

fn strip_fraction(raw: &str) -> String {
    match raw.find('.') {
        Some(dot) => {
            let tail = &raw[dot + 1..];
            let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
            format!("{}{}", &raw[..dot], &tail[digits..])
        }
        None => raw.to_string(),
    }
}

// -- serde hooks referenced from entity attributes --

pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn optional_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<Uuid>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_id(&raw)
            .map(|id| id.map(T::from))
            .map_err(D::Error::custom),
        None => Ok(None),
    }
}

pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw).map_err(D::Error::custom),
        None => Ok(None),
    }
}
