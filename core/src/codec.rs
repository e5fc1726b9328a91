//! Body encoding and decoding for the JSON and XML APIs.
//!
//! The voice and messaging APIs speak JSON; the dashboard API speaks XML.
//! An empty success body decodes to the destination's `Default`, matching
//! endpoints that answer with a bare status code.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// Wire format of a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    pub fn mime(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }
}

pub fn encode<T: Serialize + ?Sized>(format: Format, value: &T) -> Result<Vec<u8>, ApiError> {
    match format {
        Format::Json => serde_json::to_vec(value).map_err(|e| ApiError::Serialization(e.to_string())),
        Format::Xml => quick_xml::se::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| ApiError::Serialization(e.to_string())),
    }
}

pub fn decode<T: DeserializeOwned + Default>(format: Format, body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    match format {
        Format::Json => serde_json::from_slice(body).map_err(|e| ApiError::Deserialization(e.to_string())),
        Format::Xml => {
            let text = std::str::from_utf8(body).map_err(|e| ApiError::Deserialization(e.to_string()))?;
            quick_xml::de::from_str(text.trim_start()).map_err(|e| ApiError::Deserialization(e.to_string()))
        }
    }
}

/// Flatten a query struct into sorted `(key, value)` pairs.
///
/// `None` fields serialize as null and are dropped. Scalars are rendered
/// without JSON quoting.
pub fn query_pairs<Q: Serialize + ?Sized>(query: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(query).map_err(|e| ApiError::Serialization(e.to_string()))?;
    let serde_json::Value::Object(map) = value else {
        return Ok(Vec::new());
    };
    let mut pairs: Vec<(String, String)> = map
        .into_iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some((k, s)),
            other => Some((k, other.to_string())),
        })
        .collect();
    pairs.sort();
    Ok(pairs)
}

/// Escape a path segment the way the vendor expects phone numbers and media
/// names (`+` becomes `%2B`, space becomes `+`).
pub fn escape_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

/// `(code, message)` pulled from a JSON error body.
pub(crate) fn json_error_fields(body: &[u8]) -> Option<(Option<String>, Option<String>)> {
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body).ok()?;
    let field = |name: &str| map.get(name).and_then(|v| v.as_str()).map(str::to_string);
    Some((field("code"), field("message")))
}

/// `(code, description)` pulled from the first `ErrorCode`/`Code` and
/// `Description` elements anywhere in an XML error body.
pub(crate) fn xml_error_fields(body: &[u8]) -> (Option<String>, Option<String>) {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current: Option<Vec<u8>> = None;
    let mut code = None;
    let mut description = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => current = Some(e.name().as_ref().to_vec()),
            Ok(Event::Text(ref t)) => {
                let Some(name) = current.as_deref() else {
                    buf.clear();
                    continue;
                };
                let text = match t.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(_) => break,
                };
                match name {
                    b"ErrorCode" | b"Code" if code.is_none() => code = Some(text),
                    b"Description" if description.is_none() => description = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    (code, description)
}

/// Deserializers for fields the vendor sends either natively or as strings
/// (`"hold": "true"`, `"price": "0.35"`).
pub mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Int(i64),
        Float(f64),
        Str(String),
    }

    pub fn bool_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Option::<BoolOrString>::deserialize(deserializer)? {
            None => false,
            Some(BoolOrString::Bool(b)) => b,
            Some(BoolOrString::Str(s)) => s.trim().eq_ignore_ascii_case("true"),
        })
    }

    pub fn f64_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(0.0),
            Some(NumberOrString::Int(n)) => Ok(n as f64),
            Some(NumberOrString::Float(n)) => Ok(n),
            Some(NumberOrString::Str(s)) if s.trim().is_empty() => Ok(0.0),
            Some(NumberOrString::Str(s)) => s.trim().parse().map_err(D::Error::custom),
        }
    }

    pub fn i64_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(0),
            Some(NumberOrString::Int(n)) => Ok(n),
            Some(NumberOrString::Float(n)) => Ok(n as i64),
            Some(NumberOrString::Str(s)) if s.trim().is_empty() => Ok(0),
            Some(NumberOrString::Str(s)) => s.trim().parse().map_err(D::Error::custom),
        }
    }
}

/// Serializers for request fields the vendor expects as strings
/// (`"maxDigits": "5"`, `"mute": "true"`).
pub mod stringify {
    use std::fmt::Display;

    use serde::Serializer;

    pub fn option<T: Display, S: Serializer>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_none(),
        }
    }
}
