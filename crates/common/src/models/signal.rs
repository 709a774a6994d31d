use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Keys every webhook payload must carry before it is relayed.
pub const REQUIRED_FIELDS: [&str; 6] = ["signal", "symbol", "price", "time", "interval", "volume"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Missing fields")]
    MissingFields {
        missing: Vec<&'static str>,
        payload: String,
    },
}

/// A trading signal as posted by the alert source.
///
/// Only the presence of [`REQUIRED_FIELDS`] is checked; values keep whatever
/// JSON type the sender used and extra keys travel along untouched. Key order
/// is the order of the request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignalPayload(Map<String, Value>);

impl SignalPayload {
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| PayloadError::InvalidJson)?;

        let fields = match value {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(PayloadError::InvalidJson),
        };

        let missing = missing_fields(&fields);
        if !missing.is_empty() {
            return Err(PayloadError::MissingFields {
                missing,
                payload: Value::Object(fields).to_string(),
            });
        }

        Ok(Self(fields))
    }

    /// Compact JSON in original key order. This is the exact frame pushed downstream.
    pub fn to_frame(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn missing_fields(fields: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| !fields.contains_key(*key))
        .collect()
}
