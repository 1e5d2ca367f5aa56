//! Response envelope shared by every endpoint:
//! `{ "Success": bool, "Message": string?, "Data": value? }`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::EtsError;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "Success", alias = "success", default)]
    pub success: bool,
    #[serde(rename = "Message", alias = "message", default)]
    pub message: Option<String>,
    // null and absent both decode to None
    #[serde(rename = "Data", alias = "data", default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Parse a raw response body.
    pub fn parse(body: &str) -> Result<Self, EtsError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| EtsError::Protocol(format!("response is not valid JSON: {e}")))?;
        serde_json::from_value(value)
            .map_err(|e| EtsError::Protocol(format!("unexpected envelope shape: {e}")))
    }

    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "unknown error".to_string())
    }

    /// Payload of a successful envelope, `Api` error otherwise.
    pub fn into_payload(self) -> Result<Option<Value>, EtsError> {
        if !self.success {
            return Err(EtsError::Api(self.message_or_default()));
        }
        Ok(self.data)
    }
}

/// Decode an optional payload into a record, falling back to its default
/// when the envelope carried none.
pub(crate) fn decode_or_default<T>(payload: Option<Value>) -> Result<T, EtsError>
where
    T: DeserializeOwned + Default,
{
    match payload {
        None => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| EtsError::Protocol(format!("unexpected payload shape: {e}"))),
    }
}

/// First of `names` present on `value`, so either key spelling is accepted.
pub(crate) fn field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| value.get(*name))
}

pub(crate) fn bool_field(value: &Value, names: &[&str]) -> Option<bool> {
    field(value, names).and_then(Value::as_bool)
}

pub(crate) fn str_field<'a>(value: &'a Value, names: &[&str]) -> Option<&'a str> {
    field(value, names).and_then(Value::as_str)
}
