//! Request and response records.
//!
//! Response fields are all optional and accept both the PascalCase keys
//! the API documents and the camelCase keys some deployments return.
//! Text fields also take numbers (`"StatusCode": 1300`), and keys without
//! a field of their own are kept in `extra`.

use std::fmt;

use base64::Engine;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Integrator;
use crate::error::EtsError;

/// Login credentials, sent as-is to `/auth/token`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Credentials {
    /// VKN or TCKN of the account holder.
    pub party_identification_id: String,
    pub username: String,
    pub password: String,
    pub software_id: String,
    /// Integrator code, e.g. `UYM`.
    pub integrator: String,
}

impl Credentials {
    pub fn new(
        party_identification_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        software_id: impl Into<String>,
        integrator: impl Into<String>,
    ) -> Self {
        Self {
            party_identification_id: party_identification_id.into(),
            username: username.into(),
            password: password.into(),
            software_id: software_id.into(),
            integrator: integrator.into(),
        }
    }
}

impl From<Integrator> for String {
    fn from(integrator: Integrator) -> Self {
        integrator.code().to_string()
    }
}

// Keeps the password out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("party_identification_id", &self.party_identification_id)
            .field("username", &self.username)
            .field("password", &"***")
            .field("software_id", &self.software_id)
            .field("integrator", &self.integrator)
            .finish()
    }
}

/// A registered mailbox alias of a party.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UserAlias {
    #[serde(alias = "alias", deserialize_with = "text")]
    pub alias: Option<String>,
    /// `PK` (receiver box) or `GB` (sender box).
    #[serde(rename = "Type", alias = "type", deserialize_with = "text")]
    pub alias_type: Option<String>,
    #[serde(
        alias = "registerDate",
        alias = "creationTime",
        deserialize_with = "text"
    )]
    pub register_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct AliasList {
    #[serde(alias = "aliases")]
    pub aliases: Option<Vec<UserAlias>>,
}

/// Outcome of a document submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubmissionResult {
    #[serde(alias = "uuid", deserialize_with = "text")]
    pub uuid: Option<String>,
    /// Number assigned by the integrator.
    #[serde(
        alias = "number",
        alias = "InvoiceNumber",
        alias = "invoiceNumber",
        deserialize_with = "text"
    )]
    pub number: Option<String>,
    #[serde(alias = "code", deserialize_with = "text")]
    pub code: Option<String>,
    #[serde(alias = "message", deserialize_with = "text")]
    pub message: Option<String>,
    /// Payload keys without a field above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SubmissionResult {
    /// True when the envelope carried no payload.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Processing status of a submitted document.
///
/// Integrators add their own keys next to the common ones; those are in
/// [`extra`](Self::extra) as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DocumentStatus {
    #[serde(alias = "uuid", deserialize_with = "text")]
    pub uuid: Option<String>,
    #[serde(
        alias = "number",
        alias = "InvoiceNumber",
        alias = "invoiceNumber",
        deserialize_with = "text"
    )]
    pub number: Option<String>,
    #[serde(alias = "status", deserialize_with = "text")]
    pub status: Option<String>,
    #[serde(alias = "statusCode", deserialize_with = "text")]
    pub status_code: Option<String>,
    #[serde(alias = "statusDescription", deserialize_with = "text")]
    pub status_description: Option<String>,
    #[serde(alias = "statusDate", deserialize_with = "text")]
    pub status_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentStatus {
    /// Raw value of a payload key that has no field of its own.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Central bank exchange rate for one currency and day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExchangeRate {
    #[serde(alias = "currency", deserialize_with = "text")]
    pub currency: Option<String>,
    #[serde(alias = "rate", with = "amount")]
    pub rate: Option<Decimal>,
    #[serde(alias = "buyingRate", with = "amount")]
    pub buying_rate: Option<Decimal>,
    #[serde(alias = "sellingRate", with = "amount")]
    pub selling_rate: Option<Decimal>,
    #[serde(alias = "effectiveRate", with = "amount")]
    pub effective_rate: Option<Decimal>,
    #[serde(alias = "date", deserialize_with = "text")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of an inbox or e-archive listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DocumentSummary {
    #[serde(alias = "uuid", deserialize_with = "text")]
    pub uuid: Option<String>,
    #[serde(
        alias = "number",
        alias = "InvoiceNumber",
        alias = "invoiceNumber",
        deserialize_with = "text"
    )]
    pub number: Option<String>,
    #[serde(alias = "issueDate", deserialize_with = "text")]
    pub issue_date: Option<String>,
    #[serde(
        alias = "SenderName",
        alias = "CustomerName",
        alias = "customerName",
        deserialize_with = "text"
    )]
    pub party_name: Option<String>,
    #[serde(
        alias = "SenderVkn",
        alias = "CustomerTaxId",
        alias = "customerTaxId",
        deserialize_with = "text"
    )]
    pub party_identification: Option<String>,
    #[serde(alias = "payableAmount", with = "amount")]
    pub payable_amount: Option<Decimal>,
    #[serde(alias = "currencyCode", deserialize_with = "text")]
    pub currency_code: Option<String>,
    #[serde(alias = "status", deserialize_with = "text")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Rendered document as returned by the PDF endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PdfDocument {
    /// Base64-encoded PDF bytes.
    #[serde(alias = "pdfContent", deserialize_with = "text")]
    pub pdf_content: Option<String>,
    #[serde(alias = "fileName", deserialize_with = "text")]
    pub file_name: Option<String>,
}

/// Text field that may arrive as a string, a number or a boolean.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected text, got {other}"))),
    }
}

/// Amounts as exact JSON numbers. Numeric strings are accepted on input
/// and an empty string reads as no amount.
mod amount {
    use std::str::FromStr;

    use serde::Serializer;

    use super::*;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::arbitrary_precision_option::serialize(value, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(de::Error::custom(format!("expected an amount, got {other}")));
            }
        };
        let raw = raw.trim();
        Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map(Some)
            .map_err(de::Error::custom)
    }
}

impl PdfDocument {
    /// Decoded PDF bytes. Empty when the payload carried no content.
    pub fn decode(&self) -> Result<Vec<u8>, EtsError> {
        match &self.pdf_content {
            None => Ok(Vec::new()),
            Some(content) => base64::engine::general_purpose::STANDARD
                .decode(content.trim())
                .map_err(|e| EtsError::Protocol(format!("PDF content is not base64: {e}"))),
        }
    }
}

/// Date range for inbox and e-archive listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InboxQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl InboxQuery {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            page_index: None,
            page_size: None,
        }
    }

    pub fn page(mut self, index: u32, size: u32) -> Self {
        self.page_index = Some(index);
        self.page_size = Some(size);
        self
    }
}
