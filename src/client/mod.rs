//! HTTP client for the ETS web API.
//!
//! Every call goes through one routine that attaches the session token,
//! sends a JSON request, and unwraps the `{Success, Message, Data}`
//! envelope. Business failures surface as [`EtsError::Api`] even when the
//! HTTP status is 200.

mod config;
mod envelope;
mod records;

use std::fmt;

use chrono::NaiveDate;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::document::{ResponseType, SendType};
use crate::error::EtsError;

pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT, LIVE_BASE_URL};
pub use records::*;

use envelope::{Envelope, bool_field, decode_or_default, str_field};
use records::AliasList;

/// Name of the token field in request bodies and query strings.
pub const TOKEN_FIELD: &str = "EtsToken";

const AUTH_PATH: &str = "/auth/token";

/// Client for one ETS endpoint.
///
/// The session token set by [`authenticate`](Self::authenticate) is held by
/// the instance and attached to every later call. Setting it needs
/// `&mut self`, so a shared client cannot have its token swapped under an
/// in-flight request.
///
/// ```ignore
/// use ets_client::{Credentials, EtsClient, Integrator};
///
/// let mut client = EtsClient::new()?;
/// let credentials = Credentials::new("1234567890", "user", "pass", "ETS-CLIENT", Integrator::Uym);
/// client.authenticate(&credentials).await?;
/// let active = client.check_registration("9876543210").await?;
/// ```
pub struct EtsClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for EtsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EtsClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl EtsClient {
    /// Client for the test environment with default settings.
    pub fn new() -> Result<Self, EtsError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, EtsError> {
        Self::with_config(ClientConfig::default().base_url(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, EtsError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Use a token obtained elsewhere instead of calling `authenticate`.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Log in and store the returned session token.
    ///
    /// Unlike the other calls, the HTTP status is checked first: anything
    /// other than 200 fails with [`EtsError::Authentication`] whatever the
    /// body says.
    pub async fn authenticate(&mut self, credentials: &Credentials) -> Result<String, EtsError> {
        let url = self.raw_url(AUTH_PATH)?;
        debug!(
            party = %credentials.party_identification_id,
            username = %credentials.username,
            "authenticating"
        );

        let response = self.http.post(url).json(credentials).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            let message = Envelope::parse(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            warn!(%status, %message, "authentication rejected");
            return Err(EtsError::Authentication(message));
        }

        let envelope = Envelope::parse(&body)?;
        if !envelope.success {
            let message = envelope.message_or_default();
            warn!(%message, "authentication rejected");
            return Err(EtsError::Authentication(message));
        }

        let token = envelope
            .data
            .as_ref()
            .and_then(|data| str_field(data, &[TOKEN_FIELD, "token", "Token"]))
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| EtsError::Authentication("EtsToken not received".into()))?;

        info!("authenticated");
        self.token = Some(token.clone());
        Ok(token)
    }

    // ------------------------------------------------------------------
    // E-invoice
    // ------------------------------------------------------------------

    /// Whether `party_id` (VKN/TCKN) is a registered e-invoice user.
    pub async fn check_registration(&self, party_id: &str) -> Result<bool, EtsError> {
        let payload = self.post(&["invoice", "user", party_id], None).await?;
        Ok(is_active(payload.as_ref()))
    }

    /// Mailbox aliases of `party_id`. Empty when the party has none.
    pub async fn list_aliases(&self, party_id: &str) -> Result<Vec<UserAlias>, EtsError> {
        let payload = self
            .post(&["invoice", "user", party_id, "alias"], None)
            .await?;
        aliases(payload)
    }

    pub async fn submit_invoice<D: Serialize>(
        &self,
        document: &D,
    ) -> Result<SubmissionResult, EtsError> {
        let body = document_body(document)?;
        decode_or_default(self.post(&["invoice"], Some(body)).await?)
    }

    pub async fn submit_draft_invoice<D: Serialize>(
        &self,
        document: &D,
    ) -> Result<SubmissionResult, EtsError> {
        let body = document_body(document)?;
        decode_or_default(self.post(&["invoice", "draft"], Some(body)).await?)
    }

    pub async fn get_status(&self, document_id: &str) -> Result<DocumentStatus, EtsError> {
        decode_or_default(
            self.get(&["invoice", document_id, "status"], &[])
                .await?,
        )
    }

    /// Accept or reject a received commercial invoice.
    pub async fn respond_to_invoice(
        &self,
        uuid: &str,
        response: ResponseType,
        description: &str,
    ) -> Result<SubmissionResult, EtsError> {
        let body = object(json!({
            "ResponseType": response.code(),
            "Description": description,
        }));
        decode_or_default(
            self.post(&["invoice", uuid, "respond"], Some(body))
                .await?,
        )
    }

    /// Received invoices in a date range.
    pub async fn list_inbox(&self, query: &InboxQuery) -> Result<Vec<DocumentSummary>, EtsError> {
        let body = document_body(query)?;
        decode_or_default(self.post(&["invoice", "inbox"], Some(body)).await?)
    }

    pub async fn get_invoice_pdf(&self, uuid: &str) -> Result<PdfDocument, EtsError> {
        decode_or_default(self.get(&["invoice", uuid, "pdf"], &[]).await?)
    }

    // ------------------------------------------------------------------
    // E-archive
    // ------------------------------------------------------------------

    /// Submit an e-archive invoice. `send_type` is written to
    /// `ArchiveInfo.SendType`; other `ArchiveInfo` fields the document
    /// carries are kept.
    pub async fn submit_archive_invoice<D: Serialize>(
        &self,
        document: &D,
        send_type: SendType,
    ) -> Result<SubmissionResult, EtsError> {
        let mut body = document_body(document)?;
        set_send_type(&mut body, send_type);
        decode_or_default(self.post(&["earchive"], Some(body)).await?)
    }

    /// Submit several e-archive invoices in one request, each with
    /// `send_type`. Results come back in the server's order.
    pub async fn submit_archive_invoices<D: Serialize>(
        &self,
        documents: &[D],
        send_type: SendType,
    ) -> Result<Vec<SubmissionResult>, EtsError> {
        let invoices = batch(documents, |body| set_send_type(body, send_type))?;
        let body = object(json!({ "Invoices": invoices }));
        decode_or_default(self.post(&["earchive", "batch"], Some(body)).await?)
    }

    pub async fn get_archive_status(&self, uuid: &str) -> Result<DocumentStatus, EtsError> {
        decode_or_default(
            self.get(&["earchive", uuid, "status"], &[])
                .await?,
        )
    }

    pub async fn cancel_archive_invoice(
        &self,
        uuid: &str,
        cancel_date: Option<NaiveDate>,
    ) -> Result<SubmissionResult, EtsError> {
        let mut body = Map::new();
        if let Some(date) = cancel_date {
            body.insert("CancelDate".into(), Value::String(date.to_string()));
        }
        decode_or_default(
            self.post(&["earchive", uuid, "cancel"], Some(body))
                .await?,
        )
    }

    pub async fn get_archive_pdf(&self, uuid: &str) -> Result<PdfDocument, EtsError> {
        decode_or_default(self.get(&["earchive", uuid, "pdf"], &[]).await?)
    }

    pub async fn list_archive(&self, query: &InboxQuery) -> Result<Vec<DocumentSummary>, EtsError> {
        let body = document_body(query)?;
        decode_or_default(self.post(&["earchive", "list"], Some(body)).await?)
    }

    // ------------------------------------------------------------------
    // E-dispatch
    // ------------------------------------------------------------------

    pub async fn check_dispatch_registration(&self, party_id: &str) -> Result<bool, EtsError> {
        let payload = self
            .post(&["dispatch", "user", party_id], None)
            .await?;
        Ok(is_active(payload.as_ref()))
    }

    pub async fn list_dispatch_aliases(&self, party_id: &str) -> Result<Vec<UserAlias>, EtsError> {
        let payload = self
            .post(&["dispatch", "user", party_id, "alias"], None)
            .await?;
        aliases(payload)
    }

    pub async fn submit_dispatch<D: Serialize>(
        &self,
        document: &D,
    ) -> Result<SubmissionResult, EtsError> {
        let body = document_body(document)?;
        decode_or_default(self.post(&["dispatch"], Some(body)).await?)
    }

    pub async fn submit_draft_dispatch<D: Serialize>(
        &self,
        document: &D,
    ) -> Result<SubmissionResult, EtsError> {
        let body = document_body(document)?;
        decode_or_default(self.post(&["dispatch", "draft"], Some(body)).await?)
    }

    pub async fn get_dispatch_status(&self, uuid: &str) -> Result<DocumentStatus, EtsError> {
        decode_or_default(
            self.get(&["dispatch", uuid, "status"], &[])
                .await?,
        )
    }

    // ------------------------------------------------------------------
    // Producer receipts (e-SMM)
    // ------------------------------------------------------------------

    pub async fn submit_producer_receipt<D: Serialize>(
        &self,
        receipt: &D,
    ) -> Result<SubmissionResult, EtsError> {
        let body = document_body(receipt)?;
        decode_or_default(self.post(&["producer"], Some(body)).await?)
    }

    /// Submit several producer receipts in one request.
    pub async fn submit_producer_receipts<D: Serialize>(
        &self,
        receipts: &[D],
    ) -> Result<Vec<SubmissionResult>, EtsError> {
        let receipts = batch(receipts, |_| ())?;
        let body = object(json!({ "Receipts": receipts }));
        decode_or_default(self.post(&["producer", "batch"], Some(body)).await?)
    }

    pub async fn get_producer_receipt_status(
        &self,
        uuid: &str,
    ) -> Result<DocumentStatus, EtsError> {
        decode_or_default(
            self.get(&["producer", uuid, "status"], &[])
                .await?,
        )
    }

    // ------------------------------------------------------------------
    // Exchange rates
    // ------------------------------------------------------------------

    /// Rate of `currency` (ISO 4217) on `date` (`YYYY-MM-DD`).
    pub async fn get_exchange_rate(
        &self,
        currency: &str,
        date: &str,
    ) -> Result<ExchangeRate, EtsError> {
        decode_or_default(
            self.get(&["currency", "rate"], &[("currency", currency), ("date", date)])
                .await?,
        )
    }

    /// All published rates, for `date` or the latest day.
    pub async fn get_exchange_rates(
        &self,
        date: Option<&str>,
    ) -> Result<Vec<ExchangeRate>, EtsError> {
        let query: Vec<(&str, &str)> = date.map(|d| ("date", d)).into_iter().collect();
        decode_or_default(self.get(&["currency", "rates"], &query).await?)
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    /// URL of a GET call on `path` with the token appended, joined with
    /// `&` when `path` already has a query string. `path` is used as
    /// written, so ids in it must already be escaped.
    pub fn query_url(&self, path: &str) -> Result<Url, EtsError> {
        let url = self.raw_url(path)?;
        self.with_token(url, &[])
    }

    fn raw_url(&self, path: &str) -> Result<Url, EtsError> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| EtsError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// Endpoint URL from path segments. Each segment is percent-encoded,
    /// so ids cannot add segments, a query or a fragment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, EtsError> {
        let mut url = self.raw_url("")?;
        url.path_segments_mut()
            .map_err(|()| EtsError::InvalidUrl(format!("{}: not a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn with_token(&self, mut url: Url, query: &[(&str, &str)]) -> Result<Url, EtsError> {
        let token = self.require_token()?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(TOKEN_FIELD, token);
        }
        Ok(url)
    }

    fn require_token(&self) -> Result<&str, EtsError> {
        self.token.as_deref().ok_or(EtsError::NotAuthenticated)
    }

    async fn get(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Option<Value>, EtsError> {
        self.execute(Method::GET, segments, query, None).await
    }

    async fn post(
        &self,
        segments: &[&str],
        body: Option<Map<String, Value>>,
    ) -> Result<Option<Value>, EtsError> {
        self.execute(Method::POST, segments, &[], body).await
    }

    /// Send one request and unwrap its envelope.
    ///
    /// GET carries the token in the query string, every other verb in the
    /// JSON body (`query` is only used for GET). The HTTP status is not
    /// inspected: the envelope decides.
    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<Map<String, Value>>,
    ) -> Result<Option<Value>, EtsError> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        let request = if method == Method::GET {
            self.http.get(self.with_token(url, query)?)
        } else {
            let token = self.require_token()?;
            let mut body = body.unwrap_or_default();
            body.insert(TOKEN_FIELD.to_string(), Value::String(token.to_owned()));
            self.http.request(method.clone(), url).json(&body)
        };

        debug!(%method, %path, "sending request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%method, %path, %status, bytes = text.len(), "response received");

        let envelope = Envelope::parse(&text)?;
        if !envelope.success {
            warn!(%method, %path, message = ?envelope.message, "request rejected");
        }
        envelope.into_payload()
    }
}

/// Serialize a caller document into the JSON object that becomes the body.
fn document_body<D: Serialize + ?Sized>(document: &D) -> Result<Map<String, Value>, EtsError> {
    match serde_json::to_value(document) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(EtsError::InvalidDocument(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
        Err(e) => Err(EtsError::InvalidDocument(e.to_string())),
    }
}

/// Bodies of a batch request, each prepared like a single submission.
fn batch<D: Serialize>(
    documents: &[D],
    mut prepare: impl FnMut(&mut Map<String, Value>),
) -> Result<Vec<Value>, EtsError> {
    documents
        .iter()
        .map(|document| {
            let mut body = document_body(document)?;
            prepare(&mut body);
            Ok(Value::Object(body))
        })
        .collect()
}

fn set_send_type(body: &mut Map<String, Value>, send_type: SendType) {
    let code = Value::String(send_type.code().to_string());
    match body.get_mut("ArchiveInfo") {
        Some(Value::Object(info)) => {
            info.insert("SendType".into(), code);
        }
        _ => {
            body.insert("ArchiveInfo".into(), json!({ "SendType": code }));
        }
    }
}

fn is_active(payload: Option<&Value>) -> bool {
    payload
        .and_then(|data| bool_field(data, &["IsActive", "isActive", "Active"]))
        .unwrap_or(false)
}

fn aliases(payload: Option<Value>) -> Result<Vec<UserAlias>, EtsError> {
    let list: AliasList = decode_or_default(payload)?;
    Ok(list.aliases.unwrap_or_default())
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
