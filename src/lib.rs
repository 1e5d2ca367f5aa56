//! # ets-client
//!
//! Client for the ETS e-document web API: authentication, e-invoice,
//! e-archive and e-dispatch submission, status lookup, and exchange rates.
//!
//! Every response arrives in a `{ "Success", "Message", "Data" }` envelope.
//! The client unwraps it into the payload and turns `Success: false` into
//! [`EtsError::Api`] carrying the server message.
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use ets_client::document::*;
//! use ets_client::{Credentials, EtsClient};
//! use rust_decimal_macros::dec;
//!
//! let mut client = EtsClient::new()?;
//! let credentials = Credentials::new("1234567890", "user", "pass", "ETS-CLIENT", Integrator::Uym);
//! client.authenticate(&credentials).await?;
//!
//! let invoice = InvoiceBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .supplier(PartyBuilder::new("1234567890", "Ornek Teknoloji A.S.").build())
//!     .customer(PartyBuilder::new("9876543210", "ABC Yazilim Ltd. Sti.").build())
//!     .add_line(DocumentLineBuilder::new("YZL-001", "Lisans", dec!(1), "ADET", dec!(100)).build())
//!     .totals(dec!(100), dec!(100), dec!(120), dec!(120))
//!     .build()?;
//!
//! let result = client.submit_invoice(&InvoiceRequest::new(invoice)).await?;
//! let status = client.get_status(result.uuid.as_deref().unwrap_or_default()).await?;
//! ```
//!
//! Documents are passed through untouched: any `Serialize` value that
//! serializes to a JSON object can be submitted, including a
//! `serde_json::Value` built by hand.

pub mod client;
pub mod document;
mod error;

pub use client::{
    ClientConfig, Credentials, DEFAULT_BASE_URL, DocumentStatus, DocumentSummary, EtsClient,
    ExchangeRate, InboxQuery, LIVE_BASE_URL, PdfDocument, SubmissionResult, TOKEN_FIELD,
    UserAlias,
};
pub use document::{Integrator, ResponseType, SendType};
pub use error::EtsError;
