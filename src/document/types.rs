use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::SendType;

/// Body of an invoice or e-archive submission.
///
/// The client adds `EtsToken` (and `ArchiveInfo.SendType` for e-archive)
/// when sending, so neither needs to be set here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceRequest {
    pub invoice: Invoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_customer: Option<TargetCustomer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_info: Option<ArchiveInfo>,
}

/// Invoice header, parties, lines and totals.
///
/// Amounts are sent exactly as set, as JSON numbers with every digit and
/// trailing zero kept. Nothing is summed or rounded on the way out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    /// `SATIS`, `IADE`, ... (see [`InvoiceTypeCode`](super::InvoiceTypeCode)).
    pub invoice_type_code: String,
    /// `TEMELFATURA`, `TICARIFATURA`, ... (see [`ProfileId`](super::ProfileId)).
    pub profile_id: String,
    /// Serialized as `YYYY-MM-DD`.
    pub issue_date: NaiveDate,
    pub document_currency_code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    pub supplier: Party,
    pub customer: Party,
    pub lines: Vec<DocumentLine>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub line_extension_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_exclusive_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_inclusive_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub payable_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_total: Option<TaxTotal>,
}

/// Supplier or customer block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Party {
    /// VKN (10 digits) or TCKN (11 digits).
    pub party_identification: String,
    pub party_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_office: Option<String>,
    /// Mailbox alias, e.g. `urn:mail:defaultpk@1234567890`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_subdivision_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_zone: Option<String>,
}

/// Invoice line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentLine {
    pub item_code: String,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub invoiced_quantity: Decimal,
    /// Unit code, e.g. `ADET`, `KG`, `C62`.
    pub iso_unit_code: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub line_extension_amount: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taxes: Vec<Tax>,
}

/// Tax applied to a single line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tax {
    pub tax_code: String,
    pub tax_name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percent: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_amount: Decimal,
}

/// Document-level tax total with per-code subtotals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxTotal {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_amount: Decimal,
    pub tax_subtotals: Vec<TaxSubtotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaxSubtotal {
    pub tax_code: String,
    pub tax_name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub taxable_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub percent: Decimal,
}

/// Receiving mailbox of the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetCustomer {
    pub alias: String,
}

/// E-archive delivery options.
///
/// `send_type` is normally left unset; `submit_archive_invoice` fills it in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArchiveInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_type: Option<SendType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_internet_sales: Option<bool>,
}

impl Tax {
    /// KDV (VAT) at `percent`.
    pub fn vat(percent: Decimal, tax_amount: Decimal) -> Self {
        Self {
            tax_code: super::codes::TAX_CODE_VAT.to_string(),
            tax_name: "KDV".to_string(),
            percent,
            tax_amount,
        }
    }
}

impl TaxSubtotal {
    /// KDV (VAT) subtotal at `percent`.
    pub fn vat(taxable_amount: Decimal, tax_amount: Decimal, percent: Decimal) -> Self {
        Self {
            tax_code: super::codes::TAX_CODE_VAT.to_string(),
            tax_name: "KDV".to_string(),
            taxable_amount,
            tax_amount,
            percent,
        }
    }
}
