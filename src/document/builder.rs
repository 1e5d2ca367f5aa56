use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::codes::{InvoiceTypeCode, ProfileId};
use super::types::*;
use crate::error::EtsError;

/// Builder for the [`Invoice`] block of a submission.
///
/// Totals are taken as given; the builder never sums lines.
///
/// ```
/// use chrono::NaiveDate;
/// use ets_client::document::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .supplier(PartyBuilder::new("1234567890", "Ornek Teknoloji A.S.").build())
///     .customer(PartyBuilder::new("9876543210", "ABC Yazilim Ltd. Sti.").build())
///     .add_line(
///         DocumentLineBuilder::new("YZL-001", "ERP Lisansi", dec!(1), "ADET", dec!(100))
///             .tax(Tax::vat(dec!(20), dec!(20)))
///             .build(),
///     )
///     .totals(dec!(100), dec!(100), dec!(120), dec!(120))
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.invoice_type_code, "SATIS");
/// ```
pub struct InvoiceBuilder {
    invoice_type_code: String,
    profile_id: String,
    issue_date: NaiveDate,
    document_currency_code: String,
    notes: Vec<String>,
    supplier: Option<Party>,
    customer: Option<Party>,
    lines: Vec<DocumentLine>,
    line_extension_amount: Decimal,
    tax_exclusive_amount: Decimal,
    tax_inclusive_amount: Decimal,
    payable_amount: Decimal,
    tax_total: Option<TaxTotal>,
}

impl InvoiceBuilder {
    pub fn new(issue_date: NaiveDate) -> Self {
        Self {
            invoice_type_code: InvoiceTypeCode::Sale.code().to_string(),
            profile_id: ProfileId::Basic.code().to_string(),
            issue_date,
            document_currency_code: "TRY".to_string(),
            notes: Vec::new(),
            supplier: None,
            customer: None,
            lines: Vec::new(),
            line_extension_amount: Decimal::ZERO,
            tax_exclusive_amount: Decimal::ZERO,
            tax_inclusive_amount: Decimal::ZERO,
            payable_amount: Decimal::ZERO,
            tax_total: None,
        }
    }

    pub fn type_code(mut self, code: InvoiceTypeCode) -> Self {
        self.invoice_type_code = code.code().to_string();
        self
    }

    pub fn profile(mut self, profile: ProfileId) -> Self {
        self.profile_id = profile.code().to_string();
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.document_currency_code = code.into();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn supplier(mut self, party: Party) -> Self {
        self.supplier = Some(party);
        self
    }

    pub fn customer(mut self, party: Party) -> Self {
        self.customer = Some(party);
        self
    }

    pub fn add_line(mut self, line: DocumentLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Monetary totals: line extension, tax exclusive, tax inclusive, payable.
    pub fn totals(
        mut self,
        line_extension: Decimal,
        tax_exclusive: Decimal,
        tax_inclusive: Decimal,
        payable: Decimal,
    ) -> Self {
        self.line_extension_amount = line_extension;
        self.tax_exclusive_amount = tax_exclusive;
        self.tax_inclusive_amount = tax_inclusive;
        self.payable_amount = payable;
        self
    }

    pub fn tax_total(mut self, tax_amount: Decimal, subtotals: Vec<TaxSubtotal>) -> Self {
        self.tax_total = Some(TaxTotal {
            tax_amount,
            tax_subtotals: subtotals,
        });
        self
    }

    /// Supplier, customer and at least one line must be present.
    pub fn build(self) -> Result<Invoice, EtsError> {
        let supplier = self
            .supplier
            .ok_or_else(|| EtsError::InvalidDocument("supplier is required".into()))?;
        let customer = self
            .customer
            .ok_or_else(|| EtsError::InvalidDocument("customer is required".into()))?;

        if self.lines.is_empty() {
            return Err(EtsError::InvalidDocument(
                "at least one line is required".into(),
            ));
        }

        Ok(Invoice {
            invoice_type_code: self.invoice_type_code,
            profile_id: self.profile_id,
            issue_date: self.issue_date,
            document_currency_code: self.document_currency_code,
            notes: self.notes,
            supplier,
            customer,
            lines: self.lines,
            line_extension_amount: self.line_extension_amount,
            tax_exclusive_amount: self.tax_exclusive_amount,
            tax_inclusive_amount: self.tax_inclusive_amount,
            payable_amount: self.payable_amount,
            tax_total: self.tax_total,
        })
    }
}

impl InvoiceRequest {
    pub fn new(invoice: Invoice) -> Self {
        Self {
            invoice,
            target_customer: None,
            archive_info: None,
        }
    }

    /// Receiving mailbox, e.g. `urn:mail:defaultpk@9876543210`.
    pub fn target_alias(mut self, alias: impl Into<String>) -> Self {
        self.target_customer = Some(TargetCustomer {
            alias: alias.into(),
        });
        self
    }

    /// Mark the e-archive invoice as an internet sale. Only
    /// `IsInternetSales` is set; the delivery type is added by
    /// [`EtsClient::submit_archive_invoice`](crate::EtsClient::submit_archive_invoice).
    pub fn internet_sale(mut self, is_internet_sales: bool) -> Self {
        let info = self.archive_info.get_or_insert_with(ArchiveInfo::default);
        info.is_internet_sales = Some(is_internet_sales);
        self
    }
}

/// Builder for [`Party`].
pub struct PartyBuilder {
    party_identification: String,
    party_name: String,
    tax_office: Option<String>,
    alias: Option<String>,
    address: Option<Address>,
}

impl PartyBuilder {
    pub fn new(party_identification: impl Into<String>, party_name: impl Into<String>) -> Self {
        Self {
            party_identification: party_identification.into(),
            party_name: party_name.into(),
            tax_office: None,
            alias: None,
            address: None,
        }
    }

    pub fn tax_office(mut self, tax_office: impl Into<String>) -> Self {
        self.tax_office = Some(tax_office.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn build(self) -> Party {
        Party {
            party_identification: self.party_identification,
            party_name: self.party_name,
            tax_office: self.tax_office,
            alias: self.alias,
            address: self.address,
        }
    }
}

/// Builder for [`Address`].
pub struct AddressBuilder {
    country: String,
    city_name: Option<String>,
    city_subdivision_name: Option<String>,
    street_name: Option<String>,
    building_number: Option<String>,
    postal_zone: Option<String>,
}

impl AddressBuilder {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            city_name: None,
            city_subdivision_name: None,
            street_name: None,
            building_number: None,
            postal_zone: None,
        }
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city_name = Some(city.into());
        self
    }

    pub fn subdivision(mut self, subdivision: impl Into<String>) -> Self {
        self.city_subdivision_name = Some(subdivision.into());
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street_name = Some(street.into());
        self
    }

    pub fn building_number(mut self, number: impl Into<String>) -> Self {
        self.building_number = Some(number.into());
        self
    }

    pub fn postal_zone(mut self, postal_zone: impl Into<String>) -> Self {
        self.postal_zone = Some(postal_zone.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            country: self.country,
            city_name: self.city_name,
            city_subdivision_name: self.city_subdivision_name,
            street_name: self.street_name,
            building_number: self.building_number,
            postal_zone: self.postal_zone,
        }
    }
}

/// Builder for [`DocumentLine`].
pub struct DocumentLineBuilder {
    item_code: String,
    item_name: String,
    invoiced_quantity: Decimal,
    iso_unit_code: String,
    price: Decimal,
    line_extension_amount: Option<Decimal>,
    taxes: Vec<Tax>,
}

impl DocumentLineBuilder {
    pub fn new(
        item_code: impl Into<String>,
        item_name: impl Into<String>,
        invoiced_quantity: Decimal,
        iso_unit_code: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            invoiced_quantity,
            iso_unit_code: iso_unit_code.into(),
            price,
            line_extension_amount: None,
            taxes: Vec::new(),
        }
    }

    /// Overrides the default of quantity × price.
    pub fn line_extension_amount(mut self, amount: Decimal) -> Self {
        self.line_extension_amount = Some(amount);
        self
    }

    pub fn tax(mut self, tax: Tax) -> Self {
        self.taxes.push(tax);
        self
    }

    pub fn build(self) -> DocumentLine {
        let line_extension_amount = self
            .line_extension_amount
            .unwrap_or(self.invoiced_quantity * self.price);
        DocumentLine {
            item_code: self.item_code,
            item_name: self.item_name,
            invoiced_quantity: self.invoiced_quantity,
            iso_unit_code: self.iso_unit_code,
            price: self.price,
            line_extension_amount,
            taxes: self.taxes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn line() -> DocumentLine {
        DocumentLineBuilder::new("A-1", "Danismanlik", dec!(2), "ADET", dec!(150)).build()
    }

    #[test]
    fn missing_supplier_rejected() {
        let err = InvoiceBuilder::new(issue_date())
            .customer(PartyBuilder::new("9876543210", "Alici").build())
            .add_line(line())
            .build()
            .unwrap_err();
        assert!(matches!(err, EtsError::InvalidDocument(msg) if msg.contains("supplier")));
    }

    #[test]
    fn missing_lines_rejected() {
        let err = InvoiceBuilder::new(issue_date())
            .supplier(PartyBuilder::new("1234567890", "Satici").build())
            .customer(PartyBuilder::new("9876543210", "Alici").build())
            .build()
            .unwrap_err();
        assert!(matches!(err, EtsError::InvalidDocument(_)));
    }

    #[test]
    fn defaults_are_basic_sale_in_try() {
        let invoice = InvoiceBuilder::new(issue_date())
            .supplier(PartyBuilder::new("1234567890", "Satici").build())
            .customer(PartyBuilder::new("9876543210", "Alici").build())
            .add_line(line())
            .build()
            .unwrap();
        assert_eq!(invoice.invoice_type_code, "SATIS");
        assert_eq!(invoice.profile_id, "TEMELFATURA");
        assert_eq!(invoice.document_currency_code, "TRY");
        assert_eq!(invoice.payable_amount, Decimal::ZERO);
    }

    #[test]
    fn line_amount_defaults_to_quantity_times_price() {
        assert_eq!(line().line_extension_amount, dec!(300));
        let overridden = DocumentLineBuilder::new("A-1", "X", dec!(2), "ADET", dec!(150))
            .line_extension_amount(dec!(275))
            .build();
        assert_eq!(overridden.line_extension_amount, dec!(275));
    }

    #[test]
    fn internet_sale_sets_only_the_sales_flag() {
        let invoice = InvoiceBuilder::new(issue_date())
            .profile(ProfileId::Archive)
            .supplier(PartyBuilder::new("1234567890", "Satici").build())
            .customer(PartyBuilder::new("9876543210", "Alici").build())
            .add_line(line())
            .build()
            .unwrap();
        let request = InvoiceRequest::new(invoice).internet_sale(true);
        let info = request.archive_info.unwrap();
        assert_eq!(info.send_type, None);
        assert_eq!(info.is_internet_sales, Some(true));
    }
}
