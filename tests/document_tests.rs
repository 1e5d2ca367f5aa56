use chrono::NaiveDate;
use ets_client::document::*;
use rust_decimal_macros::dec;
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn supplier() -> Party {
    PartyBuilder::new("1234567890", "Ornek Teknoloji A.S.")
        .tax_office("Kadikoy VD")
        .alias("urn:mail:defaultgb@1234567890")
        .address(
            AddressBuilder::new("Turkiye")
                .city("Istanbul")
                .subdivision("Kadikoy")
                .street("Bagdat Caddesi No:123")
                .building_number("123")
                .postal_zone("34710")
                .build(),
        )
        .build()
}

fn customer() -> Party {
    PartyBuilder::new("9876543210", "ABC Yazilim Ltd. Sti.").build()
}

fn three_line_invoice() -> Invoice {
    InvoiceBuilder::new(date(2024, 1, 15))
        .note("Bu fatura elektronik olarak olusturulmustur.")
        .supplier(supplier())
        .customer(customer())
        .add_line(
            DocumentLineBuilder::new("YZL-001", "ERP Lisansi", dec!(1), "ADET", dec!(50000))
                .tax(Tax::vat(dec!(20), dec!(10000)))
                .build(),
        )
        .add_line(
            DocumentLineBuilder::new("DST-001", "Teknik Destek", dec!(12), "ADET", dec!(2500.50))
                .tax(Tax::vat(dec!(20), dec!(6001.20)))
                .build(),
        )
        .add_line(
            DocumentLineBuilder::new("EGT-001", "Egitim", dec!(0.25), "ADET", dec!(3000))
                .tax(Tax::vat(dec!(20), dec!(150)))
                .build(),
        )
        .totals(dec!(80756), dec!(80756), dec!(96907.20), dec!(96907.20))
        .tax_total(
            dec!(16151.20),
            vec![TaxSubtotal::vat(dec!(80756), dec!(16151.20), dec!(20))],
        )
        .build()
        .unwrap()
}

fn to_json(invoice: &Invoice) -> Value {
    serde_json::to_value(invoice).unwrap()
}

// ---------------------------------------------------------------------------
// Serialization shape
// ---------------------------------------------------------------------------

#[test]
fn header_fields_use_api_names() {
    let json = to_json(&three_line_invoice());
    assert_eq!(json["InvoiceTypeCode"], "SATIS");
    assert_eq!(json["ProfileId"], "TEMELFATURA");
    assert_eq!(json["IssueDate"], "2024-01-15");
    assert_eq!(json["DocumentCurrencyCode"], "TRY");
    assert_eq!(json["Notes"][0], "Bu fatura elektronik olarak olusturulmustur.");
}

#[test]
fn amounts_are_json_numbers() {
    let json = to_json(&three_line_invoice());
    let lines = json["Lines"].as_array().unwrap();
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0]["Price"].as_f64(), Some(50000.0));
    assert_eq!(lines[1]["Price"].as_f64(), Some(2500.5));
    assert_eq!(lines[1]["LineExtensionAmount"].as_f64(), Some(30006.0));
    assert_eq!(lines[2]["InvoicedQuantity"].as_f64(), Some(0.25));
    assert_eq!(lines[2]["LineExtensionAmount"].as_f64(), Some(750.0));
    assert_eq!(lines[1]["Taxes"][0]["TaxAmount"].as_f64(), Some(6001.2));

    assert_eq!(json["PayableAmount"].as_f64(), Some(96907.2));
    assert_eq!(json["TaxTotal"]["TaxAmount"].as_f64(), Some(16151.2));
    let subtotal = &json["TaxTotal"]["TaxSubtotals"][0];
    assert_eq!(subtotal["TaxCode"], "0015");
    assert_eq!(subtotal["TaxName"], "KDV");
    assert_eq!(subtotal["TaxableAmount"].as_f64(), Some(80756.0));
    assert_eq!(subtotal["Percent"].as_f64(), Some(20.0));
}

#[test]
fn large_and_fractional_amounts_keep_every_digit() {
    let invoice = InvoiceBuilder::new(date(2024, 1, 15))
        .supplier(supplier())
        .customer(customer())
        .add_line(
            DocumentLineBuilder::new("X", "Urun", dec!(1), "C62", dec!(12345678901234.56789))
                .build(),
        )
        .totals(
            dec!(9007199254740993),
            dec!(9007199254740993),
            dec!(2500.50),
            dec!(2500.50),
        )
        .build()
        .unwrap();

    let text = serde_json::to_string(&invoice).unwrap();
    assert!(text.contains(r#""Price":12345678901234.56789"#), "{text}");
    assert!(text.contains(r#""LineExtensionAmount":9007199254740993"#), "{text}");
    assert!(text.contains(r#""PayableAmount":2500.50"#), "{text}");

    let json = to_json(&invoice);
    assert!(json["PayableAmount"].is_number());
    assert_eq!(json["Lines"][0]["Price"].to_string(), "12345678901234.56789");
}

#[test]
fn party_blocks_skip_unset_fields() {
    let json = to_json(&three_line_invoice());
    assert_eq!(
        json["Customer"],
        json!({ "PartyIdentification": "9876543210", "PartyName": "ABC Yazilim Ltd. Sti." })
    );
    assert_eq!(json["Supplier"]["TaxOffice"], "Kadikoy VD");
    assert_eq!(json["Supplier"]["Address"]["CityName"], "Istanbul");
    assert_eq!(json["Supplier"]["Address"]["PostalZone"], "34710");
}

#[test]
fn empty_notes_and_tax_total_omitted() {
    let invoice = InvoiceBuilder::new(date(2024, 3, 1))
        .supplier(supplier())
        .customer(customer())
        .add_line(DocumentLineBuilder::new("X", "Urun", dec!(1), "C62", dec!(10)).build())
        .build()
        .unwrap();
    let json = to_json(&invoice);
    let obj = json.as_object().unwrap();
    assert!(!obj.contains_key("Notes"));
    assert!(!obj.contains_key("TaxTotal"));
    assert!(!json["Lines"][0].as_object().unwrap().contains_key("Taxes"));
}

#[test]
fn request_wraps_invoice_and_target() {
    let request = InvoiceRequest::new(three_line_invoice())
        .target_alias("urn:mail:defaultpk@9876543210");
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(
        json["TargetCustomer"],
        json!({ "Alias": "urn:mail:defaultpk@9876543210" })
    );
    assert_eq!(json["Invoice"]["Lines"].as_array().unwrap().len(), 3);
    assert!(json.get("ArchiveInfo").is_none());
    assert!(json.get("EtsToken").is_none());
}

#[test]
fn archive_profile_and_internet_sale() {
    let invoice = InvoiceBuilder::new(date(2024, 1, 15))
        .profile(ProfileId::Archive)
        .type_code(InvoiceTypeCode::Exempt)
        .supplier(supplier())
        .customer(customer())
        .add_line(DocumentLineBuilder::new("X", "Urun", dec!(1), "C62", dec!(10)).build())
        .build()
        .unwrap();
    let request = InvoiceRequest::new(invoice).internet_sale(true);
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["Invoice"]["ProfileId"], "EARSIVFATURA");
    assert_eq!(json["Invoice"]["InvoiceTypeCode"], "ISTISNA");
    assert_eq!(json["ArchiveInfo"], json!({ "IsInternetSales": true }));
}

#[test]
fn internet_sale_flag_never_adds_send_type() {
    let request = InvoiceRequest::new(three_line_invoice()).internet_sale(false);
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["ArchiveInfo"], json!({ "IsInternetSales": false }));
    assert!(json["ArchiveInfo"].get("SendType").is_none());
}

#[test]
fn invoice_deserializes_from_api_json() {
    let json = to_json(&three_line_invoice());
    let parsed: Invoice = serde_json::from_value(json).unwrap();
    assert_eq!(parsed.issue_date, date(2024, 1, 15));
    assert_eq!(parsed.lines[1].price, dec!(2500.5));
    assert_eq!(parsed.tax_total.unwrap().tax_subtotals.len(), 1);
}
