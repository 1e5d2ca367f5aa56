//! End-to-end walkthrough against the ETS test environment:
//! authenticate, check a party, list its aliases, submit an invoice,
//! poll its status and look up an exchange rate.
//!
//! ```bash
//! RUST_LOG=ets_client=debug cargo run --example walkthrough
//! ```

use std::process::ExitCode;

use chrono::Local;
use ets_client::document::*;
use ets_client::{Credentials, EtsClient, EtsError};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

const SUPPLIER_ID: &str = "1234567890";
const CUSTOMER_ID: &str = "9876543210";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== ETS API walkthrough ===\n");

    match run().await {
        Ok(()) => {
            println!("\nDone.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\nERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), EtsError> {
    let mut client = EtsClient::new()?;

    println!("1. Authenticating...");
    let credentials = Credentials::new(
        SUPPLIER_ID,
        "test_user",
        "test_pass",
        "ETS-RUST-SAMPLE",
        Integrator::Uym,
    );
    let token = client.authenticate(&credentials).await?;
    let preview: String = token.chars().take(30).collect();
    println!("   EtsToken received: {preview}...\n");

    println!("2. Checking e-invoice registration...");
    let active = client.check_registration(CUSTOMER_ID).await?;
    println!("   VKN {CUSTOMER_ID} registered: {active}\n");

    println!("3. Listing aliases...");
    let aliases = client.list_aliases(CUSTOMER_ID).await?;
    println!("   Found {} alias(es)", aliases.len());
    for alias in &aliases {
        println!(
            "      - {} ({})",
            alias.alias.as_deref().unwrap_or("—"),
            alias.alias_type.as_deref().unwrap_or("—")
        );
    }
    println!();

    println!("4. Submitting invoice...");
    let request = InvoiceRequest::new(sample_invoice()?)
        .target_alias(format!("urn:mail:defaultpk@{CUSTOMER_ID}"));
    let result = client.submit_invoice(&request).await?;
    println!(
        "   UUID: {}",
        result.uuid.as_deref().unwrap_or("(not returned)")
    );
    println!(
        "   Number: {}\n",
        result.number.as_deref().unwrap_or("(not returned)")
    );

    if let Some(uuid) = result.uuid.as_deref() {
        println!("5. Polling status...");
        let status = client.get_status(uuid).await?;
        println!(
            "   Status: {} ({})\n",
            status.status.as_deref().unwrap_or("—"),
            status.status_description.as_deref().unwrap_or("—")
        );
    } else {
        println!("5. Skipping status poll: no UUID returned\n");
    }

    println!("6. Looking up exchange rate...");
    let today = Local::now().date_naive().to_string();
    let rate = client.get_exchange_rate("USD", &today).await?;
    match (rate.buying_rate, rate.selling_rate, rate.rate) {
        (Some(buy), Some(sell), _) => println!("   USD/TRY {today}: buy {buy}, sell {sell}"),
        (_, _, Some(r)) => println!("   USD/TRY {today}: {r}"),
        _ => println!("   USD/TRY {today}: no rate published"),
    }

    Ok(())
}

/// Three lines at 20% KDV: 95,000 TRY net, 19,000 TRY tax.
fn sample_invoice() -> Result<Invoice, EtsError> {
    let supplier = PartyBuilder::new(SUPPLIER_ID, "Ornek Teknoloji A.S.")
        .tax_office("Kadikoy VD")
        .address(
            AddressBuilder::new("Turkiye")
                .city("Istanbul")
                .subdivision("Kadikoy")
                .street("Bagdat Caddesi No:123")
                .building_number("123")
                .postal_zone("34710")
                .build(),
        )
        .build();

    let customer = PartyBuilder::new(CUSTOMER_ID, "ABC Yazilim Ltd. Sti.")
        .tax_office("Cankaya VD")
        .address(
            AddressBuilder::new("Turkiye")
                .city("Ankara")
                .subdivision("Cankaya")
                .street("Ataturk Bulvari No:456")
                .building_number("456")
                .postal_zone("06690")
                .build(),
        )
        .build();

    InvoiceBuilder::new(Local::now().date_naive())
        .type_code(InvoiceTypeCode::Sale)
        .profile(ProfileId::Basic)
        .currency("TRY")
        .note("Bu fatura elektronik olarak olusturulmustur.")
        .note("Odeme vadesi: 30 gun")
        .supplier(supplier)
        .customer(customer)
        .add_line(
            DocumentLineBuilder::new(
                "YZL-001",
                "ERP Yazilim Lisansi (Yillik)",
                dec!(1),
                "ADET",
                dec!(50000),
            )
                .tax(Tax::vat(dec!(20), dec!(10000)))
                .build(),
        )
        .add_line(
            DocumentLineBuilder::new(
                "DST-001",
                "Teknik Destek Hizmeti (12 Ay)",
                dec!(12),
                "ADET",
                dec!(2500),
            )
                .tax(Tax::vat(dec!(20), dec!(6000)))
                .build(),
        )
        .add_line(
            DocumentLineBuilder::new(
                "EGT-001",
                "Kullanici Egitimi (Kisi/Gun)",
                dec!(5),
                "ADET",
                dec!(3000),
            )
                .tax(Tax::vat(dec!(20), dec!(3000)))
                .build(),
        )
        .totals(dec!(95000), dec!(95000), dec!(114000), dec!(114000))
        .tax_total(
            dec!(19000),
            vec![TaxSubtotal::vat(dec!(95000), dec!(19000), dec!(20))],
        )
        .build()
}
