#![cfg(feature = "render")]

use chrono::{DateTime, TimeZone, Utc};
use gst_invoicing::core::*;
use gst_invoicing::render::*;
use rust_decimal_macros::dec;

fn issued() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap()
}

fn survey_invoice(client: &str) -> Invoice {
    InvoiceBuilder::new(client)
        .description("Structural survey")
        .items([
            LineItemBuilder::new("Inspection", dec!(2), dec!(100)).build(),
            LineItemBuilder::new("Report", dec!(1), dec!(50)).build(),
        ])
        .tax_policy(TaxPolicy::invoice_level(dec!(18)))
        .build("1", issued())
        .unwrap()
}

fn client_with(gstin: Option<&str>) -> Client {
    Client {
        id: uuid::Uuid::new_v4(),
        name: "Sharma Builders".into(),
        email: "accounts@sharma.in".into(),
        phone: None,
        address: Some("Pune".into()),
        gstin: gstin.map(String::from),
        created_at: issued(),
        updated_at: None,
    }
}

fn registered_company() -> CompanySettings {
    CompanySettings {
        name: "Deshmukh Engineering".into(),
        gstin: "27AAPFU0939F1ZV".into(),
        ..Default::default()
    }
}

fn render(invoice: &Invoice, company: &CompanySettings, client: Option<&Client>) -> String {
    render_invoice_html(invoice, company, client, &CurrencyFormat::default()).unwrap()
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

#[test]
fn html_has_header_and_totals() {
    let html = render(&survey_invoice("Sharma Builders"), &registered_company(), None);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Invoice 1</title>"));
    assert!(html.contains("<h1>Deshmukh Engineering</h1>"));
    assert!(html.contains("<strong>Date:</strong> 01/09/2024"));
    assert!(html.contains("<strong>Due:</strong> 01/10/2024"));
    assert!(html.contains("<h3>Project Description:</h3>"));
    assert!(html.contains("<span>Subtotal:</span><span>₹250.00</span>"));
    assert!(html.contains("<span>GST (18%):</span><span>₹45.00</span>"));
    assert!(html.contains("<span>Total Amount:</span><span>₹295.00</span>"));
}

#[test]
fn same_state_splits_into_cgst_and_sgst() {
    let client = client_with(Some("27AAACR5055K1Z7"));
    let html = render(&survey_invoice("Sharma Builders"), &registered_company(), Some(&client));

    assert!(html.contains("<span>CGST (9%):</span><span>₹22.50</span>"));
    assert!(html.contains("<span>SGST (9%):</span><span>₹22.50</span>"));
    assert!(!html.contains("IGST"));
    assert!(html.contains("<p>GSTIN: 27AAACR5055K1Z7</p>"));
}

#[test]
fn other_state_uses_igst() {
    let client = client_with(Some("29AAGCB7383J1Z4"));
    let html = render(&survey_invoice("Sharma Builders"), &registered_company(), Some(&client));

    assert!(html.contains("<span>IGST (18%):</span><span>₹45.00</span>"));
    assert!(!html.contains("CGST"));
}

#[test]
fn unregistered_client_is_intra_state() {
    let client = client_with(None);
    let html = render(&survey_invoice("Sharma Builders"), &registered_company(), Some(&client));
    assert!(html.contains("CGST (9%)"));
}

#[test]
fn placeholder_company_gstin_skips_split() {
    let client = client_with(Some("27AAACR5055K1Z7"));
    let html = render(
        &survey_invoice("Sharma Builders"),
        &CompanySettings::default(),
        Some(&client),
    );
    assert!(html.contains("<p>GSTIN: Your GSTIN Number</p>"));
    assert!(!html.contains("CGST"));
    assert!(!html.contains("IGST"));
}

#[test]
fn per_item_invoice_shows_item_gst() {
    let invoice = InvoiceBuilder::new("Kumar")
        .items([
            LineItemBuilder::new("Tiles", dec!(1), dec!(200))
                .tax_rate(dec!(18))
                .build(),
            LineItemBuilder::new("Flooring", dec!(0), dec!(40))
                .area(dec!(12.5))
                .tax_rate(dec!(12))
                .build(),
        ])
        .build("7", issued())
        .unwrap();
    let html = render(&invoice, &registered_company(), None);

    assert!(html.contains("<th>GST</th>"));
    assert!(html.contains("₹36.00 (18%)"));
    assert!(html.contains(
        "<td class=\"num\">-</td><td class=\"num\">12.5</td><td class=\"num\">₹40.00</td>"
    ));
    assert!(html.contains("<span>GST:</span><span>₹96.00</span>"));
    assert!(html.contains("<span>CGST:</span><span>₹48.00</span>"));
}

#[test]
fn empty_invoice_says_so() {
    let invoice = InvoiceBuilder::new("Kumar").build("2", issued()).unwrap();
    let html = render(&invoice, &CompanySettings::default(), None);
    assert!(html.contains("No items added to this invoice."));
    assert!(!html.contains("<table"));
    assert!(html.contains("<span>Total Amount:</span><span>₹0.00</span>"));
}

#[test]
fn user_text_is_escaped() {
    let invoice = InvoiceBuilder::new("<script>alert('x')</script>")
        .notes("Line one\nA & B")
        .build("3", issued())
        .unwrap();
    let html = render(&invoice, &CompanySettings::default(), None);

    assert!(!html.contains("<script>"));
    assert!(html.contains("<p><strong>&lt;script&gt;alert(&#x27;x&#x27;)"));
    assert!(html.contains("Line one<br>A &amp; B"));
}

#[test]
fn company_and_item_text_is_escaped() {
    let company = CompanySettings {
        name: "Rao & \"Sons\"".into(),
        address: "12 <b>MG</b> Road\nBengaluru".into(),
        logo: Some("x\" onerror=\"alert(1)".into()),
        ..Default::default()
    };
    let invoice = InvoiceBuilder::new("Kumar")
        .add_item(LineItemBuilder::new("<i>Tiles</i>", dec!(1), dec!(10)).build())
        .build("4", issued())
        .unwrap();
    let html = render(&invoice, &company, None);

    assert!(html.contains("<h1>Rao &amp; &quot;Sons&quot;</h1>"));
    assert!(html.contains("12 &lt;b&gt;MG&lt;"));
    assert!(html.contains("<br>Bengaluru</p>"));
    assert!(html.contains("<img src=\"x&quot; onerror=&quot;alert(1)\" alt=\"logo\">"));
    assert!(html.contains("<td>&lt;i&gt;Tiles&lt;"));
    assert!(!html.contains("<i>Tiles"));
}

#[test]
fn custom_currency_format() {
    let fmt = CurrencyFormat::new("Rs. ").with_decimals(0);
    let html = render_invoice_html(
        &survey_invoice("Kumar"),
        &CompanySettings::default(),
        None,
        &fmt,
    )
    .unwrap();
    assert!(html.contains("<span>Total Amount:</span><span>Rs. 295</span>"));
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[test]
fn csv_register() {
    let first = survey_invoice("Kumar, Sons");
    let mut second = InvoiceBuilder::new("Patel \"PT\" Traders")
        .add_item(LineItemBuilder::new("Panels", dec!(3), dec!(33.335)).build())
        .tax_policy(TaxPolicy::invoice_level(dec!(18)))
        .due_in_days(15)
        .build("2", issued())
        .unwrap();
    second.status = InvoiceStatus::Sent;

    let csv = invoices_to_csv([&first, &second]);
    assert!(csv.ends_with("\r\n"));

    let csv = csv.replace("\r\n", "\n");
    insta::assert_snapshot!(csv.trim_end(), @r#"
    invoiceNumber,clientName,status,createdAt,dueDate,subtotal,tax,total
    "1","Kumar, Sons",draft,2024-09-01,2024-10-01,250.00,45.00,295.00
    "2","Patel ""PT"" Traders",sent,2024-09-01,2024-09-16,100.01,18.00,118.01
    "#);
}

#[test]
fn csv_header_only_when_empty() {
    let none: Vec<Invoice> = Vec::new();
    assert_eq!(invoices_to_csv(&none), format!("{}\r\n", CSV_HEADER.join(",")));
}
