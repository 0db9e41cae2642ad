use chrono::Utc;
use gst_invoicing::core::CurrencyFormat;
use gst_invoicing::render::{invoices_to_csv, render_invoice_html};
use gst_invoicing::store::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = InvoiceStore::default();
    let now = Utc::now();

    store.update_company(CompanyPatch {
        name: Some("Deshmukh Engineering".into()),
        gstin: Some("27AAPFU0939F1ZV".into()),
        ..Default::default()
    });

    let client = store.create_client(
        NewClient {
            name: "Gowda Infra".into(),
            email: "billing@gowda.in".into(),
            gstin: Some("29AAGCB7383J1Z4".into()),
            ..Default::default()
        },
        now,
    )?;

    let items = serde_json::from_str(
        r#"[{"description": "Load test", "quantity": "3", "rate": "12000"},
            {"description": "Report", "quantity": 1, "rate": 4500}]"#,
    )?;
    let invoice = store.create_invoice(
        NewInvoice {
            client_id: Some(client.id),
            description: "Pile load testing".into(),
            items,
            tax_rate: Some("18".into()),
            ..Default::default()
        },
        now,
    )?;

    let html = render_invoice_html(
        &invoice,
        store.company(),
        Some(&client),
        &CurrencyFormat::default(),
    )?;
    let path = std::env::temp_dir().join(format!("invoice-{}.html", invoice.invoice_number));
    std::fs::write(&path, html)?;
    println!("Wrote {}", path.display());

    print!("{}", invoices_to_csv(store.list_invoices(&InvoiceFilter::default())));
    Ok(())
}
