use gst_invoicing::core::*;

fn main() {
    // Raw form input: numbers arrive as strings, some of them broken
    let json = r#"[
        {"description": "Inspection", "quantity": "2", "rate": "100", "taxRate": "18"},
        {"description": "Transport", "quantity": "two", "rate": "450"},
        {"description": "Discount", "quantity": "1", "rate": "-200"}
    ]"#;
    let inputs: Vec<LineItemInput> = serde_json::from_str(json).expect("valid JSON");

    println!("=== Lenient ===\n");
    match resolve_items(&inputs, NumericMode::Lenient) {
        Ok(items) => {
            for item in &items {
                println!("  {:<12} qty={} rate={}", item.description, item.quantity, item.rate);
            }
            match compute_invoice_totals(&items, &TaxPolicy::PerItem) {
                Ok(totals) => println!("  total: {}", format_currency(totals.total)),
                Err(e) => println!("  unexpected: {e}"),
            }
        }
        Err(e) => println!("  unexpected: {e}"),
    }

    println!("\n=== Strict ===\n");
    match resolve_items(&inputs, NumericMode::Strict) {
        Ok(_) => println!("  accepted"),
        Err(InvoiceError::InvalidLineItem {
            index,
            field,
            reason,
        }) => println!("  rejected: item {index}, {field} {reason}"),
        Err(e) => println!("  rejected: {e}"),
    }
}
