use chrono::Utc;
use gst_invoicing::core::*;
use rust_decimal_macros::dec;

fn main() {
    // Two services at one invoice-level GST rate
    let invoice = InvoiceBuilder::new("Kumar Constructions")
        .client_email("accounts@kumar.in")
        .client_address("Plot 12, MIDC\nPune 411019")
        .description("Structural survey of the east wing")
        .add_item(LineItemBuilder::new("Site inspection", dec!(2), dec!(100)).build())
        .add_item(LineItemBuilder::new("Survey report", dec!(1), dec!(50)).build())
        .tax_policy(TaxPolicy::invoice_level(dec!(18)))
        .build("INV-001", Utc::now())
        .expect("invoice should be valid");

    let fmt = CurrencyFormat::default();
    println!("Invoice: {}", invoice.invoice_number);
    println!("Client:  {}", invoice.client_name);
    println!("Due:     {}", invoice.due_date.format("%d/%m/%Y"));
    println!("---");
    for priced in &invoice.items {
        let item = &priced.item;
        println!(
            "  {} x {} @ {} = {}",
            item.quantity,
            item.description,
            fmt.format(item.rate),
            fmt.format(priced.amount)
        );
    }
    println!("---");
    let shown = invoice.totals().formatted();
    println!("Subtotal: {}", shown.subtotal);
    println!("GST:      {}", shown.tax_amount);
    println!("Total:    {}", shown.total);
}
