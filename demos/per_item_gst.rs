use gst_invoicing::core::*;
use rust_decimal_macros::dec;

fn main() -> Result<(), InvoiceError> {
    // Materials at different GST slabs, one of them billed by area
    let items = vec![
        LineItemBuilder::new("Vitrified tiles", dec!(0), dec!(980))
            .area(dec!(7.5))
            .tax_rate(dec!(18))
            .build(),
        LineItemBuilder::new("Tile adhesive", dec!(10), dec!(72))
            .tax_rate(dec!(12))
            .build(),
        LineItemBuilder::new("Labour", dec!(1), dec!(1500)).build(),
    ];

    let pricing = price_items(&items, &TaxPolicy::PerItem)?;
    let fmt = CurrencyFormat::default();

    println!("{:<18} {:>10} {:>10} {:>6}", "Item", "Amount", "GST", "Rate");
    for priced in &pricing.items {
        let rate = priced.item.tax_rate.unwrap_or_default();
        println!(
            "{:<18} {:>10} {:>10} {:>6}",
            priced.item.description,
            fmt.format(priced.amount),
            fmt.format(priced.gst_amount),
            format_percent(rate)
        );
    }

    let shown = pricing.totals.formatted();
    println!("\nSubtotal: {}", shown.subtotal);
    println!("GST:      {}", shown.tax_amount);
    println!("Total:    {}", shown.total);

    // The same items under a single invoice-level rate ignore item rates
    let flat = compute_invoice_totals(&items, &TaxPolicy::invoice_level(dec!(18)))?;
    println!("\nAt a flat 18%: {}", format_currency(flat.total));
    Ok(())
}
