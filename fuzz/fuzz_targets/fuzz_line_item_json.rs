#![no_main]

use gst_invoicing::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(inputs) = serde_json::from_slice::<Vec<LineItemInput>>(data) else {
        return;
    };

    // Lenient resolution never fails; pricing either adds up or reports overflow.
    let items = match resolve_items(&inputs, NumericMode::Lenient) {
        Ok(items) => items,
        Err(e) => panic!("lenient resolution failed: {e}"),
    };
    for policy in [TaxPolicy::PerItem, TaxPolicy::invoice_level(18.into())] {
        match price_items(&items, &policy) {
            Ok(pricing) => {
                let totals = pricing.totals;
                assert_eq!(totals.total, totals.subtotal + totals.tax_amount);
            }
            Err(e) => assert!(matches!(e, InvoiceError::Arithmetic(_)), "{e}"),
        }
        let _ = try_price_items(&items, &policy);
    }

    if let Ok(strict) = resolve_items(&inputs, NumericMode::Strict) {
        assert_eq!(strict, items);
    }
});
