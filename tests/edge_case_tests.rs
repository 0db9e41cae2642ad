//! Edge cases: hostile input, extreme values, mode differences.

use chrono::{Duration, Utc};
use gst_invoicing::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn input(quantity: &str, rate: &str) -> LineItemInput {
    LineItemInput {
        description: "Item".into(),
        quantity: Some(quantity.into()),
        area: None,
        rate: Some(rate.into()),
        tax_rate: None,
    }
}

fn line(quantity: Decimal, rate: Decimal) -> LineItem {
    LineItemBuilder::new("Item", quantity, rate).build()
}

// ---------------------------------------------------------------------------
// Lenient coercion
// ---------------------------------------------------------------------------

#[test]
fn garbage_strings_become_zero() {
    for raw in ["", "   ", "abc", "12abc", "₹", "--5", "N/A"] {
        let item = input(raw, "100").resolve(0, NumericMode::Lenient).unwrap();
        assert_eq!(item.quantity, Decimal::ZERO, "quantity {raw:?}");
    }
}

#[test]
fn negative_values_become_zero() {
    let item = input("-4", "-250").resolve(0, NumericMode::Lenient).unwrap();
    assert_eq!(item.quantity, Decimal::ZERO);
    assert_eq!(item.rate, Decimal::ZERO);
    assert_eq!(compute_item_amount(&item).unwrap(), Decimal::ZERO);
}

#[test]
fn booleans_are_not_numbers() {
    let json = r#"{"description": "Odd", "quantity": true, "rate": 10}"#;
    let raw: LineItemInput = serde_json::from_str(json).unwrap();
    assert_eq!(raw.quantity, Some(Numeric::Flag(true)));

    let item = raw.resolve(0, NumericMode::Lenient).unwrap();
    assert_eq!(item.quantity, Decimal::ZERO);
    assert!(raw.resolve(0, NumericMode::Strict).is_err());
}

#[test]
fn tax_rate_clamped_in_lenient_mode() {
    let mut raw = input("1", "100");
    raw.tax_rate = Some("150".into());
    let high = raw.resolve(0, NumericMode::Lenient).unwrap();
    assert_eq!(high.tax_rate, Some(dec!(100)));

    raw.tax_rate = Some("-18".into());
    let low = raw.resolve(0, NumericMode::Lenient).unwrap();
    assert_eq!(low.tax_rate, Some(Decimal::ZERO));
}

#[test]
fn out_of_range_rate_on_typed_item_is_clamped() {
    let item = LineItemBuilder::new("Item", dec!(1), dec!(100))
        .tax_rate(dec!(250))
        .build();
    assert_eq!(compute_item_tax(&item, &TaxPolicy::PerItem).unwrap(), dec!(100));

    let totals = compute_invoice_totals(
        &[line(dec!(1), dec!(100))],
        &TaxPolicy::invoice_level(dec!(-5)),
    )
    .unwrap();
    assert_eq!(totals.tax_amount, Decimal::ZERO);
}

#[test]
fn lenient_builder_stores_the_rate_it_charged() {
    let invoice = InvoiceBuilder::new("Acme")
        .add_item(LineItemBuilder::new("Work", dec!(1), dec!(100)).build())
        .tax_policy(TaxPolicy::invoice_level(dec!(250)))
        .build("1", Utc::now())
        .unwrap();
    assert_eq!(invoice.total_gst, dec!(100));
    assert_eq!(invoice.tax_rate, Some(dec!(100)));
    assert_eq!(invoice.tax_policy(), TaxPolicy::invoice_level(dec!(100)));
    assert!(validate_arithmetic(&invoice).is_empty());

    let invoice = InvoiceBuilder::new("Acme")
        .add_item(LineItemBuilder::new("Work", dec!(1), dec!(100)).build())
        .tax_policy(TaxPolicy::invoice_level(dec!(-5)))
        .build("2", Utc::now())
        .unwrap();
    assert_eq!(invoice.tax_rate, Some(Decimal::ZERO));
}

#[test]
fn whitespace_and_currency_symbol() {
    let item = input("  2 ", " ₹ abc").resolve(0, NumericMode::Lenient).unwrap();
    assert_eq!(item.quantity, dec!(2));
    assert_eq!(item.rate, Decimal::ZERO);

    let item = input("2", "₹ 99.5").resolve(0, NumericMode::Strict).unwrap();
    assert_eq!(item.rate, dec!(99.5));
}

#[test]
fn blank_invoice_rate_selects_per_item() {
    let policy = resolve_tax_policy(Some(&"".into()), NumericMode::Lenient).unwrap();
    assert_eq!(policy, TaxPolicy::PerItem);

    let policy = resolve_tax_policy(Some(&"0".into()), NumericMode::Lenient).unwrap();
    assert_eq!(policy, TaxPolicy::invoice_level(Decimal::ZERO));

    let policy = resolve_tax_policy(Some(&"junk".into()), NumericMode::Lenient).unwrap();
    assert_eq!(policy, TaxPolicy::invoice_level(Decimal::ZERO));
    assert!(resolve_tax_policy(Some(&"junk".into()), NumericMode::Strict).is_err());
}

// ---------------------------------------------------------------------------
// Strict validation
// ---------------------------------------------------------------------------

#[test]
fn strict_stops_at_first_bad_item() {
    let inputs = vec![input("1", "10"), input("1", "x"), input("-1", "10")];
    match resolve_items(&inputs, NumericMode::Strict) {
        Err(InvoiceError::InvalidLineItem { index, field, .. }) => {
            assert_eq!(index, 1);
            assert_eq!(field, "rate");
        }
        other => panic!("expected InvalidLineItem, got {other:?}"),
    }
}

#[test]
fn strict_requires_description() {
    let items = vec![LineItemBuilder::new(" ", dec!(1), dec!(1)).build()];
    let err = try_price_items(&items, &TaxPolicy::PerItem).unwrap_err();
    assert!(matches!(
        err,
        InvoiceError::InvalidLineItem {
            field: "description",
            ..
        }
    ));
    // Lenient pricing does not care.
    assert_eq!(compute_invoice_totals(&items, &TaxPolicy::PerItem).unwrap().total, dec!(1));
}

#[test]
fn strict_negative_area_is_reported() {
    let items = vec![
        LineItemBuilder::new("Plot", dec!(1), dec!(10))
            .area(dec!(-2))
            .build(),
    ];
    let err = try_price_items(&items, &TaxPolicy::PerItem).unwrap_err();
    assert!(matches!(err, InvoiceError::InvalidLineItem { field: "area", .. }));

    // Lenient: negative area is not "greater than zero", quantity is used.
    assert_eq!(compute_item_amount(&items[0]).unwrap(), dec!(10));
}

// ---------------------------------------------------------------------------
// Extreme values
// ---------------------------------------------------------------------------

#[test]
fn huge_values_fail_leniently() {
    let items = vec![line(Decimal::MAX, dec!(1))];
    let err = compute_invoice_totals(&items, &TaxPolicy::invoice_level(dec!(18))).unwrap_err();
    assert!(matches!(err, InvoiceError::Arithmetic(_)));

    let items = vec![line(Decimal::MAX, dec!(10)), line(Decimal::MAX, dec!(10))];
    assert!(price_items(&items, &TaxPolicy::PerItem).is_err());

    // The builder refuses to produce a record whose total would not add up
    let err = InvoiceBuilder::new("Acme")
        .add_item(line(Decimal::MAX, dec!(1)))
        .tax_policy(TaxPolicy::invoice_level(dec!(18)))
        .build("1", Utc::now())
        .unwrap_err();
    assert!(matches!(err, InvoiceError::Arithmetic(_)));
}

#[test]
fn near_limit_amounts_are_taxed_exactly() {
    let big: Decimal = "5000000000000000000000000000".parse().unwrap();
    let mut item = line(big, dec!(1));
    item.tax_rate = Some(dec!(18));
    let items = vec![item];

    let lenient = compute_invoice_totals(&items, &TaxPolicy::PerItem).unwrap();
    let strict = try_compute_invoice_totals(&items, &TaxPolicy::PerItem).unwrap();
    let expected: Decimal = "900000000000000000000000000".parse().unwrap();
    assert_eq!(lenient.tax_amount, expected);
    assert_eq!(strict, lenient);
    assert_eq!(lenient.total, lenient.subtotal + lenient.tax_amount);
}

#[test]
fn huge_values_fail_strictly() {
    let items = vec![line(Decimal::MAX, dec!(10))];
    let err = try_price_items(&items, &TaxPolicy::PerItem).unwrap_err();
    assert!(matches!(err, InvoiceError::Arithmetic(_)));
}

#[test]
fn tiny_fractions_survive() {
    let items = vec![line(dec!(0.001), dec!(0.01))];
    let totals = compute_invoice_totals(&items, &TaxPolicy::invoice_level(dec!(18))).unwrap();
    assert_eq!(totals.subtotal, dec!(0.00001));
    assert_eq!(totals.tax_amount, dec!(0.0000018));
    assert_eq!(format_currency(totals.total), "₹0.00");
}

#[test]
fn many_line_items() {
    let items: Vec<_> = (1..=1000).map(|_| line(dec!(1), dec!(1.5))).collect();
    let totals = compute_invoice_totals(&items, &TaxPolicy::invoice_level(dec!(18))).unwrap();
    assert_eq!(totals.subtotal, dec!(1500));
    assert_eq!(totals.tax_amount, dec!(270));
}

#[test]
fn builder_item_limit() {
    let items = (0..10_001).map(|_| line(dec!(1), dec!(1)));
    let err = InvoiceBuilder::new("Acme")
        .items(items)
        .build("1", Utc::now())
        .unwrap_err();
    assert!(matches!(err, InvoiceError::Builder(_)));
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn due_date_before_creation_rejected() {
    let now = Utc::now();
    let err = InvoiceBuilder::new("Acme")
        .due_date(now - Duration::days(1))
        .build("1", now)
        .unwrap_err();
    assert!(err.to_string().contains("dueDate"));
}

#[test]
fn overdue_detection() {
    let now = Utc::now();
    let mut invoice = InvoiceBuilder::new("Acme")
        .due_in_days(10)
        .build("1", now)
        .unwrap();

    assert!(!invoice.is_overdue(now + Duration::days(11)));
    invoice.status = InvoiceStatus::Sent;
    assert!(!invoice.is_overdue(now + Duration::days(9)));
    assert!(invoice.is_overdue(now + Duration::days(11)));
    invoice.status = InvoiceStatus::Paid;
    assert!(!invoice.is_overdue(now + Duration::days(11)));
    invoice.status = InvoiceStatus::Overdue;
    assert!(invoice.is_overdue(now));
}

#[test]
fn status_names() {
    for status in [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ] {
        assert_eq!(InvoiceStatus::from_name(status.as_str()), Some(status));
    }
    assert_eq!(InvoiceStatus::from_name("cancelled"), None);
}

#[test]
fn tax_policy_json() {
    let level: TaxPolicy = serde_json::from_str(r#"{"mode":"invoiceLevel","rate":18}"#).unwrap();
    assert_eq!(level, TaxPolicy::invoice_level(dec!(18)));
    let per_item: TaxPolicy = serde_json::from_str(r#"{"mode":"perItem"}"#).unwrap();
    assert_eq!(per_item, TaxPolicy::PerItem);
}
