//! Property-based tests for the pricing engine.
//!
//! Run with: `cargo test --test proptest_tests`

use gst_invoicing::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000, 0u32..=3).prop_map(|(n, scale)| Decimal::new(n, scale))
}

fn arb_percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|n| Decimal::new(n, 2))
}

fn arb_line() -> impl Strategy<Value = LineItem> {
    (
        arb_amount(),
        proptest::option::of(arb_amount()),
        arb_amount(),
        proptest::option::of(arb_percentage()),
    )
        .prop_map(|(quantity, area, rate, tax_rate)| LineItem {
            description: "Item".into(),
            quantity,
            area,
            rate,
            tax_rate,
        })
}

fn arb_lines() -> impl Strategy<Value = Vec<LineItem>> {
    proptest::collection::vec(arb_line(), 0..20)
}

fn arb_policy() -> impl Strategy<Value = TaxPolicy> {
    prop_oneof![
        Just(TaxPolicy::PerItem),
        arb_percentage().prop_map(TaxPolicy::invoice_level),
    ]
}

proptest! {
    /// Without an area, the amount is exactly quantity * rate.
    #[test]
    fn amount_is_quantity_times_rate(quantity in arb_amount(), rate in arb_amount()) {
        let item = LineItemBuilder::new("Item", quantity, rate).build();
        prop_assert_eq!(compute_item_amount(&item).unwrap(), quantity * rate);
    }

    /// A positive area takes precedence over any quantity.
    #[test]
    fn positive_area_wins(
        quantity in any::<i32>(),
        area in arb_amount().prop_filter("area > 0", |a| *a > Decimal::ZERO),
        rate in arb_amount(),
    ) {
        let item = LineItemBuilder::new("Item", Decimal::from(quantity), rate)
            .area(area)
            .build();
        prop_assert_eq!(compute_item_amount(&item).unwrap(), area * rate);
    }

    /// total == subtotal + tax, exactly, for every valid input.
    #[test]
    fn total_is_subtotal_plus_tax(lines in arb_lines(), policy in arb_policy()) {
        let totals = compute_invoice_totals(&lines, &policy).unwrap();
        prop_assert_eq!(totals.total, totals.subtotal + totals.tax_amount);
        prop_assert!(totals.subtotal >= Decimal::ZERO);
        prop_assert!(totals.tax_amount >= Decimal::ZERO);
    }

    /// The subtotal is the sum of the per-item amounts.
    #[test]
    fn subtotal_is_sum_of_amounts(lines in arb_lines(), policy in arb_policy()) {
        let pricing = price_items(&lines, &policy).unwrap();
        let sum: Decimal = pricing.items.iter().map(|p| p.amount).sum();
        prop_assert_eq!(pricing.totals.subtotal, sum);
    }

    /// Per-item tax is the sum of item taxes; invoice-level tax is one
    /// percentage of the subtotal.
    #[test]
    fn tax_follows_policy(lines in arb_lines(), policy in arb_policy()) {
        let pricing = price_items(&lines, &policy).unwrap();
        match policy {
            TaxPolicy::PerItem => {
                let sum: Decimal = lines
                    .iter()
                    .map(|l| compute_item_tax(l, &policy).unwrap())
                    .sum();
                prop_assert_eq!(pricing.totals.tax_amount, sum);
            }
            TaxPolicy::InvoiceLevel { rate } => {
                prop_assert!(pricing.items.iter().all(|p| p.gst_amount.is_zero()));
                prop_assert_eq!(
                    pricing.totals.tax_amount,
                    pricing.totals.subtotal * (rate / Decimal::ONE_HUNDRED)
                );
            }
        }
    }

    /// Pricing is a pure function of its input.
    #[test]
    fn pricing_is_idempotent(lines in arb_lines(), policy in arb_policy()) {
        let first = price_items(&lines, &policy).unwrap();
        prop_assert_eq!(first, price_items(&lines, &policy).unwrap());
    }

    /// On valid input the strict path agrees with the lenient one.
    #[test]
    fn strict_agrees_on_valid_input(lines in arb_lines(), policy in arb_policy()) {
        let strict = try_price_items(&lines, &policy).unwrap();
        prop_assert_eq!(strict, price_items(&lines, &policy).unwrap());
    }

    /// Frozen invoices always pass their own arithmetic check.
    #[test]
    fn built_invoices_are_consistent(lines in arb_lines(), policy in arb_policy()) {
        let invoice = InvoiceBuilder::new("Acme")
            .items(lines)
            .tax_policy(policy)
            .numeric_mode(NumericMode::Strict)
            .build("1", chrono::Utc::now())
            .unwrap();
        let errors = validate_arithmetic(&invoice);
        prop_assert!(errors.is_empty(), "arithmetic errors: {:?}", errors);
    }

    /// Lenient resolution never fails, whatever the strings contain.
    #[test]
    fn lenient_resolution_is_total(
        quantity in ".*",
        rate in ".*",
        tax in ".*",
    ) {
        let input = LineItemInput {
            description: "Item".into(),
            quantity: Some(quantity.as_str().into()),
            area: None,
            rate: Some(rate.as_str().into()),
            tax_rate: Some(tax.as_str().into()),
        };
        let item = input.resolve(0, NumericMode::Lenient).unwrap();
        prop_assert!(item.quantity >= Decimal::ZERO);
        prop_assert!(item.rate >= Decimal::ZERO);
        let tax = item.tax_rate.unwrap_or_default();
        prop_assert!(tax >= Decimal::ZERO && tax <= Decimal::ONE_HUNDRED);
    }
}
