//! Display formatting of amounts.
//!
//! Only presentation code calls into this module; the pricing engine never
//! rounds.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::types::InvoiceTotals;

/// Currency symbol used by [`format_currency`].
pub const CURRENCY_SYMBOL: &str = "₹";

/// Fixed-symbol currency formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    symbol: String,
    decimals: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: CURRENCY_SYMBOL.to_string(),
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Render `amount` as `{symbol}{value}` with a fixed number of decimals.
    /// Negative amounts put the sign before the symbol.
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = round_display(amount, self.decimals);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}{:.prec$}",
            self.symbol,
            rounded.abs(),
            prec = self.decimals as usize
        )
    }

    pub fn totals(&self, totals: &InvoiceTotals) -> FormattedTotals {
        FormattedTotals {
            subtotal: self.format(totals.subtotal),
            tax_amount: self.format(totals.tax_amount),
            total: self.format(totals.total),
        }
    }
}

/// Totals rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax_amount: String,
    pub total: String,
}

impl InvoiceTotals {
    /// Format with the default `₹` / two-decimal format.
    pub fn formatted(&self) -> FormattedTotals {
        CurrencyFormat::default().totals(self)
    }
}

/// Format an amount with the default `₹` symbol and two decimals.
pub fn format_currency(amount: Decimal) -> String {
    CurrencyFormat::default().format(amount)
}

/// Format a percentage without trailing zeros, e.g. `18%`, `12.5%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

/// Round half away from zero, the way amounts are shown on paper.
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn two_decimals_with_symbol() {
        assert_eq!(format_currency(dec!(250)), "₹250.00");
        assert_eq!(format_currency(dec!(45.5)), "₹45.50");
        assert_eq!(format_currency(dec!(0)), "₹0.00");
        assert_eq!(format_currency(dec!(1833.481)), "₹1833.48");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(0.005)), "₹0.01");
        assert_eq!(format_currency(dec!(2.675)), "₹2.68");
        assert_eq!(format_currency(dec!(-2.675)), "-₹2.68");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_currency(dec!(-0.001)), "₹0.00");
    }

    #[test]
    fn custom_symbol_and_precision() {
        let fmt = CurrencyFormat::new("Rs. ").with_decimals(0);
        assert_eq!(fmt.format(dec!(99.5)), "Rs. 100");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(dec!(18.00)), "18%");
        assert_eq!(format_percent(dec!(12.50)), "12.5%");
    }
}
