//! Split of a GST amount into central, state and integrated components.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Place-of-supply relation between seller and buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SupplyKind {
    /// Same state: CGST + SGST, half each.
    IntraState,
    /// Different states: IGST only.
    InterState,
}

/// Determine the supply kind from two state codes.
///
/// Codes are compared after trimming; an empty buyer state (unregistered
/// buyer) counts as a local sale.
pub fn supply_kind(seller_state: &str, buyer_state: &str) -> SupplyKind {
    let buyer = buyer_state.trim();
    if buyer.is_empty() || buyer == seller_state.trim() {
        SupplyKind::IntraState
    } else {
        SupplyKind::InterState
    }
}

/// GST amount broken into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstSplit {
    #[serde(with = "rust_decimal::serde::float")]
    pub cgst: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub sgst: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub igst: Decimal,
}

impl GstSplit {
    pub fn total(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }
}

/// Split `tax` for the given supply kind. `cgst + sgst + igst == tax`
/// exactly.
pub fn split_tax(tax: Decimal, kind: SupplyKind) -> GstSplit {
    match kind {
        SupplyKind::IntraState => {
            let cgst = tax / dec!(2);
            GstSplit {
                cgst,
                sgst: tax - cgst,
                igst: Decimal::ZERO,
            }
        }
        SupplyKind::InterState => GstSplit {
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            igst: tax,
        },
    }
}
