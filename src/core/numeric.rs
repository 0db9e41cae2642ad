//! Coercion of untyped form/JSON numbers into line items.
//!
//! Input arrives as numbers, numeric strings (sometimes still carrying the
//! currency symbol) or garbage. [`NumericMode`] decides whether garbage is
//! silently zeroed or rejected.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::InvoiceError;
use super::format::CURRENCY_SYMBOL;
use super::types::{LineItem, TaxPolicy};

/// How non-numeric or out-of-range input is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericMode {
    /// Missing, non-numeric or negative values become zero; tax rates are
    /// clamped to 0..=100.
    #[default]
    Lenient,
    /// The first offending field fails the whole computation.
    Strict,
}

/// A raw numeric value as submitted by a client.
///
/// Deserializing never fails on the value's shape: anything that is not a
/// number, string or boolean lands in [`Numeric::Invalid`], and it is up to
/// [`NumericMode`] whether that is zeroed or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(Decimal),
    Text(String),
    Flag(bool),
    /// An array, an object or a number outside the `Decimal` range.
    Invalid,
}

impl Numeric {
    /// The decimal value, if the input is numeric at all.
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Number(d) => Some(*d),
            Self::Text(s) => parse_decimal(s),
            Self::Flag(_) | Self::Invalid => None,
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumericVisitor)
    }
}

struct NumericVisitor;

impl<'de> Visitor<'de> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, a numeric string or a boolean")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Numeric, E> {
        Ok(Numeric::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Numeric, E> {
        Ok(Numeric::Number(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Numeric, E> {
        Ok(Numeric::Number(Decimal::from(v)))
    }

    // Via the shortest decimal text, so 0.1 stays 0.1 instead of the
    // nearest binary fraction.
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Numeric, E> {
        Ok(Decimal::from_str(&v.to_string()).map_or(Numeric::Invalid, Numeric::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Numeric, E> {
        Ok(Numeric::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Numeric, E> {
        Ok(Numeric::Text(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Invalid)
    }

    fn visit_none<E: de::Error>(self) -> Result<Numeric, E> {
        Ok(Numeric::Invalid)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Numeric, D::Error> {
        Numeric::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Numeric, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Numeric::Invalid)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Numeric, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Numeric::Invalid)
    }
}

impl From<Decimal> for Numeric {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Numeric {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Parse a trimmed decimal, accepting an optional `₹` prefix and
/// scientific notation.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let s = input.trim();
    let s = s.strip_prefix(CURRENCY_SYMBOL).unwrap_or(s).trim_start();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// An untyped line item as received from a form or JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: Option<Numeric>,
    #[serde(default)]
    pub area: Option<Numeric>,
    #[serde(default)]
    pub rate: Option<Numeric>,
    #[serde(default, alias = "gstRate", alias = "gst")]
    pub tax_rate: Option<Numeric>,
}

impl From<&LineItem> for LineItemInput {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: Some(Numeric::Number(item.quantity)),
            area: item.area.map(Numeric::Number),
            rate: Some(Numeric::Number(item.rate)),
            tax_rate: item.tax_rate.map(Numeric::Number),
        }
    }
}

impl LineItemInput {
    /// Resolve into a typed [`LineItem`]. `index` is reported in errors.
    pub fn resolve(&self, index: usize, mode: NumericMode) -> Result<LineItem, InvoiceError> {
        let area = match &self.area {
            None => None,
            Some(raw) => Some(non_negative(raw, index, "area", mode)?),
        };
        let billed_by_area = area.is_some_and(|a| a > Decimal::ZERO);

        let quantity = match &self.quantity {
            Some(raw) => non_negative(raw, index, "quantity", mode)?,
            None if mode == NumericMode::Strict && !billed_by_area => {
                return Err(InvoiceError::line(index, "quantity", "is required"));
            }
            None => Decimal::ZERO,
        };

        let rate = match &self.rate {
            Some(raw) => non_negative(raw, index, "rate", mode)?,
            None if mode == NumericMode::Strict => {
                return Err(InvoiceError::line(index, "rate", "is required"));
            }
            None => Decimal::ZERO,
        };

        let tax_rate = match &self.tax_rate {
            None => None,
            Some(raw) => Some(percentage(raw, index, mode)?),
        };

        let description = self.description.trim();
        if mode == NumericMode::Strict && description.is_empty() {
            return Err(InvoiceError::line(index, "description", "must not be empty"));
        }

        Ok(LineItem {
            description: description.to_string(),
            quantity,
            area,
            rate,
            tax_rate,
        })
    }
}

/// Resolve every input, stopping at the first strict-mode failure.
pub fn resolve_items(
    inputs: &[LineItemInput],
    mode: NumericMode,
) -> Result<Vec<LineItem>, InvoiceError> {
    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| input.resolve(i, mode))
        .collect()
}

fn non_negative(
    raw: &Numeric,
    index: usize,
    field: &'static str,
    mode: NumericMode,
) -> Result<Decimal, InvoiceError> {
    match (raw.value(), mode) {
        (Some(v), _) if v >= Decimal::ZERO => Ok(v),
        (Some(v), NumericMode::Strict) => Err(InvoiceError::line(
            index,
            field,
            format!("must not be negative (got {v})"),
        )),
        (None, NumericMode::Strict) => Err(InvoiceError::line(index, field, "is not a number")),
        (_, NumericMode::Lenient) => Ok(Decimal::ZERO),
    }
}

fn percentage(raw: &Numeric, index: usize, mode: NumericMode) -> Result<Decimal, InvoiceError> {
    match (raw.value(), mode) {
        (Some(v), NumericMode::Strict) if !(Decimal::ZERO..=dec!(100)).contains(&v) => Err(
            InvoiceError::line(index, "taxRate", format!("must be between 0 and 100 (got {v})")),
        ),
        (Some(v), _) => Ok(clamp_percentage(v)),
        (None, NumericMode::Strict) => {
            Err(InvoiceError::line(index, "taxRate", "is not a number"))
        }
        (None, NumericMode::Lenient) => Ok(Decimal::ZERO),
    }
}

/// Clamp a percentage into 0..=100.
pub fn clamp_percentage(rate: Decimal) -> Decimal {
    rate.clamp(Decimal::ZERO, dec!(100))
}

/// Resolve an invoice-level tax rate under the given mode.
pub fn resolve_tax_rate(raw: &Numeric, mode: NumericMode) -> Result<Decimal, InvoiceError> {
    match (raw.value(), mode) {
        (Some(v), NumericMode::Strict) if !(Decimal::ZERO..=dec!(100)).contains(&v) => Err(
            InvoiceError::InvalidTaxRate(format!("{v} is outside 0..=100")),
        ),
        (Some(v), _) => Ok(clamp_percentage(v)),
        (None, NumericMode::Strict) => Err(InvoiceError::InvalidTaxRate(format!(
            "{raw:?} is not a number"
        ))),
        (None, NumericMode::Lenient) => Ok(Decimal::ZERO),
    }
}

/// Tax policy implied by an optional invoice-level rate: a non-blank rate
/// selects invoice-level mode, anything else per-item GST.
pub fn resolve_tax_policy(
    raw: Option<&Numeric>,
    mode: NumericMode,
) -> Result<TaxPolicy, InvoiceError> {
    match raw {
        None => Ok(TaxPolicy::PerItem),
        Some(Numeric::Text(s)) if s.trim().is_empty() => Ok(TaxPolicy::PerItem),
        Some(raw) => resolve_tax_rate(raw, mode).map(TaxPolicy::invoice_level),
    }
}
