//! Basket construction with per-unit tax and promotion proration.
//!
//! Each purchasable line item becomes one [`BasketItem`]. Tax and promotion
//! adjustments recorded against the whole line are spread evenly over its
//! units:
//!
//! ```text
//! gross_unit = unit_price + promotion_total / quantity
//! tax_unit   = tax_total / quantity
//! net_unit   = gross_unit - tax_unit
//! ```
//!
//! Promotion totals are summed as recorded, whatever their sign.

use std::sync::LazyLock;

use payform_core::ProductId;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BasketError, Result};

/// Maximum number of raw SKU characters kept before sanitizing.
pub const SKU_MAX_CHARS: usize = 12;

/// Runs of characters the provider does not accept in a SKU.
static SKU_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("Invalid regex"));

/// Kind of price adjustment recorded on a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    Tax,
    Promotion,
    /// Shipping, fees and anything else; ignored by proration.
    #[serde(other)]
    Other,
}

/// A price adjustment on a line item, covering all of its units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    #[serde(rename = "type")]
    pub kind: AdjustmentType,
    pub amount: Decimal,
}

impl Adjustment {
    #[must_use]
    pub const fn new(kind: AdjustmentType, amount: Decimal) -> Self {
        Self { kind, amount }
    }
}

/// The catalog entry a line item refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasedProduct {
    pub product_id: ProductId,
    pub sku: String,
}

/// An order line item as exported by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    /// `None` when the referenced product no longer exists.
    #[serde(default)]
    pub purchased_product: Option<PurchasedProduct>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
}

impl LineItem {
    /// Sum of all adjustments of `kind`, zero when there are none.
    ///
    /// Returns `None` on decimal overflow.
    #[must_use]
    pub fn adjustment_total(&self, kind: AdjustmentType) -> Option<Decimal> {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.kind == kind)
            .try_fold(Decimal::ZERO, |total, adjustment| {
                total.checked_add(adjustment.amount)
            })
    }
}

/// One line of the basket sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub description: String,
    pub product_code: ProductId,
    pub sku: String,
    pub quantity: Decimal,
    pub unit_net_amount: Decimal,
    pub unit_tax_amount: Decimal,
}

impl BasketItem {
    /// Net plus tax for one unit.
    ///
    /// Returns `None` on decimal overflow.
    #[must_use]
    pub fn unit_gross(&self) -> Option<Decimal> {
        self.unit_net_amount.checked_add(self.unit_tax_amount)
    }

    /// Gross amount for all units on the line.
    ///
    /// Returns `None` on decimal overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_gross()?.checked_mul(self.quantity)
    }
}

/// Ordered basket lines; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Basket {
    items: Vec<BasketItem>,
}

impl Basket {
    #[must_use]
    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BasketItem> {
        self.items.iter()
    }

    /// Sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::Overflow`] naming the first line whose total
    /// does not fit.
    pub fn total(&self) -> Result<Decimal> {
        self.items
            .iter()
            .enumerate()
            .try_fold(Decimal::ZERO, |total, (line, item)| {
                item.line_total()
                    .and_then(|line_total| total.checked_add(line_total))
                    .ok_or(BasketError::Overflow { line })
            })
    }
}

impl<'a> IntoIterator for &'a Basket {
    type Item = &'a BasketItem;
    type IntoIter = std::slice::Iter<'a, BasketItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for Basket {
    type Item = BasketItem;
    type IntoIter = std::vec::IntoIter<BasketItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Build the basket for an order's line items.
///
/// Line items without a purchasable product are skipped. When none is left
/// the result is `Ok(None)`: the order has no basket, which callers must
/// treat differently from a basket with lines.
///
/// # Errors
///
/// Returns [`BasketError::NonPositiveQuantity`] for a purchasable line with
/// quantity zero or below, and [`BasketError::Overflow`] if proration leaves
/// the decimal range. Either error aborts the whole basket.
pub fn build_basket(items: &[LineItem]) -> Result<Option<Basket>> {
    let mut lines = Vec::with_capacity(items.len());

    for (line, item) in items.iter().enumerate() {
        let Some(product) = &item.purchased_product else {
            debug!(line, label = %item.label, "Skipping line item without a purchasable product");
            continue;
        };
        lines.push(prorate(line, item, product)?);
    }

    if lines.is_empty() {
        return Ok(None);
    }

    debug!(lines = lines.len(), "Built basket");
    Ok(Some(Basket { items: lines }))
}

fn prorate(line: usize, item: &LineItem, product: &PurchasedProduct) -> Result<BasketItem> {
    let quantity = item.quantity;
    if quantity <= Decimal::ZERO {
        return Err(BasketError::NonPositiveQuantity { line, quantity });
    }

    let overflow = || BasketError::Overflow { line };

    let tax_total = item
        .adjustment_total(AdjustmentType::Tax)
        .ok_or_else(overflow)?;
    let promotion_total = item
        .adjustment_total(AdjustmentType::Promotion)
        .ok_or_else(overflow)?;

    let gross_unit = promotion_total
        .checked_div(quantity)
        .and_then(|share| item.unit_price.checked_add(share))
        .ok_or_else(overflow)?;
    let tax_unit = tax_total.checked_div(quantity).ok_or_else(overflow)?;
    let net_unit = gross_unit.checked_sub(tax_unit).ok_or_else(overflow)?;

    Ok(BasketItem {
        description: item.label.clone(),
        product_code: product.product_id.clone(),
        sku: sanitize_sku(&product.sku),
        quantity,
        unit_net_amount: net_unit,
        unit_tax_amount: tax_unit,
    })
}

/// Reduce a raw SKU to what the provider accepts.
///
/// Keeps at most the first [`SKU_MAX_CHARS`] characters, then replaces every
/// run of non-alphanumeric characters in what is left with a single `-`.
/// Truncation happens first, so a run cut by the limit only collapses the
/// part that was kept.
///
/// ```
/// use payform_gateway::sanitize_sku;
///
/// assert_eq!(sanitize_sku("TS-RED//L"), "TS-RED-L");
/// assert_eq!(sanitize_sku("AB--12_34@@@56789"), "AB-12-34-");
/// ```
#[must_use]
pub fn sanitize_sku(raw: &str) -> String {
    let truncated: String = raw.chars().take(SKU_MAX_CHARS).collect();
    SKU_SEPARATOR_RE.replace_all(&truncated, "-").into_owned()
}
