//! # Cart Ledger
//!
//! The transaction-scoped aggregate: owns the list of line items and the
//! running subtotal, and hosts the recompute cascade every mutation runs
//! through.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Cart State Operations                           │
//! │                                                                     │
//! │  UI Action                 Operation                Ledger Change   │
//! │  ─────────                 ─────────                ─────────────   │
//! │  Scan product ───────────► add_item() ────────────► merge or push   │
//! │  Change quantity ────────► update_item_quantity() ► qty or remove   │
//! │  Reprice line ───────────► update_item_price() ───► price + drop    │
//! │                                                      the override   │
//! │  Remove line ────────────► remove_item() ─────────► delete          │
//! │  Void lines ─────────────► clear_cart() ──────────► items.clear()   │
//! │                                                                     │
//! │  Every mutation ends in the same cascade: restore lines to their    │
//! │  undiscounted prices, recompute the subtotal, then re-apply a       │
//! │  surviving custom total (discount module) against it.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is a plain owned value: the call site (one cashier session per
//! terminal) holds it and passes `&mut` in. No global, no lock - the
//! surrounding application serializes POS sessions per terminal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::session::EditContext;
use crate::types::{CatalogProduct, CustomerRef, PaymentEntry, Uom};

// =============================================================================
// Item Draft
// =============================================================================

/// A priced candidate for [`Cart::add_item`].
///
/// Quantity and pricing are taken at face value: the catalog was queried to
/// completion before this was built, and the engine never re-fetches.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub product_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub quantity: Decimal,
    pub uom: Uom,
    #[ts(as = "String")]
    pub cost_price: Money,
    /// Catalog list price for the sold unit.
    #[ts(as = "String")]
    pub original_price: Money,
    /// Price to charge per sold unit (VIP pricing may undercut the list).
    #[ts(as = "String")]
    pub unit_price: Money,
    /// Stock in sold units (informational).
    #[ts(as = "String")]
    pub available_stock: Decimal,
}

impl ItemDraft {
    /// Prices a catalog product for a chosen sellable unit.
    ///
    /// The sold unit's price is the base-unit price scaled by the conversion
    /// factor; VIP customers get the catalog's VIP price as the charged
    /// price where one exists, with the list price kept as `original_price`.
    /// Cost stays per base unit (informational, never totalled).
    pub fn from_catalog(
        product: &CatalogProduct,
        uom_id: &str,
        quantity: Decimal,
        vip: bool,
    ) -> CoreResult<Self> {
        let uom = product
            .find_uom(uom_id)
            .ok_or_else(|| CoreError::UnknownConversion {
                product_id: product.id.clone(),
                uom_id: uom_id.to_string(),
            })?;

        let list = (product.base_price * uom.factor).round();
        let charged = match product.vip_price {
            Some(vip_price) if vip => (vip_price * uom.factor).round(),
            _ => list,
        };

        Ok(ItemDraft {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
            uom: uom.clone(),
            cost_price: product.cost_price,
            original_price: list,
            unit_price: charged,
            available_stock: product.available_stock / uom.factor,
        })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Cart-local id: stable for the lifetime of the cart, never persisted.
    #[ts(as = "String")]
    pub id: Uuid,

    pub product_id: String,
    pub name: String,

    #[ts(as = "String")]
    pub quantity: Decimal,
    pub uom: Uom,

    /// Base-unit acquisition cost (informational, not used in totals).
    #[ts(as = "String")]
    pub cost_price: Money,

    /// Undiscounted catalog price for the sold unit.
    #[ts(as = "String")]
    pub original_price: Money,

    /// Effective current unit price, after discount allocation or a manual
    /// edit.
    #[ts(as = "String")]
    pub unit_price: Money,

    /// Allocation basis: the unit price before any proportional discount.
    /// Set on add, overwritten by manual edits and edit-session loads,
    /// never touched by the allocator.
    #[ts(as = "String")]
    pub list_price: Money,

    /// This line's share of the active global discount (zero when no custom
    /// total is active). The percent is the flat cart-level rate.
    #[ts(as = "String")]
    pub discount_percent: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Money,

    /// `round(quantity × unit_price)`.
    #[ts(as = "String")]
    pub total_price: Money,

    /// Stock upper bound in sold units (informational, not enforced here).
    #[ts(as = "String")]
    pub available_stock: Decimal,

    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    fn from_draft(draft: ItemDraft) -> Self {
        let mut item = LineItem {
            id: Uuid::new_v4(),
            product_id: draft.product_id,
            name: draft.name,
            quantity: draft.quantity,
            uom: draft.uom,
            cost_price: draft.cost_price,
            original_price: draft.original_price,
            unit_price: draft.unit_price,
            list_price: draft.unit_price,
            discount_percent: Decimal::ZERO,
            discount_amount: Money::ZERO,
            total_price: Money::ZERO,
            available_stock: draft.available_stock,
            added_at: Utc::now(),
        };
        item.restore_list_price();
        item
    }

    /// The line's undiscounted total: `round(quantity × list_price)`.
    ///
    /// This is what the subtotal sums and what allocation shares are
    /// measured against, regardless of any discount currently written into
    /// `unit_price`/`total_price`.
    pub fn base_total(&self) -> Money {
        (self.list_price * self.quantity).round()
    }

    /// Puts the line back into its undiscounted state.
    pub(crate) fn restore_list_price(&mut self) {
        self.unit_price = self.list_price;
        self.discount_percent = Decimal::ZERO;
        self.discount_amount = Money::ZERO;
        self.total_price = self.base_total();
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The working set of line items, payments and override state for one
/// not-yet-committed sale.
///
/// ## Invariants
/// - `total_price == round(quantity × unit_price)` on every line, always
/// - `subtotal()` is the sum of undiscounted line totals, recomputed on
///   read, never cached stale; with no override active it equals the sum of
///   the lines' `total_price`
/// - change and debt are never both positive
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Insertion order = display order.
    pub items: Vec<LineItem>,
    pub customer: Option<CustomerRef>,
    /// Target stock location for the eventual commit.
    pub warehouse_id: String,
    /// Cashier-entered override; `None` means no discount is active.
    #[ts(as = "Option<String>")]
    pub custom_total: Option<Money>,
    pub payments: Vec<PaymentEntry>,
    /// Present when this cart corrects a previously committed sale.
    pub edit_context: Option<EditContext>,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart for the terminal's stock location.
    pub fn new(warehouse_id: impl Into<String>) -> Self {
        Cart {
            items: Vec::new(),
            customer: None,
            warehouse_id: warehouse_id.into(),
            custom_total: None,
            payments: Vec::new(),
            edit_context: None,
            opened_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Ledger mutations
    // -------------------------------------------------------------------------

    /// Adds a candidate to the cart.
    ///
    /// A line with the same product **and** the same unit of measure is
    /// merged: its quantity grows and its totals are recomputed from the
    /// *existing* unit price - the candidate's price is discarded
    /// (first-price-wins). A different unit of the same product stays its
    /// own line. Otherwise the candidate is appended as a fresh line.
    pub fn add_item(&mut self, draft: ItemDraft) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == draft.product_id && i.uom.id == draft.uom.id)
        {
            item.quantity += draft.quantity;
            debug!(
                product_id = %item.product_id,
                uom = %item.uom.code,
                quantity = %item.quantity,
                "merged line"
            );
        } else {
            let item = LineItem::from_draft(draft);
            debug!(
                product_id = %item.product_id,
                uom = %item.uom.code,
                quantity = %item.quantity,
                unit_price = %item.unit_price,
                "added line"
            );
            self.items.push(item);
        }
        self.recalculate();
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line instead.
    /// Unknown ids are ignored.
    pub fn update_item_quantity(&mut self, id: Uuid, quantity: Decimal) {
        if quantity <= Decimal::ZERO {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
            debug!(line = %id, quantity = %quantity, "updated quantity");
            self.recalculate();
        }
    }

    /// Sets a line's unit price directly.
    ///
    /// Manual per-line pricing and the global proportional discount are
    /// mutually exclusive policies, and the more specific action wins: any
    /// active custom total is dropped and every line's discount fields are
    /// cleared. Unknown ids are ignored.
    pub fn update_item_price(&mut self, id: Uuid, price: Money) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.unit_price = price;
            item.list_price = price;
            debug!(line = %id, unit_price = %price, "repriced line, dropping override");
            self.custom_total = None;
            self.recalculate();
        }
    }

    /// Deletes a line.
    ///
    /// An active custom total survives only while it still undercuts the new
    /// subtotal; otherwise it is dropped so a now-nonsensical override does
    /// not persist silently.
    pub fn remove_item(&mut self, id: Uuid) {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        if self.items.len() < before {
            debug!(line = %id, "removed line");
            self.recalculate();
        }
    }

    /// Empties the item ledger and drops the override.
    ///
    /// Customer, warehouse, payments and edit context are untouched.
    /// Idempotent.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.custom_total = None;
        debug!("cleared cart");
    }

    // -------------------------------------------------------------------------
    // Derived figures
    // -------------------------------------------------------------------------

    /// Sum of the lines' undiscounted totals.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .map(LineItem::base_total)
            .sum::<Money>()
            .round()
    }

    /// The active lump discount: `subtotal − custom_total`, zero when no
    /// override undercuts the subtotal.
    pub fn discount_amount(&self) -> Money {
        match self.custom_total {
            Some(total) if total < self.subtotal() => self.subtotal() - total,
            _ => Money::ZERO,
        }
    }

    /// The flat discount rate: `discount / subtotal × 100`, unrounded.
    pub fn discount_percent(&self) -> Decimal {
        let subtotal = self.subtotal();
        let discount = self.discount_amount();
        if discount.is_zero() || subtotal.is_zero() {
            Decimal::ZERO
        } else {
            discount.ratio_of(subtotal) * Decimal::ONE_HUNDRED
        }
    }

    /// The amount actually owed: the custom total when one is active and
    /// below the subtotal, the subtotal otherwise.
    pub fn final_total(&self) -> Money {
        match self.custom_total {
            Some(total) if total < self.subtotal() => total,
            _ => self.subtotal(),
        }
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the item ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // -------------------------------------------------------------------------
    // Recompute cascade
    // -------------------------------------------------------------------------

    /// Re-derives the whole pricing state after a ledger mutation.
    ///
    /// Lines are first restored to their undiscounted prices, then a
    /// surviving override is re-allocated against the fresh subtotal.
    /// Starting from the restored state is what keeps re-allocation
    /// idempotent: shares are always measured against pre-discount totals,
    /// so repeated cascades never compound the discount.
    pub(crate) fn recalculate(&mut self) {
        for item in &mut self.items {
            item.restore_list_price();
        }

        let subtotal = self.subtotal();
        match self.custom_total {
            Some(total) if total >= subtotal => {
                debug!(custom_total = %total, subtotal = %subtotal, "override no longer fits, dropped");
                self.custom_total = None;
            }
            // a zero subtotal has no shares to measure against
            Some(total) if !subtotal.is_zero() => self.allocate(total, subtotal),
            _ => {}
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
