//! # Edit Session Loader
//!
//! Rehydrates a cart from a previously committed sale so the cashier can
//! correct it, keeping the historical figures strictly separate from the
//! working ones, and builds the commit draft handed back to the
//! persistence collaborator.
//!
//! ## Edit Mode Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  SaleRecord ──► load_sale_for_edit ──► working cart                 │
//! │                     │                    │ items rebuilt from       │
//! │                     │                    │ scratch, payments empty  │
//! │                     ▼                    ▼                          │
//! │           edit_context keeps      cashier edits, tenders            │
//! │           source id/number +             │                          │
//! │           original subtotal              ▼                          │
//! │           (audit only)            to_draft ──► commit collaborator  │
//! │                                          │                          │
//! │                                   clear_edit_mode (after commit)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, LineItem};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentEntry, SaleRecord, SaleRecordItem};

// =============================================================================
// Edit Context
// =============================================================================

/// Marks the cart as a correction of a historical sale, not a fresh one.
///
/// The committing collaborator uses the source fields to distinguish "new
/// sale" from "correction"; `original_subtotal` is retained for
/// audit/reference and never used in live arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EditContext {
    pub source_id: String,
    pub source_number: String,
    #[ts(as = "String")]
    pub original_subtotal: Money,
}

// =============================================================================
// Sale Draft
// =============================================================================

/// The finalized figures handed to the committing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub warehouse_id: String,
    pub customer_id: Option<String>,
    pub items: Vec<DraftLine>,
    #[ts(as = "String")]
    pub subtotal: Money,
    #[ts(as = "String")]
    pub discount_amount: Money,
    #[ts(as = "String")]
    pub discount_percent: Decimal,
    #[ts(as = "String")]
    pub final_total: Money,
    pub payments: Vec<PaymentEntry>,
    #[ts(as = "String")]
    pub paid_amount: Money,
    #[ts(as = "String")]
    pub change_amount: Money,
    #[ts(as = "String")]
    pub debt_amount: Money,
    /// Present when this draft corrects an existing sale.
    pub source_sale_id: Option<String>,
}

/// One committed line. Snapshot of the cart line at draft time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    pub product_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub quantity: Decimal,
    pub uom_id: String,
    #[ts(as = "String")]
    pub cost_price: Money,
    #[ts(as = "String")]
    pub original_price: Money,
    #[ts(as = "String")]
    pub unit_price: Money,
    #[ts(as = "String")]
    pub discount_percent: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Money,
    #[ts(as = "String")]
    pub total_price: Money,
}

impl From<&LineItem> for DraftLine {
    fn from(item: &LineItem) -> Self {
        DraftLine {
            product_id: item.product_id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            uom_id: item.uom.id.clone(),
            cost_price: item.cost_price,
            original_price: item.original_price,
            unit_price: item.unit_price,
            discount_percent: item.discount_percent,
            discount_amount: item.discount_amount,
            total_price: item.total_price,
        }
    }
}

// =============================================================================
// Loader / Teardown Operations
// =============================================================================

impl Cart {
    /// Rebuilds the cart from a committed sale for correction.
    ///
    /// Line items are reconstructed from scratch: unit prices are taken
    /// as recorded on the sale (already reflecting whatever discount was
    /// applied originally) and line totals are recomputed, never trusted
    /// from the record. The live subtotal may therefore differ from the
    /// sale's stored subtotal; the stored one is kept in `edit_context`
    /// for audit only.
    ///
    /// A nonzero historical discount seeds the custom total with the
    /// sale's final total - without running the allocator, since the
    /// recorded prices already embed that discount. The first edit that
    /// touches the ledger re-triggers allocation against the freshly
    /// recomputed subtotal.
    ///
    /// Payments always start empty: editing a sale begins a new
    /// payment-collection pass regardless of how the original was paid.
    pub fn load_sale_for_edit(&mut self, record: SaleRecord) {
        info!(
            source = %record.sale_number,
            lines = record.items.len(),
            "loading sale for edit"
        );
        self.items = record.items.iter().map(rebuild_line).collect();
        self.customer = record.customer;
        self.warehouse_id = record.warehouse_id;
        self.payments.clear();
        self.custom_total = if record.discount_amount.is_zero() {
            None
        } else {
            Some(record.final_total)
        };
        self.edit_context = Some(EditContext {
            source_id: record.id,
            source_number: record.sale_number,
            original_subtotal: record.subtotal,
        });
    }

    /// Drops the edit context once the correction has been committed.
    /// Items and payments are untouched.
    pub fn clear_edit_mode(&mut self) {
        self.edit_context = None;
        debug!("cleared edit mode");
    }

    /// Full teardown when abandoning a transaction outright: items,
    /// payments, override, edit context and customer all go in one call.
    /// The warehouse (terminal configuration) stays. Idempotent.
    pub fn reset(&mut self) {
        self.items.clear();
        self.payments.clear();
        self.custom_total = None;
        self.edit_context = None;
        self.customer = None;
        self.opened_at = Utc::now();
        info!("reset POS session");
    }

    /// Snapshots the cart into the shape the committing collaborator
    /// persists. Does not mutate the cart.
    pub fn to_draft(&self) -> CoreResult<SaleDraft> {
        if self.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let draft = SaleDraft {
            warehouse_id: self.warehouse_id.clone(),
            customer_id: self.customer.as_ref().map(|c| c.id.clone()),
            items: self.items.iter().map(DraftLine::from).collect(),
            subtotal: self.subtotal(),
            discount_amount: self.discount_amount(),
            discount_percent: self.discount_percent(),
            final_total: self.final_total(),
            payments: self.payments.clone(),
            paid_amount: self.paid_amount(),
            change_amount: self.change_amount(),
            debt_amount: self.debt_amount(),
            source_sale_id: self.edit_context.as_ref().map(|c| c.source_id.clone()),
        };

        info!(
            lines = draft.items.len(),
            final_total = %draft.final_total,
            correction = draft.source_sale_id.is_some(),
            "built sale draft"
        );
        Ok(draft)
    }
}

/// Fresh working line from a recorded one: recorded price becomes both the
/// effective and the allocation-basis price, totals recomputed from scratch.
fn rebuild_line(item: &SaleRecordItem) -> LineItem {
    let mut line = LineItem {
        id: Uuid::new_v4(),
        product_id: item.product_id.clone(),
        name: item.name.clone(),
        quantity: item.quantity,
        uom: item.uom.clone(),
        cost_price: item.cost_price,
        original_price: item.original_price,
        unit_price: item.unit_price,
        list_price: item.unit_price,
        discount_percent: Decimal::ZERO,
        discount_amount: Money::ZERO,
        total_price: Money::ZERO,
        available_stock: item.available_stock,
        added_at: Utc::now(),
    };
    line.restore_list_price();
    line
}

// =============================================================================
// Unit Tests
// =============================================================================
