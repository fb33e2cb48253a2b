//! # Domain Types
//!
//! Shapes exchanged with the two external collaborators.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Collaborator Boundaries                          │
//! │                                                                     │
//! │  Catalog/Pricing source          Sale persistence source            │
//! │  ──────────────────────          ───────────────────────            │
//! │  CatalogProduct ──► ItemDraft    SaleRecord ──► load_sale_for_edit  │
//! │  (read-only, queried to          (edit mode in)                     │
//! │   completion before add)         SaleDraft ◄── to_draft             │
//! │                                  (commit out)                       │
//! │                                                                     │
//! │  The engine treats all of these as opaque inputs at the moment      │
//! │  they cross the boundary; it never re-fetches or revalidates.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Unit of Measure
// =============================================================================

/// A sellable unit of measure with its conversion to the product's base unit.
///
/// `factor` converts one sold unit into base units: a 12-pack of a product
/// stocked by the can has `factor = 12`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Uom {
    pub id: String,
    /// Display symbol ("pcs", "kg", "box12").
    pub code: String,
    /// Sold unit → base unit conversion factor.
    #[ts(as = "String")]
    pub factor: Decimal,
}

impl Uom {
    /// A 1:1 unit, for products sold directly in their base unit.
    pub fn base(id: impl Into<String>, code: impl Into<String>) -> Self {
        Uom {
            id: id.into(),
            code: code.into(),
            factor: Decimal::ONE,
        }
    }
}

// =============================================================================
// Tender
// =============================================================================

/// One way of paying: a sale can mix several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenderType {
    /// Physical cash.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Bank transfer.
    Transfer,
    /// Store credit / on-account ("pay later").
    Debt,
}

/// One tender instance against the current sale.
///
/// Entries are append-only within a session except for explicit removal by
/// index; there is no editing of a recorded amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentEntry {
    #[serde(rename = "type")]
    pub tender: TenderType,
    #[ts(as = "String")]
    pub amount: Money,
}

// =============================================================================
// Customer
// =============================================================================

/// Optional customer attached to the sale.
///
/// No pricing logic at this layer depends on its fields; `vip` only feeds
/// the catalog-side price pick when building an [`crate::ItemDraft`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vip: bool,
}

// =============================================================================
// Catalog Product
// =============================================================================

/// What the catalog/pricing collaborator supplies per product.
///
/// Prices are per base unit; `conversions` lists the additional sellable
/// units. The base unit itself is always addressable.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub base_uom: Uom,
    /// List price per base unit.
    #[ts(as = "String")]
    pub base_price: Money,
    /// Discounted price per base unit for VIP customers, if any.
    #[ts(as = "Option<String>")]
    pub vip_price: Option<Money>,
    /// Acquisition cost per base unit (informational).
    #[ts(as = "String")]
    pub cost_price: Money,
    /// On-hand stock in base units (informational upper bound).
    #[ts(as = "String")]
    pub available_stock: Decimal,
    #[serde(default)]
    pub conversions: Vec<Uom>,
}

impl CatalogProduct {
    /// Resolves a sellable unit by id, the base unit included.
    pub fn find_uom(&self, uom_id: &str) -> Option<&Uom> {
        if self.base_uom.id == uom_id {
            Some(&self.base_uom)
        } else {
            self.conversions.iter().find(|u| u.id == uom_id)
        }
    }
}

// =============================================================================
// Historical Sale Record
// =============================================================================

/// A previously committed sale, reconstructed by the persistence
/// collaborator for edit mode.
///
/// Monetary figures are the ones stored at commit time; each item also
/// carries the catalog's *current* list price so the edit session can track
/// catalog drift.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    pub id: String,
    pub sale_number: String,
    pub customer: Option<CustomerRef>,
    pub warehouse_id: String,
    pub items: Vec<SaleRecordItem>,
    /// Subtotal as stored on the sale.
    #[ts(as = "String")]
    pub subtotal: Money,
    /// Discount as stored on the sale; nonzero means a custom total was
    /// active when the sale was committed.
    #[ts(as = "String")]
    pub discount_amount: Money,
    /// Amount actually owed on the sale.
    #[ts(as = "String")]
    pub final_total: Money,
    /// What was collected originally. Informational: editing a sale always
    /// starts a fresh payment-collection pass.
    #[ts(as = "String")]
    pub paid_amount: Money,
}

/// One line of a [`SaleRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecordItem {
    pub product_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub quantity: Decimal,
    pub uom: Uom,
    /// Acquisition cost per base unit (informational).
    #[ts(as = "String")]
    pub cost_price: Money,
    /// Unit price as recorded on that sale (already reflecting whatever
    /// discount was applied originally).
    #[ts(as = "String")]
    pub unit_price: Money,
    /// The catalog's current list price for this unit.
    #[ts(as = "String")]
    pub original_price: Money,
    #[ts(as = "String")]
    pub available_stock: Decimal,
}

// =============================================================================
// Unit Tests
// =============================================================================
