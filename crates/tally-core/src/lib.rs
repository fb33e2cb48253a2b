//! # tally-core: Pure Transaction Engine for Tally POS
//!
//! This crate is the **heart** of Tally POS: the one part of the application
//! with real invariants, rounding rules and edge-case policy. Everything else
//! (page rendering, REST calls, authentication, receipt layout) is plumbing
//! around it and lives in other workspace members.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Tally POS Architecture                        │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                     Cashier UI / Commands                   │   │
//! │  │   scan item ─► edit quantity ─► override total ─► tender    │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │ plain data in, plain data out      │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                   │   │
//! │  │                                                             │   │
//! │  │  ┌────────┐ ┌──────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ │   │
//! │  │  │ money  │ │   cart   │ │discount│ │ tender  │ │session │ │   │
//! │  │  │ Money  │ │   Cart   │ │ alloc- │ │ Payment │ │  edit  │ │   │
//! │  │  │ 2dp    │ │ LineItem │ │  ator  │ │ ledger  │ │  mode  │ │   │
//! │  │  └────────┘ └──────────┘ └────────┘ └─────────┘ └────────┘ │   │
//! │  │                                                             │   │
//! │  │    NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                    │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │        Catalog / Persistence collaborators (external)       │   │
//! │  │   supply product prices & historical sales, commit drafts   │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` type over exact decimals (no floating point!)
//! - [`types`] - collaborator-facing shapes (catalog, tender, sale records)
//! - [`cart`] - the `Cart` aggregate and its line-item ledger
//! - [`discount`] - proportional allocation of a cashier-entered total
//! - [`tender`] - split-tender payment ledger
//! - [`session`] - edit sessions over committed sales, reset, commit drafts
//! - [`error`] - domain error types
//! - [`validation`] - caller-obligation input checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation is a synchronous state transition
//! 2. **No I/O**: the engine only consumes collaborator outputs
//! 3. **Exact Decimals**: all money flows through `rust_decimal`, rounded to
//!    currency precision at documented points only
//! 4. **Owned Aggregate**: a [`cart::Cart`] is a plain value held by its call
//!    site - two terminals can coexist in one process, tests construct carts
//!    freely, and nothing hides behind a process-wide global

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod session;
pub mod tender;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, ItemDraft, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{DraftLine, EditContext, SaleDraft};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency precision in decimal places.
///
/// Every stored monetary value (unit prices, line totals, discount shares) is
/// rounded to this scale; intermediate arithmetic keeps full precision.
pub const CURRENCY_DP: u32 = 2;

/// Maximum distinct lines allowed in a single cart.
///
/// Not enforced by the engine itself - the command layer checks it via
/// [`validation::validate_cart_size`] before calling in.
pub const MAX_CART_ITEMS: usize = 100;
