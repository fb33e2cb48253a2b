//! # Error Types
//!
//! Domain error types for tally-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Cart mutations (add/update/remove/tender) NEVER fail: invalid      │
//! │  references are ignored and numeric garbage flows through           │
//! │  faithfully. Input sanitization is a caller obligation - see the    │
//! │  validation module.                                                 │
//! │                                                                     │
//! │  Errors only exist at the boundaries:                               │
//! │  ├── ValidationError  - command-layer input checks                  │
//! │  └── CoreError        - catalog resolution, commit-draft building   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Boundary failures when turning collaborator data into cart inputs, or
/// cart state into a commit draft.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The requested unit-of-measure has no conversion on the product.
    #[error("product {product_id} has no unit-of-measure conversion {uom_id}")]
    UnknownConversion { product_id: String, uom_id: String },

    /// A commit draft was requested for a cart with no lines.
    #[error("cannot build a sale draft from an empty cart")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the `validation` module when caller-supplied values don't meet
/// the documented obligations. Used for early rejection in the command layer
/// before a mutation reaches the cart.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative (zero is allowed).
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Cart has reached its maximum number of distinct lines.
    #[error("cart cannot hold more than {max} items")]
    CartFull { max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
