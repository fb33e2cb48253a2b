//! # Validation Module
//!
//! Caller-obligation input checks.
//!
//! The engine itself performs no defensive validation: its contract is
//! arithmetic consistency given valid inputs, and the documented policy
//! branches (quantity `<= 0` removes a line, an override that stops fitting
//! below the subtotal is dropped) are state transitions, not errors. These
//! helpers are the checks the surrounding command layer runs *before* a
//! value reaches the cart - the same division of labor the UI forms and the
//! server-side commit checks follow.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_CART_ITEMS;

/// Result type for validation operations.
pub type ValidationResult = Result<(), ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity for `add_item`.
///
/// ## Rules
/// - Must be positive (> 0). Zero/negative quantities are only meaningful to
///   `update_item_quantity`, where they are the documented removal shortcut.
pub fn validate_quantity(quantity: Decimal) -> ValidationResult {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (free items)
pub fn validate_unit_price(price: Money) -> ValidationResult {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount.
///
/// ## Rules
/// - Must be positive (> 0); the ledger itself accepts anything
pub fn validate_payment_amount(amount: Money) -> ValidationResult {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a cashier-entered custom total.
///
/// ## Rules
/// - Must be non-negative; whether it actually activates a discount is the
///   allocator's policy (a total at or above the subtotal clears the
///   override instead)
pub fn validate_custom_total(total: Money) -> ValidationResult {
    if total.is_negative() {
        return Err(ValidationError::Negative {
            field: "custom total".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size (number of distinct lines) before an add.
pub fn validate_cart_size(current_items: usize) -> ValidationResult {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::CartFull {
            max: MAX_CART_ITEMS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(dec("1")).is_ok());
        assert!(validate_quantity(dec("0.25")).is_ok());

        assert!(validate_quantity(Decimal::ZERO).is_err());
        assert!(validate_quantity(dec("-1")).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price("10.99".parse().unwrap()).is_ok());
        assert!(validate_unit_price(Money::ZERO).is_ok()); // free item
        assert!(validate_unit_price("-1".parse().unwrap()).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount("0.01".parse().unwrap()).is_ok());
        assert!(validate_payment_amount(Money::ZERO).is_err());
        assert!(validate_payment_amount("-5".parse().unwrap()).is_err());
    }

    #[test]
    fn test_validate_custom_total() {
        assert!(validate_custom_total(Money::ZERO).is_ok()); // 100% discount
        assert!(validate_custom_total("900".parse().unwrap()).is_ok());
        assert!(validate_custom_total("-1".parse().unwrap()).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }
}
