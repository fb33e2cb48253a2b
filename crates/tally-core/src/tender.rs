//! # Payment Ledger
//!
//! Records tender entries against the cart's final total and derives
//! paid/change/debt. Independent of the item ledger: it never mutates
//! items, and its derived figures always read the *current* final total.

use tracing::debug;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{PaymentEntry, TenderType};

impl Cart {
    /// Appends one tender entry.
    ///
    /// No amount validation happens here (caller obligation). Multiple
    /// entries of the same type are kept separate - two cash tenders stay
    /// two entries.
    pub fn add_payment(&mut self, tender: TenderType, amount: Money) {
        debug!(tender = ?tender, amount = %amount, "added payment");
        self.payments.push(PaymentEntry { tender, amount });
    }

    /// Removes one entry by position.
    ///
    /// Later entries shift down, so callers must not cache indices across
    /// mutations. Out-of-range indices are ignored.
    pub fn remove_payment(&mut self, index: usize) {
        if index < self.payments.len() {
            let entry = self.payments.remove(index);
            debug!(tender = ?entry.tender, amount = %entry.amount, index, "removed payment");
        }
    }

    /// Empties the payment ledger, independent of cart contents.
    pub fn clear_payments(&mut self) {
        self.payments.clear();
        debug!("cleared payments");
    }

    /// Sum of all recorded tender amounts.
    pub fn paid_amount(&self) -> Money {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Overpayment to hand back: `max(0, paid − final_total)`.
    pub fn change_amount(&self) -> Money {
        self.paid_amount().sub_or_zero(self.final_total())
    }

    /// Remainder still owed: `max(0, final_total − paid)`.
    ///
    /// The clamps guarantee change and debt are never both positive.
    pub fn debt_amount(&self) -> Money {
        self.final_total().sub_or_zero(self.paid_amount())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
