//! # Discount Allocator
//!
//! Converts a cashier-entered final total into a per-line proportional
//! discount.
//!
//! ## Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  subtotal 1000, cashier enters 900                                  │
//! │                                                                     │
//! │  discount = 100, flat rate = 10%                                    │
//! │                                                                     │
//! │  line 300 ──► share 30% ──► -30 ──► unit/total rounded per line     │
//! │  line 700 ──► share 70% ──► -70 ──► unit/total rounded per line     │
//! │                                                                     │
//! │  final_total() = 900 exactly (the entered amount, not the sum of    │
//! │  rounded lines)                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Proportional allocation preserves each line's relative contribution to
//! the receipt when a manager grants a lump-sum discount. Every line is
//! rounded on its own, so the sum of line totals may drift from the entered
//! total by up to ±0.01 per line; that drift is accepted, not reconciled.

use rust_decimal::Decimal;
use tracing::debug;

use crate::cart::Cart;
use crate::money::Money;

impl Cart {
    /// Sets or clears the cashier-entered override.
    ///
    /// - `None`, or a total at or above the subtotal: the override is
    ///   cleared - every line returns to its list price and
    ///   `final_total()` falls back to the subtotal.
    /// - `0 <= total < subtotal`: the lump discount `subtotal − total` is
    ///   spread across the lines in proportion to their share of the
    ///   subtotal.
    pub fn set_custom_total(&mut self, total: Option<Money>) {
        match total {
            Some(t) => debug!(custom_total = %t, "override requested"),
            None => debug!("override cleared"),
        }
        self.custom_total = total;
        self.recalculate();
    }

    /// Alias of [`Cart::set_custom_total`] with an always-present target.
    pub fn apply_proportional_discount(&mut self, total: Money) {
        self.set_custom_total(Some(total));
    }

    /// Distributes `subtotal − target` across the lines.
    ///
    /// Runs on restored (undiscounted) lines only - the cascade in
    /// `recalculate` guarantees that. Per line: the share is measured
    /// against the undiscounted subtotal, the discounted unit price is
    /// rounded to currency precision, and the line total is re-derived from
    /// that rounded unit price so the receipt always foots. The stored
    /// per-line discount is whatever the rounding actually took off.
    pub(crate) fn allocate(&mut self, target: Money, subtotal: Money) {
        let discount = subtotal - target;
        let percent = discount.ratio_of(subtotal) * Decimal::ONE_HUNDRED;

        for item in &mut self.items {
            let base_total = item.total_price;
            let line_discount = discount * base_total.ratio_of(subtotal);
            let raw_total = base_total - line_discount;

            item.unit_price = (raw_total / item.quantity).round();
            item.total_price = (item.unit_price * item.quantity).round();
            item.discount_amount = base_total - item.total_price;
            item.discount_percent = percent;
        }

        debug!(
            subtotal = %subtotal,
            target = %target,
            discount = %discount,
            lines = self.items.len(),
            "allocated proportional discount"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::ItemDraft;
    use crate::types::Uom;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn draft(product_id: &str, qty: &str, price: &str) -> ItemDraft {
        ItemDraft {
            product_id: product_id.to_string(),
            name: format!("Product {product_id}"),
            quantity: dec(qty),
            uom: Uom::base("u1", "pcs"),
            cost_price: Money::ZERO,
            original_price: money(price),
            unit_price: money(price),
            available_stock: dec("100"),
        }
    }

    fn cart_300_700() -> Cart {
        let mut cart = Cart::new("W-1");
        cart.add_item(draft("1", "1", "300"));
        cart.add_item(draft("2", "1", "700"));
        cart
    }

    #[test]
    fn test_proportional_allocation() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("900")));

        assert_eq!(cart.discount_amount(), money("100"));
        assert_eq!(cart.discount_percent(), dec("10"));
        assert_eq!(cart.final_total(), money("900"));

        let (a, b) = (&cart.items[0], &cart.items[1]);
        assert_eq!(a.total_price, money("270"));
        assert_eq!(a.unit_price, money("270"));
        assert_eq!(a.discount_amount, money("30"));
        assert_eq!(b.total_price, money("630"));
        assert_eq!(b.discount_amount, money("70"));
        // flat rate stored identically on every line
        assert_eq!(a.discount_percent, dec("10"));
        assert_eq!(b.discount_percent, dec("10"));
        // subtotal still reads pre-discount
        assert_eq!(cart.subtotal(), money("1000"));
    }

    #[test]
    fn test_rounding_drift_is_accepted() {
        let mut cart = Cart::new("W-1");
        for id in ["1", "2", "3"] {
            cart.add_item(draft(id, "1", "333.33"));
        }
        assert_eq!(cart.subtotal(), money("999.99"));

        cart.set_custom_total(Some(money("989.99")));

        // each line: 333.33 − 10/3 → 329.9966… → rounds to 330.00
        let line_sum: Money = cart.items.iter().map(|i| i.total_price).sum();
        assert_eq!(line_sum, money("990.00"));
        // the entered total wins over the sum of rounded lines
        assert_eq!(cart.final_total(), money("989.99"));
        assert_eq!(cart.items[0].discount_amount, money("3.33"));
    }

    #[test]
    fn test_allocation_keeps_line_invariant_on_fractional_quantities() {
        let mut cart = Cart::new("W-1");
        cart.add_item(draft("1", "1.5", "2.00")); // 3.00
        cart.add_item(draft("2", "1", "7.00"));
        assert_eq!(cart.subtotal(), money("10.00"));

        cart.set_custom_total(Some(money("9.00")));

        for item in &cart.items {
            assert_eq!(
                item.total_price,
                (item.unit_price * item.quantity).round(),
                "line total must foot to the printed unit price"
            );
        }
    }

    #[test]
    fn test_none_clears_override() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("900")));
        cart.set_custom_total(None);

        assert_eq!(cart.final_total(), money("1000"));
        assert_eq!(cart.discount_amount(), Money::ZERO);
        assert_eq!(cart.items[0].unit_price, money("300"));
        assert_eq!(cart.items[0].discount_amount, Money::ZERO);
        assert_eq!(cart.items[0].discount_percent, Decimal::ZERO);
    }

    #[test]
    fn test_total_at_or_above_subtotal_clears_override() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("1000")));
        assert_eq!(cart.custom_total, None);
        assert_eq!(cart.final_total(), money("1000"));

        cart.set_custom_total(Some(money("1200")));
        assert_eq!(cart.custom_total, None);
    }

    #[test]
    fn test_zero_total_discounts_everything() {
        let mut cart = cart_300_700();
        cart.apply_proportional_discount(Money::ZERO);

        assert_eq!(cart.final_total(), Money::ZERO);
        assert_eq!(cart.discount_percent(), dec("100"));
        assert_eq!(cart.items[0].total_price, Money::ZERO);
        assert_eq!(cart.items[1].total_price, Money::ZERO);
    }

    #[test]
    fn test_reapplying_same_total_is_idempotent() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("900")));
        let first: Vec<_> = cart
            .items
            .iter()
            .map(|i| (i.unit_price, i.total_price, i.discount_amount))
            .collect();

        cart.set_custom_total(Some(money("900")));
        let second: Vec<_> = cart
            .items
            .iter()
            .map(|i| (i.unit_price, i.total_price, i.discount_amount))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_adding_item_reallocates_against_new_subtotal() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("900")));

        cart.add_item(draft("3", "1", "500"));

        // subtotal 1500, override 900 still fits: discount 600, flat 40%
        assert_eq!(cart.subtotal(), money("1500"));
        assert_eq!(cart.discount_amount(), money("600"));
        assert_eq!(cart.final_total(), money("900"));
        assert_eq!(cart.items[0].total_price, money("180"));
        assert_eq!(cart.items[1].total_price, money("420"));
        assert_eq!(cart.items[2].total_price, money("300"));
        assert_eq!(cart.items[0].discount_percent, dec("40"));
    }

    #[test]
    fn test_quantity_change_reallocates_without_compounding() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("900")));
        let id = cart.items[0].id;

        cart.update_item_quantity(id, dec("2"));

        // bases 600/700, subtotal 1300, discount 400
        assert_eq!(cart.discount_amount(), money("400"));
        assert_eq!(cart.items[0].unit_price, money("207.69"));
        assert_eq!(cart.items[0].total_price, money("415.38"));
        assert_eq!(cart.items[1].unit_price, money("484.62"));
        assert_eq!(cart.final_total(), money("900"));
    }

    #[test]
    fn test_manual_price_edit_clears_override() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("900")));
        let id = cart.items[0].id;

        cart.update_item_price(id, money("250"));

        assert_eq!(cart.custom_total, None);
        assert_eq!(cart.subtotal(), money("950"));
        assert_eq!(cart.final_total(), money("950"));
        for item in &cart.items {
            assert_eq!(item.discount_amount, Money::ZERO);
            assert_eq!(item.discount_percent, Decimal::ZERO);
        }
        assert_eq!(cart.items[1].unit_price, money("700")); // restored
    }

    #[test]
    fn test_override_survives_remove_while_it_still_fits() {
        let mut cart = Cart::new("W-1");
        cart.add_item(draft("1", "1", "300"));
        cart.add_item(draft("2", "1", "300"));
        cart.add_item(draft("3", "1", "400"));
        cart.set_custom_total(Some(money("550")));
        let id = cart.items[0].id;

        cart.remove_item(id);

        // new subtotal 700 still above 550: recomputed and retained
        assert_eq!(cart.custom_total, Some(money("550")));
        assert_eq!(cart.discount_amount(), money("150"));
        assert_eq!(cart.items[0].total_price, money("235.71"));
        assert_eq!(cart.items[1].total_price, money("314.29"));
        assert_eq!(cart.final_total(), money("550"));
    }

    #[test]
    fn test_override_drops_when_subtotal_falls_below_it() {
        let mut cart = Cart::new("W-1");
        cart.add_item(draft("1", "1", "300"));
        cart.add_item(draft("2", "1", "300"));
        cart.add_item(draft("3", "1", "400"));
        cart.set_custom_total(Some(money("750")));
        let id = cart.items[2].id; // the 400 line

        cart.remove_item(id);

        // new subtotal 600 no longer above 750: reverts to full subtotal
        assert_eq!(cart.custom_total, None);
        assert_eq!(cart.final_total(), money("600"));
        assert_eq!(cart.discount_amount(), Money::ZERO);
        assert_eq!(cart.items[0].unit_price, money("300"));
        assert_eq!(cart.items[0].discount_amount, Money::ZERO);
    }

    #[test]
    fn test_original_price_is_never_touched() {
        let mut cart = cart_300_700();
        cart.set_custom_total(Some(money("900")));

        assert_eq!(cart.items[0].original_price, money("300"));
        assert_eq!(cart.items[1].original_price, money("700"));
    }
}
