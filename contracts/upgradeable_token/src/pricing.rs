/// Units bought by a payment of `value` at `price` per unit
///
/// Formula: units = value / price, only when price divides value exactly.
/// A payment carrying a partial unit is rejected outright rather than rounded,
/// so no residual value is ever absorbed by the contract.
///
/// Example:
/// - value: 2_000, price: 1_000 -> 2 units
/// - value: 2_500, price: 1_000 -> rejected
pub fn purchase_units(value: i128, price: i128) -> Option<i128> {
    if value <= 0 || price <= 0 {
        return None;
    }

    if value.checked_rem(price)? != 0 {
        return None;
    }

    value.checked_div(price)
}

/// Value paid out for selling `units` at `price` per unit
pub fn sale_payout(units: i128, price: i128) -> Option<i128> {
    if units <= 0 || price <= 0 {
        return None;
    }

    units.checked_mul(price)
}

/// Units still sellable in the current cap window
pub fn cap_remaining(sell_cap: i128, sold: i128) -> i128 {
    sell_cap.saturating_sub(sold).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE: i128 = 1_000_000;

    #[test]
    fn test_exact_payment() {
        assert_eq!(purchase_units(2 * PRICE, PRICE), Some(2));
    }

    #[test]
    fn test_partial_unit_rejected() {
        assert_eq!(purchase_units(2 * PRICE + 1, PRICE), None);
        assert_eq!(purchase_units(PRICE - 1, PRICE), None);
    }

    #[test]
    fn test_unpriced_or_empty_payment_rejected() {
        assert_eq!(purchase_units(PRICE, 0), None);
        assert_eq!(purchase_units(0, PRICE), None);
        assert_eq!(purchase_units(-PRICE, PRICE), None);
    }

    #[test]
    fn test_sale_payout() {
        assert_eq!(sale_payout(10, PRICE), Some(10 * PRICE));
        assert_eq!(sale_payout(i128::MAX, 2), None);
        assert_eq!(sale_payout(5, 0), None);
    }

    #[test]
    fn test_cap_remaining_never_negative() {
        assert_eq!(cap_remaining(100, 40), 60);
        assert_eq!(cap_remaining(100, 100), 0);
        // Cap lowered below what was already sold
        assert_eq!(cap_remaining(10, 40), 0);
    }
}
