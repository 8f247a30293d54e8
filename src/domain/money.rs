//! Currency formatting, amount parsing and reward point calculation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Reward rate as a fraction of the transfer amount (5%).
pub fn reward_rate() -> Decimal {
    Decimal::new(5, 2)
}

/// Calculate reward points for a transfer amount.
///
/// Points are `floor(amount * rate * 100)` (100 points per rewarded
/// dollar). Zero or negative amounts earn nothing.
pub fn calculate_rewards(amount: Decimal) -> u64 {
    if amount <= Decimal::ZERO {
        return 0;
    }
    (amount * reward_rate() * Decimal::ONE_HUNDRED)
        .floor()
        .to_u64()
        .unwrap_or(0)
}

/// Parse user-entered amount text into a positive dollar amount.
///
/// Rejects empty input, non-numeric text, zero, negatives, and more than
/// two fraction digits.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let value: Decimal = input.trim().parse().ok()?;
    if value <= Decimal::ZERO || value.scale() > 2 {
        return None;
    }
    Some(value)
}

/// Format a dollar amount as `$1,234.56` with exactly two fraction digits.
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.abs().round_dp(2);
    let cents = (rounded * Decimal::ONE_HUNDRED).to_i128().unwrap_or(0);
    let dollars = group_thousands(cents / 100);
    let sign = if amount.is_sign_negative() && cents != 0 {
        "-"
    } else {
        ""
    };
    format!("{}${}.{:02}", sign, dollars, cents % 100)
}

fn group_thousands(mut value: i128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while value > 0 {
        groups.push((value % 1000) as u16);
        value /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push_str(&format!(",{:03}", g));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn rewards_are_five_percent_in_points() {
        assert_eq!(calculate_rewards(dec("100")), 500);
        assert_eq!(calculate_rewards(dec("25.00")), 125);
        assert_eq!(calculate_rewards(dec("1")), 5);
        // floor, not round
        assert_eq!(calculate_rewards(dec("0.19")), 0);
        assert_eq!(calculate_rewards(dec("0.99")), 4);
    }

    #[test]
    fn rewards_for_non_positive_amounts_are_zero() {
        assert_eq!(calculate_rewards(Decimal::ZERO), 0);
        assert_eq!(calculate_rewards(dec("-5")), 0);
    }

    #[test]
    fn format_usd_always_shows_two_fraction_digits() {
        assert_eq!(format_usd(dec("0")), "$0.00");
        assert_eq!(format_usd(dec("25")), "$25.00");
        assert_eq!(format_usd(dec("4.5")), "$4.50");
        assert_eq!(format_usd(dec("1256.78")), "$1,256.78");
        assert_eq!(format_usd(dec("45689.23")), "$45,689.23");
        assert_eq!(format_usd(dec("1000000")), "$1,000,000.00");
    }

    #[test]
    fn format_usd_is_stable_for_equal_inputs() {
        let a = format_usd(dec("1256.78"));
        let b = format_usd(dec("1256.78"));
        assert_eq!(a, b);
    }

    #[test]
    fn format_usd_handles_negatives() {
        assert_eq!(format_usd(dec("-25.99")), "-$25.99");
        assert_eq!(format_usd(dec("-0.00")), "$0.00");
    }

    #[test]
    fn parse_amount_accepts_positive_dollar_values() {
        assert_eq!(parse_amount("25.00"), Some(dec("25.00")));
        assert_eq!(parse_amount(" 4.5 "), Some(dec("4.5")));
        assert_eq!(parse_amount("100"), Some(dec("100")));
    }

    #[test]
    fn parse_amount_rejects_invalid_input() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("1.234"), None);
    }
}
