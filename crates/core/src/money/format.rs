use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Formats an amount as US dollars, e.g. `$1,234.50` or `-$500.00`.
pub fn format_usd(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_usd_groups_thousands() {
        assert_eq!(format_usd(dec!(0)), "$0.00");
        assert_eq!(format_usd(dec!(999.5)), "$999.50");
        assert_eq!(format_usd(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_usd(dec!(1234567.891)), "$1,234,567.89");
    }

    #[test]
    fn test_format_usd_negative_and_rounding() {
        assert_eq!(format_usd(dec!(-500)), "-$500.00");
        assert_eq!(format_usd(dec!(0.005)), "$0.01");
        assert_eq!(format_usd(dec!(-0.001)), "$0.00");
    }
}
