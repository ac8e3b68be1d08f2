//! Decimal formatting for the price headline.
//!
//! Pair prices span many orders of magnitude (a stablecoin priced in BTC is
//! `0.0000158`), so very small values use subscript-zero notation:
//! `0.0(6)15` reads "zero point, six zeros, fifteen".

use rust_decimal::prelude::*;

enum PriceFormat {
    Standard(u32),
    Subscript { zeros: u32, significant: String },
}

#[inline]
fn count_digits_u128(n: u128) -> u32 {
    if n == 0 {
        return 1;
    }
    n.ilog10() + 1
}

fn get_price_format(value: &Decimal) -> PriceFormat {
    if value.is_zero() {
        return PriceFormat::Standard(2);
    }

    let abs_value = value.abs().normalize();

    if abs_value >= Decimal::ONE {
        return PriceFormat::Standard(2);
    }

    let scale = abs_value.scale();
    let mantissa = abs_value.mantissa().unsigned_abs();
    let mantissa_digits = count_digits_u128(mantissa);
    let leading_zeros = scale.saturating_sub(mantissa_digits);

    if leading_zeros > 5 {
        let keep = mantissa_digits.min(4);
        let mut sig = mantissa / 10u128.pow(mantissa_digits - keep);
        while sig > 0 && sig % 10 == 0 {
            sig /= 10;
        }
        PriceFormat::Subscript {
            zeros: leading_zeros,
            significant: sig.to_string(),
        }
    } else {
        PriceFormat::Standard((leading_zeros + 4).min(8))
    }
}

/// Format a price for the headline.
///
/// Values ≥ 1 get two fraction digits and thousands separators; values below 1
/// keep four significant digits; below `0.000001` subscript notation is used.
/// Trailing zeros are trimmed.
pub fn price(value: &Decimal) -> String {
    match get_price_format(value) {
        PriceFormat::Standard(dp) => {
            let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            group_thousands(trim_zeros(rounded.to_string()))
        }
        PriceFormat::Subscript { zeros, significant } => {
            let sign = if value.is_sign_negative() { "-" } else { "" };
            format!("{}0.0({}){}", sign, zeros, significant)
        }
    }
}

/// Format a percent change with an explicit sign and two fraction digits.
pub fn percent(value: &Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded > Decimal::ZERO { "+" } else { "" };
    format!("{}{:.2}%", sign, rounded)
}

fn trim_zeros(formatted: String) -> String {
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

fn group_thousands(formatted: String) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_price_zero() {
        assert_eq!(price(&Decimal::ZERO), "0");
    }

    #[test]
    fn test_price_two_decimals_with_separators() {
        assert_eq!(price(&dec("110")), "110");
        assert_eq!(price(&dec("1.505")), "1.51");
        assert_eq!(price(&dec("1234.567")), "1,234.57");
        assert_eq!(price(&dec("1234567.1")), "1,234,567.1");
    }

    #[test]
    fn test_price_small_values_keep_significant_digits() {
        assert_eq!(price(&dec("0.5")), "0.5");
        assert_eq!(price(&dec("0.123456")), "0.1235");
        assert_eq!(price(&dec("0.00012345")), "0.0001235");
    }

    #[test]
    fn test_price_very_small_values_subscript() {
        assert_eq!(price(&dec("0.0000001")), "0.0(6)1");
        assert_eq!(price(&dec("0.00000012345")), "0.0(6)1234");
        assert_eq!(price(&dec("0.000000100")), "0.0(6)1");
    }

    #[test]
    fn test_price_negative() {
        assert_eq!(price(&dec("-1234.5")), "-1,234.5");
        assert_eq!(price(&dec("-0.0000001")), "-0.0(6)1");
    }

    #[test]
    fn test_percent_sign_and_digits() {
        assert_eq!(percent(&dec("10")), "+10.00%");
        assert_eq!(percent(&dec("-3.456")), "-3.46%");
        assert_eq!(percent(&Decimal::ZERO), "0.00%");
        assert_eq!(percent(&dec("0.005")), "+0.01%");
    }
}
