//! Custom serde helpers for upstream wire formats.

/// Converts a JSON number into a `Decimal` without going through `f64` arithmetic.
///
/// The upstream sends prices as bare JSON numbers. `serde_json` keeps the
/// shortest round-trip text of each number, which is parsed as a decimal;
/// scientific notation (`1.2e-7`) is accepted.
pub mod decimal_number {
    use rust_decimal::Decimal;
    use serde_json::Number;
    use std::str::FromStr;

    /// Parse an already-deserialized JSON number.
    pub fn from_number(n: &Number) -> Result<Decimal, String> {
        let text = n.to_string();
        let parsed = if text.contains(['e', 'E']) {
            Decimal::from_scientific(&text)
        } else {
            Decimal::from_str(&text)
        };
        parsed.map_err(|e| format!("Invalid decimal {}: {}", text, e))
    }
}

/// Converts a JSON number holding Unix milliseconds into `i64`.
///
/// Some upstream responses emit timestamps as floats (`1617235200000.0`).
pub mod timestamp_ms {
    use serde_json::Number;

    pub fn from_number(n: &Number) -> Result<i64, String> {
        if let Some(ms) = n.as_i64() {
            return Ok(ms);
        }
        match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
            _ => Err(format!("Invalid timestamp: {}", n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::Number;
    use std::str::FromStr;

    fn num(s: &str) -> Number {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn test_decimal_number_plain() {
        let d = decimal_number::from_number(&num("312.4581")).unwrap();
        assert_eq!(d, Decimal::from_str("312.4581").unwrap());
    }

    #[test]
    fn test_decimal_number_scientific() {
        let d = decimal_number::from_number(&num("1.5e-7")).unwrap();
        assert_eq!(d, Decimal::from_str("0.00000015").unwrap());
    }

    #[test]
    fn test_decimal_number_integer() {
        let d = decimal_number::from_number(&num("42")).unwrap();
        assert_eq!(d, Decimal::from(42));
    }

    #[test]
    fn test_timestamp_accepts_integral_float() {
        assert_eq!(
            timestamp_ms::from_number(&num("1617235200000.0")).unwrap(),
            1_617_235_200_000
        );
        assert!(timestamp_ms::from_number(&num("12.5")).is_err());
    }
}
