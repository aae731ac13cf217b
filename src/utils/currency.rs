//! Peso to centavo conversion for the PayMongo API.
//!
//! PayMongo amounts are integers in centavos (1 peso = 100 centavos);
//! bill amounts are stored as DECIMAL pesos.

use bigdecimal::{rounding::RoundingMode, BigDecimal};
use num_traits::ToPrimitive;

/// Convert a peso amount to whole centavos, rounding to the nearest centavo.
pub fn peso_to_centavos(amount: &BigDecimal) -> Option<i64> {
    (amount * BigDecimal::from(100))
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_peso_to_centavos() {
        let amount = BigDecimal::from_str("5000.00").unwrap();
        assert_eq!(peso_to_centavos(&amount), Some(500_000));

        let amount = BigDecimal::from_str("100.50").unwrap();
        assert_eq!(peso_to_centavos(&amount), Some(10_050));

        let amount = BigDecimal::from_str("0.99").unwrap();
        assert_eq!(peso_to_centavos(&amount), Some(99));
    }

    #[test]
    fn sub_centavo_amounts_round() {
        let amount = BigDecimal::from_str("1.005").unwrap();
        assert_eq!(peso_to_centavos(&amount), Some(101));
    }
}
