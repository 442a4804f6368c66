//! Type-safe price representation using decimal arithmetic.
//!
//! All prices are Brazilian reais. Arithmetic is exact ([`Decimal`]) and
//! saturates instead of panicking; rounding to centavos happens only when a
//! price is formatted for display.
//!
//! ```rust
//! use marmita_core::Price;
//! use rust_decimal::Decimal;
//!
//! let salad = Price::new(Decimal::new(1250, 2));
//! assert_eq!(salad.times(2).to_string(), "R$ 25,00");
//! assert_eq!(Price::new(Decimal::new(123_456, 2)).to_string(), "R$ 1.234,56");
//! ```

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "R$";

/// A price in Brazilian reais.
///
/// Serializes as a decimal string (`"12.50"`). Deserializes from a number or
/// from any text [`Price::from_str`] accepts, so `"50,00"` and
/// `"R$ 1.234,56"` are valid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "PriceSource", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of centavos.
    #[must_use]
    pub fn from_centavos(centavos: i64) -> Self {
        Self(Decimal::new(centavos, 2))
    }

    /// The amount rounded to centavos, halves away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// This price multiplied by a quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Sum of two prices.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceSource {
    Text(String),
    Number(Decimal),
}

impl TryFrom<PriceSource> for Price {
    type Error = ParsePriceError;

    fn try_from(source: PriceSource) -> Result<Self, Self::Error> {
        match source {
            PriceSource::Text(text) => text.parse(),
            PriceSource::Number(amount) => Ok(Self(amount)),
        }
    }
}

/// Error parsing a [`Price`] from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid price {input:?}")]
pub struct ParsePriceError {
    input: String,
}

impl FromStr for Price {
    type Err = ParsePriceError;

    /// Accepts `12.50`, `12,50`, `1.234,56`, an optional `R$` prefix, and a
    /// leading `-` on either side of the symbol.
    ///
    /// When a `,` is present it is the decimal separator and every `.` is a
    /// thousands separator; otherwise `.` is the decimal separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePriceError {
            input: s.to_owned(),
        };

        let (before_symbol, rest) = strip_sign(s.trim());
        let rest = rest
            .strip_prefix(CURRENCY_SYMBOL)
            .map_or(rest, str::trim_start);
        let (after_symbol, rest) = if before_symbol {
            (false, rest)
        } else {
            strip_sign(rest)
        };
        let negative = before_symbol || after_symbol;

        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return Err(invalid());
        }

        let normalized = if rest.contains(',') {
            if rest.matches(',').count() > 1 {
                return Err(invalid());
            }
            rest.replace('.', "").replacen(',', ".", 1)
        } else {
            rest.to_owned()
        };

        let amount = Decimal::from_str(&normalized).map_err(|_| invalid())?;
        Ok(Self(if negative { -amount } else { amount }))
    }
}

fn strip_sign(text: &str) -> (bool, &str) {
    text.strip_prefix('-')
        .map_or((false, text), |unsigned| (true, unsigned.trim_start()))
}

/// Formats as pt-BR currency: `R$ 1.234,56`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let fixed = format!("{:.2}", rounded.abs());
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}{CURRENCY_SYMBOL} {grouped},{cents}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brl(s: &str) -> Price {
        s.parse().unwrap()
    }

    #[test]
    fn test_display_uses_comma_decimal_separator() {
        assert_eq!(brl("12.5").to_string(), "R$ 12,50");
        assert_eq!(Price::ZERO.to_string(), "R$ 0,00");
        assert_eq!(brl("0.05").to_string(), "R$ 0,05");
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(brl("1234.56").to_string(), "R$ 1.234,56");
        assert_eq!(brl("1000000").to_string(), "R$ 1.000.000,00");
        assert_eq!(brl("999.99").to_string(), "R$ 999,99");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(brl("2.345").to_string(), "R$ 2,35");
        assert_eq!(brl("2.344").to_string(), "R$ 2,34");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(brl("-3.10").to_string(), "-R$ 3,10");
        assert!(brl("-3.10").is_negative());
        assert!(!Price::ZERO.is_negative());
    }

    #[test]
    fn test_parse_accepts_comma_and_symbol() {
        assert_eq!(brl("12,50"), brl("12.50"));
        assert_eq!(brl("R$ 12,50"), brl("12.5"));
        assert_eq!(brl("1.234,56"), Price::from_centavos(123_456));
        assert_eq!(brl("-R$ 3,10"), Price::from_centavos(-310));
        assert_eq!(brl("R$ -3,10"), Price::from_centavos(-310));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["doze reais", "", "R$", "--5", "1,2,3", "12 50", "+5"] {
            assert!(input.parse::<Price>().is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_display_parses_back() {
        for centavos in [0, 5, 1250, 99_999, 123_456, 100_000_000, -310] {
            let price = Price::from_centavos(centavos);
            assert_eq!(brl(&price.to_string()), price);
        }
    }

    #[test]
    fn test_deserialize_text_and_numbers() {
        let prices: Vec<Price> =
            serde_json::from_str(r#"["50,00", "R$ 1.234,56", "12.50", 8, 9.5]"#).unwrap();
        assert_eq!(
            prices,
            [
                Price::from_centavos(5000),
                Price::from_centavos(123_456),
                Price::from_centavos(1250),
                Price::from_centavos(800),
                Price::from_centavos(950),
            ]
        );
        assert!(serde_json::from_str::<Price>(r#""cinquenta""#).is_err());
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Price::from_centavos(1250)).unwrap();
        assert_eq!(json, r#""12.50""#);
    }

    #[test]
    fn test_times_and_sum() {
        let salad = brl("12.50");
        assert_eq!(salad.times(2), brl("25"));
        assert_eq!(salad.times(0), Price::ZERO);

        let total: Price = [salad, brl("7.25"), brl("0.25")].into_iter().sum();
        assert_eq!(total, brl("20.00"));
    }

    #[test]
    fn test_from_centavos() {
        assert_eq!(Price::from_centavos(1250), brl("12.50"));
        assert_eq!(Price::from_centavos(-99), brl("-0.99"));
    }

    #[test]
    fn test_times_saturates() {
        let huge = Price::new(Decimal::MAX);
        assert_eq!(huge.times(3), Price::new(Decimal::MAX));
    }
}
