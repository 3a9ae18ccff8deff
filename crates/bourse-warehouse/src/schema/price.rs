use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;

/// A price rounded to whole cents.
///
/// Ordering compares the rounded amount, so two raw values that round to the
/// same cent are equal. Displays and serializes as a 2-decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Round `value` to 2 decimals, half away from zero.
    ///
    /// Rounds the exact binary value of the float, so `1.115` (stored as
    /// `1.11499999...`) becomes `1.11`, as `toFixed(2)` gives.
    ///
    /// `None` for NaN, infinities & values beyond the range of `i64` cents.
    pub fn round(value: f64) -> Option<Self> {
        let exact = Decimal::from_f64_retain(value)?;
        let cents = exact
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()?;
        Some(Price { cents })
    }

    pub fn from_cents(cents: i64) -> Self {
        Price { cents }
    }

    pub fn cents(self) -> i64 {
        self.cents
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One chart sample: epoch milliseconds & the rounded price.
///
/// Serializes as the `[millis, "price"]` pair charting libraries take for
/// datetime series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    pub epoch_millis: i64,
    pub value: Price,
}

impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.epoch_millis, self.value).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(Price::round(100.004).unwrap().to_string(), "100.00");
        assert_eq!(Price::round(99.999).unwrap().to_string(), "100.00");
        assert_eq!(Price::round(101.2).unwrap().to_string(), "101.20");
        assert_eq!(Price::round(0.125).unwrap().to_string(), "0.13");
        assert_eq!(Price::round(7.0).unwrap().cents(), 700);
    }

    #[test]
    fn rounds_the_stored_value_not_the_written_one() {
        // each literal is stored just below its half-cent
        assert_eq!(Price::round(1.115).unwrap().to_string(), "1.11");
        assert_eq!(Price::round(2.675).unwrap().to_string(), "2.67");
        assert_eq!(Price::round(10.235).unwrap().to_string(), "10.23");
        assert_eq!(Price::round(-2.675).unwrap().to_string(), "-2.67");
    }

    #[test]
    fn negative_prices_keep_their_sign() {
        assert_eq!(Price::round(-3.456).unwrap().to_string(), "-3.46");
        assert_eq!(Price::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Price::round(-0.001).unwrap().to_string(), "0.00");
    }

    #[test]
    fn non_finite_values_do_not_round() {
        assert_eq!(Price::round(f64::NAN), None);
        assert_eq!(Price::round(f64::INFINITY), None);
        assert_eq!(Price::round(1e300), None);
    }

    #[test]
    fn ordering_follows_rounded_amount() {
        let a = Price::round(100.004).unwrap();
        let b = Price::round(99.999).unwrap();
        assert_eq!(a, b);
        assert!(Price::round(10.0).unwrap() > Price::round(9.994).unwrap());
        assert!(Price::from_cents(-1) < Price::from_cents(0));
    }

    #[test]
    fn chart_point_serializes_as_pair() {
        let point = ChartPoint {
            epoch_millis: 1_000_000,
            value: Price::round(99.999).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&point).unwrap(),
            r#"[1000000,"100.00"]"#
        );
    }
}
