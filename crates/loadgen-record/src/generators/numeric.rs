//! Numeric and currency value generators.

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

/// Generate a random integer in the given range (inclusive).
///
/// A degenerate range (`max <= min`) yields `min`.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Generate a currency amount uniformly drawn from `[min, max]`, rounded to
/// cents.
pub fn generate_price<R: Rng>(rng: &mut R, min: f64, max: f64) -> Decimal {
    let value = if max <= min {
        min
    } else {
        rng.random_range(min..=max)
    };
    // f64::round rounds half away from zero
    Decimal::new((value * 100.0).round() as i64, 2)
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
