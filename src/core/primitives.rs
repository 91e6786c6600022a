use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `decimal_places` with ties to even.
#[must_use]
pub fn round_decimal_places(value: f64, decimal_places: u32) -> Option<f64> {
    let value = Decimal::from_f64(value)?;
    value
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
        .to_f64()
}

/// Exact ratio rounded to `decimal_places`.
#[must_use]
pub fn rounded_ratio(numerator: f64, denominator: u32, decimal_places: u32) -> Option<f64> {
    if denominator == 0 {
        return None;
    }
    let numerator = Decimal::from_f64(numerator)?;
    (numerator / Decimal::from(denominator))
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
        .to_f64()
}
