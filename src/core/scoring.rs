use crate::models::{AirQualitySignal, ScoringWeights};

/// Round to 2 decimal places; scores and money are reported at this
/// precision while intermediate arithmetic stays full-precision
#[inline]
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score renovation cost relative to purchase price (0-100, higher is better)
///
/// The cost/price ratio is clamped to [0.5, 2.0]: renovation at or below
/// half the asking price scores 100, at or above double scores 0,
/// linear in between. A non-positive price scores a defined 0.
#[inline]
pub fn renovation_cost_score(renovation_cost: f64, listed_price: f64) -> f64 {
    if listed_price <= 0.0 {
        return 0.0;
    }
    let ratio = (renovation_cost / listed_price).clamp(0.5, 2.0);
    round2(100.0 * (1.0 - (ratio - 0.5) / 1.5))
}

/// Score how far the listing sits below the market average (0-100)
///
/// Positive only when listed below market; a listing at or above market
/// scores 0, never negative. A non-positive market average scores 0.
#[inline]
pub fn price_attractiveness_score(listed_price: f64, market_average: f64) -> f64 {
    if market_average <= 0.0 {
        return 0.0;
    }
    let attractiveness = (market_average - listed_price) / market_average * 100.0;
    round2(attractiveness.max(0.0))
}

/// Score air quality from the historical window plus the current index
///
/// The mean index is clamped to [0, 500] and inverted:
/// `(1 - avg/500) * 100`, so clean air scores high.
#[inline]
pub fn air_quality_score(signal: &AirQualitySignal) -> f64 {
    let count = signal.historical_indexes.len() + 1;
    let sum: f64 = signal.historical_indexes.iter().sum::<f64>() + signal.current_index;
    let avg = (sum / count as f64).clamp(0.0, 500.0);

    round2((1.0 - avg / 500.0) * 100.0)
}

/// Weighted sum of the four primary component scores
///
/// Sustainability and community scores are deliberately absent: they are
/// an advisory overlay, reported but never ranked on.
#[inline]
pub fn viability_score(
    price_attractiveness: f64,
    renovation_cost: f64,
    amenity: f64,
    air_quality: f64,
    weights: &ScoringWeights,
) -> f64 {
    round2(
        price_attractiveness * weights.price_attractiveness
            + renovation_cost * weights.renovation_cost
            + amenity * weights.amenity_score
            + air_quality * weights.air_quality,
    )
}
