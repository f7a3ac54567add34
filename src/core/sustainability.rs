use crate::core::scoring::round2;
use crate::models::SustainabilityRules;

/// Building Energy Rating ladder, worst to best
const BER_LADDER: [&str; 15] = [
    "G", "F", "E2", "E1", "D2", "D1", "C3", "C2", "C1", "B3", "B2", "B1", "A3", "A2", "A1",
];

/// Fallback target when the configured grade is not on the ladder
pub const DEFAULT_TARGET_GRADE: &str = "C1";

/// Neutral prior for missing or unrecognized grades (incl. placeholders
/// like "BER_PENDING" and "SI_666")
const UNKNOWN_GRADE_POTENTIAL: f64 = 60.0;

fn ladder_index(grade: &str) -> Option<usize> {
    let grade = grade.trim().to_uppercase();
    BER_LADDER.iter().position(|&g| g == grade)
}

/// Score how much headroom a property has to reach the target grade
///
/// `max(0, target_index - current_index) / target_index * 100` on the
/// ladder; a G-rated property has maximum improvement potential, a
/// property at or above the target has none. Missing or unrecognized
/// grades take a neutral 60.0 prior rather than a penalty.
pub fn energy_improvement_potential(ber: Option<&str>, target_grade: &str) -> f64 {
    let target_index = ladder_index(target_grade)
        .or_else(|| ladder_index(DEFAULT_TARGET_GRADE))
        .unwrap_or(0);
    if target_index == 0 {
        return 0.0;
    }

    match ber.and_then(ladder_index) {
        Some(current_index) => {
            let steps = target_index.saturating_sub(current_index) as f64;
            round2(steps / target_index as f64 * 100.0)
        }
        None => UNKNOWN_GRADE_POTENTIAL,
    }
}

/// Score estimated carbon savings from renovating instead of rebuilding
///
/// Savings per m² scaled against the configured reference ceiling and
/// capped at 100. Missing or non-positive floor area falls back to the
/// configured default (100 m² out of the box).
pub fn carbon_savings_score(area_m2: Option<f64>, rules: &SustainabilityRules) -> f64 {
    let area = match area_m2 {
        Some(area) if area.is_finite() && area > 0.0 => area,
        _ => rules.default_area_m2,
    };

    let savings_kg = rules.carbon_savings_per_m2 * area;
    round2((savings_kg / rules.carbon_reference_kg * 100.0).min(100.0))
}

/// Composite sustainability score (0-100)
///
/// Carbon, energy-improvement, and community-access components under
/// the configured weights (0.40/0.35/0.25 by default), clamped.
/// Advisory only; never feeds the primary viability weighting.
pub fn sustainability_score(
    ber: Option<&str>,
    area_m2: Option<f64>,
    community_access_score: f64,
    rules: &SustainabilityRules,
) -> f64 {
    let composite = rules.carbon_weight * carbon_savings_score(area_m2, rules)
        + rules.energy_weight * energy_improvement_potential(ber, &rules.target_grade)
        + rules.access_weight * community_access_score;

    round2(composite.clamp(0.0, 100.0))
}
