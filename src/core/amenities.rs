use crate::core::scoring::round2;
use crate::models::{AmenityObservation, AmenityRules, AreaContext, ContextCaps};

/// Canonical buckets for the proximity access score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Transport,
    Shop,
    Park,
    School,
}

const BUCKET_COUNT: usize = 4;

/// Access-score weights per bucket: transport, shop, park, school
const BUCKET_WEIGHTS: [f64; BUCKET_COUNT] = [0.35, 0.25, 0.20, 0.20];

/// Bonus when at least 3 buckets have a match inside the anchor radius
const ANCHOR_BONUS: f64 = 5.0;
const ANCHOR_BUCKET_MIN: usize = 3;

/// An urban context needs more than one amenity nearby; a single close
/// match in an otherwise empty area still reads as rural
const URBAN_OBSERVATION_MIN: usize = 2;

fn bucket_cap(caps: &ContextCaps, bucket: Bucket) -> f64 {
    match bucket {
        Bucket::Transport => caps.transport_km,
        Bucket::Shop => caps.shop_km,
        Bucket::Park => caps.park_km,
        Bucket::School => caps.school_km,
    }
}

const BUCKETS: [Bucket; BUCKET_COUNT] =
    [Bucket::Transport, Bucket::Shop, Bucket::Park, Bucket::School];

/// Result of the proximity access assessment
#[derive(Debug, Clone, Copy)]
pub struct AccessAssessment {
    pub score: f64,
    pub context: AreaContext,
}

/// Map a free-form amenity type onto a canonical bucket
///
/// Unmatched types are ignored, not errors; enrichment sources disagree
/// on naming ("bus station", "Bus", "train_station", ...).
fn categorize(kind: &str) -> Option<Bucket> {
    let kind = kind.to_lowercase();

    const TRANSPORT: [&str; 7] = ["bus", "train", "tram", "rail", "station", "luas", "dart"];
    const SHOP: [&str; 5] = ["supermarket", "shop", "store", "grocery", "convenience"];
    const PARK: [&str; 3] = ["park", "green", "playground"];
    const SCHOOL: [&str; 3] = ["school", "college", "education"];

    if TRANSPORT.iter().any(|t| kind.contains(t)) {
        Some(Bucket::Transport)
    } else if SHOP.iter().any(|t| kind.contains(t)) {
        Some(Bucket::Shop)
    } else if PARK.iter().any(|t| kind.contains(t)) {
        Some(Bucket::Park)
    } else if SCHOOL.iter().any(|t| kind.contains(t)) {
        Some(Bucket::School)
    } else {
        None
    }
}

/// Classify the area around a property as urban or rural
///
/// Rural when no observations exist, when the nearest one is beyond the
/// threshold, or when fewer than two sit inside it.
fn detect_context(observations: &[AmenityObservation], rural_threshold_km: f64) -> AreaContext {
    let within_threshold = observations
        .iter()
        .filter(|obs| obs.distance_km <= rural_threshold_km)
        .count();

    if within_threshold >= URBAN_OBSERVATION_MIN {
        AreaContext::Urban
    } else {
        AreaContext::Rural
    }
}

/// Nearest observed distance per bucket, if any
fn nearest_per_bucket(observations: &[AmenityObservation]) -> [Option<f64>; BUCKET_COUNT] {
    let mut nearest: [Option<f64>; BUCKET_COUNT] = [None; BUCKET_COUNT];

    for obs in observations {
        if let Some(bucket) = categorize(&obs.kind) {
            let slot = &mut nearest[bucket as usize];
            match slot {
                Some(current) if *current <= obs.distance_km => {}
                _ => *slot = Some(obs.distance_km),
            }
        }
    }

    nearest
}

/// Linear decay inside the cap, zero at or beyond it
#[inline]
fn bucket_score(distance_km: f64, cap_km: f64) -> f64 {
    (100.0 * (1.0 - distance_km / cap_km)).max(0.0)
}

/// Calculate the proximity-quality access score (0-100)
///
/// Per-bucket linear decay against context-dependent caps, weighted
/// 0.35/0.25/0.20/0.20 across transport/shop/park/school, plus an
/// anchor bonus for dense multi-amenity neighborhoods. Caps, anchor
/// radii, and the urban/rural threshold come from the configured rules.
pub fn community_access_score(
    observations: &[AmenityObservation],
    rules: &AmenityRules,
) -> AccessAssessment {
    let context = detect_context(observations, rules.rural_threshold_km);
    let caps = match context {
        AreaContext::Urban => &rules.urban,
        AreaContext::Rural => &rules.rural,
    };

    let nearest = nearest_per_bucket(observations);

    let mut score = 0.0;
    let mut anchored_buckets = 0;
    for (index, bucket) in BUCKETS.into_iter().enumerate() {
        if let Some(distance) = nearest[index] {
            score += BUCKET_WEIGHTS[index] * bucket_score(distance, bucket_cap(caps, bucket));
            if distance <= caps.anchor_radius_km {
                anchored_buckets += 1;
            }
        }
    }

    if anchored_buckets >= ANCHOR_BUCKET_MIN {
        score += ANCHOR_BONUS;
    }

    AccessAssessment {
        score: round2(score.min(100.0)),
        context,
    }
}

/// Normalize free-form type strings for breadth-category matching
fn normalize_kind(kind: &str) -> String {
    kind.trim().to_lowercase().replace('_', " ")
}

/// Calculate the breadth-weighted amenity score (0-100)
///
/// Averages a flat linear decay over every searched category, not just
/// the matched ones, so missing categories pull the score down.
/// Intentionally distinct from the access score: this metric rewards
/// breadth of coverage, the other rewards category-specific proximity.
pub fn amenity_breadth_score(observations: &[AmenityObservation], rules: &AmenityRules) -> f64 {
    if rules.searched_types.is_empty() {
        return 0.0;
    }
    let radius_km = rules.breadth_radius_km;

    let mut total = 0.0;
    for searched in &rules.searched_types {
        let nearest = observations
            .iter()
            .filter(|obs| normalize_kind(&obs.kind) == *searched)
            .map(|obs| obs.distance_km)
            .fold(f64::INFINITY, f64::min);

        if nearest.is_finite() {
            total += 100.0 * (1.0 - nearest.min(radius_km) / radius_km);
        }
    }

    round2(total / rules.searched_types.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(kind: &str, distance_km: f64) -> AmenityObservation {
        AmenityObservation {
            name: format!("{} near the property", kind),
            kind: kind.to_string(),
            distance_km,
        }
    }

    fn rules() -> AmenityRules {
        AmenityRules::default()
    }

    #[test]
    fn test_categorize_buckets() {
        assert_eq!(categorize("bus station"), Some(Bucket::Transport));
        assert_eq!(categorize("Train_Station"), Some(Bucket::Transport));
        assert_eq!(categorize("Supermarket"), Some(Bucket::Shop));
        assert_eq!(categorize("park"), Some(Bucket::Park));
        assert_eq!(categorize("secondary school"), Some(Bucket::School));
        assert_eq!(categorize("nightclub"), None);
    }

    #[test]
    fn test_no_observations_is_rural_zero() {
        let assessment = community_access_score(&[], &rules());
        assert_eq!(assessment.context, AreaContext::Rural);
        assert_eq!(assessment.score, 0.0);
    }

    #[test]
    fn test_lone_shop_in_empty_area_scores_rural() {
        // Single supermarket at 0.4 km, nothing else around: rural caps
        // apply, shop bucket scores 100 * (1 - 0.4/5.0) = 92.0 and the
        // weighted access score is 0.25 * 92.0 = 23.0, no anchor bonus.
        let assessment = community_access_score(&[obs("supermarket", 0.4)], &rules());
        assert_eq!(assessment.context, AreaContext::Rural);
        assert_eq!(assessment.score, 23.0);
    }

    #[test]
    fn test_distant_amenities_are_rural() {
        let assessment = community_access_score(
            &[
                obs("supermarket", 2.0),
                obs("bus station", 2.5),
                obs("school", 4.0),
            ],
            &rules(),
        );
        assert_eq!(assessment.context, AreaContext::Rural);
        // transport: 0.35 * 100 * (1 - 2.5/3.0), shop: 0.25 * 100 * (1 - 2.0/5.0),
        // school: 0.20 * 100 * (1 - 4.0/6.0)
        let expected = 0.35 * (100.0 * (1.0 - 2.5 / 3.0))
            + 0.25 * (100.0 * (1.0 - 2.0 / 5.0))
            + 0.20 * (100.0 * (1.0 - 4.0 / 6.0));
        assert!((assessment.score - round2(expected)).abs() < 1e-9);
    }

    #[test]
    fn test_urban_context_uses_tight_caps() {
        // Two close amenities flip the context to urban; a shop at 0.4 km
        // now scores against the 0.8 km cap instead of 5.0 km.
        let assessment =
            community_access_score(&[obs("supermarket", 0.4), obs("park", 0.5)], &rules());
        assert_eq!(assessment.context, AreaContext::Urban);
        let expected = 0.25 * (100.0 * (1.0 - 0.4 / 0.8)) + 0.20 * (100.0 * (1.0 - 0.5 / 1.0));
        assert!((assessment.score - round2(expected)).abs() < 1e-9);
    }

    #[test]
    fn test_configured_caps_change_the_score() {
        // Doubling the rural shop cap halves the decay of the same
        // observation: 0.25 * 100 * (1 - 0.4/10.0) = 24.0 vs 23.0.
        let mut wide = rules();
        wide.rural.shop_km = 10.0;

        let assessment = community_access_score(&[obs("supermarket", 0.4)], &wide);
        assert_eq!(assessment.context, AreaContext::Rural);
        assert_eq!(assessment.score, 24.0);
    }

    #[test]
    fn test_configured_threshold_changes_the_context() {
        // A tighter rural threshold demotes the 0.4/0.5 km pair that the
        // defaults classify as urban.
        let mut tight = rules();
        tight.rural_threshold_km = 0.3;

        let observations = [obs("supermarket", 0.4), obs("park", 0.5)];
        assert_eq!(
            community_access_score(&observations, &rules()).context,
            AreaContext::Urban
        );
        assert_eq!(
            community_access_score(&observations, &tight).context,
            AreaContext::Rural
        );
    }

    #[test]
    fn test_anchor_bonus_applies() {
        let without_park = [
            obs("bus station", 0.3),
            obs("supermarket", 0.4),
            obs("school", 2.0),
        ];
        let with_park = [
            obs("bus station", 0.3),
            obs("supermarket", 0.4),
            obs("park", 0.5),
            obs("school", 2.0),
        ];

        let base = community_access_score(&without_park, &rules());
        let bonused = community_access_score(&with_park, &rules());

        // Three buckets inside the 0.6 km urban anchor radius earn +5 on
        // top of the park bucket's own contribution.
        let park_contribution = 0.20 * (100.0 * (1.0 - 0.5 / 1.0));
        let expected = round2(base.score + park_contribution + ANCHOR_BONUS);
        assert!((bonused.score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_access_score_capped_at_100() {
        let assessment = community_access_score(
            &[
                obs("bus station", 0.0),
                obs("supermarket", 0.0),
                obs("park", 0.0),
                obs("school", 0.0),
            ],
            &rules(),
        );
        assert_eq!(assessment.score, 100.0);
    }

    #[test]
    fn test_nearest_wins_per_bucket() {
        let assessment = community_access_score(
            &[obs("supermarket", 0.7), obs("grocery store", 0.2)],
            &rules(),
        );
        assert_eq!(assessment.context, AreaContext::Urban);
        // Only the 0.2 km shop counts for the shop bucket
        let expected = 0.25 * (100.0 * (1.0 - 0.2 / 0.8));
        assert!((assessment.score - round2(expected)).abs() < 1e-9);
    }

    #[test]
    fn test_breadth_score_penalizes_missing_categories() {
        // One supermarket at 2.5 km: 100 * (1 - 2.5/5) = 50, divided by
        // the 5 searched categories.
        let score = amenity_breadth_score(&[obs("supermarket", 2.5)], &rules());
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_breadth_score_all_categories() {
        let score = amenity_breadth_score(
            &[
                obs("supermarket", 0.0),
                obs("school", 0.0),
                obs("bus_station", 0.0),
                obs("train station", 0.0),
                obs("park", 0.0),
            ],
            &rules(),
        );
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_breadth_score_caps_distance() {
        // Beyond the flat 5 km radius a match adds nothing
        let score = amenity_breadth_score(&[obs("park", 12.0)], &rules());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_breadth_score_uses_configured_category_list() {
        let mut narrowed = rules();
        narrowed.searched_types = vec!["park".to_string(), "supermarket".to_string()];

        // 1 of 2 searched categories found: 100 * (1 - 1.0/5.0) / 2
        let score = amenity_breadth_score(&[obs("park", 1.0)], &narrowed);
        assert_eq!(score, 40.0);
    }

    #[test]
    fn test_breadth_score_empty_category_list() {
        let mut empty = rules();
        empty.searched_types.clear();
        assert_eq!(amenity_breadth_score(&[obs("park", 1.0)], &empty), 0.0);
    }
}
