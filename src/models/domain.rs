use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Fully enriched property record, ready for scoring
///
/// Enrichment (vision-model renovation estimates, amenity lookups, air
/// quality, market pricing) happens upstream; the engine only consumes
/// the resulting numeric signals.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PropertyRecord {
    #[validate(length(min = 1, message = "property_id must not be empty"))]
    pub property_id: String,
    #[serde(default)]
    pub address: Option<String>,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: f64,
    #[validate(range(exclusive_min = 0.0, message = "listed_price must be positive"))]
    pub listed_price: f64,
    /// External estimate of the after-repair value at this location
    #[validate(range(exclusive_min = 0.0, message = "market_average_price must be positive"))]
    pub market_average_price: f64,
    /// Floor area in square meters, when the listing provides it
    #[serde(default)]
    pub area_m2: Option<f64>,
    /// Building Energy Rating grade (G worst to A1 best); placeholders
    /// like "BER_PENDING" are treated as unknown
    #[serde(default)]
    pub ber: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub amenities: Vec<AmenityObservation>,
    #[validate(nested)]
    pub renovation: RenovationEstimate,
    pub air_quality: AirQualitySignal,
}

/// A nearby amenity discovered during enrichment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AmenityObservation {
    pub name: String,
    /// Free-form category string, e.g. "supermarket" or "bus station"
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(range(min = 0.0, message = "distance_km must be non-negative"))]
    pub distance_km: f64,
}

/// A single renovation line item from the vision-model estimate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenovationItem {
    pub item: String,
    pub reason: String,
    pub material: String,
    pub amount: String,
    /// Numeric cost, parsed from the currency string at ingestion
    #[serde(alias = "price")]
    #[validate(range(min = 0.0, message = "item cost must be non-negative"))]
    pub cost: f64,
}

/// Full renovation estimate for a property
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_estimate_total))]
pub struct RenovationEstimate {
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<RenovationItem>,
    #[validate(range(min = 0.0, message = "total_cost must be non-negative"))]
    pub total_cost: f64,
}

/// total_cost is supplied upstream but must agree with the line items
fn validate_estimate_total(estimate: &RenovationEstimate) -> Result<(), ValidationError> {
    let item_sum: f64 = estimate.items.iter().map(|item| item.cost).sum();
    if (estimate.total_cost - item_sum).abs() > 0.01 {
        let mut error = ValidationError::new("total_cost_mismatch");
        error.message = Some("total_cost does not equal the sum of item costs".into());
        return Err(error);
    }
    Ok(())
}

/// Air-quality signal: the current index plus a recent historical window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualitySignal {
    pub current_index: f64,
    #[serde(default)]
    pub historical_indexes: Vec<f64>,
}

/// A government grant applied to the project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAward {
    pub name: String,
    pub amount: f64,
    pub reason: String,
}

/// Calculated financial metrics for the renovation project
///
/// Values are rounded to 2 decimal places at this boundary; intermediate
/// arithmetic keeps full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub labour_cost: f64,
    pub total_project_cost: f64,
    pub grants: Vec<GrantAward>,
    pub total_grant_amount: f64,
    pub net_project_cost: f64,
    pub after_repair_value: f64,
    pub potential_profit: f64,
    pub roi_percent: f64,
}

/// Whether a property sits in a dense or sparse amenity context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaContext {
    Urban,
    Rural,
}

/// A property with every component score and its final rank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProperty {
    #[serde(flatten)]
    pub property: PropertyRecord,
    pub investment: InvestmentAnalysis,
    pub area_context: AreaContext,
    pub price_attractiveness_score: f64,
    pub renovation_cost_score: f64,
    /// Breadth-weighted amenity score used in the viability weighting
    pub amenity_score: f64,
    pub air_quality_score: f64,
    /// Proximity-quality access score (advisory, distinct from amenity_score)
    pub community_access_score: f64,
    pub community_cluster_score: f64,
    pub community_value_score: f64,
    pub sustainability_score: f64,
    pub viability_score: f64,
    /// 1-based position after the stable descending sort
    pub rank: usize,
}

/// Weights for the primary viability score
///
/// Must sum to 1.0; the engine rejects any other configuration before
/// scoring a single property.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub price_attractiveness: f64,
    pub renovation_cost: f64,
    pub amenity_score: f64,
    pub air_quality: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.price_attractiveness + self.renovation_cost + self.amenity_score + self.air_quality
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            price_attractiveness: 0.40,
            renovation_cost: 0.30,
            amenity_score: 0.20,
            air_quality: 0.10,
        }
    }
}

/// A keyword-triggered grant, matched against renovation item text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantKeyword {
    pub keyword: String,
    pub amount: f64,
}

/// Grant amounts and labour assumptions for the investment calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentRules {
    #[serde(default = "default_labour_pct")]
    pub labour_cost_percentage: f64,
    #[serde(default = "default_vacant_grant")]
    pub vacant_property_grant: f64,
    #[serde(default = "default_derelict_top_up")]
    pub derelict_top_up_grant: f64,
    /// Ordered list so grant output stays deterministic across runs
    #[serde(default = "default_grant_keywords")]
    pub grant_keywords: Vec<GrantKeyword>,
}

fn default_labour_pct() -> f64 {
    0.80
}
fn default_vacant_grant() -> f64 {
    50_000.0
}
fn default_derelict_top_up() -> f64 {
    20_000.0
}

fn default_grant_keywords() -> Vec<GrantKeyword> {
    [
        ("insulation", 1_500.0),
        ("windows", 3_000.0),
        ("heating", 700.0),
        ("boiler", 2_000.0),
        ("solar", 2_100.0),
    ]
    .into_iter()
    .map(|(keyword, amount)| GrantKeyword {
        keyword: keyword.to_string(),
        amount,
    })
    .collect()
}

impl Default for InvestmentRules {
    fn default() -> Self {
        Self {
            labour_cost_percentage: default_labour_pct(),
            vacant_property_grant: default_vacant_grant(),
            derelict_top_up_grant: default_derelict_top_up(),
            grant_keywords: default_grant_keywords(),
        }
    }
}

/// Per-bucket distance caps and anchor radius for one area context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextCaps {
    pub transport_km: f64,
    pub shop_km: f64,
    pub park_km: f64,
    pub school_km: f64,
    /// Matches inside this radius count toward the anchor bonus
    pub anchor_radius_km: f64,
}

/// Distance model for the amenity access and breadth scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenityRules {
    /// Tight caps for dense areas
    #[serde(default = "default_urban_caps")]
    pub urban: ContextCaps,
    /// Wider caps where everything is a drive away
    #[serde(default = "default_rural_caps")]
    pub rural: ContextCaps,
    /// Observations closer than this suggest a built-up area
    #[serde(default = "default_rural_threshold_km")]
    pub rural_threshold_km: f64,
    /// Category list the enrichment layer searches for the breadth metric
    #[serde(default = "default_searched_types")]
    pub searched_types: Vec<String>,
    /// Flat search radius for the breadth metric
    #[serde(default = "default_breadth_radius_km")]
    pub breadth_radius_km: f64,
}

fn default_urban_caps() -> ContextCaps {
    ContextCaps {
        transport_km: 1.2,
        shop_km: 0.8,
        park_km: 1.0,
        school_km: 1.5,
        anchor_radius_km: 0.6,
    }
}
fn default_rural_caps() -> ContextCaps {
    ContextCaps {
        transport_km: 3.0,
        shop_km: 5.0,
        park_km: 5.0,
        school_km: 6.0,
        anchor_radius_km: 1.2,
    }
}
fn default_rural_threshold_km() -> f64 {
    1.5
}
fn default_searched_types() -> Vec<String> {
    ["supermarket", "school", "bus station", "train station", "park"]
        .into_iter()
        .map(str::to_string)
        .collect()
}
fn default_breadth_radius_km() -> f64 {
    5.0
}

impl Default for AmenityRules {
    fn default() -> Self {
        Self {
            urban: default_urban_caps(),
            rural: default_rural_caps(),
            rural_threshold_km: default_rural_threshold_km(),
            searched_types: default_searched_types(),
            breadth_radius_km: default_breadth_radius_km(),
        }
    }
}

/// Peer-count radius for the cluster density score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRules {
    #[serde(default = "default_cluster_radius_km")]
    pub radius_km: f64,
}

fn default_cluster_radius_km() -> f64 {
    0.3
}

impl Default for ClusterRules {
    fn default() -> Self {
        Self {
            radius_km: default_cluster_radius_km(),
        }
    }
}

/// Weights and constants for the sustainability composite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SustainabilityRules {
    /// Renovation target grade for the energy-improvement model
    #[serde(default = "default_target_grade")]
    pub target_grade: String,
    #[serde(default = "default_carbon_weight")]
    pub carbon_weight: f64,
    #[serde(default = "default_energy_weight")]
    pub energy_weight: f64,
    #[serde(default = "default_access_weight")]
    pub access_weight: f64,
    /// Emissions delta of renovating vs. rebuilding, kg CO2 per m²
    #[serde(default = "default_carbon_savings_per_m2")]
    pub carbon_savings_per_m2: f64,
    /// Reference ceiling the savings are scaled against, kg CO2
    #[serde(default = "default_carbon_reference_kg")]
    pub carbon_reference_kg: f64,
    /// Assumed floor area when the listing does not provide a usable one
    #[serde(default = "default_area_m2")]
    pub default_area_m2: f64,
}

fn default_target_grade() -> String {
    "C1".to_string()
}
fn default_carbon_weight() -> f64 {
    0.40
}
fn default_energy_weight() -> f64 {
    0.35
}
fn default_access_weight() -> f64 {
    0.25
}
fn default_carbon_savings_per_m2() -> f64 {
    350.0
}
fn default_carbon_reference_kg() -> f64 {
    35_000.0
}
fn default_area_m2() -> f64 {
    100.0
}

impl Default for SustainabilityRules {
    fn default() -> Self {
        Self {
            target_grade: default_target_grade(),
            carbon_weight: default_carbon_weight(),
            energy_weight: default_energy_weight(),
            access_weight: default_access_weight(),
            carbon_savings_per_m2: default_carbon_savings_per_m2(),
            carbon_reference_kg: default_carbon_reference_kg(),
            default_area_m2: default_area_m2(),
        }
    }
}

/// Complete engine configuration: weights plus the per-scorer rule sets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub amenity: AmenityRules,
    #[serde(default)]
    pub cluster: ClusterRules,
    #[serde(default)]
    pub sustainability: SustainabilityRules,
    #[serde(default)]
    pub investment: InvestmentRules,
}
