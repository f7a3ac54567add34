use std::cmp::Ordering;

use thiserror::Error;
use tracing::{debug, info};
use validator::Validate;

use crate::core::{
    amenities::{amenity_breadth_score, community_access_score},
    cluster::cluster_density_scores,
    investment::InvestmentCalculator,
    scoring::{
        air_quality_score, price_attractiveness_score, renovation_cost_score, round2,
        viability_score,
    },
    sustainability::sustainability_score,
};
use crate::models::{
    EngineConfig, PropertyRecord, RankingReport, RejectedProperty, ScoredProperty,
};

/// Weights may be off-unity by no more than this
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Fatal pre-flight configuration errors
///
/// Per-property data problems are not errors at this level; they land in
/// the report's rejection list instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scoring weights must sum to 1.0, got {sum}")]
    InvalidWeights { sum: f64 },

    #[error("cluster radius must be a positive distance, got {radius_km}")]
    InvalidClusterRadius { radius_km: f64 },
}

/// The viability scoring and ranking engine
///
/// Stateless and re-entrant: scoring the same batch twice produces
/// bit-identical output. Construction validates the configuration so a
/// bad weight set fails before any property is scored.
#[derive(Debug, Clone)]
pub struct ViabilityEngine {
    config: EngineConfig,
    investment: InvestmentCalculator,
}

impl ViabilityEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let sum = config.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(EngineError::InvalidWeights { sum });
        }
        if !(config.cluster.radius_km > 0.0) {
            return Err(EngineError::InvalidClusterRadius {
                radius_km: config.cluster.radius_km,
            });
        }

        let investment = InvestmentCalculator::new(config.investment.clone());
        Ok(Self { config, investment })
    }

    pub fn with_default_config() -> Self {
        // The default configuration is known-valid
        Self {
            investment: InvestmentCalculator::new(EngineConfig::default().investment),
            config: EngineConfig::default(),
        }
    }

    /// Execute the full coercion, validation, and ranking pipeline
    ///
    /// Each raw value is coerced into a `PropertyRecord` independently;
    /// records that fail coercion or validation are reported by index
    /// and never abort the batch.
    pub fn run(&self, raw_properties: Vec<serde_json::Value>) -> RankingReport {
        let mut records = Vec::with_capacity(raw_properties.len());
        let mut rejections = Vec::new();

        for (index, value) in raw_properties.into_iter().enumerate() {
            // Salvage the id for the rejection entry even when the rest
            // of the record is malformed
            let raw_id = value
                .get("property_id")
                .and_then(|id| id.as_str())
                .map(str::to_string);

            match serde_json::from_value::<PropertyRecord>(value) {
                Ok(record) => match record.validate() {
                    Ok(()) => records.push(record),
                    Err(errors) => rejections.push(RejectedProperty {
                        property_index: index,
                        property_id: Some(record.property_id),
                        reason: errors.to_string(),
                    }),
                },
                Err(err) => rejections.push(RejectedProperty {
                    property_index: index,
                    property_id: raw_id,
                    reason: format!("invalid record shape: {err}"),
                }),
            }
        }

        self.rank(records, rejections)
    }

    /// Score and rank already-typed records
    ///
    /// Validation still applies per record so a batch with one bad entry
    /// degrades to partial success, same as `run`.
    pub fn score_batch(&self, records: Vec<PropertyRecord>) -> RankingReport {
        let mut valid = Vec::with_capacity(records.len());
        let mut rejections = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            match record.validate() {
                Ok(()) => valid.push(record),
                Err(errors) => rejections.push(RejectedProperty {
                    property_index: index,
                    property_id: Some(record.property_id),
                    reason: errors.to_string(),
                }),
            }
        }

        self.rank(valid, rejections)
    }

    fn rank(
        &self,
        records: Vec<PropertyRecord>,
        rejections: Vec<RejectedProperty>,
    ) -> RankingReport {
        // Cluster scoring needs the whole batch's coordinates before any
        // property can be finalized
        let coordinates: Vec<(f64, f64)> = records
            .iter()
            .map(|record| (record.latitude, record.longitude))
            .collect();
        let cluster_scores = cluster_density_scores(&coordinates, self.config.cluster.radius_km);

        let mut scored: Vec<ScoredProperty> = records
            .into_iter()
            .zip(cluster_scores)
            .map(|(record, cluster_score)| self.score_property(record, cluster_score))
            .collect();

        // Stable descending sort: equal viability keeps input order
        scored.sort_by(|a, b| {
            b.viability_score
                .partial_cmp(&a.viability_score)
                .unwrap_or(Ordering::Equal)
        });
        for (position, property) in scored.iter_mut().enumerate() {
            property.rank = position + 1;
        }

        info!(
            ranked = scored.len(),
            rejected = rejections.len(),
            "batch scoring complete"
        );

        RankingReport {
            total_processed: scored.len(),
            total_failed_validation: rejections.len(),
            ranked_properties: scored,
            validation_errors: rejections,
        }
    }

    fn score_property(&self, record: PropertyRecord, community_cluster_score: f64) -> ScoredProperty {
        let access = community_access_score(&record.amenities, &self.config.amenity);
        let amenity_score = amenity_breadth_score(&record.amenities, &self.config.amenity);

        let price_attractiveness =
            price_attractiveness_score(record.listed_price, record.market_average_price);
        let renovation_cost =
            renovation_cost_score(record.renovation.total_cost, record.listed_price);
        let air_quality = air_quality_score(&record.air_quality);

        let sustainability = sustainability_score(
            record.ber.as_deref(),
            record.area_m2,
            access.score,
            &self.config.sustainability,
        );
        let community_value_score = round2((access.score + community_cluster_score) / 2.0);

        let viability = viability_score(
            price_attractiveness,
            renovation_cost,
            amenity_score,
            air_quality,
            &self.config.weights,
        );

        let investment = self.investment.calculate(
            record.listed_price,
            &record.renovation,
            record.market_average_price,
        );

        debug!(
            property_id = %record.property_id,
            viability_score = viability,
            community_value_score,
            "scored property"
        );

        ScoredProperty {
            property: record,
            investment,
            area_context: access.context,
            price_attractiveness_score: price_attractiveness,
            renovation_cost_score: renovation_cost,
            amenity_score,
            air_quality_score: air_quality,
            community_access_score: access.score,
            community_cluster_score,
            community_value_score,
            sustainability_score: sustainability,
            viability_score: viability,
            rank: 0,
        }
    }
}

impl Default for ViabilityEngine {
    fn default() -> Self {
        Self::with_default_config()
    }
}
