// Core algorithm exports
pub mod amenities;
pub mod cluster;
pub mod distance;
pub mod engine;
pub mod investment;
pub mod scoring;
pub mod sustainability;

pub use amenities::{amenity_breadth_score, community_access_score, AccessAssessment};
pub use cluster::cluster_density_scores;
pub use distance::haversine_distance;
pub use engine::{EngineError, ViabilityEngine};
pub use investment::InvestmentCalculator;
pub use scoring::{
    air_quality_score, price_attractiveness_score, renovation_cost_score, viability_score,
};
pub use sustainability::{carbon_savings_score, energy_improvement_potential, sustainability_score};
