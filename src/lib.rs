//! Revive Engine - viability scoring and ranking for Community Revive
//!
//! This library scores real-estate renovation candidates by combining
//! heterogeneous signals (price, renovation cost, amenity access, air
//! quality, energy rating, spatial clustering) into one comparable
//! viability score per property, then ranks the batch deterministically.

pub mod config;
pub mod core;
pub mod models;

// Re-export commonly used types
pub use crate::core::{distance::haversine_distance, EngineError, ViabilityEngine};
pub use crate::models::{
    EngineConfig, PropertyRecord, RankingReport, RejectedProperty, ScoredProperty, ScoringWeights,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let engine = ViabilityEngine::new(EngineConfig::default());
        assert!(engine.is_ok());
    }
}
