// Model exports
pub mod domain;
pub mod report;

pub use domain::{
    AirQualitySignal, AmenityObservation, AmenityRules, AreaContext, ClusterRules, ContextCaps,
    EngineConfig, GrantAward, GrantKeyword, InvestmentAnalysis, InvestmentRules, PropertyRecord,
    RenovationEstimate, RenovationItem, ScoredProperty, ScoringWeights, SustainabilityRules,
};
pub use report::{RankingReport, RejectedProperty};
