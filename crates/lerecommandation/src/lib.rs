// lerecommandation - Endpoint Recommendation Engine
//
// *La Recommandation* (The Recommendation) - Scores catalog endpoints against a
// requested model, ranks suggestions, and formats/validates connection URLs

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod ranking;
pub mod scoring;
pub mod url;

pub use ranking::{rank, CategoryFilter, RankRequest, ScoredCandidate, SuggestionRanker};
pub use scoring::{models_match, score, CompatibilityScorer, ScoreBreakdown, ScoreWeights};
pub use url::{format_url, validate, EndpointIssue, EndpointSettings, EndpointValidation};

/// Recommendation library initialization
pub fn init() {
    let _ = tracing::subscriber::set_default(tracing::subscriber::NoSubscriber::default());
}
