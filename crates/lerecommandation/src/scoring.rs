// Additive compatibility scoring

use lecatalogue::{Category, Difficulty, EndpointDescriptor};
use serde::{Deserialize, Serialize};

/// Model-name tokens that mark a hosted model family
pub const CLOUD_MODEL_TOKENS: &[&str] = &["gpt", "claude", "gemini"];

/// Model-name tokens that mark an open-weights model family
pub const LOCAL_MODEL_TOKENS: &[&str] = &["llama", "mistral", "alpaca"];

/// Path fragment of OpenAI-compatible APIs
pub const OPENAI_COMPAT_PATH: &str = "/v1/";

/// Points awarded per signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Supported model substring matches the requested model
    pub model_match: f64,
    /// Easy setup
    pub easy: f64,
    /// Medium setup
    pub medium: f64,
    /// Any other setup difficulty
    pub hard: f64,
    /// OpenAI-compatible endpoint path
    pub openai_compat: f64,
    /// Streaming support
    pub streaming: f64,
    /// Cloud endpoint asked for a hosted model family
    pub cloud_family: f64,
    /// Local endpoint asked for an open-weights model family
    pub local_family: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            model_match: 50.0,
            easy: 30.0,
            medium: 20.0,
            hard: 10.0,
            openai_compat: 20.0,
            streaming: 10.0,
            cloud_family: 40.0,
            local_family: 30.0,
        }
    }
}

/// Per-signal points behind one score
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Model substring match
    pub model_match: f64,
    /// Difficulty bonus
    pub difficulty: f64,
    /// OpenAI-compatible path
    pub openai_compat: f64,
    /// Streaming support
    pub streaming: f64,
    /// Category / model family affinity
    pub family: f64,
}

impl ScoreBreakdown {
    /// Sum of all components
    pub fn total(&self) -> f64 {
        self.model_match + self.difficulty + self.openai_compat + self.streaming + self.family
    }
}

/// Scores one descriptor against a requested model name
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    weights: ScoreWeights,
}

impl CompatibilityScorer {
    /// Create a scorer with the default point table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom weights
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Active point table
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score `descriptor` for `requested_model`; case-insensitive, never negative
    pub fn score(&self, descriptor: &EndpointDescriptor, requested_model: &str) -> f64 {
        self.breakdown(descriptor, requested_model).total()
    }

    /// Component points for `descriptor` against `requested_model`
    pub fn breakdown(&self, descriptor: &EndpointDescriptor, requested_model: &str) -> ScoreBreakdown {
        let w = &self.weights;
        let model = requested_model.to_lowercase();

        let model_match = if matches_lowercased(descriptor, &model) {
            w.model_match
        } else {
            0.0
        };

        let difficulty = match descriptor.difficulty {
            Difficulty::Easy => w.easy,
            Difficulty::Medium => w.medium,
            Difficulty::Hard => w.hard,
        };

        let openai_compat = if descriptor
            .default_endpoint_path
            .to_lowercase()
            .contains(OPENAI_COMPAT_PATH)
        {
            w.openai_compat
        } else {
            0.0
        };

        let streaming = if descriptor.supports_streaming {
            w.streaming
        } else {
            0.0
        };

        let family = match descriptor.category {
            Category::Cloud if contains_any(&model, CLOUD_MODEL_TOKENS) => w.cloud_family,
            Category::Local if contains_any(&model, LOCAL_MODEL_TOKENS) => w.local_family,
            _ => 0.0,
        };

        ScoreBreakdown {
            model_match,
            difficulty,
            openai_compat,
            streaming,
            family,
        }
    }
}

/// Score with the default point table
pub fn score(descriptor: &EndpointDescriptor, requested_model: &str) -> f64 {
    CompatibilityScorer::new().score(descriptor, requested_model)
}

/// True if any supported model substring and the requested model contain one
/// another, ignoring case. Blank entries never match.
pub fn models_match(descriptor: &EndpointDescriptor, requested_model: &str) -> bool {
    matches_lowercased(descriptor, &requested_model.to_lowercase())
}

fn matches_lowercased(descriptor: &EndpointDescriptor, model: &str) -> bool {
    if model.trim().is_empty() {
        return false;
    }
    descriptor
        .models_supported
        .iter()
        .map(|m| m.trim().to_lowercase())
        .filter(|m| !m.is_empty())
        .any(|m| model.contains(&m) || m.contains(model))
}

fn contains_any(model: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|t| model.contains(t))
}
