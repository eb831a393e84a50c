// Suggestion ranking over the endpoint catalog

use crate::scoring::{models_match, CompatibilityScorer, ScoreBreakdown};
use lecatalogue::{Category, Difficulty, EndpointCatalog, EndpointDescriptor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Discount applied to candidates that did not match the requested model
pub const FALLBACK_DISCOUNT: f64 = 0.7;

/// Which endpoint categories a request considers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// Cloud endpoints only
    Cloud,
    /// Local endpoints only
    Local,
    /// Every endpoint
    #[default]
    All,
}

impl CategoryFilter {
    /// Parse filter from CLI/config string.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cloud" => Some(Self::Cloud),
            "local" => Some(Self::Local),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    /// True if descriptors of `category` pass this filter
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Cloud => category == Category::Cloud,
            Self::Local => category == Category::Local,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Cloud => Self::Cloud,
            Category::Local => Self::Local,
        }
    }
}

/// Parameters of one recommendation request
#[derive(Debug, Clone, Copy, Default)]
pub struct RankRequest<'a> {
    /// Model name the user picked
    pub model: &'a str,
    /// Category filter
    pub filter: CategoryFilter,
    /// Server key of the provider the user already selected, if any
    pub selected_provider: Option<&'a str>,
    /// Keep at most this many candidates
    pub limit: Option<usize>,
}

impl<'a> RankRequest<'a> {
    /// Request for `model` over every category
    pub fn new(model: &'a str) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    /// Set the category filter
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the selected provider hint
    pub fn with_provider(mut self, provider: &'a str) -> Self {
        self.selected_provider = Some(provider);
        self
    }

    /// Cap the number of returned candidates
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One suggested endpoint with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Suggested endpoint
    pub descriptor: EndpointDescriptor,

    /// Ranking score; fallback candidates carry the discounted value
    pub compatibility_score: f64,

    /// Undiscounted per-signal points
    pub breakdown: ScoreBreakdown,

    /// Descriptor flag or curated membership
    pub is_recommended: bool,

    /// Added without matching the requested model
    pub is_fallback: bool,

    /// Display hint for a top candidate that is not recommended
    pub is_best_match: bool,
}

impl ScoredCandidate {
    /// Server key of the suggested endpoint
    pub fn server_key(&self) -> &str {
        &self.descriptor.server_key
    }
}

/// Builds and orders the candidate list for a request
#[derive(Debug, Clone, Default)]
pub struct SuggestionRanker {
    scorer: CompatibilityScorer,
}

impl SuggestionRanker {
    /// Create a ranker with the default scorer
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom scorer
    pub fn with_scorer(mut self, scorer: CompatibilityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Rank `catalog` for `model` within `filter`
    pub fn rank(
        &self,
        catalog: &EndpointCatalog,
        model: &str,
        filter: CategoryFilter,
    ) -> Vec<ScoredCandidate> {
        self.rank_with(catalog, &RankRequest::new(model).with_filter(filter))
    }

    /// Rank `catalog` for a full request
    ///
    /// Primary candidates match the model directly and keep their full score.
    /// Remaining easy or recommended (flagged or curated) descriptors are
    /// appended as fallbacks at a discount. An empty model name yields no candidates.
    pub fn rank_with(&self, catalog: &EndpointCatalog, request: &RankRequest<'_>) -> Vec<ScoredCandidate> {
        if request.model.trim().is_empty() {
            debug!("Empty model name, no suggestions");
            return Vec::new();
        }

        let primary_filter = self.primary_scope(catalog, request);

        let mut candidates = Vec::new();
        let mut fallback_pool = Vec::new();

        for descriptor in catalog.iter() {
            if primary_filter.admits(descriptor.category) && models_match(descriptor, request.model) {
                candidates.push(self.candidate(catalog, descriptor, request.model, false));
            } else {
                fallback_pool.push(descriptor);
            }
        }
        let primary_count = candidates.len();

        for descriptor in fallback_pool {
            if !request.filter.admits(descriptor.category) {
                continue;
            }
            if descriptor.difficulty == Difficulty::Easy || catalog.is_recommended(descriptor) {
                candidates.push(self.candidate(catalog, descriptor, request.model, true));
            }
        }

        debug!(
            "Ranking '{}': {} primary, {} fallback candidates",
            request.model,
            primary_count,
            candidates.len() - primary_count
        );

        candidates.sort_by(compare_candidates);

        if let Some(first) = candidates.first_mut() {
            if !first.is_recommended {
                first.is_best_match = true;
            }
        }

        if let Some(limit) = request.limit {
            candidates.truncate(limit);
        }

        candidates
    }

    /// Category scope of the primary set
    ///
    /// With no explicit filter, a known selected provider narrows the primary
    /// set to that provider's own category.
    fn primary_scope(&self, catalog: &EndpointCatalog, request: &RankRequest<'_>) -> CategoryFilter {
        if request.filter != CategoryFilter::All {
            return request.filter;
        }
        match request.selected_provider.map(|key| catalog.get(key)) {
            Some(Ok(provider)) => {
                debug!(
                    "Narrowing primary suggestions to {} ({})",
                    provider.category, provider.server_key
                );
                provider.category.into()
            }
            Some(Err(err)) => {
                debug!("Ignoring provider hint: {}", err);
                CategoryFilter::All
            }
            None => CategoryFilter::All,
        }
    }

    fn candidate(
        &self,
        catalog: &EndpointCatalog,
        descriptor: &EndpointDescriptor,
        model: &str,
        is_fallback: bool,
    ) -> ScoredCandidate {
        let breakdown = self.scorer.breakdown(descriptor, model);
        let mut compatibility_score = breakdown.total();
        if is_fallback {
            compatibility_score *= FALLBACK_DISCOUNT;
        }
        trace!(
            "{}: score {:.1} (fallback: {})",
            descriptor.server_key,
            compatibility_score,
            is_fallback
        );

        ScoredCandidate {
            descriptor: descriptor.clone(),
            compatibility_score,
            breakdown,
            is_recommended: catalog.is_recommended(descriptor),
            is_fallback,
            is_best_match: false,
        }
    }
}

/// Rank with the default scorer
pub fn rank(catalog: &EndpointCatalog, model: &str, filter: CategoryFilter) -> Vec<ScoredCandidate> {
    SuggestionRanker::new().rank(catalog, model, filter)
}

/// Recommended first, then higher score, then cloud before local
fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.is_recommended
        .cmp(&a.is_recommended)
        .then_with(|| b.compatibility_score.total_cmp(&a.compatibility_score))
        .then_with(|| category_order(a).cmp(&category_order(b)))
}

fn category_order(candidate: &ScoredCandidate) -> u8 {
    match candidate.descriptor.category {
        Category::Cloud => 0,
        Category::Local => 1,
    }
}
