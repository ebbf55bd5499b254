use serde::{Deserialize, Serialize};

/// Which influence contributed a step of an estimate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFactor {
    MarketAverage,
    FallbackBase,
    Condition,
    Region,
    Specs,
}

/// One applied step in the estimate breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisStep {
    pub factor: PriceFactor,
    pub detail: String,
    pub applied: f64,
}

/// A point estimate in whole USD plus the breakdown of multipliers that
/// produced it. Produced once per request; never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub amount: f64,
    pub basis: Vec<BasisStep>,
}

/// Simulated (or externally supplied) per-source market figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceEstimate {
    pub source: String,
    pub min_price: f64,
    pub max_price: f64,
    pub avg_price: f64,
    pub listings: u32,
}

/// The opaque market-data shape the estimator consumes. A real fetcher can
/// substitute its own figures here; a zero or missing average degrades the
/// estimator to its fallback path instead of blocking.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub sources: Vec<SourceEstimate>,
    pub average_price: f64,
}

/// Flat jittered price points with positional source labels, for the
/// "price range" display. Regenerated on every call by design.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub prices: Vec<f64>,
    pub sources: Vec<String>,
}

/// Merged sampling output: per-source estimates, their blended average, and
/// a flat range of jittered points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSample {
    pub prices: Vec<f64>,
    pub sources: Vec<String>,
    pub per_source: Vec<SourceEstimate>,
    pub blended_average: f64,
}

/// A cross-sell product suggestion with a synthesized link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub link: String,
}
