pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod market;
pub mod pricing;
pub mod recommend;

pub use domain::device::{Condition, DeviceAttributes};
pub use domain::estimate::{
    BasisStep, MarketSample, MarketSnapshot, PriceEstimate, PriceFactor, PriceRange,
    Recommendation, SourceEstimate,
};
pub use errors::EstimateError;
pub use extract::extract;
pub use market::{price_range, sample};
pub use pricing::estimator::{estimate, fallback_price, specs_multiplier};
pub use recommend::recommend;
