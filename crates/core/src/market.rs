//! Simulated market sampling.
//!
//! Nothing here touches the network: per-source figures are arithmetic
//! around factor-table base prices, with bounded random jitter standing in
//! for market variance. All randomness flows through an injected generator,
//! so callers own reproducibility; outputs are not expected to repeat
//! between calls.

use std::ops::RangeInclusive;

use rand::Rng;
use tracing::debug;

use crate::domain::device::DeviceAttributes;
use crate::domain::estimate::{MarketSample, MarketSnapshot, PriceRange, SourceEstimate};
use crate::pricing::{factors, round_cents};

/// Ordered source labels assigned positionally to range price points.
pub const RANGE_SOURCES: &[&str] = &["Amazon", "eBay", "BestBuy", "Swappa", "OfferUp"];

/// Default number of jittered points in a price range.
pub const RANGE_SAMPLES: usize = 5;

/// Jitter width of flat range points.
const RANGE_VARIATION: f64 = 0.2;

const EBAY_VARIATION: f64 = 0.2;
const EBAY_FLOOR: f64 = 10.0;
const EBAY_LISTINGS: RangeInclusive<u32> = 5..=50;

/// Amazon listings skew higher than eBay's used market.
const AMAZON_SKEW: f64 = 1.1;
const AMAZON_VARIATION: f64 = 0.15;
const AMAZON_FLOOR: f64 = 15.0;
const AMAZON_LISTINGS: RangeInclusive<u32> = 3..=30;

/// Blend weights favor Amazon for new-condition reliability.
const EBAY_WEIGHT: f64 = 0.4;
const AMAZON_WEIGHT: f64 = 0.6;

fn simulate_source<R: Rng>(
    source: &str,
    base: f64,
    variation: f64,
    floor: f64,
    listings: RangeInclusive<u32>,
    rng: &mut R,
) -> SourceEstimate {
    let band = base * variation;
    let min_price = (base - band).max(floor);
    let max_price = base + band;

    SourceEstimate {
        source: source.to_string(),
        min_price: round_cents(min_price),
        max_price: round_cents(max_price),
        avg_price: round_cents((min_price + max_price) / 2.0),
        listings: rng.gen_range(listings),
    }
}

/// Simulate the two comparable sources for a device.
pub fn source_estimates<R: Rng>(
    device_type: &str,
    brand: &str,
    rng: &mut R,
) -> (SourceEstimate, SourceEstimate) {
    let base = factors::device_base_price(device_type) * factors::brand_multiplier(brand);
    let ebay = simulate_source("eBay", base, EBAY_VARIATION, EBAY_FLOOR, EBAY_LISTINGS, rng);
    let amazon = simulate_source(
        "Amazon",
        base * AMAZON_SKEW,
        AMAZON_VARIATION,
        AMAZON_FLOOR,
        AMAZON_LISTINGS,
        rng,
    );
    (ebay, amazon)
}

/// Fixed-weight blend of the two source averages.
///
/// A source with an exactly-zero average produced no data, and the blend
/// degenerates to the other source's average unweighted.
pub fn blended_average(ebay: &SourceEstimate, amazon: &SourceEstimate) -> f64 {
    if ebay.avg_price == 0.0 {
        return amazon.avg_price;
    }
    if amazon.avg_price == 0.0 {
        return ebay.avg_price;
    }
    round_cents(ebay.avg_price * EBAY_WEIGHT + amazon.avg_price * AMAZON_WEIGHT)
}

/// Simulate a full market snapshot for the estimator.
pub fn snapshot<R: Rng>(
    device_type: &str,
    brand: &str,
    model: &str,
    rng: &mut R,
) -> MarketSnapshot {
    debug!(device_type, brand, model, "simulating market sources");
    let (ebay, amazon) = source_estimates(device_type, brand, rng);
    let average_price = blended_average(&ebay, &amazon);
    MarketSnapshot { sources: vec![ebay, amazon], average_price }
}

/// Jittered price points around a base, rounded to cents.
pub fn price_points<R: Rng>(base: f64, count: usize, rng: &mut R) -> Vec<f64> {
    let band = base * RANGE_VARIATION;
    (0..count).map(|_| round_cents(base + rng.gen_range(-band..=band))).collect()
}

/// Merged sampling contract: per-source estimates, their blended average,
/// and a flat range of jittered points around the unskewed base with
/// positional source labels.
pub fn sample<R: Rng>(device_type: &str, brand: &str, model: &str, rng: &mut R) -> MarketSample {
    debug!(device_type, brand, model, "sampling simulated market");
    let (ebay, amazon) = source_estimates(device_type, brand, rng);
    let blended = blended_average(&ebay, &amazon);

    let base = factors::device_base_price(device_type) * factors::brand_multiplier(brand);
    let prices = price_points(base, RANGE_SAMPLES, rng);
    let sources =
        RANGE_SOURCES.iter().take(RANGE_SAMPLES).map(|source| source.to_string()).collect();

    MarketSample { prices, sources, per_source: vec![ebay, amazon], blended_average: blended }
}

/// Listing-path base price for the range display.
///
/// Brand base price, re-based on the model tier when recognized, then storage
/// bucket and the listing-path condition multiplier.
pub fn listing_price(attributes: &DeviceAttributes) -> f64 {
    let base = factors::listing_brand_base(&attributes.brand);
    let base = factors::apply_model_tier(base, &attributes.brand, &attributes.model);
    let base = base * factors::storage_multiplier(&attributes.specs);
    base * factors::listing_condition_multiplier(attributes.condition)
}

/// Price range for display: `count` jittered points around the listing
/// price, labels assigned positionally from `RANGE_SOURCES`.
pub fn price_range<R: Rng>(
    attributes: &DeviceAttributes,
    count: usize,
    rng: &mut R,
) -> PriceRange {
    let base = listing_price(attributes);
    debug!(base, count, "sampling listing price range");

    let count = count.min(RANGE_SOURCES.len());
    PriceRange {
        prices: price_points(base, count, rng),
        sources: RANGE_SOURCES.iter().take(count).map(|source| source.to_string()).collect(),
    }
}
