//! Point-estimate computation: base price, multiplier chain, fallback path.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::device::DeviceAttributes;
use crate::domain::estimate::{BasisStep, MarketSnapshot, PriceEstimate, PriceFactor};
use crate::errors::EstimateError;
use crate::pricing::factors;

/// Estimate the resale price of a device.
///
/// The base price is the market average when one is supplied and positive;
/// otherwise the fixed fallback (device-type base, brand multiplier, bounded
/// random variation). Condition, region, and specs multipliers are then
/// applied and the result is rounded to the whole currency unit.
///
/// Never fails: a computation fault degrades to the fixed fallback price
/// alone, so every call produces a finite number (possibly 0 for fully-empty
/// input).
pub fn estimate<R: Rng>(
    attributes: &DeviceAttributes,
    market: Option<&MarketSnapshot>,
    device_type: &str,
    region: &str,
    rng: &mut R,
) -> PriceEstimate {
    info!(
        brand = %attributes.brand,
        model = %attributes.model,
        device_type,
        region,
        "estimating resale price"
    );

    match checked_estimate(attributes, market, device_type, region, rng) {
        Ok(estimate) => {
            info!(amount = estimate.amount, "estimated resale price");
            estimate
        }
        Err(error) => {
            warn!(%error, "estimate computation failed, using fixed fallback price");
            let amount = fallback_price(device_type, &attributes.brand, rng).round();
            PriceEstimate {
                amount,
                basis: vec![BasisStep {
                    factor: PriceFactor::FallbackBase,
                    detail: format!("fixed fallback for {device_type}"),
                    applied: amount,
                }],
            }
        }
    }
}

fn checked_estimate<R: Rng>(
    attributes: &DeviceAttributes,
    market: Option<&MarketSnapshot>,
    device_type: &str,
    region: &str,
    rng: &mut R,
) -> Result<PriceEstimate, EstimateError> {
    let mut basis = Vec::new();

    let base = match market_average(market) {
        Ok(average) => {
            basis.push(BasisStep {
                factor: PriceFactor::MarketAverage,
                detail: "blended market average".to_string(),
                applied: average,
            });
            average
        }
        Err(error) => {
            debug!(%error, "no usable market data, deriving base from factor tables");
            let fallback = fallback_price(device_type, &attributes.brand, rng);
            basis.push(BasisStep {
                factor: PriceFactor::FallbackBase,
                detail: format!("{device_type} base with brand multiplier and variation"),
                applied: fallback,
            });
            fallback
        }
    };

    let condition = factors::condition_multiplier(attributes.condition);
    basis.push(BasisStep {
        factor: PriceFactor::Condition,
        detail: attributes.condition.label().to_string(),
        applied: condition,
    });

    let region_multiplier = factors::region_multiplier(region);
    basis.push(BasisStep {
        factor: PriceFactor::Region,
        detail: region.trim().to_lowercase(),
        applied: region_multiplier,
    });

    let specs = specs_multiplier(&attributes.specs);
    basis.push(BasisStep {
        factor: PriceFactor::Specs,
        detail: attributes.specs.clone(),
        applied: specs,
    });

    let amount = base * condition * region_multiplier * specs;
    if !amount.is_finite() || amount < 0.0 {
        return Err(EstimateError::Computation(format!(
            "estimate from base {base} is not a usable price"
        )));
    }

    Ok(PriceEstimate { amount: amount.round(), basis })
}

fn market_average(market: Option<&MarketSnapshot>) -> Result<f64, EstimateError> {
    match market {
        Some(snapshot) if snapshot.average_price > 0.0 => Ok(snapshot.average_price),
        Some(_) => Err(EstimateError::MissingInput("market average price is zero".to_string())),
        None => Err(EstimateError::MissingInput("no market data supplied".to_string())),
    }
}

/// Fixed-price fallback: device-type base times brand multiplier times a
/// uniform variation in [0.9, 1.1). Intentionally non-deterministic; the
/// variation stands in for model-level spread the tables cannot capture.
pub fn fallback_price<R: Rng>(device_type: &str, brand: &str, rng: &mut R) -> f64 {
    let base = factors::device_base_price(device_type);
    let multiplier = factors::brand_multiplier(brand);
    let variation = rng.gen_range(0.9..1.1);
    base * multiplier * variation
}

/// Specs-derived multiplier over free-form specs text.
///
/// Five signal categories compose by multiplication: premium keywords,
/// storage size, RAM size, CPU tier, and an age penalty. Within a category
/// only the highest-priority match applies; the branches run largest
/// capacity / highest tier first, so text naming both `tb` and `512gb`
/// scores the same as `tb` alone.
pub fn specs_multiplier(specs: &str) -> f64 {
    if specs.trim().is_empty() {
        return 1.0;
    }

    let specs = specs.to_lowercase();
    let mut multiplier = 1.0;

    const PREMIUM_KEYWORDS: &[&str] = &["premium", "pro", "flagship", "high-end", "gaming"];
    if PREMIUM_KEYWORDS.iter().any(|keyword| specs.contains(keyword)) {
        multiplier *= 1.15;
    }

    if specs.contains("tb") {
        multiplier *= 1.2;
    } else if specs.contains("512gb") || specs.contains("500gb") {
        multiplier *= 1.1;
    } else if specs.contains("256gb") || specs.contains("250gb") {
        multiplier *= 1.05;
    }

    if specs.contains("32gb ram") || specs.contains("32 gb ram") {
        multiplier *= 1.2;
    } else if specs.contains("16gb ram") || specs.contains("16 gb ram") {
        multiplier *= 1.1;
    } else if specs.contains("8gb ram") || specs.contains("8 gb ram") {
        multiplier *= 1.05;
    }

    if specs.contains("i9") || specs.contains("ryzen 9") {
        multiplier *= 1.2;
    } else if specs.contains("i7") || specs.contains("ryzen 7") {
        multiplier *= 1.1;
    } else if specs.contains("i5") || specs.contains("ryzen 5") {
        multiplier *= 1.05;
    }

    const AGE_KEYWORDS: &[&str] = &["old", "outdated", "2015", "2016", "2017"];
    if AGE_KEYWORDS.iter().any(|keyword| specs.contains(keyword)) {
        multiplier *= 0.8;
    }

    multiplier
}
