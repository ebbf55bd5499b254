//! Static price factor tables.
//!
//! Pure const data, constructed once and never mutated. Tables are ordered
//! `(key, value)` slices rather than maps so first-match precedence stays a
//! visible contract. Every lookup lower-cases its key and falls back to a
//! documented default; an unseen brand, device type, or region can never make
//! a lookup fail.

use crate::domain::device::Condition;

/// Base price for device types missing from `DEVICE_BASE_PRICES`.
pub const DEFAULT_DEVICE_BASE: f64 = 200.0;

/// Base price for brands missing from `LISTING_BRAND_BASES` (range path).
pub const DEFAULT_LISTING_BASE: f64 = 100.0;

const DEVICE_BASE_PRICES: &[(&str, f64)] = &[
    ("smartphone", 300.0),
    ("laptop", 800.0),
    ("tablet", 250.0),
    ("desktop", 700.0),
    ("monitor", 200.0),
    ("tv", 500.0),
    ("camera", 400.0),
    ("headphones", 100.0),
    ("smartwatch", 150.0),
    ("speaker", 120.0),
];

const BRAND_MULTIPLIERS: &[(&str, f64)] = &[
    ("apple", 1.8),
    ("samsung", 1.5),
    ("google", 1.6),
    ("sony", 1.4),
    ("microsoft", 1.5),
    ("dell", 1.2),
    ("hp", 1.1),
    ("lenovo", 1.1),
    ("asus", 1.1),
    ("acer", 0.9),
    ("lg", 1.2),
    ("bose", 1.6),
    ("canon", 1.3),
    ("nikon", 1.3),
];

/// Brand-specific base prices for the listing/range path.
const LISTING_BRAND_BASES: &[(&str, f64)] = &[
    ("apple", 500.0),
    ("samsung", 400.0),
    ("google", 350.0),
    ("sony", 300.0),
    ("lg", 250.0),
    ("microsoft", 400.0),
    ("dell", 300.0),
    ("hp", 250.0),
    ("lenovo", 280.0),
    ("asus", 270.0),
    ("acer", 230.0),
    ("huawei", 220.0),
    ("oneplus", 300.0),
    ("motorola", 180.0),
    ("nokia", 150.0),
];

/// Storage buckets, largest capacity first; the first token found in the
/// specs text wins. Multipliers increase monotonically with capacity.
const STORAGE_BUCKETS: &[(&str, f64)] = &[
    ("1tb", 1.5),
    ("512gb", 1.3),
    ("256gb", 1.15),
    ("128gb", 1.0),
    ("64gb", 0.85),
    ("32gb", 0.7),
];

const REGION_MULTIPLIERS: &[(&str, f64)] = &[
    ("us", 1.0),
    ("ca", 1.05),
    ("uk", 1.1),
    ("eu", 1.1),
    ("au", 1.15),
    ("jp", 1.0),
    ("kr", 0.9),
    ("cn", 0.85),
    ("in", 0.8),
    ("br", 1.2),
];

/// iPhone generation base prices; both spaced and collapsed spellings match.
const IPHONE_GENERATION_BASES: &[(&[&str], f64)] = &[
    (&["iphone 14", "iphone14"], 800.0),
    (&["iphone 13", "iphone13"], 700.0),
    (&["iphone 12", "iphone12"], 600.0),
    (&["iphone 11", "iphone11"], 500.0),
    (&["iphone x", "iphonex"], 400.0),
];

/// Tier qualifier multipliers, longest qualifier first.
const IPHONE_QUALIFIER_MULTIPLIERS: &[(&str, f64)] = &[
    ("pro max", 1.4),
    ("pro", 1.25),
    ("max", 1.2),
    ("plus", 1.15),
    ("mini", 0.8),
];

const GALAXY_SERIES_BASES: &[(&str, f64)] = &[
    ("s21", 650.0),
    ("s20", 550.0),
    ("s10", 400.0),
    ("note 20", 700.0),
    ("note 10", 550.0),
];

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    let key = key.trim().to_lowercase();
    table.iter().find(|(name, _)| *name == key).map(|(_, value)| *value)
}

pub fn device_base_price(device_type: &str) -> f64 {
    lookup(DEVICE_BASE_PRICES, device_type).unwrap_or(DEFAULT_DEVICE_BASE)
}

/// Brand multiplier for the estimator's fallback path; 1.0 for unknown brands.
pub fn brand_multiplier(brand: &str) -> f64 {
    lookup(BRAND_MULTIPLIERS, brand).unwrap_or(1.0)
}

pub fn listing_brand_base(brand: &str) -> f64 {
    lookup(LISTING_BRAND_BASES, brand).unwrap_or(DEFAULT_LISTING_BASE)
}

/// First storage bucket found in the specs text; 1.0 when none match.
pub fn storage_multiplier(specs: &str) -> f64 {
    let specs = specs.to_lowercase();
    STORAGE_BUCKETS
        .iter()
        .find(|(token, _)| specs.contains(token))
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1.0)
}

/// Condition multiplier for the point-estimator path.
///
/// This table intentionally differs from `listing_condition_multiplier` and
/// the two must not be unified: callers may depend on either entry point.
/// There are no dedicated `Excellent`/`Used` entries here; both resolve to
/// the path's neutral 0.7.
pub fn condition_multiplier(condition: Condition) -> f64 {
    match condition {
        Condition::New => 1.0,
        Condition::LikeNew => 0.9,
        Condition::Good => 0.75,
        Condition::Fair => 0.6,
        Condition::Poor => 0.4,
        Condition::Excellent | Condition::Used => 0.7,
    }
}

/// Condition multiplier for the listing/range path.
///
/// Steeper than the estimator table at the low end and the only table with an
/// `Excellent` entry. `Used` (no condition signal) resolves to the good tier.
pub fn listing_condition_multiplier(condition: Condition) -> f64 {
    match condition {
        Condition::New => 1.0,
        Condition::LikeNew => 0.9,
        Condition::Excellent => 0.8,
        Condition::Good => 0.7,
        Condition::Fair => 0.5,
        Condition::Poor => 0.3,
        Condition::Used => 0.7,
    }
}

/// Region multiplier over a closed set of country codes; anything
/// unrecognized prices as US (1.0).
pub fn region_multiplier(region: &str) -> f64 {
    lookup(REGION_MULTIPLIERS, region).unwrap_or(1.0)
}

/// Re-base a running listing price on the model tier, when recognized.
///
/// A matched iPhone generation replaces the base outright and tier qualifiers
/// multiply on top (first match only); qualifiers still apply to the incoming
/// base when no generation matched. Galaxy series prices replace the base and
/// carry no qualifiers.
pub fn apply_model_tier(base: f64, brand: &str, model: &str) -> f64 {
    let model = model.to_lowercase();
    let brand = brand.to_lowercase();

    if model.contains("iphone") {
        let mut price = base;
        for (spellings, generation_base) in IPHONE_GENERATION_BASES {
            if spellings.iter().any(|spelling| model.contains(spelling)) {
                price = *generation_base;
                break;
            }
        }
        for (qualifier, multiplier) in IPHONE_QUALIFIER_MULTIPLIERS {
            if model.contains(qualifier) {
                price *= multiplier;
                break;
            }
        }
        price
    } else if model.contains("galaxy") && brand.contains("samsung") {
        GALAXY_SERIES_BASES
            .iter()
            .find(|(token, _)| model.contains(token))
            .map(|(_, series_base)| *series_base)
            .unwrap_or(base)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_resolve_to_documented_defaults() {
        assert_eq!(device_base_price("fax machine"), DEFAULT_DEVICE_BASE);
        assert_eq!(brand_multiplier("commodore"), 1.0);
        assert_eq!(listing_brand_base("commodore"), DEFAULT_LISTING_BASE);
        assert_eq!(region_multiplier("atlantis"), 1.0);
        assert_eq!(storage_multiplier("no storage mentioned"), 1.0);
    }

    #[test]
    fn lookups_are_case_insensitive() {
        assert_eq!(device_base_price("Laptop"), 800.0);
        assert_eq!(brand_multiplier(" Dell "), 1.2);
        assert_eq!(region_multiplier("UK"), 1.1);
    }

    #[test]
    fn storage_multipliers_grow_with_capacity() {
        let buckets = ["32gb", "64gb", "128gb", "256gb", "512gb", "1tb"];
        let multipliers: Vec<f64> = buckets.iter().map(|b| storage_multiplier(b)).collect();
        assert!(multipliers.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn condition_tables_stay_distinct() {
        assert_eq!(condition_multiplier(Condition::Good), 0.75);
        assert_eq!(listing_condition_multiplier(Condition::Good), 0.7);
        assert_eq!(condition_multiplier(Condition::Excellent), 0.7);
        assert_eq!(listing_condition_multiplier(Condition::Excellent), 0.8);
        assert_eq!(condition_multiplier(Condition::Poor), 0.4);
        assert_eq!(listing_condition_multiplier(Condition::Poor), 0.3);
    }

    #[test]
    fn iphone_generation_replaces_base_and_qualifier_multiplies() {
        let price = apply_model_tier(500.0, "Apple", "iPhone 13 Pro");
        assert!((price - 700.0 * 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn iphone_qualifier_applies_to_brand_base_without_generation() {
        let price = apply_model_tier(500.0, "Apple", "iPhone Mini");
        assert!((price - 500.0 * 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn galaxy_series_requires_samsung() {
        assert_eq!(apply_model_tier(400.0, "Samsung", "Galaxy S21"), 650.0);
        assert_eq!(apply_model_tier(400.0, "Sony", "Galaxy S21"), 400.0);
    }
}
