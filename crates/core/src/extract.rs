//! Rule-based attribute extraction from free-text device descriptions.
//!
//! Every rule chain here is an ordered list evaluated in declared order, and
//! the order is part of the contract: the first match wins. `BRANDS` is the
//! canonical brand list; when a description mentions two brands, the one
//! earlier in this list is selected regardless of where it appears in the
//! text.

use tracing::debug;

use crate::domain::device::{Condition, DeviceAttributes};

/// Canonical brand tokens, in precedence order.
const BRANDS: &[&str] = &[
    "apple", "samsung", "sony", "lg", "google", "huawei", "xiaomi", "oneplus", "microsoft",
    "nokia", "motorola", "asus", "acer", "dell", "hp", "lenovo", "toshiba", "msi", "nintendo",
    "xbox", "playstation", "oppo", "vivo", "realme", "honor",
];

/// Tier qualifiers for the iPhone family, longest qualifier first. Only
/// consulted when no generation number matched.
const IPHONE_QUALIFIERS: &[(&str, &str)] = &[
    ("pro max", "iPhone Pro Max"),
    ("pro", "iPhone Pro"),
    ("max", "iPhone Max"),
    ("plus", "iPhone Plus"),
    ("mini", "iPhone Mini"),
];

/// Galaxy series tokens, S line before Note before A line.
const GALAXY_SERIES: &[(&str, &str)] = &[
    ("s21", " S21"),
    ("s20", " S20"),
    ("s10", " S10"),
    ("s9", " S9"),
    ("s8", " S8"),
    ("note 20", " Note 20"),
    ("note 10", " Note 10"),
    ("note 9", " Note 9"),
    ("a52", " A52"),
    ("a51", " A51"),
    ("a50", " A50"),
];

/// Condition keyword table, evaluated top to bottom. The plain `used`
/// keyword maps to `Good`; the `Used` enum value is reserved for
/// descriptions with no condition signal at all.
const CONDITION_KEYWORDS: &[(Condition, &[&str])] = &[
    (Condition::New, &["new", "brand new", "sealed", "unopened"]),
    (Condition::LikeNew, &["like new", "mint", "mint condition", "perfect condition"]),
    (Condition::Excellent, &["excellent", "excellent condition", "barely used"]),
    (Condition::Good, &["good", "good condition", "used"]),
    (Condition::Fair, &["fair", "fair condition", "worn"]),
    (Condition::Poor, &["poor", "poor condition", "damaged", "broken"]),
];

/// Extract structured device attributes from a free-text description.
///
/// Total over all inputs: fields that find no match stay empty, the condition
/// defaults to `Used`, and no input can make this fail.
///
/// Model precedence for the iPhone family is a documented contract: a
/// generation number (`iphone 3` through `iphone 14`) wins outright, and the
/// tier-qualifier chain (`pro max` before `pro` before `max` before `plus`
/// before `mini`) only runs when no generation matched.
pub fn extract(text: &str) -> DeviceAttributes {
    let text = text.to_lowercase();
    let mut attributes = DeviceAttributes::default();

    for brand in BRANDS {
        if text.contains(brand) {
            attributes.brand = title_case(brand);
            break;
        }
    }

    if text.contains("iphone") {
        attributes.brand = "Apple".to_string();

        for generation in 3..=14u32 {
            if text.contains(&format!("iphone {generation}"))
                || text.contains(&format!("iphone{generation}"))
            {
                attributes.model = format!("iPhone {generation}");
                break;
            }
        }

        if attributes.model.is_empty() {
            for (qualifier, model) in IPHONE_QUALIFIERS {
                if text.contains(qualifier) {
                    attributes.model = (*model).to_string();
                    break;
                }
            }
        }

        if attributes.model.is_empty() {
            attributes.model = "iPhone".to_string();
        }
    } else if text.contains("galaxy") && attributes.brand == "Samsung" {
        attributes.model = "Galaxy".to_string();
        for (token, series) in GALAXY_SERIES {
            if text.contains(token) {
                attributes.model.push_str(series);
                break;
            }
        }
    }

    attributes.specs = scan_storage(&text);
    attributes.condition = scan_condition(&text);

    debug!(
        brand = %attributes.brand,
        model = %attributes.model,
        specs = %attributes.specs,
        condition = attributes.condition.label(),
        "extracted device attributes"
    );

    attributes
}

/// Scan for a storage spec like `256gb` or `1 tb`.
///
/// The token carrying the unit contributes its own digits when it has any;
/// otherwise the digits of the preceding token are used. The last match while
/// scanning left to right wins (later occurrences overwrite earlier ones),
/// which is a documented quirk of the extractor.
fn scan_storage(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut specs = String::new();

    for (index, word) in words.iter().enumerate() {
        let unit = if word.contains("tb") {
            "tb"
        } else if word.contains("gb") {
            "gb"
        } else {
            continue;
        };

        let own_digits: String = word.chars().filter(char::is_ascii_digit).collect();
        if !own_digits.is_empty() {
            specs = format!("{own_digits}{unit}");
            continue;
        }

        let Some(previous) = index.checked_sub(1).map(|i| words[i]) else {
            continue;
        };

        if !previous.is_empty() && previous.chars().all(|c| c.is_ascii_digit()) {
            specs = format!("{previous}{word}");
        } else {
            let digits: String = previous.chars().filter(char::is_ascii_digit).collect();
            if !digits.is_empty() {
                specs = format!("{digits}{word}");
            }
        }
    }

    specs
}

fn scan_condition(text: &str) -> Condition {
    for (condition, keywords) in CONDITION_KEYWORDS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            return *condition;
        }
    }

    Condition::Used
}

pub(crate) fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_numbered_iphone_with_storage_and_condition() {
        let attributes = extract("iPhone 13 Pro 256GB excellent condition");

        assert_eq!(attributes.brand, "Apple");
        // Generation number beats the qualifier chain by documented precedence.
        assert_eq!(attributes.model, "iPhone 13");
        assert_eq!(attributes.specs, "256gb");
        assert_eq!(attributes.condition, Condition::Excellent);
    }

    #[test]
    fn iphone_without_generation_takes_longest_qualifier() {
        let attributes = extract("selling my iphone pro max, barely used");
        assert_eq!(attributes.model, "iPhone Pro Max");
        assert_eq!(attributes.condition, Condition::Excellent);
    }

    #[test]
    fn brand_list_order_beats_text_order() {
        // Sony appears first in the text, but samsung is earlier in the
        // canonical list.
        let attributes = extract("trading a sony headset for a samsung phone");
        assert_eq!(attributes.brand, "Samsung");
    }

    #[test]
    fn galaxy_model_requires_samsung_brand() {
        let attributes = extract("samsung galaxy s21 128gb good condition");
        assert_eq!(attributes.model, "Galaxy S21");
        assert_eq!(attributes.specs, "128gb");

        let no_brand = extract("galaxy themed phone case");
        assert_eq!(no_brand.model, "");
    }

    #[test]
    fn storage_takes_digits_from_preceding_token() {
        let attributes = extract("lenovo laptop with 512 gb ssd");
        assert_eq!(attributes.specs, "512gb");
    }

    #[test]
    fn last_storage_match_wins() {
        let attributes = extract("upgraded from 64gb to 256gb");
        assert_eq!(attributes.specs, "256gb");
    }

    #[test]
    fn empty_text_yields_defaults() {
        let attributes = extract("");
        assert_eq!(attributes.brand, "");
        assert_eq!(attributes.model, "");
        assert_eq!(attributes.specs, "");
        assert_eq!(attributes.condition, Condition::Used);
    }

    #[test]
    fn worn_description_maps_to_fair() {
        let attributes = extract("dell monitor, quite worn");
        assert_eq!(attributes.brand, "Dell");
        assert_eq!(attributes.condition, Condition::Fair);
    }
}
