//! Template-driven cross-sell recommendations.

use rand::Rng;
use tracing::debug;

use crate::domain::estimate::Recommendation;
use crate::extract::title_case;
use crate::pricing::round_cents;

const UPGRADE_SUFFIXES: &[&str] = &["Pro", "Plus", "Premium", "Ultra", "Max", "Next Gen"];
const SIMILAR_PREFIXES: &[&str] = &["A", "X", "Z", "Pro", "Elite", "Prime"];
const SIMILAR_NUMBERS: &[&str] = &["5", "7", "9", "10", "20", "500", "900"];

const PREMIUM_BRANDS: &[&str] = &["Apple", "Samsung", "Sony", "Google", "Microsoft"];
const MID_TIER_BRANDS: &[&str] = &["Dell", "HP", "Lenovo", "Asus", "Acer", "LG"];
const BUDGET_BRANDS: &[&str] = &["Xiaomi", "Realme", "TCL", "Huawei"];

const ACCESSORIES: &[(&str, &[&str])] = &[
    ("smartphone", &["Fast Charger", "Premium Case", "Screen Protector", "Power Bank", "Wireless Earbuds"]),
    ("laptop", &["Cooling Pad", "Carrying Case", "Wireless Mouse", "USB-C Hub", "External SSD"]),
    ("tablet", &["Smart Cover", "Stylus Pen", "Screen Protector", "Keyboard Case", "Stand"]),
    ("desktop", &["Mechanical Keyboard", "Gaming Mouse", "Large Monitor", "External SSD", "Webcam"]),
    ("camera", &["Extra Battery", "Memory Card", "Camera Bag", "Tripod", "Lens Cleaning Kit"]),
    ("headphones", &["Carry Case", "Replacement Ear Pads", "Headphone Stand", "Audio Cable", "Battery Pack"]),
    ("smartwatch", &["Extra Band", "Charging Dock", "Screen Protector", "Wireless Earbuds", "Band Adapter"]),
];
const GENERIC_ACCESSORIES: &[&str] = &["Premium Accessory", "Protective Case", "Cleaning Kit"];

/// Generate 2-3 product suggestions for a device.
///
/// Dispatches on a closed category set (smartphone, laptop, generic
/// catch-all), each with a fixed template trio: an upgraded model, a
/// same-tier alternative brand, and an accessory. Names are synthesized by
/// string composition, not looked up; with no input price each template
/// falls back to a fixed literal.
pub fn recommend<R: Rng>(
    device_type: &str,
    brand: &str,
    model: &str,
    price: Option<f64>,
    rng: &mut R,
) -> Vec<Recommendation> {
    debug!(device_type, brand, model, "generating recommendations");

    let scaled = |multiplier: f64, default: f64| {
        price.map(|value| round_cents(value * multiplier)).unwrap_or(default)
    };

    match device_type.trim().to_lowercase().as_str() {
        "smartphone" => vec![
            Recommendation {
                title: format!("{brand} {}", upgraded_model(model, rng)),
                description: "Upgraded version with a better camera and faster processor"
                    .to_string(),
                price: scaled(1.3, 499.99),
                image_url: placeholder_image("Upgrade+Pick"),
                link: search_link("smartphone"),
            },
            Recommendation {
                title: format!("{} {}", alternative_brand(brand, rng), similar_model(rng)),
                description: "Similar specifications with a different brand experience"
                    .to_string(),
                price: scaled(1.1, 449.99),
                image_url: placeholder_image("Alternative"),
                link: search_link("smartphone"),
            },
            Recommendation {
                title: format!("{brand} {}", accessory(device_type, rng)),
                description: "Perfect accessory for your device".to_string(),
                price: scaled(0.2, 49.99),
                image_url: placeholder_image("Accessory"),
                link: search_link("phone accessories"),
            },
        ],
        "laptop" => vec![
            Recommendation {
                title: format!("{brand} {}", upgraded_model(model, rng)),
                description: "Upgraded model with a faster processor and more RAM".to_string(),
                price: scaled(1.4, 1299.99),
                image_url: placeholder_image("Upgrade+Pick"),
                link: search_link("laptop"),
            },
            Recommendation {
                title: format!("{} {}", alternative_brand(brand, rng), similar_model(rng)),
                description: "Similar performance with a different design philosophy".to_string(),
                price: scaled(1.1, 1099.99),
                image_url: placeholder_image("Alternative"),
                link: search_link("laptop"),
            },
            Recommendation {
                title: format!("{brand} {}", accessory(device_type, rng)),
                description: "Essential accessory for your device".to_string(),
                price: scaled(0.15, 79.99),
                image_url: placeholder_image("Accessory"),
                link: search_link("laptop accessories"),
            },
        ],
        other => {
            let category = title_case(other);
            vec![
                Recommendation {
                    title: format!("Premium {category}"),
                    description: "High-end model with excellent performance".to_string(),
                    price: scaled(1.5, 499.99),
                    image_url: placeholder_image("Premium"),
                    link: search_link(other),
                },
                Recommendation {
                    title: format!("Budget-friendly {category}"),
                    description: "Great value for money with essential features".to_string(),
                    price: scaled(0.7, 299.99),
                    image_url: placeholder_image("Budget"),
                    link: search_link(&format!("budget {other}")),
                },
                Recommendation {
                    title: format!("{category} Accessory Kit"),
                    description: "Complete set of accessories for your device".to_string(),
                    price: scaled(0.2, 59.99),
                    image_url: placeholder_image("Accessory+Kit"),
                    link: search_link(&format!("{other} accessories")),
                },
            ]
        }
    }
}

/// Upgraded model name: append " 2" when the model already carries a tier
/// suffix, otherwise append a random one.
fn upgraded_model<R: Rng>(model: &str, rng: &mut R) -> String {
    if UPGRADE_SUFFIXES.iter().any(|suffix| model.contains(suffix)) {
        return format!("{model} 2");
    }
    format!("{model} {}", choose(UPGRADE_SUFFIXES, rng))
}

/// A plausible competitor model code, composed from fixed parts.
fn similar_model<R: Rng>(rng: &mut R) -> String {
    format!("{}{}", choose(SIMILAR_PREFIXES, rng), choose(SIMILAR_NUMBERS, rng))
}

/// A different brand from the same market tier as the input brand.
///
/// Unknown brands draw from the budget tier; an emptied peer group falls
/// back to the mid-tier list. The input brand is excluded
/// case-insensitively, so the alternative never mirrors the device itself.
fn alternative_brand<R: Rng>(brand: &str, rng: &mut R) -> String {
    let tier = if PREMIUM_BRANDS.iter().any(|peer| peer.eq_ignore_ascii_case(brand)) {
        PREMIUM_BRANDS
    } else if MID_TIER_BRANDS.iter().any(|peer| peer.eq_ignore_ascii_case(brand)) {
        MID_TIER_BRANDS
    } else {
        BUDGET_BRANDS
    };

    let peers: Vec<&str> =
        tier.iter().copied().filter(|peer| !peer.eq_ignore_ascii_case(brand)).collect();
    let peers = if peers.is_empty() { MID_TIER_BRANDS.to_vec() } else { peers };

    peers[rng.gen_range(0..peers.len())].to_string()
}

fn accessory<R: Rng>(device_type: &str, rng: &mut R) -> &'static str {
    let device_type = device_type.trim().to_lowercase();
    let list = ACCESSORIES
        .iter()
        .find(|(key, _)| *key == device_type)
        .map(|(_, list)| *list)
        .unwrap_or(GENERIC_ACCESSORIES);
    choose(list, rng)
}

fn choose<R: Rng>(options: &'static [&'static str], rng: &mut R) -> &'static str {
    options[rng.gen_range(0..options.len())]
}

fn search_link(query: &str) -> String {
    let encoded = query.split_whitespace().collect::<Vec<_>>().join("+");
    format!("https://www.amazon.com/s?k={encoded}")
}

fn placeholder_image(label: &str) -> String {
    format!("https://via.placeholder.com/300x300?text={label}")
}
