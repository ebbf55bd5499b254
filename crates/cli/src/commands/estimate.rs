use chrono::{DateTime, Utc};
use clap::Args;
use rand::thread_rng;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use revalue_core::config::{AppConfig, LoadOptions};
use revalue_core::{
    estimate, extract, market, recommend, Condition, DeviceAttributes, MarketSnapshot,
    PriceEstimate, PriceRange, Recommendation,
};

use super::CommandResult;

#[derive(Debug, Args)]
pub struct EstimateArgs {
    #[arg(long, help = "Free-text device description, parsed when structured fields are absent")]
    pub text: Option<String>,
    #[arg(long, default_value = "smartphone", help = "Device type (smartphone, laptop, tablet, ...)")]
    pub device_type: String,
    #[arg(long, help = "Brand name")]
    pub brand: Option<String>,
    #[arg(long, help = "Model name")]
    pub model: Option<String>,
    #[arg(long, help = "Free-form specs, e.g. \"256gb, 8gb ram\"")]
    pub specs: Option<String>,
    #[arg(long, help = "Condition (new, like_new, excellent, good, fair, poor, used)")]
    pub condition: Option<String>,
    #[arg(long, help = "Region code (us, ca, uk, eu, au, jp, kr, cn, in, br)")]
    pub region: Option<String>,
    #[arg(long, help = "Emit machine-readable JSON output")]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct EstimateReport {
    correlation_id: Uuid,
    created_at: DateTime<Utc>,
    device_type: String,
    region: String,
    attributes: DeviceAttributes,
    market: MarketSnapshot,
    estimate: PriceEstimate,
    range: PriceRange,
    recommendations: Vec<Recommendation>,
}

pub fn run(args: EstimateArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult { exit_code: 2, output: format!("config validation failed: {error}") }
        }
    };
    super::init_logging(&config);

    let attributes = resolve_attributes(&args);
    let region = args.region.clone().unwrap_or_else(|| config.pricing.default_region.clone());
    let mut rng = thread_rng();

    let snapshot = market::snapshot(&args.device_type, &attributes.brand, &attributes.model, &mut rng);
    let estimate = estimate(&attributes, Some(&snapshot), &args.device_type, &region, &mut rng);
    let range = market::price_range(&attributes, config.pricing.range_samples, &mut rng);
    let recommendations = recommend(
        &args.device_type,
        &attributes.brand,
        &attributes.model,
        Some(estimate.amount),
        &mut rng,
    );

    let report = EstimateReport {
        correlation_id: Uuid::new_v4(),
        created_at: Utc::now(),
        device_type: args.device_type,
        region,
        attributes,
        market: snapshot,
        estimate,
        range,
        recommendations,
    };

    let output = if args.json { render_json(&report) } else { render_human(&report) };
    CommandResult { exit_code: 0, output }
}

/// Structured fields win over free text: the extractor only runs when none
/// of brand/model/specs/condition were supplied, mirroring the form flow.
fn resolve_attributes(args: &EstimateArgs) -> DeviceAttributes {
    let structured = args.brand.is_some()
        || args.model.is_some()
        || args.specs.is_some()
        || args.condition.is_some();

    if !structured {
        if let Some(text) = &args.text {
            return extract(text);
        }
    }

    let condition = match args.condition.as_deref() {
        Some(value) => value.parse().unwrap_or_else(|error| {
            warn!(%error, "unrecognized condition, defaulting to used");
            Condition::Used
        }),
        None => Condition::Used,
    };

    DeviceAttributes {
        brand: args.brand.clone().unwrap_or_default(),
        model: args.model.clone().unwrap_or_default(),
        specs: args.specs.clone().unwrap_or_default(),
        condition,
    }
}

fn render_json(report: &EstimateReport) -> String {
    serde_json::to_string_pretty(report)
        .unwrap_or_else(|error| format!("{{\"error\":\"serialization failed: {error}\"}}"))
}

fn render_human(report: &EstimateReport) -> String {
    let mut lines = vec![
        format!(
            "estimate {} ({})",
            report.correlation_id,
            report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        format!(
            "- device: {} {} {} [{}], region {}",
            report.attributes.brand,
            report.attributes.model,
            report.attributes.specs,
            report.attributes.condition.label(),
            report.region
        ),
        format!("- estimated price: ${:.0}", report.estimate.amount),
        format!(
            "- market average: ${:.2} across {} sources",
            report.market.average_price,
            report.market.sources.len()
        ),
    ];

    let range: Vec<String> = report
        .range
        .sources
        .iter()
        .zip(&report.range.prices)
        .map(|(source, price)| format!("{source} ${price:.2}"))
        .collect();
    lines.push(format!("- price range: {}", range.join(", ")));

    lines.push("- basis:".to_string());
    for step in &report.estimate.basis {
        lines.push(format!("  - {:?} ({}) = {:.2}", step.factor, step.detail, step.applied));
    }

    lines.push("- recommendations:".to_string());
    for recommendation in &report.recommendations {
        lines.push(format!(
            "  - {} (${:.2}): {}",
            recommendation.title, recommendation.price, recommendation.description
        ));
    }

    lines.join("\n")
}
