use std::env;
use std::sync::{Mutex, OnceLock};

use revalue_cli::commands::{config, estimate, extract};
use serde_json::Value;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn with_env(vars: &[(&str, &str)], body: impl FnOnce()) {
    let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env lock");

    for (key, value) in vars {
        env::set_var(key, value);
    }

    body();

    for (key, _) in vars {
        env::remove_var(key);
    }
    for key in [
        "REVALUE_PRICING_DEFAULT_REGION",
        "REVALUE_PRICING_RANGE_SAMPLES",
        "REVALUE_LOGGING_LEVEL",
        "REVALUE_LOG_LEVEL",
        "REVALUE_LOGGING_FORMAT",
        "REVALUE_LOG_FORMAT",
    ] {
        env::remove_var(key);
    }
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

#[test]
fn estimate_from_free_text_returns_full_report() {
    with_env(&[], || {
        let result = estimate::run(estimate::EstimateArgs {
            text: Some("iPhone 13 Pro 256GB excellent condition".to_string()),
            device_type: "smartphone".to_string(),
            brand: None,
            model: None,
            specs: None,
            condition: None,
            region: None,
            json: true,
        });
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["attributes"]["brand"], "Apple");
        assert_eq!(payload["attributes"]["model"], "iPhone 13");
        assert_eq!(payload["attributes"]["specs"], "256gb");
        assert_eq!(payload["attributes"]["condition"], "excellent");
        assert_eq!(payload["region"], "us");

        let amount = payload["estimate"]["amount"].as_f64().expect("numeric amount");
        assert!(amount > 0.0);

        assert_eq!(payload["recommendations"].as_array().map(Vec::len), Some(3));
        assert_eq!(payload["range"]["prices"].as_array().map(Vec::len), Some(5));
    });
}

#[test]
fn structured_fields_bypass_the_extractor() {
    with_env(&[], || {
        let result = estimate::run(estimate::EstimateArgs {
            text: Some("this text must be ignored".to_string()),
            device_type: "laptop".to_string(),
            brand: Some("Dell".to_string()),
            model: Some("XPS 15".to_string()),
            specs: Some("512gb".to_string()),
            condition: Some("good".to_string()),
            region: Some("uk".to_string()),
            json: true,
        });
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["attributes"]["brand"], "Dell");
        assert_eq!(payload["attributes"]["condition"], "good");
        assert_eq!(payload["region"], "uk");
    });
}

#[test]
fn unrecognized_condition_defaults_to_used() {
    with_env(&[], || {
        let result = estimate::run(estimate::EstimateArgs {
            text: None,
            device_type: "smartphone".to_string(),
            brand: Some("Apple".to_string()),
            model: None,
            specs: None,
            condition: Some("pristine".to_string()),
            region: None,
            json: true,
        });
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["attributes"]["condition"], "used");
    });
}

#[test]
fn configured_default_region_applies_when_absent() {
    with_env(&[("REVALUE_PRICING_DEFAULT_REGION", "jp")], || {
        let result = estimate::run(estimate::EstimateArgs {
            text: Some("samsung galaxy s21".to_string()),
            device_type: "smartphone".to_string(),
            brand: None,
            model: None,
            specs: None,
            condition: None,
            region: None,
            json: true,
        });
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["region"], "jp");
    });
}

#[test]
fn invalid_config_fails_with_exit_code_two() {
    with_env(&[("REVALUE_PRICING_RANGE_SAMPLES", "12")], || {
        let result = estimate::run(estimate::EstimateArgs {
            text: Some("iphone".to_string()),
            device_type: "smartphone".to_string(),
            brand: None,
            model: None,
            specs: None,
            condition: None,
            region: None,
            json: true,
        });
        assert_eq!(result.exit_code, 2);
        assert!(result.output.contains("config validation failed"));
    });
}

#[test]
fn extract_command_emits_attributes_json() {
    let result = extract::run(extract::ExtractArgs {
        text: "dell xps 15 512gb, mint condition".to_string(),
        json: true,
    });
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["brand"], "Dell");
    assert_eq!(payload["specs"], "512gb");
    assert_eq!(payload["condition"], "like_new");
}

#[test]
fn extract_command_renders_placeholders_for_missing_fields() {
    let result = extract::run(extract::ExtractArgs {
        text: "a mystery gadget".to_string(),
        json: false,
    });
    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("- brand = <none>"));
    assert!(result.output.contains("- condition = used"));
}

#[test]
fn config_command_attributes_env_sources() {
    with_env(&[("REVALUE_PRICING_DEFAULT_REGION", "uk")], || {
        let output = config::run();
        assert!(output.contains("pricing.default_region = uk"));
        assert!(output.contains("env (REVALUE_PRICING_DEFAULT_REGION)"));
        assert!(output.contains("logging.level = info (source: default)"));
    });
}
