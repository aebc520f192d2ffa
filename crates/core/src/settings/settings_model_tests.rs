use super::*;
use crate::errors::Error;
use rust_decimal_macros::dec;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"{
    "targetAllocation": [
        {"assetClass": "USD", "targetPercent": 40},
        {"assetClass": "CNY", "targetPercent": 30},
        {"assetClass": "XAU", "targetPercent": 20},
        {"assetClass": "OTHER", "targetPercent": 10}
    ],
    "rebalanceThreshold": 3,
    "fxBand": 0.04,
    "fxReference": {"CNY": 7.05, "EUR": 0.92},
    "risk": {"volWindow": 20, "minObservations": 90},
    "riskCacheTtlSecs": 3600
}"#;

#[test]
fn test_empty_document_uses_defaults() {
    let settings = EngineSettings::from_json_str("{}").unwrap();

    assert_eq!(settings, EngineSettings::default());
    assert_eq!(settings.rebalance_threshold, dec!(5));
    assert_eq!(settings.fx_band, dec!(0.05));
    assert_eq!(settings.risk_cache_ttl(), Duration::from_secs(43200));
    assert_eq!(settings.rate_refresh_interval(), Duration::from_secs(10800));
}

#[test]
fn test_parses_sample_document() {
    let settings = EngineSettings::from_json_str(SAMPLE).unwrap();

    assert_eq!(settings.target_allocation.len(), 4);
    assert_eq!(settings.target_allocation[1].asset_class, "CNY");
    assert_eq!(settings.target_allocation[1].target_percent, dec!(30));
    assert_eq!(settings.rebalance_threshold, dec!(3));
    assert_eq!(settings.fx_band, dec!(0.04));
    assert_eq!(settings.fx_reference["CNY"], dec!(7.05));
    assert_eq!(settings.risk.vol_window, 20);
    assert_eq!(settings.risk.vol_smoothing, 5);
    assert_eq!(settings.risk.min_observations, 90);
    assert_eq!(settings.risk_cache_ttl_secs, 3600);
}

#[test]
fn test_currency_codes_are_upper_cased() {
    let json = r#"{
        "targetAllocation": [{"assetClass": " cny", "targetPercent": 30}],
        "fxReference": {"cny": 7.05}
    }"#;
    let settings = EngineSettings::from_json_str(json).unwrap();

    assert_eq!(settings.target_allocation[0].asset_class, "CNY");
    assert_eq!(settings.fx_reference.get("CNY"), Some(&dec!(7.05)));
    assert!(!settings.fx_reference.contains_key("cny"));

    let duplicated = r#"{"targetAllocation": [
        {"assetClass": "cny", "targetPercent": 30},
        {"assetClass": "CNY", "targetPercent": 20}
    ]}"#;
    assert!(EngineSettings::from_json_str(duplicated).is_err());
}

#[test]
fn test_from_path_reads_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();

    let settings = EngineSettings::from_path(file.path()).unwrap();
    assert_eq!(settings.target_allocation.len(), 4);
}

#[test]
fn test_missing_file_is_config_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = EngineSettings::from_path(dir.path().join("missing.json"));

    assert!(matches!(result, Err(Error::ConfigIO(_))));
}

#[test]
fn test_malformed_json_is_rejected() {
    let result = EngineSettings::from_json_str("{ not json");
    assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
}

#[test]
fn test_rejects_duplicate_targets() {
    let json = r#"{"targetAllocation": [
        {"assetClass": "USD", "targetPercent": 40},
        {"assetClass": "USD", "targetPercent": 10}
    ]}"#;
    assert!(EngineSettings::from_json_str(json).is_err());
}

#[test]
fn test_rejects_out_of_range_target() {
    let json = r#"{"targetAllocation": [{"assetClass": "USD", "targetPercent": 140}]}"#;
    assert!(EngineSettings::from_json_str(json).is_err());
}

#[test]
fn test_rejects_invalid_band_and_threshold() {
    assert!(EngineSettings::from_json_str(r#"{"fxBand": 0}"#).is_err());
    assert!(EngineSettings::from_json_str(r#"{"fxBand": 1.5}"#).is_err());
    assert!(EngineSettings::from_json_str(r#"{"rebalanceThreshold": -1}"#).is_err());
}

#[test]
fn test_rejects_bad_risk_weights() {
    let json = r#"{"risk": {"volWeight": 0.7, "drawdownWeight": 0.7}}"#;
    assert!(EngineSettings::from_json_str(json).is_err());
}

#[test]
fn test_rejects_other_base_currency() {
    assert!(EngineSettings::from_json_str(r#"{"baseCurrency": "EUR"}"#).is_err());
}

#[test]
fn test_rejects_non_positive_reference_rate() {
    assert!(EngineSettings::from_json_str(r#"{"fxReference": {"CNY": 0}}"#).is_err());
}

#[test]
fn test_default_registry_when_no_assets() {
    let registry = EngineSettings::default().build_registry().unwrap();
    assert!(registry.contains("savings_usd"));
}

#[test]
fn test_configured_assets_replace_registry() {
    let json = r#"{"assets": [
        {"field": "cash_jpy", "currency": "jpy", "liquid": true, "riskWeight": 0.5},
        {"field": "eth", "currency": "ETH", "riskWeight": 9, "class": "VOLATILE_REFERENCE"}
    ]}"#;
    let settings = EngineSettings::from_json_str(json).unwrap();
    let registry = settings.build_registry().unwrap();

    assert_eq!(registry.len(), 2);
    assert!(!registry.contains("savings_usd"));
    assert_eq!(registry.lookup("cash_jpy").currency, "JPY");
    assert_eq!(registry.lookup("cash_jpy").unit_scale, dec!(1));
    assert!(registry.lookup("eth").is_volatile_reference());
}

#[test]
fn test_rejects_invalid_asset_definition() {
    let json = r#"{"assets": [{"field": "x", "currency": "USD", "riskWeight": 11}]}"#;
    assert!(EngineSettings::from_json_str(json).is_err());
}

#[test]
fn test_advisor_uses_band_and_registry_non_fiat() {
    let settings = EngineSettings::from_json_str(SAMPLE).unwrap();
    let json = r#"{"assets": [
        {"field": "eth", "currency": "ETH", "riskWeight": 9, "class": "VOLATILE_REFERENCE"}
    ]}"#;
    let registry = EngineSettings::from_json_str(json)
        .unwrap()
        .build_registry()
        .unwrap();
    let advisor = settings.advisor(&registry);
    let reference = std::collections::BTreeMap::from([("ETH".to_string(), dec!(0.0003))]);

    assert_eq!(advisor.band(), dec!(0.04));
    assert_eq!(
        advisor.evaluate_fx_status("ETH", dec!(0.001), &reference),
        crate::rebalancing::FxStatus::NotApplicable
    );
}
