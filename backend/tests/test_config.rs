//! Tests for BindingConfig

use test_project_pywrap::{AdapterKind, BindingConfig, ConfigError, InitStrategy, ModuleState};

#[test]
fn test_empty_config_uses_defaults() {
    let config = BindingConfig::from_json("{}").unwrap();
    assert_eq!(config, BindingConfig::default());
    assert_eq!(config.adapter, AdapterKind::Lightweight);
    assert_eq!(config.strategy, InitStrategy::for_build());
    assert_eq!(config.module_name(), "test_project_pywrap");
}

#[test]
fn test_full_config() {
    let config = BindingConfig::from_json(
        r#"{"adapter": "reflective", "strategy": "legacy", "module_name": "custom_bp"}"#,
    )
    .unwrap();

    assert_eq!(config.adapter, AdapterKind::Reflective);
    assert_eq!(config.strategy, InitStrategy::Legacy);
    assert_eq!(config.module_name(), "custom_bp");
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = BindingConfig::from_json(r#"{"adaptor": "reflective"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_unknown_adapter_is_rejected() {
    let err = BindingConfig::from_json(r#"{"adapter": "swig"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_invalid_module_name_is_rejected() {
    let err = BindingConfig::from_json(r#"{"module_name": "not a name"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidModuleName(ref name) if name == "not a name"));
}

#[test]
fn test_import_into_registry() {
    let config =
        BindingConfig::from_json(r#"{"adapter": "reflective", "strategy": "legacy"}"#).unwrap();
    let mut registry = config.registry();
    let module = config.import_into(&mut registry).unwrap();

    assert_eq!(module.name(), "test_project_pywrap_bp");
    assert_eq!(module.strategy(), InitStrategy::Legacy);
    assert_eq!(
        registry.state("test_project_pywrap_bp"),
        ModuleState::Registered
    );
}

#[test]
fn test_config_round_trips_through_json() {
    let config = BindingConfig {
        adapter: AdapterKind::Reflective,
        strategy: InitStrategy::Modern,
        module_name: Some("bp".to_string()),
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(BindingConfig::from_json(&json).unwrap(), config);
}
