use downlevel_types::config::{DEFAULT_SOURCE_VERSION, DEFAULT_TARGET_VERSION};
use downlevel_types::{BuildConfig, EffectSet, ImportDecl, Selector, Version, VersionWindow};

#[test]
fn build_config_reads_csv_selectors_from_toml() {
    let cfg: BuildConfig = toml::from_str(
        r#"
            source_version = "3.7"
            target_version = "2.7"
            checkers = "no_star_imports, no_async_await"
            fixers = ""
        "#,
    )
    .unwrap();

    assert_eq!(cfg.source_version, Version::new(3, 7));
    assert_eq!(cfg.target_version, Version::new(2, 7));
    assert_eq!(cfg.checkers.names(), ["no_star_imports", "no_async_await"]);
    assert!(cfg.fixers.is_all());
}

#[test]
fn build_config_reads_list_selectors_from_json() {
    let cfg: BuildConfig = serde_json::from_str(
        r#"{ "target_version": "3.4", "fixers": ["unpacking_generalizations", " "] }"#,
    )
    .unwrap();

    assert_eq!(cfg.source_version, DEFAULT_SOURCE_VERSION);
    assert_eq!(cfg.target_version, Version::new(3, 4));
    assert_eq!(cfg.fixers, Selector::parse("unpacking_generalizations"));
}

#[test]
fn build_config_defaults() {
    let cfg = BuildConfig::default();
    assert_eq!(cfg.source_version, DEFAULT_SOURCE_VERSION);
    assert_eq!(cfg.target_version, DEFAULT_TARGET_VERSION);
    assert!(cfg.checkers.is_all());
    assert!(cfg.fixers.is_all());
}

#[test]
fn invalid_version_is_a_deserialize_error() {
    let err = serde_json::from_str::<BuildConfig>(r#"{ "target_version": "two" }"#).unwrap_err();
    assert!(err.to_string().contains("invalid version component"));
}

#[test]
fn version_window_serializes_versions_as_strings() {
    let w = VersionWindow::new(Version::new(1, 0), Version::new(2, 7)).works_until(Version::new(3, 7));
    let json = serde_json::to_value(w).unwrap();
    assert_eq!(json["apply_since"], "1.0");
    assert_eq!(json["apply_until"], "2.7");
    assert_eq!(json["works_since"], "1.0");
    assert_eq!(json["works_until"], "3.7");
}

#[test]
fn effect_set_serializes_sorted() {
    let mut effects = EffectSet::new();
    effects.require_import(ImportDecl::module("itertools"));
    effects.require_import(ImportDecl::member("__future__", "division"));
    let json = serde_json::to_value(&effects).unwrap();
    let imports = json["required_imports"].as_array().unwrap();
    assert_eq!(imports[0]["module"], "__future__");
    assert_eq!(imports[1]["module"], "itertools");
    assert!(imports[1].get("member").is_none());
}
