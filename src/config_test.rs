use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = AppConfig::from_vars(vars(&[])).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.out_dir, PathBuf::from("."));
    assert_eq!(cfg.edit_clamp, EditClampPolicy::Clamp);
    assert_eq!(cfg.max_background_bytes, None);
}

#[test]
fn parses_overrides() {
    let cfg = AppConfig::from_vars(vars(&[
        ("FLOORPLAN_OUT_DIR", "/tmp/plans"),
        ("FLOORPLAN_EDIT_CLAMP", "override"),
        ("FLOORPLAN_MAX_BACKGROUND_BYTES", " 1048576 "),
    ]))
    .unwrap();
    assert_eq!(cfg.out_dir, PathBuf::from("/tmp/plans"));
    assert_eq!(cfg.edit_clamp, EditClampPolicy::Override);
    assert_eq!(cfg.max_background_bytes, Some(1_048_576));
}

#[test]
fn empty_values_count_as_unset() {
    let cfg = AppConfig::from_vars(vars(&[("FLOORPLAN_OUT_DIR", ""), ("FLOORPLAN_EDIT_CLAMP", "  ")])).unwrap();
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn rejects_unknown_policy() {
    let err = AppConfig::from_vars(vars(&[("FLOORPLAN_EDIT_CLAMP", "snap")])).unwrap_err();
    assert_eq!(err, ConfigError::UnknownClampPolicy("snap".into()));
    assert_eq!(err.error_code(), "E_CONFIG_CLAMP_POLICY");
}

#[test]
fn rejects_bad_byte_count() {
    let err = AppConfig::from_vars(vars(&[("FLOORPLAN_MAX_BACKGROUND_BYTES", "2MB")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidByteCount { var: "FLOORPLAN_MAX_BACKGROUND_BYTES", .. }));
}

#[test]
fn engine_config_carries_policy_and_limit() {
    let cfg = AppConfig { edit_clamp: EditClampPolicy::Override, max_background_bytes: Some(10), ..AppConfig::default() };
    let engine = cfg.engine_config();
    assert_eq!(engine.edit_clamp, EditClampPolicy::Override);
    assert_eq!(engine.max_background_bytes, Some(10));
}

// Only test in this binary that touches the process environment.
#[test]
fn from_env_reads_process_environment() {
    unsafe {
        std::env::set_var("FLOORPLAN_EDIT_CLAMP", "override");
        std::env::remove_var("FLOORPLAN_OUT_DIR");
        std::env::remove_var("FLOORPLAN_MAX_BACKGROUND_BYTES");
    }

    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.edit_clamp, EditClampPolicy::Override);
    assert_eq!(cfg.out_dir, PathBuf::from("."));

    unsafe { std::env::remove_var("FLOORPLAN_EDIT_CLAMP") };
}
