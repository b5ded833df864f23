use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, LlmConfig::default());
    assert_eq!(cfg.base_url, DEFAULT_GEMINI_BASE_URL);
    assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
}

#[test]
fn overrides_are_applied_and_trailing_slash_trimmed() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[
        ("GEMINI_BASE_URL", "http://127.0.0.1:9999/v1beta/"),
        ("GEMINI_MODEL", "gemini-2.0-flash"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:9999/v1beta");
    assert_eq!(cfg.model, "gemini-2.0-flash");
}

#[test]
fn blank_model_errors() {
    let err = LlmConfig::from_lookup(lookup_from(&[("GEMINI_MODEL", "  ")])).unwrap_err();
    assert!(matches!(err, LlmError::ConfigParse(_)));
    assert!(err.to_string().contains("GEMINI_MODEL"));
}

#[test]
fn generate_url_uses_model_path() {
    let cfg = LlmConfig::default();
    assert_eq!(
        cfg.generate_url(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
    );
}
