//! Integration tests for cache lifecycles
//!
//! Tests verify:
//! - The uppercase and failing-key walkthroughs end to end
//! - Release discipline across invalidate, invalidate_all and destroy
//! - Configuration loaded from TOML applied to a cache

use memo_cache::{CacheConfig, ConfigError, MemoError};
use memo_test_utils::{
    init_test_tracing, recording_cache, CallLedger, MockComputeError,
};

#[test]
fn test_uppercase_walkthrough() {
    init_test_tracing();
    let mut cache = recording_cache(CallLedger::new());

    assert_eq!(cache.get_or_fetch("abc").map(String::as_str), Ok("ABC"));
    assert_eq!(cache.context().compute_count("abc"), 1);

    assert_eq!(cache.get_or_fetch("abc").map(String::as_str), Ok("ABC"));
    assert_eq!(cache.context().compute_count("abc"), 1);

    assert!(cache.invalidate("abc"));
    assert_eq!(cache.get("abc"), None);
    assert_eq!(cache.context().release_count("ABC"), 1);

    assert_eq!(cache.get_or_fetch("abc").map(String::as_str), Ok("ABC"));
    assert_eq!(cache.context().compute_count("abc"), 2);
}

#[test]
fn test_failing_key_walkthrough() {
    init_test_tracing();
    let mut cache = recording_cache(CallLedger::refusing(["x"]));

    assert_eq!(
        cache.get_or_fetch("x"),
        Err(MockComputeError::Refused {
            key: "x".to_string()
        })
    );
    assert_eq!(cache.get("x"), None);

    assert!(cache.get_or_fetch("x").is_err());
    assert_eq!(cache.context().compute_count("x"), 2);
    assert_eq!(cache.stats().compute_failures, 2);
}

#[test]
fn test_failure_does_not_disturb_other_entries() {
    let mut cache = recording_cache(CallLedger::refusing(["x"]));
    cache.get_or_fetch("a").unwrap();

    assert!(cache.get_or_fetch("x").is_err());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("a").map(String::as_str), Some("A"));
}

#[test]
fn test_invalidate_absent_key_changes_nothing() {
    let mut cache = recording_cache(CallLedger::new());
    cache.get_or_fetch("a").unwrap();
    let before = cache.context().clone();

    assert!(!cache.invalidate("zzz"));
    assert_eq!(cache.context(), &before);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_invalidate_all_then_reuse() {
    let mut cache = recording_cache(CallLedger::new());
    for key in ["a", "b", "c"] {
        cache.get_or_fetch(key).unwrap();
    }

    assert_eq!(cache.invalidate_all(), 3);
    assert!(cache.is_empty());
    for value in ["A", "B", "C"] {
        assert_eq!(cache.context().release_count(value), 1);
    }

    assert_eq!(cache.invalidate_all(), 0);
    assert_eq!(cache.context().released.len(), 3);

    assert_eq!(cache.get_or_fetch("b").map(String::as_str), Ok("B"));
    assert_eq!(cache.context().compute_count("b"), 2);
}

#[test]
fn test_destroy_returns_context_after_releasing() {
    let mut cache = recording_cache(CallLedger::refusing(["nope"]));
    cache.get_or_fetch("a").unwrap();
    cache.get_or_fetch("b").unwrap();
    cache.invalidate("b");

    let ledger = cache.destroy();

    assert_eq!(ledger.release_count("A"), 1);
    assert_eq!(ledger.release_count("B"), 1);
    assert_eq!(ledger.released.len(), 2);
    assert!(ledger.refused.contains("nope"));
}

#[test]
fn test_config_from_toml_applied() {
    let config = CacheConfig::from_toml_str(
        r#"
name = "walkthrough"
initial_capacity = 4
record_stats = false
"#,
    )
    .unwrap();

    let mut cache = recording_cache(CallLedger::new())
        .with_config(config)
        .unwrap();
    cache.get_or_fetch("a").unwrap();
    cache.get_or_fetch("a").unwrap();

    assert_eq!(cache.config().name, "walkthrough");
    assert_eq!(cache.stats().hits, 0);
    assert_eq!(cache.stats().entry_count, 1);
}

#[test]
fn test_bad_toml_surfaces_parse_error() {
    let err = CacheConfig::from_toml_str("name = ").unwrap_err();
    assert!(matches!(err, MemoError::Config(ConfigError::Parse { .. })));
}
