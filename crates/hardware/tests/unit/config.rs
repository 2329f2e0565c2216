use rstest::rstest;

use linecache::common::error::ConfigError;
use linecache::config::{CacheConfig, Config, LatencyConfig, MemoryFill};
use linecache::{ReplacementPolicy, WritePolicy};

fn shape(size: usize, ways: usize, line: usize) -> CacheConfig {
    CacheConfig::new(
        size,
        ways,
        line,
        ReplacementPolicy::LeastRecentlyUsed,
        WritePolicy::WriteThrough,
    )
}

#[rstest]
#[case(16, 1, 4, 4)]
#[case(16, 2, 4, 2)]
#[case(16, 4, 4, 1)]
#[case(4096, 4, 64, 16)]
#[case(255 * 3, 255, 1, 3)]
#[case(65535, 1, 65535, 1)]
fn test_valid_geometry(
    #[case] size: usize,
    #[case] ways: usize,
    #[case] line: usize,
    #[case] sets: usize,
) {
    let g = shape(size, ways, line).geometry().unwrap();
    assert_eq!(g.num_sets, sets);
    assert_eq!(g.capacity(), size);
    assert_eq!(g.num_lines(), size / line);
}

#[rstest]
#[case(shape(16, 0, 4), "associativity must be at least 1")]
#[case(shape(16, 1, 0), "line size must be at least 1")]
#[case(shape(0, 1, 4), "capacity must be at least one set")]
#[case(shape(256 * 4, 256, 4), "exceeds the maximum of 255")]
#[case(shape(65536, 1, 65536), "exceeds the maximum of 65535 bytes")]
#[case(shape(18, 1, 4), "not a multiple of the set size 4")]
#[case(shape(24, 4, 4), "not a multiple of the set size 16")]
fn test_invalid_geometry(#[case] config: CacheConfig, #[case] message: &str) {
    let err = config.geometry().unwrap_err();
    assert!(err.to_string().contains(message), "{err}");
}

#[test]
fn test_indivisible_capacity_carries_sizes() {
    match shape(24, 4, 4).geometry() {
        Err(ConfigError::Indivisible { size_bytes, set_bytes }) => {
            assert_eq!((size_bytes, set_bytes), (24, 16));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_set_mapping_wraps_line_numbers() {
    let g = shape(16, 1, 4).geometry().unwrap();
    assert_eq!(g.set_of(0), 0);
    assert_eq!(g.set_of(5), 1);
    assert_eq!(g.set_of(7), 3);
    let la = g.decompose(14);
    assert_eq!((la.line, la.offset), (3, 2));
}

#[test]
fn test_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.size_bytes, 4096);
    assert_eq!(config.ways, 4);
    assert_eq!(config.line_bytes, 64);
    assert_eq!(config.replacement, ReplacementPolicy::LeastRecentlyUsed);
    assert_eq!(config.write_policy, WritePolicy::WriteBack);
    assert_eq!(config.latency, LatencyConfig::default());
    assert!(config.geometry().is_ok());
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = Config::from_json_str(r#"{ "cache": { "ways": 8 } }"#).unwrap();
    assert_eq!(config.cache.ways, 8);
    assert_eq!(config.cache.line_bytes, 64);
    assert_eq!(config.memory.fill, MemoryFill::Zero);
}

#[rstest]
#[case(r#""LRU""#, ReplacementPolicy::LeastRecentlyUsed)]
#[case(r#""Lru""#, ReplacementPolicy::LeastRecentlyUsed)]
#[case(r#""Random""#, ReplacementPolicy::Random)]
fn test_replacement_policy_names(#[case] json: &str, #[case] expected: ReplacementPolicy) {
    assert_eq!(serde_json::from_str::<ReplacementPolicy>(json).unwrap(), expected);
}

#[rstest]
#[case(r#""WriteThrough""#, WritePolicy::WriteThrough)]
#[case(r#""WriteBack""#, WritePolicy::WriteBack)]
fn test_write_policy_names(#[case] json: &str, #[case] expected: WritePolicy) {
    assert_eq!(serde_json::from_str::<WritePolicy>(json).unwrap(), expected);
}

#[test]
fn test_malformed_json_is_a_parse_error() {
    assert!(matches!(
        Config::from_json_str("{ cache: 1 }"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        Config::from_json_str(r#"{ "cache": { "replacement": "FIFO" } }"#),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_memory_must_hold_whole_lines() {
    let mut config = Config::default();
    config.memory.size_bytes = 100;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MemoryNotLineMultiple { size_bytes: 100, line_bytes: 64 })
    ));
}
