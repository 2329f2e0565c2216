//! Victim selection.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::rstest;

use crate::common::harness::TestHarness;
use linecache::core::cache::policies::SequenceSelector;
use linecache::{CacheConfig, ReplacementPolicy, WritePolicy};

/// 4-way, 2 sets, 4-byte lines: even line numbers share set 0.
fn four_way() -> TestHarness {
    TestHarness::new(
        32,
        4,
        4,
        ReplacementPolicy::LeastRecentlyUsed,
        WritePolicy::WriteBack,
        256,
    )
}

fn touch_line(h: &mut TestHarness, line: u64) {
    h.cache.read_bytes(line * 4, 1);
}

#[test]
fn test_lru_evicts_least_recently_touched_line() {
    let mut h = four_way();
    for line in [0, 2, 4, 6] {
        touch_line(&mut h, line);
    }
    touch_line(&mut h, 0);
    touch_line(&mut h, 8);

    assert!(h.cache.is_resident(0));
    assert!(!h.cache.is_resident(2 * 4));
    assert!(h.cache.is_resident(4 * 4));
    assert!(h.cache.is_resident(6 * 4));
    assert!(h.cache.is_resident(8 * 4));
}

#[test]
fn test_lru_never_evicts_a_more_recent_line() {
    let mut h = four_way();
    let order = [0u64, 2, 4, 6, 8, 10, 12, 14, 16];
    for (i, &line) in order.iter().enumerate() {
        touch_line(&mut h, line);
        // The last four touched lines are always resident.
        for &recent in &order[i.saturating_sub(3)..=i] {
            assert!(h.cache.is_resident(recent * 4), "line {recent} evicted");
        }
    }
}

#[test]
fn test_empty_ways_fill_in_order() {
    let mut h = four_way();
    for line in [0, 2, 4] {
        touch_line(&mut h, line);
    }
    let tags: Vec<_> = h.cache.set_lines(0).iter().map(|s| s.tag).collect();
    assert_eq!(tags, vec![Some(0), Some(2), Some(4), None]);
}

#[test]
fn test_sets_are_independent() {
    let mut h = four_way();
    for line in [0, 2, 4, 6, 8, 10] {
        touch_line(&mut h, line);
    }
    touch_line(&mut h, 1);
    assert!(h.cache.is_resident(4));
    h.cache.reset_statistics();
    for line in [4, 6, 8, 10, 1] {
        touch_line(&mut h, line);
    }
    assert_eq!(h.cache.miss_count(), 0);
}

#[test]
fn test_is_resident_touches_nothing() {
    let mut h = four_way();
    touch_line(&mut h, 0);
    let clock = h.cache.clock();
    let stats = h.cache.stats().clone();
    assert!(h.cache.is_resident(3));
    assert!(!h.cache.is_resident(100));
    assert_eq!(h.cache.clock(), clock);
    assert_eq!(h.cache.stats(), &stats);
}

#[rstest]
#[case(vec![0], 0)]
#[case(vec![1], 1)]
#[case(vec![3], 3)]
fn test_random_policy_evicts_selected_way(#[case] sequence: Vec<usize>, #[case] victim: usize) {
    let config = CacheConfig::new(
        16,
        4,
        4,
        ReplacementPolicy::Random,
        WritePolicy::WriteThrough,
    );
    let mut h = TestHarness::with_selector(
        config,
        64,
        Rc::new(RefCell::new(SequenceSelector::new(sequence))),
    );

    // Warm all four ways under LRU so the next miss must evict.
    h.cache.set_replacement_policy(ReplacementPolicy::LeastRecentlyUsed);
    for line in 0..4 {
        touch_line(&mut h, line);
    }
    h.cache.set_replacement_policy(ReplacementPolicy::Random);
    touch_line(&mut h, 4);

    assert_eq!(h.cache.set_lines(0)[victim].tag, Some(4));
    assert!(!h.cache.is_resident(victim as u64 * 4));
    assert_eq!(h.cache.replacement_policy(), ReplacementPolicy::Random);
}

#[test]
fn test_random_policy_may_evict_a_hot_line() {
    let config = CacheConfig::new(8, 2, 4, ReplacementPolicy::Random, WritePolicy::WriteBack);
    let mut h = TestHarness::with_selector(
        config,
        64,
        Rc::new(RefCell::new(SequenceSelector::new(vec![0, 1, 0]))),
    );
    touch_line(&mut h, 0); // way 0
    touch_line(&mut h, 1); // way 1
    touch_line(&mut h, 1);
    touch_line(&mut h, 2); // way 0, evicts line 0
    assert!(h.cache.is_resident(4));
    assert!(h.cache.is_resident(8));
    assert!(!h.cache.is_resident(0));
}

#[test]
fn test_switching_replacement_policy_keeps_resident_lines() {
    let mut h = four_way();
    for line in [0, 2, 4] {
        touch_line(&mut h, line);
    }
    h.cache.set_replacement_policy(ReplacementPolicy::Random);
    h.cache.reset_statistics();
    for line in [0, 2, 4] {
        touch_line(&mut h, line);
    }
    assert_eq!(h.cache.hit_count(), 3);
}
