#![allow(unused_crate_dependencies, reason = "These are tests, not the main crate.")]

use std::cmp::Ordering;

use anchored_skipmap::{
    Comparator, ConfigError, Element, MAX_SUPPORTED_LEVEL, SkipMap, SkipMapConfig,
};


fn collect<V: Clone, Cmp>(map: &SkipMap<V, Cmp>) -> Vec<(Vec<u8>, V)> {
    map.iter().map(|(key, value)| (key.to_vec(), value.clone())).collect()
}

fn pairs<V: Clone>(expected: &[(&str, V)]) -> Vec<(Vec<u8>, V)> {
    expected.iter().map(|(key, value)| (key.as_bytes().to_vec(), value.clone())).collect()
}

fn abdc_map() -> SkipMap<u32> {
    let mut map = SkipMap::new_seeded(0x_5eed);

    map.put(b"a", 1);
    map.put(b"b", 2);
    map.put(b"d", 4);
    map.put(b"c", 3);

    map
}

// ================================
//  Empty Map
// ================================

#[test]
fn empty_map() {
    let map: SkipMap<u32> = SkipMap::new();

    assert!(map.get(b"").is_none());
    assert!(map.get(b"anything").is_none());
    assert!(map.get(&[0xff]).is_none());
    assert!(!map.contains(b"a"));
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert!(map.iter().next().is_none());
    assert!(map.first().is_none());
    assert!(map.last().is_none());

    let _check_that_debug_works = format!("{map:?}");
}

#[test]
fn remove_from_empty_map() {
    let mut map: SkipMap<u32> = SkipMap::default();

    assert!(map.remove(b"a").is_none());
    assert_eq!(map.len(), 0);
}

// ================================
//  Scenarios
// ================================

#[test]
fn out_of_order_insertion() {
    let map = abdc_map();

    assert_eq!(collect(&map), pairs(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]));
    assert_eq!(map.len(), 4);
}

#[test]
fn remove_middle_element() {
    let mut map = abdc_map();

    let removed = map.remove(b"c").unwrap();
    assert_eq!(removed.key(), b"c");
    assert_eq!(*removed.value(), 3);

    assert_eq!(map.len(), 3);
    assert_eq!(collect(&map), pairs(&[("a", 1), ("b", 2), ("d", 4)]));
    assert!(map.get(b"c").is_none());
}

// ================================
//  Put, Get and Remove
// ================================

#[test]
fn put_then_get() {
    let mut map = SkipMap::new_seeded(1);

    let element = map.put(b"key", "value".to_owned());
    assert_eq!(element.key(), b"key");
    assert_eq!(element.value(), "value");

    assert_eq!(map.get(b"key").map(Element::value).map(String::as_str), Some("value"));
    assert!(map.contains(b"key"));
    assert!(!map.contains(b"ke"));
    assert!(!map.contains(b"key\0"));
}

#[test]
fn put_overwrites_in_place() {
    let mut map = SkipMap::new_seeded(2);

    let first_height = map.put(b"k", 1).height();
    assert_eq!(map.len(), 1);

    let element = map.put(b"k", 2);
    assert_eq!(*element.value(), 2);
    // The element was updated, not replaced, so it keeps its height.
    assert_eq!(element.height(), first_height);

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(b"k").map(Element::value), Some(&2));
}

#[test]
fn values_can_be_mutated() {
    let mut map = abdc_map();

    *map.put(b"a", 10).value_mut() += 1;
    *map.get_mut(b"b").unwrap().value_mut() *= 10;
    assert!(map.get_mut(b"z").is_none());

    assert_eq!(collect(&map), pairs(&[("a", 11), ("b", 20), ("c", 3), ("d", 4)]));
}

#[test]
fn remove_twice() {
    let mut map = abdc_map();

    let (key, value) = map.remove(b"b").unwrap().into_parts();
    assert_eq!(key, b"b");
    assert_eq!(value, 2);
    assert_eq!(map.len(), 3);

    assert!(map.remove(b"b").is_none());
    assert_eq!(map.len(), 3);
    assert!(map.get(b"b").is_none());
}

#[test]
fn remove_missing_key_changes_nothing() {
    let mut map = abdc_map();

    assert!(map.remove(b"bb").is_none());
    assert!(map.remove(b"").is_none());
    assert!(map.remove(b"e").is_none());

    assert_eq!(collect(&map), pairs(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]));
}

#[test]
fn remove_everything() {
    let mut map = abdc_map();

    for key in [b"d", b"a", b"c", b"b"] {
        assert!(map.remove(key).is_some());
    }

    assert!(map.is_empty());
    assert!(map.iter().next().is_none());

    map.put(b"fresh", 5);
    assert_eq!(collect(&map), pairs(&[("fresh", 5)]));
}

#[test]
fn count_consistency() {
    let mut map = SkipMap::new_seeded(3);

    for i in 0..100_u32 {
        map.put(&i.to_be_bytes(), i);
    }
    for i in (0..100_u32).step_by(3) {
        assert!(map.remove(&i.to_be_bytes()).is_some());
    }

    // 34 multiples of 3 in `0..100`.
    assert_eq!(map.len(), 66);
    assert_eq!(map.iter().count(), map.len());
}

// ================================
//  Key Ordering
// ================================

#[test]
fn bytewise_key_order() {
    let mut map = SkipMap::new_seeded(4);

    for key in [&b"b"[..], b"", b"ab", b"a", &[0xff], &[0x00], b"abc"] {
        map.put(key, ());
    }

    let keys: Vec<&[u8]> = map.iter().map(|(key, ())| key).collect();
    let expected: [&[u8]; 7] = [b"", &[0x00], b"a", b"ab", b"abc", b"b", &[0xff]];

    assert_eq!(keys, expected);
}

#[test]
fn empty_key_is_a_key() {
    let mut map = SkipMap::new_seeded(5);

    map.put(b"", 0);
    map.put(b"a", 1);

    assert_eq!(map.get(b"").map(Element::value), Some(&0));
    assert_eq!(map.first().map(Element::key), Some(&b""[..]));
    assert!(map.remove(b"").is_some());
    assert!(map.get(b"").is_none());
}

#[test]
fn custom_comparator() {
    #[derive(Debug, Clone, Copy)]
    struct Reversed;

    impl Comparator for Reversed {
        fn cmp(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
            Ord::cmp(rhs, lhs)
        }
    }

    let config = SkipMapConfig::new().with_seed(6);
    let mut map = SkipMap::with_comparator(config, Reversed).unwrap();

    map.extend([("a", 1), ("c", 3), ("b", 2)]);

    assert_eq!(collect(&map), pairs(&[("c", 3), ("b", 2), ("a", 1)]));
    assert_eq!(map.get(b"b").map(Element::value), Some(&2));
    assert_eq!(map.last().map(Element::key), Some(&b"a"[..]));
}

// ================================
//  Iteration
// ================================

#[test]
fn iteration_restarts() {
    let map = abdc_map();

    let mut iter = map.iter();
    assert_eq!(iter.next().map(|(key, _)| key), Some(&b"a"[..]));
    assert_eq!(iter.next().map(|(key, _)| key), Some(&b"b"[..]));

    // A new iterator starts back at the beginning.
    assert_eq!(map.iter().count(), 4);
    assert_eq!((&map).into_iter().next().map(|(key, _)| key), Some(&b"a"[..]));

    let mut iter = iter.clone();
    assert_eq!(iter.by_ref().count(), 2);
    assert!(iter.next().is_none());
    assert!(iter.next().is_none());
}

#[test]
fn iteration_from_bound() {
    let map = abdc_map();

    let from_b: Vec<&[u8]> = map.iter_from(b"b").map(|(key, _)| key).collect();
    assert_eq!(from_b, [&b"b"[..], b"c", b"d"]);

    let from_bb: Vec<&[u8]> = map.iter_from(b"bb").map(|(key, _)| key).collect();
    assert_eq!(from_bb, [&b"c"[..], b"d"]);

    assert_eq!(map.iter_from(b"").count(), 4);
    assert_eq!(map.iter_from(b"e").count(), 0);
}

#[test]
fn first_and_last() {
    let mut map = abdc_map();

    assert_eq!(map.first().map(Element::key), Some(&b"a"[..]));
    assert_eq!(map.last().map(Element::key), Some(&b"d"[..]));

    map.remove(b"d");
    map.remove(b"a");

    assert_eq!(map.first().map(Element::key), Some(&b"b"[..]));
    assert_eq!(map.last().map(Element::key), Some(&b"c"[..]));
}

#[test]
fn from_iterator_and_debug() {
    let map: SkipMap<i32> = [("y", 2), ("x", 1)].into_iter().collect();

    assert_eq!(collect(&map), pairs(&[("x", 1), ("y", 2)]));
    assert_eq!(format!("{map:?}"), "{[120]: 1, [121]: 2}");
}

// ================================
//  Config
// ================================

#[test]
fn invalid_configs() {
    let zero = SkipMap::<u32>::with_config(SkipMapConfig::new().with_max_level(0));
    assert_eq!(zero.err(), Some(ConfigError::ZeroMaxLevel));

    let too_tall = SkipMap::<u32>::with_config(
        SkipMapConfig::new().with_max_level(MAX_SUPPORTED_LEVEL + 1),
    );
    assert!(matches!(too_tall, Err(ConfigError::MaxLevelTooLarge { .. })));

    let bad_probability = SkipMap::<u32>::with_config(
        SkipMapConfig::new().with_probability(2.0),
    );
    assert_eq!(bad_probability.err(), Some(ConfigError::InvalidProbability(2.0)));
}

#[test]
fn default_config() {
    let map: SkipMap<()> = SkipMap::new();

    assert_eq!(map.max_level(), 3);
    assert!((map.probability() - 1.0 / std::f64::consts::E).abs() < 1e-12);
}

#[test]
fn heights_within_bounds() {
    let config = SkipMapConfig::new().with_max_level(5).with_seed(7);
    let mut map = SkipMap::with_config(config).unwrap();

    for i in 0..500_u32 {
        let height = map.put(&i.to_le_bytes(), i).height();
        assert!((1..=5).contains(&height));
    }
}

#[test]
fn extreme_probabilities() {
    let never = SkipMapConfig::new().with_max_level(4).with_probability(0.0).with_seed(8);
    let mut map = SkipMap::with_config(never).unwrap();
    for i in 0..64_u8 {
        assert_eq!(map.put(&[i], ()).height(), 1);
    }

    let always = SkipMapConfig::new().with_max_level(4).with_probability(1.0).with_seed(8);
    let mut map = SkipMap::with_config(always).unwrap();
    for i in 0..64_u8 {
        assert_eq!(map.put(&[i], ()).height(), 4);
    }
    assert_eq!(map.iter().count(), 64);
}

#[test]
fn seeded_heights_are_reproducible() {
    let heights = |seed: u64| -> Vec<usize> {
        let config = SkipMapConfig::new().with_max_level(8).with_probability(0.5).with_seed(seed);
        let mut map = SkipMap::with_config(config).unwrap();

        (0..256_u32).map(|i| map.put(&i.to_be_bytes(), ()).height()).collect()
    };

    assert_eq!(heights(99), heights(99));
    assert_ne!(heights(99), heights(100));
}

#[test]
fn clear_keeps_config() {
    let config = SkipMapConfig::new().with_max_level(5).with_seed(9);
    let mut map = SkipMap::with_config(config).unwrap();
    map.extend([("a", 1), ("b", 2)]);

    map.clear();

    assert!(map.is_empty());
    assert_eq!(map.max_level(), 5);
    assert!(map.get(b"a").is_none());

    map.put(b"c", 3);
    assert_eq!(collect(&map), pairs(&[("c", 3)]));
}
