use std::collections::BTreeMap;

use llrb_tree::{Color, Error, LLRBTreeMap, ReverseOrder};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn key_strategy() -> impl Strategy<Value = i64> {
    // Smaller than TEST_SIZE so keys are erased and revived often.
    -500i64..500i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

/// Every node of `map` as (key, value, alive, color), in key order.
fn nodes(map: &LLRBTreeMap<i64, i64>) -> Vec<(i64, i64, bool, Color)> {
    let mut out = Vec::new();
    map.traverse(|node| out.push((*node.key(), *node.value(), node.is_alive(), node.color())));
    out
}

fn alive_keys<V, P>(map: &LLRBTreeMap<i64, V, P>) -> Vec<i64> {
    map.iter().map(|(k, _)| *k).collect()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Get(i64),
    Put(i64, i64),
    Erase(i64),
    Find(i64),
    Rehash,
    Clear,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => key_strategy().prop_map(MapOp::Get),
        4 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Put(k, v)),
        4 => key_strategy().prop_map(MapOp::Erase),
        2 => key_strategy().prop_map(MapOp::Find),
        1 => Just(MapOp::Rehash),
        1 => Just(MapOp::Clear),
    ]
}

/// Every node ever inserted, with its value and alive flag.
type Model = BTreeMap<i64, (i64, bool)>;

// ─── Core operations against a model with tombstones ────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on the map and on a `BTreeMap` that keeps
    /// tombstones, checking results, counts and invariants at every step.
    #[test]
    fn map_ops_match_model(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map: LLRBTreeMap<i64, i64> = LLRBTreeMap::new();
        let mut model = Model::new();

        for op in &ops {
            match op {
                MapOp::Get(k) => {
                    let slot = model.entry(*k).or_insert((0, true));
                    slot.1 = true;
                    prop_assert_eq!(*map.get(*k), slot.0, "get({})", k);
                }
                MapOp::Put(k, v) => {
                    map.put(*k, *v);
                    model.insert(*k, (*v, true));
                }
                MapOp::Erase(k) => {
                    let was_alive = model.get_mut(k).is_some_and(|slot| std::mem::replace(&mut slot.1, false));
                    prop_assert_eq!(map.erase(k), was_alive, "erase({})", k);
                }
                MapOp::Find(k) => {
                    let expected = model.get(k).filter(|slot| slot.1).map(|slot| &slot.0);
                    prop_assert_eq!(map.find(k), expected, "find({})", k);
                }
                MapOp::Rehash => {
                    map.rehash();
                    model.retain(|_, slot| slot.1);
                }
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(map.len(), model.values().filter(|slot| slot.1).count(), "len after {:?}", op);
            prop_assert_eq!(map.num_nodes(), model.len(), "num_nodes after {:?}", op);
            prop_assert_eq!(map.is_empty(), model.is_empty(), "is_empty after {:?}", op);
            prop_assert!(map.validate().is_ok(), "{:?} after {:?}", map.validate(), op);
        }

        let expected: Vec<_> = model.iter().map(|(k, (v, alive))| (*k, *v, *alive)).collect();
        let actual: Vec<_> = nodes(&map).into_iter().map(|(k, v, alive, _)| (k, v, alive)).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Height stays within the red-black bound for any insertion order.
    #[test]
    fn height_is_logarithmic(keys in proptest::collection::vec(key_strategy(), 1..TEST_SIZE)) {
        let map: LLRBTreeMap<i64, ()> = keys.iter().map(|k| (*k, ())).collect();
        let n = map.num_nodes();
        let bound = 2 * (usize::BITS - n.leading_zeros());
        prop_assert!(map.height() >= 0);
        prop_assert!(map.height().unsigned_abs() < bound as usize, "height {} for {} nodes", map.height(), n);
    }

    /// Rehashing keeps the alive entries and drops every tombstone.
    #[test]
    fn rehash_keeps_alive_entries(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE),
        erased in proptest::collection::vec(key_strategy(), TEST_SIZE / 2),
    ) {
        let mut map: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        for k in &erased {
            map.erase(k);
        }
        let before: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();

        map.rehash();

        let after: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&after, &before);
        prop_assert_eq!(map.num_nodes(), map.len());
        prop_assert!(nodes(&map).iter().all(|node| node.2));
        prop_assert!(map.validate().is_ok());
    }

    /// A clone carries every node, tombstones and colors included, and
    /// then evolves independently.
    #[test]
    fn clone_is_deep(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE),
        erased in proptest::collection::vec(key_strategy(), 0..TEST_SIZE / 4),
    ) {
        let mut map: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        for k in &erased {
            map.erase(k);
        }
        let copy = map.clone();
        prop_assert_eq!(nodes(&copy), nodes(&map));

        let snapshot = nodes(&copy);
        let (first, _) = entries[0];
        map.put(first, i64::MIN);
        map.rehash();
        map.put(i64::MAX, 0);
        prop_assert_eq!(nodes(&copy), snapshot);
    }

    /// `get` on a present key never changes the structure.
    #[test]
    fn get_is_idempotent(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut map: LLRBTreeMap<i64, i64> = entries.iter().copied().collect();
        let before = nodes(&map);
        for (k, _) in &entries {
            map.get(*k);
        }
        prop_assert_eq!(nodes(&map), before);
    }
}

// ─── Worked scenario ─────────────────────────────────────────────────────────

#[test]
fn insert_erase_rehash_scenario() {
    let mut map = LLRBTreeMap::new();
    for k in [5, 3, 8, 1, 4, 7, 9] {
        map.put(k, k * 100);
    }
    assert!(map.height() <= 6);
    assert_eq!(alive_keys(&map), [1, 3, 4, 5, 7, 8, 9]);
    assert!(map.validate().is_ok());

    map.erase(&3);
    map.erase(&8);
    assert_eq!(map.len(), 5);
    assert_eq!(map.num_nodes(), 7);
    assert_eq!(alive_keys(&map), [1, 4, 5, 7, 9]);

    map.rehash();
    assert_eq!(map.num_nodes(), 5);
    assert_eq!(alive_keys(&map), [1, 4, 5, 7, 9]);
    assert_eq!(map.find(&7), Some(&700));
    assert!(map.validate().is_ok());
}

#[test]
fn erased_key_revives_with_its_old_value() {
    let mut map = LLRBTreeMap::new();
    *map.get("k") = 41;
    map.erase(&"k");
    assert_eq!(map.find(&"k"), None);
    assert_eq!(map.len(), 0);
    assert!(!map.is_empty());

    *map.get("k") += 1;
    assert_eq!(map.find(&"k"), Some(&42));
    assert_eq!(map.num_nodes(), 1);
}

#[test]
fn erase_of_missing_key_is_a_no_op() {
    let mut map: LLRBTreeMap<i64, i64> = (0..10).map(|k| (k, k)).collect();
    let before = nodes(&map);
    assert!(!map.erase(&100));
    assert!(map.erase(&3));
    assert!(!map.erase(&3));
    assert_eq!(nodes(&map).len(), before.len());
}

#[test]
fn empty_map_queries() {
    let mut map: LLRBTreeMap<i64, i64> = LLRBTreeMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.num_nodes(), 0);
    assert_eq!(map.height(), -1);
    assert_eq!(map.validate(), Ok(0));
    map.rehash();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.iter().next(), None);
}

#[test]
fn all_tombstones_rehash_to_empty() {
    let mut map: LLRBTreeMap<i64, i64> = (0..64).map(|k| (k, k)).collect();
    for k in 0..64 {
        map.erase(&k);
    }
    assert!(!map.is_empty());
    map.rehash();
    assert!(map.is_empty());
    assert_eq!(map.height(), -1);
}

// ─── Predicates ──────────────────────────────────────────────────────────────

#[test]
fn reverse_order_iterates_backwards() {
    let map: LLRBTreeMap<i64, (), ReverseOrder> = (0..20).map(|k| (k, ())).collect();
    assert_eq!(alive_keys(&map), (0..20).rev().collect::<Vec<_>>());
    assert!(map.validate().is_ok());
}

#[test]
fn closure_order_treats_equivalent_keys_as_one() {
    let mut map = LLRBTreeMap::with_order(|a: &String, b: &String| a.to_lowercase() < b.to_lowercase());
    *map.get("Word".to_string()) += 1;
    *map.get("WORD".to_string()) += 1;
    *map.get("word".to_string()) += 1;
    assert_eq!(map.len(), 1);
    assert_eq!(map.iter().next(), Some((&"Word".to_string(), &3)));
}

// ─── Fallible insertion ──────────────────────────────────────────────────────

#[test]
fn try_put_and_try_get_insert_like_put_and_get() -> Result<(), Error> {
    let mut map = LLRBTreeMap::with_capacity(4);
    map.try_put(1, 10)?;
    *map.try_get(2)? += 5;
    *map.try_get(1)? += 1;
    assert_eq!(map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(), [(1, 11), (2, 5)]);
    assert!(map.capacity() >= 4);
    Ok(())
}
