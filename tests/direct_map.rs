use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::ops::Bound;

use direct_map::direct_map::Entry;
use direct_map::{DirectKey, DirectMap, Error, Global, ProvisionedDirectMap};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp<K> {
    Insert(K, i64),
    Remove(K),
    Get(K),
    At(K),
    GetOrDefault(K),
    ContainsKey(K),
    GetKeyValue(K),
    LowerBound(K),
    UpperBound(K),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy<K: Arbitrary + Clone + Debug + 'static>() -> impl Strategy<Value = MapOp<K>> {
    prop_oneof![
        8 => (any::<K>(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        4 => any::<K>().prop_map(MapOp::Remove),
        2 => any::<K>().prop_map(MapOp::Get),
        1 => any::<K>().prop_map(MapOp::At),
        2 => any::<K>().prop_map(MapOp::GetOrDefault),
        1 => any::<K>().prop_map(MapOp::ContainsKey),
        1 => any::<K>().prop_map(MapOp::GetKeyValue),
        2 => any::<K>().prop_map(MapOp::LowerBound),
        2 => any::<K>().prop_map(MapOp::UpperBound),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

/// Replays `ops` on a `DirectMap` with inline storage, one with provisioned storage and a
/// `BTreeMap`, asserting identical results at every step.
fn replay<K: DirectKey + Debug>(ops: &[MapOp<K>]) -> Result<(), TestCaseError> {
    let mut inline: DirectMap<K, i64> = DirectMap::new();
    let mut provisioned: ProvisionedDirectMap<K, i64> = ProvisionedDirectMap::new_in(Global);
    let mut bt_map: BTreeMap<K, i64> = BTreeMap::new();

    for op in ops {
        match *op {
            MapOp::Insert(k, v) => {
                let bt_result = bt_map.insert(k, v);
                prop_assert_eq!(inline.insert(k, v), bt_result, "insert({:?}, {})", k, v);
                prop_assert_eq!(provisioned.insert(k, v), bt_result, "insert({:?}, {})", k, v);
            }
            MapOp::Remove(k) => {
                let bt_result = bt_map.remove(&k);
                prop_assert_eq!(inline.remove(k), bt_result, "remove({:?})", k);
                prop_assert_eq!(provisioned.remove(k), bt_result, "remove({:?})", k);
            }
            MapOp::Get(k) => {
                prop_assert_eq!(inline.get(k), bt_map.get(&k), "get({:?})", k);
                prop_assert_eq!(provisioned.get(k), bt_map.get(&k), "get({:?})", k);
            }
            MapOp::At(k) => {
                let expected = bt_map.get(&k).ok_or(Error::KeyNotFound { ordinal: k.to_ordinal() });
                prop_assert_eq!(inline.at(k), expected, "at({:?})", k);
                prop_assert_eq!(provisioned.at(k), expected, "at({:?})", k);
            }
            MapOp::GetOrDefault(k) => {
                let expected = *bt_map.entry(k).or_default();
                prop_assert_eq!(*inline.get_or_default(k), expected, "get_or_default({:?})", k);
                prop_assert_eq!(*provisioned.get_or_default(k), expected, "get_or_default({:?})", k);
            }
            MapOp::ContainsKey(k) => {
                prop_assert_eq!(inline.contains_key(k), bt_map.contains_key(&k), "contains_key({:?})", k);
                prop_assert_eq!(provisioned.contains_key(k), bt_map.contains_key(&k), "contains_key({:?})", k);
            }
            MapOp::GetKeyValue(k) => {
                let expected = bt_map.get_key_value(&k).map(|(&k, v)| (k, v));
                prop_assert_eq!(inline.get_key_value(k), expected, "get_key_value({:?})", k);
                prop_assert_eq!(provisioned.get_key_value(k), expected, "get_key_value({:?})", k);
            }
            MapOp::LowerBound(k) => {
                let expected = bt_map.range(k..).next().map(|(&k, v)| (k, v));
                prop_assert_eq!(inline.lower_bound(k).key_value(), expected, "lower_bound({:?})", k);
                prop_assert_eq!(provisioned.lower_bound(k).key_value(), expected, "lower_bound({:?})", k);
            }
            MapOp::UpperBound(k) => {
                let expected = bt_map.range((Bound::Excluded(k), Bound::Unbounded)).next().map(|(&k, v)| (k, v));
                prop_assert_eq!(inline.upper_bound(k).key_value(), expected, "upper_bound({:?})", k);
                prop_assert_eq!(provisioned.upper_bound(k).key_value(), expected, "upper_bound({:?})", k);
            }
            MapOp::FirstKeyValue => {
                let expected = bt_map.first_key_value().map(|(&k, v)| (k, v));
                prop_assert_eq!(inline.first_key_value(), expected, "first_key_value");
                prop_assert_eq!(provisioned.first_key_value(), expected, "first_key_value");
            }
            MapOp::LastKeyValue => {
                let expected = bt_map.last_key_value().map(|(&k, v)| (k, v));
                prop_assert_eq!(inline.last_key_value(), expected, "last_key_value");
                prop_assert_eq!(provisioned.last_key_value(), expected, "last_key_value");
            }
            MapOp::PopFirst => {
                let expected = bt_map.pop_first();
                prop_assert_eq!(inline.pop_first(), expected, "pop_first");
                prop_assert_eq!(provisioned.pop_first(), expected, "pop_first");
            }
            MapOp::PopLast => {
                let expected = bt_map.pop_last();
                prop_assert_eq!(inline.pop_last(), expected, "pop_last");
                prop_assert_eq!(provisioned.pop_last(), expected, "pop_last");
            }
        }

        prop_assert_eq!(inline.len(), bt_map.len());
        prop_assert_eq!(provisioned.len(), bt_map.len());
    }

    let bt_items: Vec<(K, i64)> = bt_map.into_iter().collect();
    prop_assert!(inline == provisioned, "inline and provisioned maps diverged");
    prop_assert_eq!(inline.into_iter().collect::<Vec<_>>(), bt_items);
    Ok(())
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations over unsigned keys.
    #[test]
    fn u8_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy::<u8>(), TEST_SIZE)) {
        replay(&ops)?;
    }

    /// Replays a random sequence of operations over signed keys, whose ordinals do not follow
    /// their bit patterns.
    #[test]
    fn i8_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy::<i8>(), TEST_SIZE)) {
        replay(&ops)?;
    }

    /// Replays a random sequence of operations over the two-key boolean domain.
    #[test]
    fn bool_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy::<bool>(), 200)) {
        replay(&ops)?;
    }

    /// Tests that the entry API produces the same final state as BTreeMap's.
    #[test]
    fn entry_api_matches_btreemap(
        initial in proptest::collection::vec((any::<u8>(), value_strategy()), 0..128),
        entry_keys in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let mut dm_map: DirectMap<u8, i64> = initial.iter().copied().collect();
        let mut bt_map: BTreeMap<u8, i64> = initial.iter().copied().collect();

        for &k in &entry_keys {
            dm_map.entry(k).and_modify(|v| *v = v.wrapping_mul(3)).or_insert_with_key(i64::from);
            bt_map.entry(k).and_modify(|v| *v = v.wrapping_mul(3)).or_insert_with_key(|&k| i64::from(k));
        }

        let dm_items: Vec<_> = dm_map.iter().map(|(k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(dm_items, bt_items);
    }
}

// ─── Iteration and ranges ────────────────────────────────────────────────────

fn bound_strategy() -> impl Strategy<Value = Bound<i8>> {
    prop_oneof![
        any::<i8>().prop_map(Bound::Included),
        any::<i8>().prop_map(Bound::Excluded),
        Just(Bound::Unbounded),
    ]
}

/// Returns `true` if BTreeMap accepts the bounds without panicking.
fn is_valid_range(start: Bound<i8>, end: Bound<i8>) -> bool {
    match (start, end) {
        (Bound::Excluded(s), Bound::Excluded(e)) => s < e,
        (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) => s <= e,
        _ => true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Tests iter, keys, values and their reversed forms against BTreeMap.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((any::<i8>(), value_strategy()), 0..300)) {
        let dm_map: DirectMap<i8, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i8, i64> = entries.iter().copied().collect();

        let dm_items: Vec<_> = dm_map.iter().map(|(k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&dm_items, &bt_items);

        let dm_rev: Vec<_> = dm_map.iter().rev().map(|(k, &v)| (k, v)).collect();
        let bt_rev: Vec<_> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(dm_rev, bt_rev);

        prop_assert_eq!(dm_map.keys().collect::<Vec<_>>(), bt_map.keys().copied().collect::<Vec<_>>());
        prop_assert_eq!(dm_map.values().collect::<Vec<_>>(), bt_map.values().collect::<Vec<_>>());
        prop_assert_eq!(dm_map.iter().len(), bt_map.len());
    }

    /// Tests alternating next/next_back yields every entry exactly once.
    #[test]
    fn iter_double_ended_traversal(entries in proptest::collection::vec((any::<u8>(), value_strategy()), 1..300)) {
        let mut dm_map: DirectMap<u8, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<u8, i64> = entries.iter().copied().collect();

        let mut seen = Vec::new();
        let mut iter = dm_map.iter_mut();
        let mut front = true;
        while iter.len() > 0 {
            let remaining = iter.len();
            let (k, v) = if front { iter.next() } else { iter.next_back() }.expect("len > 0");
            *v = v.wrapping_add(1);
            seen.push(k);
            prop_assert_eq!(iter.len(), remaining - 1);
            front = !front;
        }
        prop_assert!(iter.next().is_none());
        prop_assert!(iter.next_back().is_none());

        seen.sort_unstable();
        prop_assert_eq!(seen, bt_map.keys().copied().collect::<Vec<_>>());
        for (k, v) in &bt_map {
            prop_assert_eq!(dm_map[*k], v.wrapping_add(1));
        }
    }

    /// Tests range and range_mut against BTreeMap for arbitrary valid bounds.
    #[test]
    fn range_matches_btreemap(
        entries in proptest::collection::vec((any::<i8>(), value_strategy()), 0..300),
        start in bound_strategy(),
        end in bound_strategy(),
    ) {
        prop_assume!(is_valid_range(start, end));
        let mut dm_map: DirectMap<i8, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i8, i64> = entries.iter().copied().collect();

        let dm_items: Vec<_> = dm_map.range((start, end)).map(|(k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.range((start, end)).map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&dm_items, &bt_items);
        prop_assert_eq!(dm_map.range((start, end)).len(), bt_items.len());

        let dm_rev: Vec<_> = dm_map.range((start, end)).rev().map(|(k, &v)| (k, v)).collect();
        let bt_rev: Vec<_> = bt_map.range((start, end)).rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(dm_rev, bt_rev);

        for (_, v) in dm_map.range_mut((start, end)) {
            *v = v.wrapping_neg();
        }
        for (_, v) in bt_map.range_mut((start, end)) {
            *v = v.wrapping_neg();
        }
        let dm_items: Vec<_> = dm_map.into_iter().collect();
        let bt_items: Vec<_> = bt_map.into_iter().collect();
        prop_assert_eq!(dm_items, bt_items);
    }

    /// Tests retain against BTreeMap.
    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((any::<u8>(), value_strategy()), 0..300)) {
        let mut dm_map: DirectMap<u8, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<u8, i64> = entries.iter().copied().collect();

        dm_map.retain(|k, v| (i64::from(k) + *v) % 3 != 0);
        bt_map.retain(|&k, v| (i64::from(k) + *v) % 3 != 0);

        prop_assert_eq!(dm_map.into_iter().collect::<Vec<_>>(), bt_map.into_iter().collect::<Vec<_>>());
    }

    /// Tests append across storage strategies against BTreeMap.
    #[test]
    fn append_matches_btreemap(
        entries_a in proptest::collection::vec((any::<u8>(), value_strategy()), 0..200),
        entries_b in proptest::collection::vec((any::<u8>(), value_strategy()), 0..200),
    ) {
        let mut dm_a: DirectMap<u8, i64> = entries_a.iter().copied().collect();
        let mut dm_b: ProvisionedDirectMap<u8, i64> = entries_b.iter().copied().collect();
        let mut bt_a: BTreeMap<u8, i64> = entries_a.iter().copied().collect();
        let mut bt_b: BTreeMap<u8, i64> = entries_b.iter().copied().collect();

        dm_a.append(&mut dm_b);
        bt_a.append(&mut bt_b);

        prop_assert!(dm_b.is_empty());
        prop_assert_eq!(dm_a.into_iter().collect::<Vec<_>>(), bt_a.into_iter().collect::<Vec<_>>());
    }

    /// Tests the consuming iterators interleaving both ends.
    #[test]
    fn into_iter_double_ended(entries in proptest::collection::vec((any::<i8>(), value_strategy()), 0..300)) {
        let dm_map: DirectMap<i8, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i8, i64> = entries.iter().copied().collect();

        let mut dm_iter = dm_map.clone().into_iter();
        let mut bt_iter = bt_map.clone().into_iter();
        loop {
            prop_assert_eq!(dm_iter.len(), bt_iter.len());
            let dm_next = dm_iter.next();
            prop_assert_eq!(dm_next, bt_iter.next());
            let dm_back = dm_iter.next_back();
            prop_assert_eq!(dm_back, bt_iter.next_back());
            if dm_next.is_none() {
                break;
            }
        }

        prop_assert_eq!(dm_map.clone().into_keys().collect::<Vec<_>>(), bt_map.clone().into_keys().collect::<Vec<_>>());
        prop_assert_eq!(dm_map.into_values().rev().collect::<Vec<_>>(), bt_map.into_values().rev().collect::<Vec<_>>());
    }

    /// Tests Extend of owned and borrowed pairs against BTreeMap.
    #[test]
    fn extend_matches_btreemap(
        initial in proptest::collection::vec((any::<u8>(), value_strategy()), 0..200),
        extra in proptest::collection::vec((any::<u8>(), value_strategy()), 0..200),
    ) {
        let mut dm_map: DirectMap<u8, i64> = initial.iter().copied().collect();
        let mut bt_map: BTreeMap<u8, i64> = initial.iter().copied().collect();

        dm_map.extend(extra.iter().map(|(k, v)| (*k, v)));
        bt_map.extend(extra.iter().map(|(k, v)| (k, v)));

        prop_assert_eq!(dm_map.into_iter().collect::<Vec<_>>(), bt_map.into_iter().collect::<Vec<_>>());
    }

    /// Tests Ord against BTreeMap's lexicographic order.
    #[test]
    fn ord_matches_btreemap(
        entries_a in proptest::collection::vec((0..8u8, 0..4i64), 0..8),
        entries_b in proptest::collection::vec((0..8u8, 0..4i64), 0..8),
    ) {
        let dm_a: DirectMap<u8, i64> = entries_a.iter().copied().collect();
        let dm_b: DirectMap<u8, i64> = entries_b.iter().copied().collect();
        let bt_a: BTreeMap<u8, i64> = entries_a.iter().copied().collect();
        let bt_b: BTreeMap<u8, i64> = entries_b.iter().copied().collect();

        prop_assert_eq!(dm_a.cmp(&dm_b), bt_a.cmp(&bt_b));
        prop_assert_eq!(dm_a == dm_b, bt_a == bt_b);
    }
}

// ─── Reference scenarios ─────────────────────────────────────────────────────

/// Default-inserting through `get_or_default`, then assigning through the returned reference.
#[test]
fn default_insert_then_assign() {
    let mut map: DirectMap<u8, String> = DirectMap::new();
    assert!(map.is_empty());

    *map.get_or_default(b'a') = String::from("42");
    assert_eq!(map.len(), 1);
    assert_eq!(map.at(b'a'), Ok(&String::from("42")));

    *map.get_or_default(b'\0') = String::from("4567854");
    assert_eq!(map.len(), 2);
    assert_eq!(map[b'\0'], "4567854");
    assert_eq!(map.cursor_first().key(), Some(b'\0'));
}

/// Default insertion, cursor navigation and the domain minimum, step by step, on inline storage.
#[test]
fn reference_walkthrough() {
    let mut map: DirectMap<u8, &str> = DirectMap::new();

    *map.get_or_default(b'a') = "42";
    assert_eq!(map.len(), 1);
    assert_eq!(map.cursor_first().value(), Some(&"42"));
    assert_eq!(map.find(b'a'), map.cursor_first());

    *map.get_or_default(b'\0') = "4567854";
    assert_eq!(map.len(), 2);
    assert_eq!(map.cursor_first().key(), Some(b'\0'));
    let mut cursor = map.cursor_first();
    cursor.move_next();
    cursor.move_next();
    assert_eq!(cursor, map.cursor_end());
    cursor.move_prev();
    cursor.move_prev();
    assert_eq!(cursor, map.cursor_first());
    assert_eq!(map.upper_bound(b'\t'), map.find(b'a'));

    assert_eq!(map.min_key(), 0);
    *map.get_or_default(map.min_key()) = "2";
    assert_eq!(map.len(), 2);
    assert_eq!(map.at(0), Ok(&"2"));
}

/// `find`, `contains_key` and the bounds queries over a map with a gap between its keys.
#[test]
fn lookup_of_present_and_absent_keys() {
    let mut map: DirectMap<u8, i32> = DirectMap::new();
    *map.get_or_default(b'a') = 42;
    *map.get_or_default(b'\0') = 4_567_854;

    assert!(map.find(b'\t').is_end());
    assert!(!map.contains_key(b'\t'));
    assert_eq!(map.find(b'a').value(), Some(&42));

    assert_eq!(map.lower_bound(b'\t'), map.find(b'a'));
    assert_eq!(map.upper_bound(b'\t'), map.find(b'a'));
    assert_eq!(map.lower_bound(b'a'), map.find(b'a'));
    assert!(map.upper_bound(b'a').is_end());
    assert_eq!(map.lower_bound(0), map.cursor_first());

    assert_eq!(map.at(b'\t'), Err(Error::KeyNotFound { ordinal: 9 }));
}

/// `min_key` reports the domain's smallest key, whether or not it is present.
#[test]
fn min_key_is_a_domain_property() {
    let mut unsigned: DirectMap<u8, &str> = DirectMap::new();
    *unsigned.get_or_default(b'a') = "42";
    *unsigned.get_or_default(b'\0') = "4567854";
    *unsigned.get_or_default(unsigned.min_key()) = "2";
    assert_eq!(unsigned.len(), 2);
    assert_eq!(unsigned[b'\0'], "2");
    assert_eq!(unsigned.max_key(), u8::MAX);

    let mut signed: DirectMap<i8, &str> = DirectMap::new();
    *signed.get_or_default(97) = "42";
    *signed.get_or_default(0) = "4567854";
    *signed.get_or_default(signed.min_key()) = "2";
    assert_eq!(signed.len(), 3);
    assert_eq!(signed.first_key_value(), Some((-128, &"2")));
    assert_eq!(signed.max_key(), i8::MAX);
}

// ─── Dense maps over a 16-bit domain ────────────────────────────────────────

fn full_u16_map() -> ProvisionedDirectMap<u16, String> {
    let mut map = ProvisionedDirectMap::new_in(Global);
    map.extend((0..=u16::MAX).map(|k| (k, k.to_string())));
    map
}

/// Draining a full domain from both ends meets in the middle and yields every entry once.
#[test]
fn full_domain_into_iter_from_both_ends() {
    let map = full_u16_map();
    assert_eq!(map.len(), 65_536);

    let mut iter = map.into_iter();
    let mut front = 0u16;
    let mut back = u16::MAX;
    while let Some((key, value)) = iter.next() {
        assert_eq!(key, front);
        assert_eq!(value, front.to_string());
        front += 1;

        let Some((key, value)) = iter.next_back() else {
            break;
        };
        assert_eq!(key, back);
        assert_eq!(value, back.to_string());
        back -= 1;
        assert_eq!(iter.len(), usize::from(back) + 1 - usize::from(front));
    }
    assert_eq!(front, 32_768);
    assert_eq!(back, 32_767);
    assert_eq!(iter.next_back(), None);
}

/// Appending a full domain moves every entry and leaves the source empty.
#[test]
fn full_domain_append_and_clear() {
    let mut source = full_u16_map();
    let mut target: ProvisionedDirectMap<u16, String> = ProvisionedDirectMap::new_in(Global);
    target.insert(5, String::from("replaced"));

    target.append(&mut source);
    assert!(source.is_empty());
    assert!(source.cursor_first().is_end());
    assert_eq!(target.len(), 65_536);
    assert_eq!(target[5], "5");
    assert_eq!(target.last_key_value(), Some((u16::MAX, &String::from("65535"))));

    target.clear();
    assert!(target.is_empty());
    assert_eq!(target.iter().next(), None);
}

// ─── Cursors ─────────────────────────────────────────────────────────────────

/// Walking forward from `cursor_first` to `cursor_end` counts exactly `len` steps.
#[test]
fn cursor_walk_distance_equals_len() {
    let map: DirectMap<u8, u32> = [0u8, 1, 63, 64, 65, 127, 128, 200, 255].iter().map(|&k| (k, u32::from(k))).collect();

    let mut cursor = map.cursor_first();
    let mut keys = Vec::new();
    while cursor != map.cursor_end() {
        keys.push(cursor.key().expect("not at end"));
        cursor.move_next();
    }
    assert_eq!(keys.len(), map.len());
    assert_eq!(keys, map.keys().collect::<Vec<_>>());

    let mut backwards = Vec::new();
    for _ in 0..map.len() {
        cursor.move_prev();
        backwards.push(cursor.key().expect("not at end"));
    }
    assert_eq!(cursor, map.cursor_first());
    backwards.reverse();
    assert_eq!(backwards, keys);
}

/// A cursor on a single entry reaches the end in one step and comes back in one step.
#[test]
fn cursor_single_entry_round_trip() {
    let map: DirectMap<i16, ()> = {
        let mut map = DirectMap::new();
        map.insert(-300, ());
        map
    };

    let mut cursor = map.find(-300);
    cursor.move_next();
    assert!(cursor.is_end());
    cursor.move_prev();
    assert_eq!(cursor.key(), Some(-300));
}

/// Values reached through a mutable cursor can be replaced in place.
#[test]
fn cursor_mut_edits_values() {
    let mut map: DirectMap<u8, String> = DirectMap::new();
    map.insert(3, String::from("c"));
    map.insert(1, String::from("a"));

    let mut cursor = map.cursor_first_mut();
    cursor.value_mut().expect("entry").push('!');
    cursor.move_next();
    *cursor.value_mut().expect("entry") = String::from("z");
    cursor.move_next();
    assert!(cursor.is_end());
    assert_eq!(cursor.value_mut(), None);

    let value = map.find_mut(1).into_value_mut().expect("entry");
    value.push('?');
    assert_eq!(map.values().cloned().collect::<Vec<_>>(), ["a!?", "z"]);
}

// ─── Clone, move and swap ────────────────────────────────────────────────────

/// Clones are independent of their source.
#[test]
fn clone_is_independent() {
    let mut original: DirectMap<u8, String> = DirectMap::new();
    original.insert(1, String::from("one"));
    original.insert(2, String::from("two"));

    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.get_mut(1).expect("present").push_str("!!");
    copy.remove(2);
    copy.insert(3, String::from("three"));

    assert_eq!(original.len(), 2);
    assert_eq!(original[1], "one");
    assert_eq!(original[2], "two");
    assert!(!original.contains_key(3));
    assert_ne!(copy, original);
}

/// Taking a map leaves a valid empty map behind.
#[test]
fn take_leaves_empty_map() {
    let mut source: DirectMap<u8, String> = DirectMap::new();
    source.insert(7, String::from("seven"));

    let moved = std::mem::take(&mut source);
    assert_eq!(moved[7], "seven");
    assert!(source.is_empty());
    assert!(source.cursor_first().is_end());

    source.insert(8, String::from("eight"));
    assert_eq!(source.len(), 1);
    assert_eq!(moved.len(), 1);
}

/// Swapping exchanges contents and leaves both maps usable.
#[test]
fn swap_exchanges_contents() {
    let mut a: DirectMap<u8, i32> = DirectMap::from([(1, 10), (2, 20)]);
    let mut b: DirectMap<u8, i32> = DirectMap::from([(9, 90)]);

    a.swap(&mut b);
    assert_eq!(a.keys().collect::<Vec<_>>(), [9]);
    assert_eq!(b.keys().collect::<Vec<_>>(), [1, 2]);

    a.insert(3, 30);
    b.clear();
    assert_eq!(a.len(), 2);
    assert!(b.is_empty());
}

// ─── Equality, ordering and hashing ──────────────────────────────────────────

/// Maps compare equal regardless of insertion order or storage strategy.
#[test]
fn equality_ignores_history_and_storage() {
    let a: DirectMap<u8, i32> = DirectMap::from([(1, 1), (2, 2), (3, 3)]);
    let mut b: ProvisionedDirectMap<u8, i32> = ProvisionedDirectMap::new_in(Global);
    b.insert(3, 3);
    b.insert(9, 9);
    b.insert(1, 1);
    b.remove(9);
    b.insert(2, 2);

    assert!(a == b);
    assert!(b == a);
    b.insert(2, -2);
    assert!(a != b);
}

/// Equal maps hash equally.
#[test]
fn equal_maps_hash_equally() {
    let a: DirectMap<u8, i32> = DirectMap::from([(1, 1), (2, 2)]);
    let b: DirectMap<u8, i32> = [(2, 2), (1, 1)].into_iter().collect();
    assert_eq!(hash_of(&a), hash_of(&b));

    let c: DirectMap<u8, i32> = DirectMap::from([(1, 1)]);
    assert_ne!(hash_of(&a), hash_of(&c));
}

/// Debug output lists the entries in key order.
#[test]
fn debug_lists_entries_in_order() {
    let map: DirectMap<i8, &str> = DirectMap::from([(5, "b"), (-5, "a")]);
    assert_eq!(format!("{map:?}"), r#"{-5: "a", 5: "b"}"#);
    assert_eq!(format!("{:?}", map.keys()), "[-5, 5]");
    assert_eq!(format!("{:?}", map.find(-5)), r#"Cursor { ordinal: 123, entry: Some((-5, "a")) }"#);
}

// ─── Entry API ───────────────────────────────────────────────────────────────

/// Occupied entries expose, replace and remove their value.
#[test]
fn occupied_entry_operations() {
    let mut map: DirectMap<u8, i32> = DirectMap::from([(4, 40)]);

    let Entry::Occupied(mut entry) = map.entry(4) else {
        panic!("entry should be occupied");
    };
    assert_eq!(entry.key(), 4);
    assert_eq!(*entry.get(), 40);
    assert_eq!(entry.insert(41), 40);
    assert_eq!(entry.remove_entry(), (4, 41));
    assert!(map.is_empty());

    let Entry::Vacant(entry) = map.entry(5) else {
        panic!("entry should be vacant");
    };
    assert_eq!(entry.key(), 5);
    let entry = entry.insert_entry(50);
    assert_eq!(entry.remove(), 50);
    assert!(map.is_empty());

    *map.entry(6).or_default() += 7;
    assert_eq!(map.entry(6).insert_entry(60).key(), 6);
    assert_eq!(map[6], 60);
}

// ─── Invalid range bounds panic tests ─────────────────────────────────────────

/// Tests that range with start > end panics just like BTreeMap.
#[test]
#[should_panic(expected = "range start is greater than range end")]
fn range_start_greater_than_end_panics() {
    let map: DirectMap<i8, i32> = DirectMap::from([(1, 1), (2, 2), (3, 3)]);
    // Use tuple bounds to avoid clippy::reversed_empty_ranges lint
    let _: Vec<_> = map.range((Bound::Included(5), Bound::Included(3))).collect();
}

/// Tests that range_mut with start > end panics just like BTreeMap.
#[test]
#[should_panic(expected = "range start is greater than range end")]
fn range_mut_start_greater_than_end_panics() {
    let mut map: DirectMap<i8, i32> = DirectMap::from([(1, 1), (2, 2), (3, 3)]);
    let _: Vec<_> = map.range_mut((Bound::Included(5), Bound::Included(3))).collect();
}

/// Tests that range with (Excluded(x), Excluded(x)) for same x panics.
#[test]
#[should_panic(expected = "range start is greater than range end")]
fn range_excluded_excluded_same_bound_panics() {
    let map: DirectMap<i8, i32> = DirectMap::from([(1, 1), (2, 2), (3, 3)]);
    let _: Vec<_> = map.range((Bound::Excluded(2), Bound::Excluded(2))).collect();
}

/// Ranges touching the ends of the domain are empty or complete, never out of bounds.
#[test]
fn range_at_domain_edges() {
    let map: DirectMap<u8, u8> = DirectMap::from([(0, 0), (255, 255)]);
    assert_eq!(map.range((Bound::Excluded(255), Bound::Unbounded)).count(), 0);
    assert_eq!(map.range(..0).count(), 0);
    assert_eq!(map.range(0..=255).count(), 2);
    assert_eq!(map.range(255..).next(), Some((255, &255)));
    assert_eq!(map.range(5..5).count(), 0);
}

// ─── Index panic tests ────────────────────────────────────────────────────────

/// Tests that Index<K> panics for a missing key.
#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map: DirectMap<u8, i32> = DirectMap::from([(1, 1)]);
    let _ = map[2];
}

/// Tests that Index<K> does not insert.
#[test]
fn index_does_not_insert() {
    let map: DirectMap<u8, i32> = DirectMap::new();
    let result = std::panic::catch_unwind(|| map[1]);
    assert!(result.is_err());
    assert!(map.is_empty());
}

// ─── Thread Safety Tests ──────────────────────────────────────────────────────

/// Compile-time assertions for Send/Sync bounds on the map and its iterators.
mod send_sync_tests {
    use direct_map::direct_map::{
        IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, Range, RangeMut, Values, ValuesMut,
    };
    use direct_map::{Cursor, DirectMap, ProvisionedDirectMap};

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn borrowing_iterators_are_send_sync() {
        assert_send::<Iter<'_, u8, i64>>();
        assert_sync::<Iter<'_, u8, i64>>();
        assert_send::<Keys<'_, u8, i64>>();
        assert_sync::<Values<'_, u8, i64>>();
        assert_send::<Range<'_, u8, i64>>();
        assert_sync::<Range<'_, u8, i64>>();
        assert_send::<Cursor<'_, u8, i64>>();
    }

    #[test]
    fn mutable_iterators_are_send() {
        assert_send::<IterMut<'_, u8, i64>>();
        assert_send::<ValuesMut<'_, u8, i64>>();
        assert_send::<RangeMut<'_, u8, i64>>();
    }

    #[test]
    fn owning_iterators_are_send_sync() {
        assert_send::<IntoIter<u8, i64>>();
        assert_sync::<IntoIter<u8, i64>>();
        assert_send::<IntoKeys<u8, i64>>();
        assert_sync::<IntoValues<u8, i64>>();
    }

    #[test]
    fn maps_are_send_sync() {
        assert_send::<DirectMap<u8, i64>>();
        assert_sync::<DirectMap<u8, i64>>();
        assert_send::<ProvisionedDirectMap<u16, i64>>();
        assert_sync::<ProvisionedDirectMap<u16, i64>>();
    }
}

// ─── Drop Semantics Tests ─────────────────────────────────────────────────────

mod drop_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use direct_map::{DirectMap, Global, ProvisionedDirectMap};

    struct Droppable {
        drop_count: Rc<Cell<i32>>,
    }

    impl Drop for Droppable {
        fn drop(&mut self) {
            self.drop_count.set(self.drop_count.get() + 1);
        }
    }

    fn droppable(drop_count: &Rc<Cell<i32>>) -> Droppable {
        Droppable {
            drop_count: Rc::clone(drop_count),
        }
    }

    #[test]
    fn overwritten_and_removed_values_drop_once() {
        let drop_count = Rc::new(Cell::new(0));
        let mut map: DirectMap<u8, Droppable> = DirectMap::new();

        map.insert(1, droppable(&drop_count));
        drop(map.insert(1, droppable(&drop_count)));
        assert_eq!(drop_count.get(), 1);

        drop(map.remove(1));
        assert_eq!(drop_count.get(), 2);
        assert_eq!(map.remove(1).map(|_| ()), None);
        assert_eq!(drop_count.get(), 2);
    }

    #[test]
    fn clear_and_drop_release_every_value() {
        let drop_count = Rc::new(Cell::new(0));
        {
            let mut map: DirectMap<u8, Droppable> = DirectMap::new();
            for k in 0..10 {
                map.insert(k, droppable(&drop_count));
            }
            map.clear();
            assert_eq!(drop_count.get(), 10);

            for k in 100..105 {
                map.insert(k, droppable(&drop_count));
            }
        }
        assert_eq!(drop_count.get(), 15);
    }

    #[test]
    fn partially_consumed_into_iter_drops_the_rest() {
        let drop_count = Rc::new(Cell::new(0));
        let map: DirectMap<u8, Droppable> = (0..6).map(|k| (k, droppable(&drop_count))).collect();

        let mut iter = map.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(drop_count.get(), 2);
        drop(iter);
        assert_eq!(drop_count.get(), 6);
    }

    #[test]
    fn draining_a_full_domain_drops_each_value_once() {
        let drop_count = Rc::new(Cell::new(0));
        let mut map: ProvisionedDirectMap<u16, Droppable> = ProvisionedDirectMap::new_in(Global);
        map.extend((0..=u16::MAX).map(|k| (k, droppable(&drop_count))));

        let mut iter = map.into_iter();
        for _ in 0..1_000 {
            drop(iter.next());
            drop(iter.next_back());
        }
        assert_eq!(drop_count.get(), 2_000);
        drop(iter);
        assert_eq!(drop_count.get(), 65_536);

        let mut map: ProvisionedDirectMap<u16, Droppable> = ProvisionedDirectMap::new_in(Global);
        map.extend((0..=u16::MAX).step_by(3).map(|k| (k, droppable(&drop_count))));
        drop(map);
        assert_eq!(drop_count.get(), 65_536 + 21_846);
    }

    #[test]
    fn retain_drops_rejected_values() {
        let drop_count = Rc::new(Cell::new(0));
        let mut map: DirectMap<u8, Droppable> = (0..6).map(|k| (k, droppable(&drop_count))).collect();

        map.retain(|k, _| k < 2);
        assert_eq!(drop_count.get(), 4);
        assert_eq!(map.len(), 2);
    }
}

// ─── Zero-Sized Type (ZST) Tests ──────────────────────────────────────────────

/// Unit values turn the map into an ordered set over the domain.
#[test]
fn unit_values_act_as_a_set() {
    let mut map: DirectMap<u16, ()> = DirectMap::new();
    for k in [40_000, 7, 65_535, 7] {
        map.insert(k, ());
    }
    assert_eq!(map.len(), 3);
    assert_eq!(map.keys().collect::<Vec<_>>(), [7, 40_000, 65_535]);
    assert_eq!(map.lower_bound(8).key(), Some(40_000));
    assert_eq!(map.capacity(), 65_536);
}
