use crate::{ByteDict, Digest};
use proptest::prelude::*;
use std::collections::HashMap;

/// Keys drawn from narrow and shifted ranges so runs collide on long byte
/// prefixes, mixed with a fully random spread.
fn key_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        0u64..64,
        (0u64..64).prop_map(|i| i << 56),
        (0u64..64).prop_map(|i| (i << 24) | 0x55),
        any::<u64>(),
    ]
}

fn key_value_pairs(min: usize, max: usize) -> impl Strategy<Value = Vec<(u64, i32)>> {
    proptest::collection::vec((key_strategy(), any::<i32>()), min..max)
}

#[derive(Debug, Clone)]
enum Op {
    Insert(u64, i32),
    Remove(u64),
}

fn op_sequences(max: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(
        prop_oneof![
            (key_strategy(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            key_strategy().prop_map(Op::Remove),
        ],
        0..max,
    )
}

/// Sum of per-node live counters, which must track the pair count exactly.
fn live_population<K, V>(dict: &ByteDict<K, V>) -> usize {
    dict.nodes.as_slice().iter().map(|node| node.refs).sum()
}

proptest! {
    #[test]
    fn dict_insert_get_equivalence(pairs in key_value_pairs(1, 100)) {
        let mut dict: ByteDict<u64, i32> = ByteDict::new();
        let mut expected = HashMap::new();

        for &(key, value) in &pairs {
            *dict.insert(key) = value;
            expected.insert(key, value);
        }

        for (key, value) in &expected {
            prop_assert_eq!(dict.get(*key), Some(value));
        }
        prop_assert_eq!(dict.len(), expected.len());
        prop_assert_eq!(live_population(&dict), dict.len());
    }

    #[test]
    fn dict_len_reflects_unique_keys(pairs in key_value_pairs(1, 100)) {
        let mut dict: ByteDict<u64, i32> = ByteDict::new();
        let mut unique = std::collections::HashSet::new();

        for &(key, value) in &pairs {
            *dict.insert(key) = value;
            unique.insert(key);
        }

        prop_assert_eq!(dict.len(), unique.len());
    }

    #[test]
    fn dict_tracks_hashmap_under_random_ops(ops in op_sequences(200)) {
        let mut dict: ByteDict<u64, i32> = ByteDict::new();
        let mut model: HashMap<u64, i32> = HashMap::new();

        for op in &ops {
            match *op {
                Op::Insert(key, value) => {
                    *dict.insert(key) = value;
                    model.insert(key, value);
                }
                Op::Remove(key) => {
                    prop_assert_eq!(dict.remove(key), model.remove(&key));
                }
            }
        }

        prop_assert_eq!(dict.len(), model.len());
        prop_assert_eq!(live_population(&dict), dict.len());
        for (key, value) in &model {
            prop_assert_eq!(dict.get(*key), Some(value));
        }
    }

    #[test]
    fn dict_insert_remove_equivalent_to_not_inserting(
        kept in key_value_pairs(1, 50),
        removed in key_value_pairs(1, 50),
    ) {
        let mut churned: ByteDict<u64, i32> = ByteDict::new();
        for &(key, value) in kept.iter().chain(removed.iter()) {
            *churned.insert(key) = value;
        }
        for &(key, _) in &removed {
            churned.remove(key);
        }

        let mut plain: ByteDict<u64, i32> = ByteDict::new();
        for &(key, value) in &kept {
            if !removed.iter().any(|&(r, _)| r == key) {
                *plain.insert(key) = value;
            }
        }

        prop_assert_eq!(churned.len(), plain.len());
        for &(key, _) in kept.iter().chain(removed.iter()) {
            prop_assert_eq!(churned.get(key), plain.get(key));
        }
    }

    #[test]
    fn dict_clone_is_deep_copy(pairs in key_value_pairs(1, 100)) {
        let mut original: ByteDict<u64, i32> = ByteDict::new();
        for &(key, value) in &pairs {
            *original.insert(key) = value;
        }

        let cloned = original.clone();
        prop_assert_eq!(cloned.len(), original.len());
        prop_assert_eq!(cloned.allocated_bytes(), original.allocated_bytes());

        let first_key = pairs[0].0;
        let last_written = pairs.iter().rev().find(|&&(k, _)| k == first_key).unwrap().1;
        original.remove(first_key);
        prop_assert_eq!(cloned.get(first_key), Some(&last_written));
        prop_assert_ne!(original.len(), cloned.len());
    }

    #[test]
    fn dict_entry_api_behaves_like_direct_methods(
        pairs in key_value_pairs(1, 100),
        modifiers in key_value_pairs(1, 50),
    ) {
        let mut via_entry: ByteDict<u64, i32> = ByteDict::new();
        let mut direct: ByteDict<u64, i32> = ByteDict::new();

        for &(key, value) in &pairs {
            *via_entry.insert(key) = value;
            *direct.insert(key) = value;
        }

        for &(key, value) in &modifiers {
            via_entry.entry(key).or_insert(value);
            if !direct.contains_key(key) {
                *direct.insert(key) = value;
            }
        }

        prop_assert_eq!(via_entry.len(), direct.len());
        for &(key, _) in pairs.iter().chain(modifiers.iter()) {
            prop_assert_eq!(via_entry.get(key), direct.get(key));
        }
    }

    #[test]
    fn dict_round_trip_through_serde(pairs in key_value_pairs(1, 100)) {
        use serde::{Deserialize, Serialize};

        #[derive(Serialize, Deserialize)]
        struct Snapshot {
            data: Vec<(u64, i32)>,
        }

        let mut dict: ByteDict<u64, i32> = ByteDict::new();
        let mut model = HashMap::new();
        for &(key, value) in &pairs {
            *dict.insert(key) = value;
            model.insert(key, value);
        }

        let snapshot = Snapshot {
            data: model.iter().map(|(&k, &v)| (k, v)).collect(),
        };
        let serialized = serde_json::to_string(&snapshot).unwrap();
        let deserialized: Snapshot = serde_json::from_str(&serialized).unwrap();

        let mut rebuilt: ByteDict<u64, i32> = ByteDict::new();
        for &(key, value) in &deserialized.data {
            *rebuilt.insert(key) = value;
        }

        prop_assert_eq!(rebuilt.len(), dict.len());
        for (key, value) in &model {
            prop_assert_eq!(rebuilt.get(*key), Some(value));
        }
    }

    #[test]
    fn digest_keyed_dict_tracks_string_model(
        pairs in proptest::collection::vec(("[a-z]{1,12}", any::<i32>()), 1..100)
    ) {
        let mut dict: ByteDict<Digest, i32> = ByteDict::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for (key, value) in &pairs {
            *dict.insert(Digest::from(key.as_str())) = *value;
            model.insert(key.clone(), *value);
        }

        prop_assert_eq!(dict.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(dict.get(Digest::from(key.as_str())), Some(value));
        }
    }
}
