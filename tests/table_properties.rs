// HashTable property tests.
//
// Property 1: behaves like a map.
//  - Model: std HashMap<String, String>.
//  - Operations: insert, delete, search over a small key space, so repeated
//    keys, deletes of missing keys, and tombstone reuse all happen.
//  - Invariant after every step: len() == model.len(), and every returned
//    value matches the model's.
//
// Property 2: distinct inserts survive growth.
//  - Insert n distinct keys (enough to cross several resizes), then check
//    len() == n and every key maps to its value.
//
// Property 3: capacity invariants.
//  - The slot count is always the next prime at or above the base size, the
//    base size never drops below 53, and load stays below 100%.
use std::collections::HashMap;

use prime_probe::HashTable;
use prime_probe::prime::is_prime;
use prime_probe::prime::next_prime;
use proptest::prelude::*;

fn check_shape(table: &HashTable) -> Result<(), TestCaseError> {
    prop_assert!(is_prime(table.capacity()));
    prop_assert_eq!(Some(table.capacity()), next_prime(table.base_size()));
    prop_assert!(table.base_size() >= 53);
    prop_assert!(table.len() + table.tombstones() <= table.capacity());
    prop_assert!(table.load_factor() < 100.0);
    Ok(())
}

proptest! {
    #[test]
    fn prop_matches_model(
        keys in 1usize..=200,
        ops in proptest::collection::vec((0u8..=2u8, 0usize..1000usize, "[a-z]{0,6}"), 1..400)
    ) {
        let mut table = HashTable::new();
        let mut model: HashMap<String, String> = HashMap::new();

        for (op, raw_k, value) in ops {
            let key = format!("k{}", raw_k % keys);
            match op {
                0 => {
                    let replaced = table.insert(&key, &value);
                    prop_assert_eq!(replaced, model.insert(key.clone(), value));
                }
                1 => {
                    let removed = table.delete(&key);
                    prop_assert_eq!(removed, model.remove(&key));
                    prop_assert!(!table.contains(&key));
                }
                2 => {
                    prop_assert_eq!(table.search(&key), model.get(&key).map(String::as_str));
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(table.len(), model.len());
            prop_assert_eq!(table.contains(&key), model.contains_key(&key));
            check_shape(&table)?;
        }

        for (key, value) in &model {
            prop_assert_eq!(table.search(key), Some(value.as_str()));
        }
        prop_assert_eq!(table.iter().count(), model.len());
    }
}

proptest! {
    #[test]
    fn prop_distinct_inserts_survive_growth(
        keys in proptest::collection::hash_set("[ -~]{1,12}", 1..300)
    ) {
        let mut table = HashTable::new();
        for key in &keys {
            prop_assert_eq!(table.insert(key, &key.to_uppercase()), None);
        }

        prop_assert_eq!(table.len(), keys.len());
        for key in &keys {
            let expected = key.to_uppercase();
            prop_assert_eq!(table.search(key), Some(expected.as_str()));
        }
        check_shape(&table)?;
    }
}

proptest! {
    #[test]
    fn prop_delete_missing_is_noop(
        present in 0usize..150,
        missing in proptest::collection::vec("[A-Z]{1,8}", 1..20)
    ) {
        let mut table = HashTable::new();
        for i in 0..present {
            table.insert(&format!("k{}", i), "v");
        }
        let len = table.len();
        let capacity = table.capacity();

        // Present keys are lowercase, so none of these match.
        for key in &missing {
            prop_assert_eq!(table.delete(key), None);
        }
        prop_assert_eq!(table.len(), len);
        prop_assert_eq!(table.capacity(), capacity);
    }
}
