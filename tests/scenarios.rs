use avl_dictionary::{BalancedDictionary, Ring, Sequence};

fn root<K: Ord + Copy, V>(dictionary: &BalancedDictionary<K, V>) -> Option<K> {
    dictionary
        .display_levels()
        .first()
        .and_then(|level| level.first().map(|key| **key))
}

#[test]
fn right_left_rotation_moves_thirty_to_the_root() {
    let dictionary: BalancedDictionary<i32, ()> = [10, 20, 30, 40, 50, 25]
        .into_iter()
        .map(|key| (key, ()))
        .collect();

    let levels = dictionary.display_levels();
    assert_eq!(levels[0], vec![&30]);
    assert_eq!(levels[1], vec![&20, &40]);
    let keys: Vec<i32> = dictionary.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, vec![10, 20, 25, 30, 40, 50]);
}

#[test]
fn descending_inserts_rotate_right() {
    let mut dictionary = BalancedDictionary::new();
    for key in [5, 4, 3, 2, 1] {
        dictionary.insert(key, key.to_string());
    }
    assert_eq!(root(&dictionary), Some(4));
    assert_eq!(dictionary.height(), 3);
    assert_eq!(dictionary.len(), 5);
}

#[test]
fn removing_root_promotes_successor() {
    let mut dictionary = BalancedDictionary::new();
    dictionary.insert(2, 'b');
    dictionary.insert(1, 'a');
    dictionary.insert(3, 'c');

    assert_eq!(dictionary.remove(&2), Some('b'));
    assert_eq!(root(&dictionary), Some(3));
    assert_eq!(dictionary.in_order(), vec![(&1, &'a'), (&3, &'c')]);
}

#[test]
fn find_on_empty_dictionary_is_absent() {
    let dictionary = BalancedDictionary::<u64, String>::new();
    assert_eq!(dictionary.find(&7), None);
    assert!(dictionary.display_levels().is_empty());
    assert_eq!(root(&dictionary), None);
}

#[test]
fn duplicate_insert_keeps_first_value() {
    let mut dictionary = BalancedDictionary::new();
    assert!(dictionary.insert("word1", 0));
    assert!(!dictionary.insert("word1", 1));
    assert!(dictionary.insert("word2", 0));
    assert_eq!(dictionary.find("word1"), Some(&0));

    dictionary.remove("word1");
    dictionary.remove("word2");
    assert!(dictionary.is_empty());
    assert!(dictionary.in_order().is_empty());
}

#[test]
fn dictionary_feeds_sequence_and_ring() {
    let dictionary: BalancedDictionary<i32, &str> =
        vec![(3, "Ania"), (0, "Jerzy"), (2, "Weronika"), (1, "Stefan")]
            .into_iter()
            .collect();

    let sequence: Sequence<i32, &str> = dictionary.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(sequence.to_string(), "{0: Jerzy, 1: Stefan, 2: Weronika, 3: Ania}");

    let ring: Ring<i32, &str> = sequence.iter().map(|(k, v)| (*k, *v)).collect();
    let reversed: Vec<i32> = ring.iter().rev().map(|(key, _)| *key).collect();
    assert_eq!(reversed, vec![3, 2, 1, 0]);
}
