use std::fmt::Display;

use avl_dictionary::BalancedDictionary;
use log::info;

mod common;

fn print_entries<K: Display, V: Display>(label: &str, entries: &[(&K, &V)]) {
    print!("{}: ", label);
    for (key, value) in entries {
        print!("{}{}, ", key, value);
    }
    println!();
}

fn print_all<K: Ord + Display, V: Display>(dictionary: &BalancedDictionary<K, V>) {
    print_entries("Printing in order", &dictionary.in_order());
    print_entries("Printing post order", &dictionary.post_order());
    print_entries("Printing pre order", &dictionary.pre_order());
    for (level, keys) in dictionary.display_levels().iter().enumerate() {
        print!("(Level: {}) ", level + 1);
        for key in keys {
            print!("{} ", key);
        }
        println!();
    }
}

fn main() -> Result<(), log::SetLoggerError> {
    common::init_logging()?;

    let mut dictionary = BalancedDictionary::new();
    dictionary.insert("aa", 1);
    dictionary.insert("dd", 2);
    dictionary.insert("bb", 3);
    dictionary.insert("ee", 4);
    dictionary.insert("cc", 5);
    dictionary.remove("cc");
    print_all(&dictionary);
    println!("Info of key: aa: {:?}", dictionary.find("aa"));
    println!("Info of key: ee: {:?}", dictionary.find("ee"));

    let mut numbers = BalancedDictionary::new();
    numbers.insert(1, 10);
    numbers.remove(&1);
    for key in 2..=9 {
        numbers.insert(key, 10);
    }
    print_all(&numbers);
    println!("Info of key 6: {:?}", numbers.find(&6));
    println!("Info of non-existing key: {:?}", numbers.find(&100));

    info!("Inserting a duplicate key keeps the first entry");
    let mut words = BalancedDictionary::new();
    words.insert("word1", 0);
    words.insert("word1", 0);
    words.insert("word2", 0);
    print_all(&words);
    words.remove("word1");
    words.remove("word2");
    print_all(&words);

    Ok(())
}
