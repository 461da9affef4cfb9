use std::fmt::Display;

use avl_dictionary::Ring;
use log::{info, warn};

mod common;

fn print_reverse<K: Display, V: Display>(ring: &Ring<K, V>) {
    if ring.is_empty() {
        warn!("Ring is empty");
    }
    for (key, value) in ring.iter().rev() {
        println!("key: {}, info: {}", key, value);
    }
}

fn main() -> Result<(), log::SetLoggerError> {
    common::init_logging()?;

    let s1: Ring<i32, i32> = (1..=10).map(|key| (key, key * 10)).collect();
    info!("Printing s1 in order:");
    print!("{}", s1);
    info!("Printing s1 in reverse:");
    print_reverse(&s1);

    let mut s2 = Ring::new();
    s2.push_back(777, "3xSeven");
    s2.push_back(888, "3xEight");
    s2.push_back(999, "3xNine");
    info!("Printing s2 in order:");
    print!("{}", s2);
    info!("Printing s2 in reverse:");
    print_reverse(&s2);

    info!("Walking s2 with a cursor, through the sentinel and back around:");
    let mut cursor = s2.cursor_front();
    for _ in 0..=s2.len() + 1 {
        match cursor.current() {
            Some((key, value)) => println!("key: {}, info: {}", key, value),
            None => println!("(sentinel)"),
        }
        cursor.move_next();
    }

    let s3 = Ring::<String, String>::new();
    info!("Attempting to print empty ring");
    if s3.is_empty() {
        warn!("Ring is empty");
    }
    print!("{}", s3);

    Ok(())
}
