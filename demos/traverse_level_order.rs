use avl_dictionary::BalancedDictionary;

mod common;

fn main() -> Result<(), log::SetLoggerError> {
    common::init_logging()?;

    let mut dictionary = BalancedDictionary::new();
    dictionary.insert(1, "1");
    dictionary.insert(2, "2");
    dictionary.insert(3, "3");
    dictionary.insert(4, "4");
    dictionary.insert(5, "5");
    dictionary.insert(6, "6");

    println!("Level-order traversal:");
    dictionary.traverse_level_order(|k, v| {
        println!("Key: {}, Value: {}", k, v);
    });

    Ok(())
}
