use avl_dictionary::Sequence;
use log::{info, warn};

mod common;

fn print(sequence: &Sequence<i32, String>) {
    if sequence.is_empty() {
        warn!("Sequence not printed, cannot print an empty sequence");
        return;
    }
    println!("{}", sequence);
}

fn main() -> Result<(), log::SetLoggerError> {
    common::init_logging()?;

    let mut s1 = Sequence::new();
    for (key, name) in ["Jerzy", "Stefan", "Weronika", "Ania"].iter().enumerate() {
        s1.push_back(key as i32, name.to_string());
    }
    print(&s1);

    info!("Testing trim()");
    print(&Sequence::new());
    print(&s1.trim(1, 1));
    print(&s1.trim(0, 2));
    print(&s1.trim(1, 0));
    print(&s1.trim(2, 4));
    if let Err(err) = s1.try_trim(7, 1) {
        warn!("try_trim: {}", err);
    }

    let mut s3 = Sequence::new();
    s3.push_back(4, String::from("Jadwiga"));
    s3.push_back(5, String::from("Krzysztof"));

    info!("Testing concatenation");
    let s2 = &s1 + &s3;
    print(&s2);
    print(&(&s1 + &s2));

    info!("Testing combine()");
    print(&Sequence::combine(&s1, 0, 1, &s3, 0, 1, 2));
    print(&Sequence::combine(&s1, 0, 2, &s3, 0, 2, 3));
    print(&Sequence::combine(&s1, 0, 2, &s3, 0, 2, 0));

    Ok(())
}
