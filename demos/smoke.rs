//! Smoke test for tokenmatch
//!
//! Run with `RUST_LOG=tokenmatch=trace` to see construction events.

use tokenmatch::{Automaton, AutomatonBuilder, Error, Hit, TokenTree};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Running tokenmatch smoke tests...\n");

    test_overlapping_chars();
    test_nested_suffixes();
    test_word_tokens();
    test_indices();
    test_phase_errors();

    println!("\n✅ All smoke tests passed!");
}

fn char_automaton(patterns: &[&str]) -> Automaton<char, Vec<char>> {
    patterns
        .iter()
        .map(|p| p.chars().collect::<Vec<char>>())
        .collect::<AutomatonBuilder<char, Vec<char>>>()
        .finalize()
}

fn test_overlapping_chars() {
    let automaton = char_automaton(&["he", "she", "his", "hers"]);
    let found: Vec<(String, usize)> = automaton
        .search_all("ushers".chars())
        .map(|m| (m.pattern.iter().collect(), m.start))
        .collect();
    assert_eq!(
        found,
        vec![
            ("she".to_string(), 1),
            ("he".to_string(), 2),
            ("hers".to_string(), 2)
        ]
    );
    println!("✓ Overlapping matches");
}

fn test_nested_suffixes() {
    let automaton = char_automaton(&["abc", "bc", "c"]);
    let starts: Vec<usize> = automaton.search_all("xabcx".chars()).map(|m| m.start).collect();
    assert_eq!(starts, vec![1, 2, 3]);
    println!("✓ Nested suffix chain");
}

fn test_word_tokens() {
    let mut builder: AutomatonBuilder<&str, Vec<&str>> = AutomatonBuilder::new();
    builder.add(vec!["quick", "brown"]);
    builder.add(vec!["lazy", "dog"]);
    let automaton = builder.finalize();

    let text = "the quick brown fox jumps over the lazy dog";
    let found = automaton.search(text.split_whitespace());
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].start, 1);
    assert_eq!(found[1].start, 7);
    println!("✓ Word tokens");
}

fn test_indices() {
    let mut tree: TokenTree<u8, &[u8]> = TokenTree::new();
    tree.add(b"GET").unwrap();
    tree.add(b"").unwrap();
    tree.add(b"POST").unwrap();
    tree.finalize().unwrap();

    let hits = tree.search(b"POST /x GET /y", true).unwrap();
    assert_eq!(hits, vec![(Hit::Index(2), 0), (Hit::Index(1), 8)]);
    println!("✓ Registration indices");
}

fn test_phase_errors() {
    let mut tree: TokenTree<u8, Vec<u8>> = TokenTree::new();
    assert_eq!(tree.search(b"abc", false).unwrap_err(), Error::NotFinalized);
    tree.finalize().unwrap();
    assert_eq!(tree.add(b"abc".to_vec()), Err(Error::AlreadyFinalized));
    assert_eq!(tree.finalize(), Err(Error::AlreadyFinalized));
    println!("✓ Phase errors");
}
