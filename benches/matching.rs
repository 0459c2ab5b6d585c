//! Benchmarks for tokenmatch construction and search
//!
//! Covers byte, character and word alphabets so the cost of hashing larger
//! tokens shows up next to the byte case.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokenmatch::{Automaton, AutomatonBuilder};

const WORDS: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliett",
    "kilo", "lima", "mike", "november", "oscar", "papa", "quebec", "romeo", "sierra", "tango",
];

/// Deterministic pseudo-random text over the given alphabet.
fn haystack<T: Copy>(alphabet: &[T], len: usize) -> Vec<T> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            alphabet[(seed % alphabet.len() as u64) as usize]
        })
        .collect()
}

fn byte_patterns(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(|i| format!("p{}q", i).into_bytes()).collect()
}

fn byte_automaton(count: usize) -> Automaton<u8, Vec<u8>> {
    byte_patterns(count)
        .into_iter()
        .collect::<AutomatonBuilder<u8, Vec<u8>>>()
        .finalize()
}

fn bench_build_100_patterns(c: &mut Criterion) {
    let patterns = byte_patterns(100);

    c.bench_function("build_100_patterns", |b| {
        b.iter(|| {
            black_box(&patterns)
                .iter()
                .cloned()
                .collect::<AutomatonBuilder<u8, Vec<u8>>>()
                .finalize()
        })
    });
}

fn bench_build_1000_patterns(c: &mut Criterion) {
    let patterns = byte_patterns(1000);

    c.bench_function("build_1000_patterns", |b| {
        b.iter(|| {
            black_box(&patterns)
                .iter()
                .cloned()
                .collect::<AutomatonBuilder<u8, Vec<u8>>>()
                .finalize()
        })
    });
}

fn bench_search_bytes(c: &mut Criterion) {
    let automaton = byte_automaton(100);
    let text = haystack(b"pq0123456789", 64 * 1024);

    c.bench_function("search_bytes_64k", |b| {
        b.iter(|| automaton.search_all(black_box(&text)).count())
    });
}

fn bench_search_bytes_no_match(c: &mut Criterion) {
    let automaton = byte_automaton(100);
    let text = haystack(b"abcdefghij", 64 * 1024);

    c.bench_function("search_bytes_64k_no_match", |b| {
        b.iter(|| automaton.search_all(black_box(&text)).count())
    });
}

fn bench_search_one_early_exit(c: &mut Criterion) {
    let automaton = byte_automaton(100);
    let mut text = b"p7q".to_vec();
    text.extend(haystack(b"abcdefghij", 64 * 1024));

    c.bench_function("search_one_early_exit", |b| {
        b.iter(|| automaton.search_one(black_box(&text)))
    });
}

fn bench_search_nested_suffixes(c: &mut Criterion) {
    // Every position ends several nested patterns.
    let automaton = ["a", "aa", "aaa", "aaaa"]
        .iter()
        .map(|p| p.as_bytes())
        .collect::<AutomatonBuilder<u8, &[u8]>>()
        .finalize();
    let text = vec![b'a'; 16 * 1024];

    c.bench_function("search_nested_suffixes", |b| {
        b.iter(|| automaton.search_all(black_box(&text)).count())
    });
}

fn bench_search_chars(c: &mut Criterion) {
    let automaton = ["she", "he", "his", "hers", "usher"]
        .iter()
        .map(|p| p.chars().collect::<Vec<char>>())
        .collect::<AutomatonBuilder<char, Vec<char>>>()
        .finalize();
    let text: String = haystack(&['s', 'h', 'e', 'r', 'i', 'u', ' '], 64 * 1024)
        .into_iter()
        .collect();

    c.bench_function("search_chars_64k", |b| {
        b.iter(|| automaton.search_all(black_box(&text).chars()).count())
    });
}

fn bench_search_words(c: &mut Criterion) {
    let mut builder: AutomatonBuilder<&str, Vec<&str>> = AutomatonBuilder::new();
    for pair in WORDS.windows(2).step_by(3) {
        builder.add(pair.to_vec());
    }
    for triple in WORDS.windows(3).step_by(4) {
        builder.add(triple.to_vec());
    }
    let automaton = builder.finalize();
    let text = haystack(WORDS, 16 * 1024);

    c.bench_function("search_words_16k", |b| {
        b.iter(|| automaton.search_all(black_box(&text)).count())
    });
}

criterion_group!(
    benches,
    bench_build_100_patterns,
    bench_build_1000_patterns,
    bench_search_bytes,
    bench_search_bytes_no_match,
    bench_search_one_early_exit,
    bench_search_nested_suffixes,
    bench_search_chars,
    bench_search_words,
);

criterion_main!(benches);
