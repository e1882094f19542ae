//! Filters built from the bundled word list

use lexibloom::{hash, wordlist, BloomError, BloomFilter, FilterConfig};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/wordlist.txt")
}

fn words() -> Vec<String> {
    wordlist::load_words(fixture()).unwrap()
}

fn word_filter() -> BloomFilter {
    BloomFilter::new(FilterConfig {
        seed_data: words(),
        ..FilterConfig::default()
    })
    .unwrap()
}

#[test]
fn test_reference_scenario() {
    let filter = word_filter();

    assert!(filter.contains("unvizards"));
    assert!(filter.contains("waffs"));
    assert!(!filter.contains("777"));
    assert!(!filter.contains("waffsd"));
}

#[test]
fn test_sized_from_word_count() {
    let words = words();
    assert_eq!(words.len(), 151);

    let filter = word_filter();
    assert_eq!(filter.size(), 1448);
    assert_eq!(
        filter.hash_names(),
        vec!["MURMUR3_128", "MURMUR3_32", "XXH64", "SIPHASH24", "FNV1A_64", "FNV1A_32", "FNV1_64"]
    );
}

#[test]
fn test_no_false_negatives() {
    let filter = word_filter();
    for word in words() {
        assert!(filter.contains(&word), "False negative for {}", word);
    }
}

#[test]
fn test_observed_false_positive_rate() {
    let filter = word_filter();
    let probes = 10_000;
    let hits = (0..probes)
        .filter(|i| filter.contains(&format!("absent-{}", i)))
        .count();

    let observed = hits as f64 / probes as f64;
    assert!(observed < 0.02, "observed false positive rate {}", observed);
}

#[test]
fn test_every_family_member_alone_has_no_false_negatives() {
    let words = words();
    for hash_fn in hash::reference_family() {
        let name = hash_fn.name().to_string();
        let mut filter = BloomFilter::with_size(1448, vec![hash_fn]).unwrap();
        filter.insert_all(&words);
        for word in &words {
            assert!(filter.contains(word), "{} lost {}", name, word);
        }
    }
}

#[test]
fn test_encoded_filter_survives_a_file() {
    let filter = word_filter();
    let path = std::env::temp_dir().join(format!("lexibloom-{}.bloom", std::process::id()));

    std::fs::write(&path, filter.to_bytes().unwrap()).unwrap();
    let restored = BloomFilter::from_bytes(&std::fs::read(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(restored.size(), filter.size());
    assert_eq!(restored.hash_names(), filter.hash_names());
    assert!(restored.contains("unvizards"));
    assert!(!restored.contains("waffsd"));
}

#[test]
fn test_named_hash_selection() {
    let names = ["SHA256", "MD5", "CRC32"];
    let filter = BloomFilter::new(FilterConfig {
        bit_count: Some(4096),
        hash_functions: hash::resolve_all(&names).unwrap(),
        ..FilterConfig::default()
    })
    .unwrap();
    assert_eq!(filter.hash_names(), names);

    let unknown = hash::resolve_all(&["SHA256", "SHA3"]);
    assert!(matches!(unknown, Err(BloomError::Hashing { .. })));
}
