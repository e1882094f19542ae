//! Basic usage examples for lexibloom

use lexibloom::hash::{Fnv1aHash64, Murmur3_128, Sha256};
use lexibloom::sizing::optimal_bloom_parameters;
use lexibloom::{BloomFilter, FilterConfig, SharedHash};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lexibloom Examples ===\n");

    // Example 1: Sizing
    println!("1. Sizing for 216,553 words at 1%:");
    let params = optimal_bloom_parameters(216_553, 0.01, None)?;
    println!(
        "  {} bits, {} hash functions, expected FPR {:.4}",
        params.optimal_num_bits, params.optimal_num_hashes, params.expected_fpr
    );
    println!();

    // Example 2: Seeded filter
    println!("2. Filter seeded from data:");
    let fruit = ["apple", "banana", "cherry", "damson", "elderberry"];
    let bloom = BloomFilter::from_items(fruit, 0.01)?;

    for item in fruit.iter().chain(["fig", "grape"].iter()) {
        println!("  {} in filter: {}", item, bloom.contains(item));
    }
    println!("  {}", bloom.stats());
    println!();

    // Example 3: Explicit size and hash functions
    println!("3. Explicit configuration:");
    let hashes: Vec<SharedHash> = vec![
        Arc::new(Murmur3_128),
        Arc::new(Fnv1aHash64),
        Arc::new(Sha256),
    ];
    let mut explicit = BloomFilter::new(FilterConfig {
        bit_count: Some(4096),
        hash_functions: hashes,
        ..FilterConfig::default()
    })?;
    explicit.insert_all(&["Anton", "12345", "TEST"]);
    println!("  contains(\"TEST\"): {}", explicit.contains("TEST"));
    println!("  contains(\"777\"): {}", explicit.contains("777"));
    println!();

    // Example 4: Encode and restore
    println!("4. Encoding:");
    let blob = explicit.to_bytes()?;
    let restored = BloomFilter::from_bytes(&blob)?;
    println!("  {} bytes, restored with {:?}", blob.len(), restored.hash_names());
    println!("  restored contains(\"Anton\"): {}", restored.contains("Anton"));

    Ok(())
}
