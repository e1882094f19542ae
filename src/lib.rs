//! # Lexibloom
//!
//! A static Bloom filter over string keys. The filter is sized from an expected
//! item count and a target false-positive rate, and probes its bit array with a
//! deterministic, ordered selection of named hash functions.
//!
//! ```
//! use lexibloom::{BloomFilter, FilterConfig};
//!
//! let words = vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()];
//! let filter = BloomFilter::new(FilterConfig {
//!     seed_data: words,
//!     ..FilterConfig::default()
//! })?;
//!
//! assert!(filter.contains("beta"));
//! # Ok::<(), lexibloom::BloomError>(())
//! ```

pub mod bloom;
pub mod codec;
pub mod hash;
pub mod sizing;
pub mod wordlist;

pub use bloom::{BloomFilter, BloomStats, FilterConfig};
pub use hash::{HashIndex, HashStrategy, SharedHash};
pub use sizing::{optimal_num_bits, optimal_num_hashes};

// Python bindings
#[cfg(feature = "python")]
pub mod python_module;

/// Common error types for the library
#[derive(Debug, thiserror::Error)]
pub enum BloomError {
    /// Invalid or insufficient construction parameters.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// Index derivation against a zero-length array.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
    /// A requested hash function could not be provided.
    #[error("Hash function error ({name}): {reason}")]
    Hashing { name: String, reason: String },
    /// Malformed filter blob.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Reading a word list failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BloomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_bloom_filter() {
        let mut bloom = BloomFilter::with_size(1000, hash::reference_family()).unwrap();

        // Insert some keys
        bloom.insert("42");
        bloom.insert("1337");
        bloom.insert("9999");

        // Test membership
        assert!(bloom.contains("42"));
        assert!(bloom.contains("1337"));
        assert!(bloom.contains("9999"));
    }

    #[test]
    fn test_error_display() {
        let err = BloomError::Hashing {
            name: "WHIRLPOOL".to_string(),
            reason: "not registered".to_string(),
        };
        assert_eq!(err.to_string(), "Hash function error (WHIRLPOOL): not registered");

        let err = BloomError::Configuration("empty hash function set".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: empty hash function set");
    }
}
