//! Standard Bloom filter implementation
//!
//! A space-efficient probabilistic data structure for membership testing of
//! strings. The filter is static: bits only ever go from unset to set, and the
//! bit-array length and hash-function selection are fixed at construction.

use crate::hash::{self, SharedHash};
use crate::sizing::{optimal_num_bits, optimal_num_hashes};
use crate::{BloomError, Result};
use bit_vec::BitVec;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// Default target false-positive rate
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Construction parameters for a [`BloomFilter`]
///
/// Either `seed_data` or `bit_count` must be provided:
///
/// * With seed data, the bit count and the number of hash functions are derived
///   from `seed_data.len()` and `false_positive_rate`. The first `k` entries of
///   `hash_functions` are used, `bit_count` is ignored, and every seed item is
///   inserted.
/// * Without seed data, `bit_count` and `hash_functions` are used verbatim and
///   the filter starts empty.
#[derive(Clone)]
pub struct FilterConfig {
    /// Explicit bit-array length, used only when `seed_data` is empty.
    pub bit_count: Option<usize>,
    /// Target false-positive rate in `(0, 1)`. Defaults to 0.01.
    pub false_positive_rate: f64,
    /// Ordered candidate hash functions. Defaults to the reference family.
    pub hash_functions: Vec<SharedHash>,
    /// Items to size the filter from and insert. Defaults to empty.
    pub seed_data: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            bit_count: None,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            hash_functions: hash::reference_family(),
            seed_data: Vec::new(),
        }
    }
}

impl fmt::Debug for FilterConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FilterConfig")
            .field("bit_count", &self.bit_count)
            .field("false_positive_rate", &self.false_positive_rate)
            .field("hash_functions", &names_of(&self.hash_functions))
            .field("seed_data_len", &self.seed_data.len())
            .finish()
    }
}

fn names_of(hash_functions: &[SharedHash]) -> Vec<&str> {
    hash_functions.iter().map(|h| h.name()).collect()
}

fn ensure_distinct(hash_functions: &[SharedHash]) -> Result<()> {
    let mut seen = HashSet::with_capacity(hash_functions.len());
    for hash_fn in hash_functions {
        if !seen.insert(hash_fn.name()) {
            return Err(BloomError::Configuration(format!(
                "Hash function {} is listed more than once",
                hash_fn.name()
            )));
        }
    }
    Ok(())
}

/// A standard Bloom filter over strings
pub struct BloomFilter {
    /// Bit array storing the filter data
    bits: BitVec,
    /// Hash functions used for this filter
    hash_functions: Vec<SharedHash>,
}

impl BloomFilter {
    /// Create a Bloom filter from a configuration
    ///
    /// Fails with [`BloomError::Configuration`] when the hash-function set is
    /// empty or repeats a name, the false-positive rate is outside `(0, 1)`,
    /// neither seed data nor a positive bit count is given, or the sizing asks
    /// for more hash functions than the configuration offers.
    pub fn new(config: FilterConfig) -> Result<Self> {
        let FilterConfig {
            bit_count,
            false_positive_rate,
            mut hash_functions,
            seed_data,
        } = config;

        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(BloomError::Configuration(format!(
                "False positive rate must be in (0, 1), got {}",
                false_positive_rate
            )));
        }
        if hash_functions.is_empty() {
            return Err(BloomError::Configuration(
                "At least one hash function is required".to_string(),
            ));
        }
        ensure_distinct(&hash_functions)?;

        let bit_count = if seed_data.is_empty() {
            match bit_count {
                Some(0) => {
                    return Err(BloomError::Configuration(
                        "Bit count must be > 0".to_string(),
                    ))
                }
                Some(bits) => bits,
                None => {
                    return Err(BloomError::Configuration(
                        "Either a bit count or seed data is required".to_string(),
                    ))
                }
            }
        } else {
            let items = seed_data.len();
            let bits = optimal_num_bits(items, false_positive_rate)?;
            let wanted = optimal_num_hashes(bits as f64, items)?;
            if wanted > hash_functions.len() {
                return Err(BloomError::Configuration(format!(
                    "{} items at rate {} need {} hash functions, only {} configured",
                    items,
                    false_positive_rate,
                    wanted,
                    hash_functions.len()
                )));
            }
            hash_functions.truncate(wanted);
            bits
        };

        debug!(
            bits = bit_count,
            hash_functions = ?names_of(&hash_functions),
            seed_items = seed_data.len(),
            "building bloom filter"
        );

        let mut filter = BloomFilter {
            bits: BitVec::from_elem(bit_count, false),
            hash_functions,
        };
        filter.insert_all(&seed_data);

        Ok(filter)
    }

    /// Create an empty Bloom filter with specific parameters
    pub fn with_size(bit_count: usize, hash_functions: Vec<SharedHash>) -> Result<Self> {
        BloomFilter::new(FilterConfig {
            bit_count: Some(bit_count),
            hash_functions,
            ..FilterConfig::default()
        })
    }

    /// Create a Bloom filter sized for `items` and insert them
    pub fn from_items<I, S>(items: I, false_positive_rate: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BloomFilter::new(FilterConfig {
            false_positive_rate,
            seed_data: items.into_iter().map(Into::into).collect(),
            ..FilterConfig::default()
        })
    }

    /// Rebuild a filter from already-validated parts.
    pub(crate) fn from_parts(bits: BitVec, hash_functions: Vec<SharedHash>) -> Self {
        debug_assert!(!bits.is_empty());
        debug_assert!(!hash_functions.is_empty());
        BloomFilter {
            bits,
            hash_functions,
        }
    }

    /// Insert a value into the filter
    pub fn insert(&mut self, value: &str) {
        let bit_count = self.bits.len();

        for hash_fn in &self.hash_functions {
            let index = hash::slot(hash_fn.hash(value), bit_count);
            self.bits.set(index, true);
        }
    }

    /// Insert every value of a sequence
    pub fn insert_all<S: AsRef<str>>(&mut self, values: &[S]) {
        trace!(count = values.len(), "bulk insert");
        for value in values {
            self.insert(value.as_ref());
        }
    }

    /// Check if a value might be in the filter
    /// Returns true if the value might be present (with possible false positives)
    /// Returns false if the value is definitely not present
    pub fn contains(&self, value: &str) -> bool {
        let bit_count = self.bits.len();

        for hash_fn in &self.hash_functions {
            let index = hash::slot(hash_fn.hash(value), bit_count);
            if !self.bits.get(index).unwrap_or(false) {
                return false;
            }
        }

        true
    }

    /// Get the size (number of bits)
    pub fn size(&self) -> usize {
        self.bits.len()
    }

    /// Get the hash functions, in probing order
    pub fn hash_functions(&self) -> &[SharedHash] {
        &self.hash_functions
    }

    /// Get the names of the hash functions, in probing order
    pub fn hash_names(&self) -> Vec<&str> {
        names_of(&self.hash_functions)
    }

    /// Get the number of hash functions
    pub fn num_hash_functions(&self) -> usize {
        self.hash_functions.len()
    }

    /// Raw bit array.
    pub(crate) fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// Get the current load factor (fraction of bits set)
    pub fn load_factor(&self) -> f64 {
        let set_bits = self.bits.iter().filter(|&bit| bit).count();
        set_bits as f64 / self.bits.len() as f64
    }

    /// Get the estimated false positive rate
    pub fn estimated_fpr(&self) -> f64 {
        let load = self.load_factor();
        load.powi(self.hash_functions.len() as i32)
    }

    /// Get statistics about the filter
    pub fn stats(&self) -> BloomStats {
        BloomStats {
            size: self.bits.len(),
            hash_functions: self.hash_names().iter().map(|n| n.to_string()).collect(),
            load_factor: self.load_factor(),
            estimated_fpr: self.estimated_fpr(),
        }
    }
}

impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("size", &self.bits.len())
            .field("hash_functions", &self.hash_names())
            .finish()
    }
}

/// Statistics about a Bloom filter
#[derive(Debug, Clone)]
pub struct BloomStats {
    pub size: usize,
    pub hash_functions: Vec<String>,
    pub load_factor: f64,
    pub estimated_fpr: f64,
}

impl fmt::Display for BloomStats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "BloomFilter Stats:\n\
             - Size: {} bits\n\
             - Hash functions ({}): {}\n\
             - Load factor: {:.3}\n\
             - Estimated FPR: {:.6}",
            self.size,
            self.hash_functions.len(),
            self.hash_functions.join(", "),
            self.load_factor,
            self.estimated_fpr
        )
    }
}
