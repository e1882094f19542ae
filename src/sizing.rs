//! Sizing formulas for Bloom filters
//!
//! The classical capacity formulas: for `n` expected items and a target
//! false-positive rate `p`, the optimal bit count is `m = -n * ln(p) / (ln 2)^2`
//! and the optimal hash count is `k = (m / n) * ln 2`. Both are rounded up.

use crate::{BloomError, Result};
use std::f64::consts::LN_2;
use tracing::debug;

/// Calculated Bloom filter parameters
#[derive(Debug, Clone, PartialEq)]
pub struct BloomParameters {
    pub optimal_num_bits: usize,
    pub optimal_num_hashes: usize,
    pub expected_fpr: f64,
}

fn validate_rate(false_positive_rate: f64) -> Result<()> {
    // NaN fails both comparisons, so test for the valid range instead
    if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
        return Err(BloomError::Configuration(format!(
            "False positive rate must be in (0, 1), got {}",
            false_positive_rate
        )));
    }
    Ok(())
}

/// Optimal number of bits: `ceil(-n * ln(p) / (ln 2)^2)`
pub fn optimal_num_bits(item_count: usize, false_positive_rate: f64) -> Result<usize> {
    if item_count == 0 {
        return Err(BloomError::Configuration(
            "Item count must be > 0".to_string(),
        ));
    }
    validate_rate(false_positive_rate)?;

    let ln2_squared = LN_2 * LN_2;
    let bits = (-(item_count as f64) * false_positive_rate.ln() / ln2_squared).ceil();
    if bits >= usize::MAX as f64 {
        return Err(BloomError::Configuration(format!(
            "{} items at rate {} need more bits than addressable",
            item_count, false_positive_rate
        )));
    }

    Ok(bits as usize)
}

/// Optimal number of hash functions: `ceil((m / n) * ln 2)`
pub fn optimal_num_hashes(bit_count: f64, item_count: usize) -> Result<usize> {
    if item_count == 0 {
        return Err(BloomError::Configuration(
            "Item count must be > 0".to_string(),
        ));
    }
    if !(bit_count.is_finite() && bit_count > 0.0) {
        return Err(BloomError::Configuration(format!(
            "Bit count must be a positive number, got {}",
            bit_count
        )));
    }

    Ok(((bit_count / item_count as f64) * LN_2).ceil() as usize)
}

/// False-positive probability `(1 - e^(-k*n/m))^k` of a filter with `m` bits,
/// `k` hash functions and `n` inserted items.
pub fn expected_fpr(bit_count: usize, item_count: usize, num_hashes: usize) -> f64 {
    if bit_count == 0 {
        return 1.0;
    }
    let k = num_hashes as f64;
    let exponent = -k * item_count as f64 / bit_count as f64;
    (1.0 - exponent.exp()).powi(num_hashes as i32)
}

/// Calculate optimal Bloom filter parameters for given constraints
///
/// When `max_memory_bits` caps the bit count, the hash count is derived from
/// the capped size and the reported rate reflects the degraded filter.
pub fn optimal_bloom_parameters(
    expected_elements: usize,
    desired_fpr: f64,
    max_memory_bits: Option<usize>,
) -> Result<BloomParameters> {
    let optimal_bits = optimal_num_bits(expected_elements, desired_fpr)?;

    let final_bits = match max_memory_bits {
        Some(0) => {
            return Err(BloomError::Configuration(
                "Memory limit must be > 0 bits".to_string(),
            ))
        }
        Some(max_bits) if optimal_bits > max_bits => max_bits,
        _ => optimal_bits,
    };

    let final_hashes = optimal_num_hashes(final_bits as f64, expected_elements)?;
    let actual_fpr = expected_fpr(final_bits, expected_elements, final_hashes);

    debug!(
        items = expected_elements,
        target_fpr = desired_fpr,
        bits = final_bits,
        hashes = final_hashes,
        expected_fpr = actual_fpr,
        "sized bloom filter"
    );

    Ok(BloomParameters {
        optimal_num_bits: final_bits,
        optimal_num_hashes: final_hashes,
        expected_fpr: actual_fpr,
    })
}
