//! MurmurHash3, in its x86 32-bit and x64 128-bit forms.

use byteorder::{ByteOrder, LE};

/// Seed shared by both murmur strategies.
const SEED: u32 = 0;

const C1_32: u32 = 0xcc9e_2d51;
const C2_32: u32 = 0x1b87_3593;
const C1_64: u64 = 0x87c3_7b91_1142_53d5;
const C2_64: u64 = 0x4cf5_ad43_2745_937f;

/// MurmurHash3_x86_32
pub fn murmur3_32(bytes: &[u8], seed: u32) -> u32 {
    let mut h1 = seed;
    let blocks = bytes.len() / 4;

    for i in 0..blocks {
        let k1 = LE::read_u32(&bytes[i * 4..i * 4 + 4]);
        h1 ^= mix_k1_32(k1);
        h1 = h1.rotate_left(13);
        h1 = h1.wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = &bytes[blocks * 4..];
    if !tail.is_empty() {
        let mut buf = [0u8; 4];
        buf[..tail.len()].copy_from_slice(tail);
        h1 ^= mix_k1_32(u32::from_le_bytes(buf));
    }

    h1 ^= bytes.len() as u32;
    fmix32(h1)
}

/// MurmurHash3_x64_128, returned as `(h1, h2)`
pub fn murmur3_x64_128(bytes: &[u8], seed: u64) -> (u64, u64) {
    let mut h1 = seed;
    let mut h2 = seed;
    let blocks = bytes.len() / 16;

    for i in 0..blocks {
        let lo = i * 16;
        let k1 = LE::read_u64(&bytes[lo..lo + 8]);
        let k2 = LE::read_u64(&bytes[lo + 8..lo + 16]);

        h1 ^= k1.wrapping_mul(C1_64).rotate_left(31).wrapping_mul(C2_64);
        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dc_e729);

        h2 ^= k2.wrapping_mul(C2_64).rotate_left(33).wrapping_mul(C1_64);
        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x3849_5ab5);
    }

    let tail = &bytes[blocks * 16..];
    if tail.len() > 8 {
        let mut buf = [0u8; 8];
        buf[..tail.len() - 8].copy_from_slice(&tail[8..]);
        let k2 = u64::from_le_bytes(buf);
        h2 ^= k2.wrapping_mul(C2_64).rotate_left(33).wrapping_mul(C1_64);
    }
    if !tail.is_empty() {
        let mut buf = [0u8; 8];
        let len = tail.len().min(8);
        buf[..len].copy_from_slice(&tail[..len]);
        let k1 = u64::from_le_bytes(buf);
        h1 ^= k1.wrapping_mul(C1_64).rotate_left(31).wrapping_mul(C2_64);
    }

    let total = bytes.len() as u64;
    h1 ^= total;
    h2 ^= total;
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    h1 = fmix64(h1);
    h2 = fmix64(h2);
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    (h1, h2)
}

#[inline]
fn mix_k1_32(k1: u32) -> u32 {
    k1.wrapping_mul(C1_32).rotate_left(15).wrapping_mul(C2_32)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^ (h >> 16)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^ (k >> 33)
}

hash_strategy!(
    /// 32-bit MurmurHash3, zero-extended.
    Murmur3_32,
    "MURMUR3_32",
    |bytes| u64::from(murmur3_32(bytes, SEED))
);

hash_strategy!(
    /// Low 64 bits (`h1`) of the 128-bit MurmurHash3.
    Murmur3_128,
    "MURMUR3_128",
    |bytes| murmur3_x64_128(bytes, u64::from(SEED)).0
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashStrategy;

    #[test]
    fn test_murmur3_32_vectors() {
        assert_eq!(murmur3_32(b"", 0), 0);
        assert_eq!(murmur3_32(b"hello", 0), 0x248b_fa47);
        assert_eq!(
            murmur3_32(b"The quick brown fox jumps over the lazy dog", 0),
            0x2e4f_f723
        );
        assert_eq!(Murmur3_32.hash("hello"), 0x248b_fa47);
    }

    #[test]
    fn test_murmur3_128_remainders() {
        // remainder > 8
        let (h1, h2) = murmur3_x64_128(b"The quick brown fox jumps over the lazy dog", 0);
        assert_eq!(h1, 0xe34b_bc7b_bc07_1b6c);
        assert_eq!(h2, 0x7a43_3ca9_c49a_9347);

        // remainder < 8
        let (h1, h2) = murmur3_x64_128(b"The quick brown fox jumps over the lazy dogdogdog", 0);
        assert_eq!(h1, 0x9c82_0530_0e61_2fc4);
        assert_eq!(h2, 0xcbc0_af61_36aa_3df9);

        // remainder = 8
        let (h1, h2) = murmur3_x64_128(b"The quick brown fox jumps over the lazy1", 0);
        assert_eq!(h1, 0xe330_1a82_7e5c_dfe3);
        assert_eq!(h2, 0xbdbf_05f8_da0f_0392);

        // remainder = 0
        let (h1, h2) = murmur3_x64_128(b"The quick brown fox jumps over t", 0);
        assert_eq!(h1, 0xdf6a_f91b_b29b_dacf);
        assert_eq!(h2, 0x91a3_41c5_8df1_f3a6);

        assert_eq!(
            Murmur3_128.hash("The quick brown fox jumps over t"),
            0xdf6a_f91b_b29b_dacf
        );
    }
}
