//! Fowler–Noll–Vo hashes, in the FNV-1 and FNV-1a orderings.

use std::hash::Hasher;

const OFFSET_BASIS_32: u32 = 0x811c_9dc5;
const PRIME_32: u32 = 0x0100_0193;
const OFFSET_BASIS_64: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME_64: u64 = 0x0000_0100_0000_01b3;

fn fnv1_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(OFFSET_BASIS_32, |hash, &byte| {
        hash.wrapping_mul(PRIME_32) ^ u32::from(byte)
    })
}

fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(OFFSET_BASIS_32, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(PRIME_32)
    })
}

fn fnv1_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(OFFSET_BASIS_64, |hash, &byte| {
        hash.wrapping_mul(PRIME_64) ^ u64::from(byte)
    })
}

hash_strategy!(
    /// FNV-1 over 32 bits: multiply, then xor.
    Fnv1Hash32,
    "FNV1_32",
    |bytes| u64::from(fnv1_32(bytes))
);

hash_strategy!(
    /// FNV-1a over 32 bits: xor, then multiply.
    Fnv1aHash32,
    "FNV1A_32",
    |bytes| u64::from(fnv1a_32(bytes))
);

hash_strategy!(
    /// FNV-1 over 64 bits.
    Fnv1Hash64,
    "FNV1_64",
    |bytes| fnv1_64(bytes)
);

hash_strategy!(
    /// FNV-1a over 64 bits, backed by the `fnv` crate.
    Fnv1aHash64,
    "FNV1A_64",
    |bytes| {
        let mut hasher = ::fnv::FnvHasher::default();
        hasher.write(bytes);
        hasher.finish()
    }
);
