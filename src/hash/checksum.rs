//! Keyed and non-cryptographic hashes backed by external crates.

use siphasher::sip::SipHasher24 as SipCore;
use std::hash::Hasher;

const XXH64_SEED: u64 = 0;

hash_strategy!(
    /// xxHash64 with a zero seed.
    Xxh64,
    "XXH64",
    |bytes| xxhash_rust::xxh64::xxh64(bytes, XXH64_SEED)
);

hash_strategy!(
    /// XXH3, 64-bit output.
    Xxh3_64,
    "XXH3_64",
    |bytes| xxhash_rust::xxh3::xxh3_64(bytes)
);

hash_strategy!(
    /// SipHash-2-4 with an all-zero key.
    SipHash24,
    "SIPHASH24",
    |bytes| {
        let mut hasher = SipCore::new_with_keys(0, 0);
        hasher.write(bytes);
        hasher.finish()
    }
);

hash_strategy!(
    /// CRC-32 (IEEE), zero-extended.
    Crc32,
    "CRC32",
    |bytes| u64::from(crc32fast::hash(bytes))
);

hash_strategy!(
    /// Adler-32, zero-extended. Clusters badly on short inputs.
    Adler32,
    "ADLER32",
    |bytes| u64::from(adler::adler32_slice(bytes))
);
