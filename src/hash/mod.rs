//! Hash functions for Bloom filters
//!
//! Every strategy maps a string to a 64-bit value and derives an array index
//! from it. Strings are always hashed as their UTF-8 bytes, so all members of a
//! family agree on the input they see.
//!
//! Strategies are identified by name. The registered family is returned by
//! [`reference_family`] in a fixed order, and [`by_name`] resolves a name back
//! to its strategy (used when restoring encoded filters).

use crate::{BloomError, Result};
use std::fmt;
use std::sync::Arc;

/// Text encoding applied to every value before hashing.
pub const TEXT_ENCODING: &str = "UTF-8";

/// Trait for hash functions used in Bloom filters
pub trait HashStrategy: Send + Sync + fmt::Debug {
    /// Get a name/identifier for this hash function
    ///
    /// Names must be unique within a filter; they are what gets persisted.
    fn name(&self) -> &str;

    /// Hash raw bytes
    fn hash_bytes(&self, bytes: &[u8]) -> u64;

    /// Hash a string through its UTF-8 encoding
    fn hash(&self, value: &str) -> u64 {
        self.hash_bytes(value.as_bytes())
    }

}

/// Index derivation shared by every strategy.
///
/// Blanket-implemented for all [`HashStrategy`] types, so the position a
/// strategy reports is always the bit a filter sets for it.
pub trait HashIndex: HashStrategy {
    /// Map a string to a position in `[0, size)`
    fn index(&self, value: &str, size: usize) -> Result<usize>;
}

impl<H: HashStrategy + ?Sized> HashIndex for H {
    fn index(&self, value: &str, size: usize) -> Result<usize> {
        if size == 0 {
            return Err(BloomError::Arithmetic(format!(
                "{} cannot index into an empty bit array",
                self.name()
            )));
        }
        Ok(slot(self.hash(value), size))
    }
}

/// Reduce a hash onto a non-empty array of `size` bits.
pub(crate) fn slot(hash: u64, size: usize) -> usize {
    debug_assert!(size > 0);
    (hash % size as u64) as usize
}

/// A hash strategy shared between filters and configurations.
pub type SharedHash = Arc<dyn HashStrategy>;

/// Declares a stateless strategy as a unit struct.
macro_rules! hash_strategy {
    ($(#[$meta:meta])* $ty:ident, $name:literal, |$bytes:ident| $body:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $ty;

        impl $ty {
            pub const NAME: &'static str = $name;
        }

        impl $crate::hash::HashStrategy for $ty {
            fn name(&self) -> &str {
                Self::NAME
            }

            fn hash_bytes(&self, $bytes: &[u8]) -> u64 {
                $body
            }
        }
    };
}

pub mod checksum;
pub mod digest;
pub mod fnv;
pub mod murmur;

pub use self::checksum::{Adler32, Crc32, SipHash24, Xxh3_64, Xxh64};
pub use self::digest::{Md5, Sha1, Sha256, Sha512};
pub use self::fnv::{Fnv1Hash32, Fnv1Hash64, Fnv1aHash32, Fnv1aHash64};
pub use self::murmur::{Murmur3_128, Murmur3_32};

/// The registered family, in selection order
///
/// Seeded filters take the first `k` entries of this list, so the order must
/// never change: it decides which functions a filter of a given size uses.
/// The 32-bit checksums come last.
pub fn reference_family() -> Vec<SharedHash> {
    vec![
        Arc::new(Murmur3_128),
        Arc::new(Murmur3_32),
        Arc::new(Xxh64),
        Arc::new(SipHash24),
        Arc::new(Fnv1aHash64),
        Arc::new(Fnv1aHash32),
        Arc::new(Fnv1Hash64),
        Arc::new(Sha256),
        Arc::new(Sha512),
        Arc::new(Sha1),
        Arc::new(Md5),
        Arc::new(Xxh3_64),
        Arc::new(Fnv1Hash32),
        Arc::new(Crc32),
        Arc::new(Adler32),
    ]
}

/// Look up a registered strategy by name
pub fn by_name(name: &str) -> Option<SharedHash> {
    reference_family().into_iter().find(|h| h.name() == name)
}

/// Resolve a list of names against the registered family, preserving order
pub fn resolve_all<S: AsRef<str>>(names: &[S]) -> Result<Vec<SharedHash>> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            by_name(name).ok_or_else(|| BloomError::Hashing {
                name: name.to_string(),
                reason: "no hash function is registered under this name".to_string(),
            })
        })
        .collect()
}

/// Reads the first eight bytes of a digest as a little-endian integer.
pub(crate) fn fold_digest(digest: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let len = digest.len().min(8);
    buf[..len].copy_from_slice(&digest[..len]);
    u64::from_le_bytes(buf)
}
