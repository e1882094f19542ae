//! Binary encoding of Bloom filters
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! u8   serial version
//! u8   family id
//! u16  number of hash functions (k)
//! u64  bit-array length (m)
//! k x  { u8 name length, UTF-8 name }
//! ceil(m / 8) bytes of packed bits, first bit in the high-order position
//! ```
//!
//! Hash functions are stored by name and resolved against the registered
//! family when decoding, so filters built with custom strategies can be
//! encoded but not restored.

use crate::bloom::BloomFilter;
use crate::hash::{self, SharedHash};
use crate::{BloomError, Result};
use bit_vec::BitVec;
use byteorder::{ReadBytesExt, LE};
use std::collections::HashSet;
use std::io::{Cursor, Read};

/// Current serial version.
pub const SERIAL_VERSION: u8 = 1;
/// Marks a blob as a Bloom filter ('B').
pub const FAMILY_ID: u8 = 0x42;

const PREAMBLE_BYTES: usize = 12;

fn insufficient(what: &str) -> impl FnOnce(std::io::Error) -> BloomError + '_ {
    move |err| BloomError::Serialization(format!("insufficient data ({}): {}", what, err))
}

impl BloomFilter {
    /// Encode the filter into a self-describing byte blob
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let names = self.hash_names();
        let num_hashes = u16::try_from(names.len()).map_err(|_| {
            BloomError::Serialization(format!("too many hash functions: {}", names.len()))
        })?;

        let packed = self.bits().to_bytes();
        let name_bytes: usize = names.iter().map(|n| n.len() + 1).sum();
        let mut bytes = Vec::with_capacity(PREAMBLE_BYTES + name_bytes + packed.len());

        bytes.push(SERIAL_VERSION);
        bytes.push(FAMILY_ID);
        bytes.extend_from_slice(&num_hashes.to_le_bytes());
        bytes.extend_from_slice(&(self.size() as u64).to_le_bytes());

        for name in names {
            let len = u8::try_from(name.len()).map_err(|_| {
                BloomError::Serialization(format!("hash function name too long: {}", name))
            })?;
            bytes.push(len);
            bytes.extend_from_slice(name.as_bytes());
        }
        bytes.extend_from_slice(&packed);

        Ok(bytes)
    }

    /// Decode a filter produced by [`BloomFilter::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);

        let version = cursor.read_u8().map_err(insufficient("serial version"))?;
        if version != SERIAL_VERSION {
            return Err(BloomError::Serialization(format!(
                "unsupported serial version: expected {}, got {}",
                SERIAL_VERSION, version
            )));
        }
        let family = cursor.read_u8().map_err(insufficient("family id"))?;
        if family != FAMILY_ID {
            return Err(BloomError::Serialization(format!(
                "invalid family: expected {}, got {}",
                FAMILY_ID, family
            )));
        }

        let num_hashes = cursor.read_u16::<LE>().map_err(insufficient("hash count"))?;
        if num_hashes == 0 {
            return Err(BloomError::Serialization(
                "filter lists no hash functions".to_string(),
            ));
        }
        let bit_count = cursor.read_u64::<LE>().map_err(insufficient("bit count"))?;
        if bit_count == 0 {
            return Err(BloomError::Serialization(
                "filter has an empty bit array".to_string(),
            ));
        }

        let hash_functions = read_hash_functions(&mut cursor, num_hashes)?;

        let packed_len = bit_count / 8 + u64::from(bit_count % 8 != 0);
        let remaining = (bytes.len() as u64).saturating_sub(cursor.position());
        if remaining != packed_len {
            return Err(BloomError::Serialization(format!(
                "expected {} bytes of bit data, found {}",
                packed_len, remaining
            )));
        }
        let bit_count = usize::try_from(bit_count).map_err(|_| {
            BloomError::Serialization(format!("bit count {} is not addressable", bit_count))
        })?;

        let start = cursor.position() as usize;
        let mut bits = BitVec::from_bytes(&bytes[start..]);
        if (bit_count..bits.len()).any(|i| bits.get(i) == Some(true)) {
            return Err(BloomError::Serialization(
                "padding bits beyond the bit array are set".to_string(),
            ));
        }
        bits.truncate(bit_count);

        Ok(BloomFilter::from_parts(bits, hash_functions))
    }
}

fn read_hash_functions(cursor: &mut Cursor<&[u8]>, count: u16) -> Result<Vec<SharedHash>> {
    let mut seen = HashSet::with_capacity(count as usize);
    let mut hash_functions = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let len = cursor.read_u8().map_err(insufficient("name length"))?;
        let mut buf = vec![0u8; len as usize];
        cursor
            .read_exact(&mut buf)
            .map_err(insufficient("hash function name"))?;
        let name = String::from_utf8(buf).map_err(|err| {
            BloomError::Serialization(format!("hash function name is not UTF-8: {}", err))
        })?;

        let hash_fn = hash::by_name(&name).ok_or_else(|| {
            BloomError::Serialization(format!("unknown hash function: {}", name))
        })?;
        if !seen.insert(name.clone()) {
            return Err(BloomError::Serialization(format!(
                "hash function listed twice: {}",
                name
            )));
        }
        hash_functions.push(hash_fn);
    }

    Ok(hash_functions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Crc32, Md5, Murmur3_32};
    use std::sync::Arc;

    fn sample_filter() -> BloomFilter {
        let words: Vec<String> = (0..200).map(|i| format!("entry{}", i)).collect();
        BloomFilter::from_items(words, 0.01).unwrap()
    }

    #[test]
    fn test_restored_filter_answers_identically() {
        let original = sample_filter();
        let restored = BloomFilter::from_bytes(&original.to_bytes().unwrap()).unwrap();

        assert_eq!(restored.size(), original.size());
        assert_eq!(restored.hash_names(), original.hash_names());
        assert_eq!(restored.bits(), original.bits());
        for i in 0..400 {
            let probe = format!("entry{}", i);
            assert_eq!(restored.contains(&probe), original.contains(&probe));
        }
    }

    #[test]
    fn test_exact_layout() {
        let hashes: Vec<SharedHash> = vec![Arc::new(Md5), Arc::new(Crc32)];
        let mut filter = BloomFilter::with_size(10, hashes).unwrap();
        filter.insert("x");

        let bytes = filter.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[SERIAL_VERSION, FAMILY_ID, 2, 0]);
        assert_eq!(&bytes[4..12], &10u64.to_le_bytes());
        assert_eq!(&bytes[12..16], &[3, b'M', b'D', b'5']);
        assert_eq!(&bytes[16..22], &[5, b'C', b'R', b'C', b'3', b'2']);
        assert_eq!(bytes.len(), 22 + 2);
        // The six padding bits of the last byte stay clear
        assert_eq!(bytes[23] & 0b0011_1111, 0);
    }

    #[test]
    fn test_truncated_input_rejected() {
        let bytes = sample_filter().to_bytes().unwrap();
        for len in 0..bytes.len() {
            assert!(
                matches!(
                    BloomFilter::from_bytes(&bytes[..len]),
                    Err(BloomError::Serialization(_))
                ),
                "prefix of {} bytes was accepted",
                len
            );
        }
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = sample_filter().to_bytes().unwrap();
        bytes.push(0);
        assert!(matches!(
            BloomFilter::from_bytes(&bytes),
            Err(BloomError::Serialization(_))
        ));
    }

    #[test]
    fn test_bad_header_rejected() {
        let bytes = sample_filter().to_bytes().unwrap();

        let mut wrong_version = bytes.clone();
        wrong_version[0] = 2;
        assert!(BloomFilter::from_bytes(&wrong_version).is_err());

        let mut wrong_family = bytes.clone();
        wrong_family[1] = 0;
        assert!(BloomFilter::from_bytes(&wrong_family).is_err());

        let mut no_hashes = bytes.clone();
        no_hashes[2] = 0;
        no_hashes[3] = 0;
        assert!(BloomFilter::from_bytes(&no_hashes).is_err());

        let mut empty_bits = bytes;
        empty_bits[4..12].copy_from_slice(&0u64.to_le_bytes());
        assert!(BloomFilter::from_bytes(&empty_bits).is_err());
    }

    #[test]
    fn test_unknown_hash_name_rejected() {
        let hashes: Vec<SharedHash> = vec![Arc::new(Md5)];
        let filter = BloomFilter::with_size(16, hashes).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        // "MD5" -> "MD6"
        bytes[15] = b'6';

        match BloomFilter::from_bytes(&bytes) {
            Err(BloomError::Serialization(msg)) => assert!(msg.contains("MD6")),
            other => panic!("expected serialization error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_hash_name_rejected() {
        let hashes: Vec<SharedHash> = vec![Arc::new(Md5), Arc::new(Crc32)];
        let filter = BloomFilter::with_size(16, hashes).unwrap();
        // Replace the "CRC32" entry with a second "MD5"
        let mut bytes = filter.to_bytes().unwrap();
        bytes.splice(16..22, [3, b'M', b'D', b'5']);
        assert!(matches!(
            BloomFilter::from_bytes(&bytes),
            Err(BloomError::Serialization(_))
        ));
    }

    #[test]
    fn test_padding_bits_rejected() {
        let hashes: Vec<SharedHash> = vec![Arc::new(Murmur3_32)];
        let filter = BloomFilter::with_size(12, hashes).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        let last = bytes.len() - 1;
        bytes[last] |= 0b0000_0001;
        assert!(BloomFilter::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_non_utf8_name_rejected() {
        let hashes: Vec<SharedHash> = vec![Arc::new(Md5)];
        let filter = BloomFilter::with_size(8, hashes).unwrap();
        let mut bytes = filter.to_bytes().unwrap();
        bytes[13] = 0xff;
        assert!(matches!(
            BloomFilter::from_bytes(&bytes),
            Err(BloomError::Serialization(_))
        ));
    }
}
