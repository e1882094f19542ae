//! Cryptographic digests reduced to 64 bits.
//!
//! Each digest is folded by reading its first eight bytes as a little-endian
//! integer; the remaining bytes are discarded.

use super::fold_digest;
use sha2::Digest;

hash_strategy!(
    /// MD5, folded to 64 bits.
    Md5,
    "MD5",
    |bytes| fold_digest(&::md5::Md5::digest(bytes))
);

hash_strategy!(
    /// SHA-1, folded to 64 bits.
    Sha1,
    "SHA1",
    |bytes| fold_digest(&::sha1::Sha1::digest(bytes))
);

hash_strategy!(
    /// SHA-256, folded to 64 bits.
    Sha256,
    "SHA256",
    |bytes| fold_digest(&::sha2::Sha256::digest(bytes))
);

hash_strategy!(
    /// SHA-512, folded to 64 bits.
    Sha512,
    "SHA512",
    |bytes| fold_digest(&::sha2::Sha512::digest(bytes))
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashStrategy;

    #[test]
    fn test_empty_input_folds() {
        // md5("") = d41d8cd98f00b204...
        assert_eq!(Md5.hash(""), 0x04b2_008f_d98c_1dd4);
        assert_eq!(Sha1.hash(""), 0x0d4b_6b5e_eea3_39da);
        assert_eq!(Sha256.hash(""), 0x141c_fc98_42c4_b0e3);
        assert_eq!(Sha512.hash(""), 0xbdb8_ef7e_35e1_83cf);
    }

    #[test]
    fn test_abc_folds() {
        assert_eq!(Md5.hash("abc"), 0xb04f_d23c_9850_0190);
        assert_eq!(Sha1.hash("abc"), 0x6a81_0647_363e_99a9);
        assert_eq!(Sha256.hash("abc"), 0xeacf_018f_bf16_78ba);
        assert_eq!(Sha512.hash("abc"), 0xba7a_6193_a135_afdd);
    }
}
