//! Fixed-width byte conversions
//!
//! Integers are encoded into caller-chosen widths in either byte order.
//! Encoding never truncates: a width below the minimal encoding length is an
//! error, not a silent wraparound.

use anchor_lang::prelude::*;
use num_bigint::BigUint;

use crate::constants::HASH_LEN;
use crate::error::CompressionError;

/// Decode big-endian bytes into an integer.
pub fn bytes_to_big_endian(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Decode little-endian bytes into an integer.
pub fn bytes_to_little_endian(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Encode `value` big-endian, left-padded with zeros to `width` bytes.
///
/// # Errors
/// * `InvalidLength` - `value` needs more than `width` bytes
pub fn big_endian_to_bytes(value: &BigUint, width: usize) -> Result<Vec<u8>> {
    let mut bytes = little_endian_to_bytes(value, width)?;
    bytes.reverse();
    Ok(bytes)
}

/// Encode `value` little-endian, right-padded with zeros to `width` bytes.
///
/// # Errors
/// * `InvalidLength` - `value` needs more than `width` bytes
pub fn little_endian_to_bytes(value: &BigUint, width: usize) -> Result<Vec<u8>> {
    let mut bytes = minimal_le_bytes(value);
    require!(bytes.len() <= width, CompressionError::InvalidLength);
    bytes.resize(width, 0);
    Ok(bytes)
}

fn minimal_le_bytes(value: &BigUint) -> Vec<u8> {
    // BigUint encodes zero as a single 0x00 byte
    let mut bytes = value.to_bytes_le();
    while bytes.last() == Some(&0) {
        bytes.pop();
    }
    bytes
}

/// 32-byte form of a pubkey-like identifier.
#[inline]
pub fn pubkey_to_bytes(pubkey: &Pubkey) -> [u8; 32] {
    pubkey.to_bytes()
}

/// Rebuild a pubkey-like identifier from exactly 32 bytes.
pub fn bytes_to_pubkey(bytes: &[u8]) -> Result<Pubkey> {
    let array: [u8; 32] = bytes
        .try_into()
        .map_err(|_| error!(CompressionError::InvalidLength))?;
    Ok(Pubkey::new_from_array(array))
}

/// Convert u64 to 32-byte big-endian representation.
///
/// Places the 8-byte big-endian value in the last 8 bytes.
#[inline]
pub fn u64_to_bytes32_be(value: u64) -> [u8; 32] {
    let mut bytes = [0u8; HASH_LEN];
    bytes[24..32].copy_from_slice(&value.to_be_bytes());
    bytes
}

/// Check if a 32-byte value is all zeros.
#[inline]
pub fn is_zero_hash(hash: &[u8; 32]) -> bool {
    hash.iter().all(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_256() {
        let value = BigUint::from(256u32);
        assert_eq!(big_endian_to_bytes(&value, 2).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_little_endian_256() {
        let value = BigUint::from(256u32);
        assert_eq!(little_endian_to_bytes(&value, 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_width_too_small() {
        let value = BigUint::from(0x010000u32);
        assert!(big_endian_to_bytes(&value, 2).is_err());
        assert!(little_endian_to_bytes(&value, 2).is_err());
    }

    #[test]
    fn test_zero_fits_any_width() {
        let zero = BigUint::from(0u32);
        assert_eq!(big_endian_to_bytes(&zero, 0).unwrap(), Vec::<u8>::new());
        assert_eq!(big_endian_to_bytes(&zero, 4).unwrap(), vec![0; 4]);
    }

    #[test]
    fn test_padding_width() {
        let value = BigUint::from(0xabcdu32);
        let be = big_endian_to_bytes(&value, 32).unwrap();
        let le = little_endian_to_bytes(&value, 32).unwrap();
        assert_eq!(be.len(), 32);
        assert_eq!(&be[30..], &[0xab, 0xcd]);
        assert_eq!(&le[..2], &[0xcd, 0xab]);
        assert_eq!(bytes_to_big_endian(&be), value);
        assert_eq!(bytes_to_little_endian(&le), value);
    }

    #[test]
    fn test_single_byte_symmetric() {
        let value = BigUint::from(7u32);
        assert_eq!(
            big_endian_to_bytes(&value, 1).unwrap(),
            little_endian_to_bytes(&value, 1).unwrap()
        );
    }

    #[test]
    fn test_bytes_to_pubkey_length() {
        assert!(bytes_to_pubkey(&[1u8; 31]).is_err());
        assert!(bytes_to_pubkey(&[1u8; 33]).is_err());
        let pubkey = bytes_to_pubkey(&[1u8; 32]).unwrap();
        assert_eq!(pubkey_to_bytes(&pubkey), [1u8; 32]);
    }

    #[test]
    fn test_u64_to_bytes32_be() {
        let value = 0x0102030405060708u64;
        let bytes = u64_to_bytes32_be(value);

        // First 24 bytes should be zero
        assert!(bytes[..24].iter().all(|&b| b == 0));

        // Last 8 bytes should be big-endian
        assert_eq!(bytes[24], 0x01);
        assert_eq!(bytes[31], 0x08);
    }

    #[test]
    fn test_is_zero_hash() {
        assert!(is_zero_hash(&[0u8; 32]));

        let mut partial = [0u8; 32];
        partial[31] = 1;
        assert!(!is_zero_hash(&partial));
    }
}
