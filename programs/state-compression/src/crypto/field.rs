//! BN254 Scalar Field Elements
//!
//! Every hash, root and numeric value that crosses the proof boundary is an
//! element of the BN254 scalar field:
//! ```text
//! r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
//! ```
//!
//! [`FieldElement`] can only be produced through a validating constructor, so
//! holding one is proof that the value lies in `[0, r)`.
//!
//! # Byte Encoding
//! The canonical wire form is 32 bytes, big-endian. Little-endian output is
//! available for circuits that consume it, but parsing from the wire always
//! assumes big-endian.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use std::sync::OnceLock;

use anchor_lang::prelude::*;
use num_bigint::{BigInt, BigUint};
use num_traits::{Num, Zero};

use crate::constants::{FIELD_SIZE_BE, HASH_LEN};
use crate::error::CompressionError;

// ============================================================================
// MODULUS
// ============================================================================

static FIELD_SIZE: OnceLock<BigUint> = OnceLock::new();

/// The BN254 scalar modulus as a big integer.
pub fn field_size() -> &'static BigUint {
    FIELD_SIZE.get_or_init(|| BigUint::from_bytes_be(&FIELD_SIZE_BE))
}

/// Check whether 32 big-endian bytes encode a value strictly below the modulus.
///
/// Gate for externally supplied hashes before they are accepted as leaves.
#[inline]
pub fn is_smaller_than_field_size(bytes: &[u8; 32]) -> bool {
    // Lexicographic order on equal-length big-endian arrays is numeric order.
    bytes < &FIELD_SIZE_BE
}

// ============================================================================
// INPUT FORMS
// ============================================================================

/// Textual base of a string input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldBase {
    Decimal,
    /// Optional `0x` prefix
    Hex,
    Base58,
}

/// Any raw value a field element can be created from.
#[derive(Clone, Debug)]
pub enum FieldInput<'a> {
    U64(u64),
    BigUint(BigUint),
    /// Signed input; negatives are rejected
    BigInt(BigInt),
    /// Big-endian bytes of any length
    Bytes(&'a [u8]),
    Str(&'a str),
}

impl From<u64> for FieldInput<'_> {
    fn from(value: u64) -> Self {
        FieldInput::U64(value)
    }
}

impl From<BigUint> for FieldInput<'_> {
    fn from(value: BigUint) -> Self {
        FieldInput::BigUint(value)
    }
}

impl From<BigInt> for FieldInput<'_> {
    fn from(value: BigInt) -> Self {
        FieldInput::BigInt(value)
    }
}

impl<'a> From<&'a [u8]> for FieldInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        FieldInput::Bytes(value)
    }
}

impl<'a> From<&'a str> for FieldInput<'a> {
    fn from(value: &'a str) -> Self {
        FieldInput::Str(value)
    }
}

// ============================================================================
// FIELD ELEMENT
// ============================================================================

/// An integer in `[0, r)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Create a field element from any supported input.
    ///
    /// `base` is only consulted for string input. Without it, a `0x` prefix
    /// selects hex and anything else is parsed as decimal.
    ///
    /// # Errors
    /// * `FieldElementOutOfRange` - value is negative or `>= r`
    /// * `InvalidFieldElementFormat` - string does not parse in the base
    pub fn create<'a>(input: impl Into<FieldInput<'a>>, base: Option<FieldBase>) -> Result<Self> {
        match input.into() {
            FieldInput::U64(value) => Ok(Self::from(value)),
            FieldInput::BigUint(value) => Self::new(value),
            FieldInput::BigInt(value) => Self::from_bigint(&value),
            FieldInput::Bytes(bytes) => Self::from_be_bytes(bytes),
            FieldInput::Str(s) => match base {
                Some(base) => Self::from_str_radix(s, base),
                None => s.parse(),
            },
        }
    }

    /// Validate an unsigned big integer.
    pub fn new(value: BigUint) -> Result<Self> {
        require!(&value < field_size(), CompressionError::FieldElementOutOfRange);
        Ok(Self(value))
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Validate a signed big integer.
    pub fn from_bigint(value: &BigInt) -> Result<Self> {
        match value.to_biguint() {
            Some(unsigned) => Self::new(unsigned),
            None => Err(error!(CompressionError::FieldElementOutOfRange)),
        }
    }

    /// Big-endian bytes of any length.
    ///
    /// Leading zero bytes are ignored, so inputs longer than 32 bytes (or
    /// empty) are accepted when their value is below `r`. Use
    /// [`FieldElement::from_bytes`] to also enforce the 32-byte width.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        Self::new(BigUint::from_bytes_be(bytes))
    }

    /// Canonical 32-byte big-endian form.
    ///
    /// # Errors
    /// * `InvalidLength` - input is not exactly 32 bytes
    /// * `FieldElementOutOfRange` - value `>= r`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        require!(bytes.len() == HASH_LEN, CompressionError::InvalidLength);
        Self::from_be_bytes(bytes)
    }

    /// Parse a string in the given base.
    ///
    /// Decimal and hex accept one optional sign, then at least one digit of
    /// the base; hex also accepts a `0x` prefix after the sign. Separators,
    /// repeated signs and other characters are format errors.
    pub fn from_str_radix(s: &str, base: FieldBase) -> Result<Self> {
        let s = s.trim();
        match base {
            FieldBase::Decimal => Self::from_bigint(&parse_signed(s, 10)?),
            FieldBase::Hex => Self::from_bigint(&parse_signed(s, 16)?),
            FieldBase::Base58 => {
                let bytes = bs58::decode(s)
                    .into_vec()
                    .map_err(|_| error!(CompressionError::InvalidFieldElementFormat))?;
                Self::from_be_bytes(&bytes)
            }
        }
    }

    /// 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut bytes = [0u8; 32];
        // raw is at most 32 bytes because the value is below r
        bytes[HASH_LEN - raw.len()..].copy_from_slice(&raw);
        bytes
    }

    /// 32-byte little-endian encoding.
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut bytes = self.to_bytes();
        bytes.reverse();
        bytes
    }

    /// `0x`-prefixed, 64 hex digits, zero padded.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Base58 of the 32-byte big-endian encoding.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.to_bytes()).into_string()
    }

    pub fn to_decimal_string(&self) -> String {
        self.0.to_str_radix(10)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

fn parse_signed(s: &str, radix: u32) -> Result<BigInt> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits = if radix == 16 {
        unsigned
            .strip_prefix("0x")
            .or_else(|| unsigned.strip_prefix("0X"))
            .unwrap_or(unsigned)
    } else {
        unsigned
    };
    // num-bigint tolerates `_` separators and its own sign; neither is valid here
    require!(
        !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)),
        CompressionError::InvalidFieldElementFormat
    );

    let magnitude = BigInt::from(
        BigUint::from_str_radix(digits, radix)
            .map_err(|_| error!(CompressionError::InvalidFieldElementFormat))?,
    );
    Ok(if negative { -magnitude } else { magnitude })
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        // Every u64 is far below r.
        Self(BigUint::from(value))
    }
}

impl TryFrom<BigUint> for FieldElement {
    type Error = anchor_lang::error::Error;

    fn try_from(value: BigUint) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<BigInt> for FieldElement {
    type Error = anchor_lang::error::Error;

    fn try_from(value: BigInt) -> Result<Self> {
        Self::from_bigint(&value)
    }
}

impl TryFrom<&[u8]> for FieldElement {
    type Error = anchor_lang::error::Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_be_bytes(bytes)
    }
}

impl TryFrom<[u8; 32]> for FieldElement {
    type Error = anchor_lang::error::Error;

    fn try_from(bytes: [u8; 32]) -> Result<Self> {
        Self::from_be_bytes(&bytes)
    }
}

impl FromStr for FieldElement {
    type Err = anchor_lang::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
        if unsigned.starts_with("0x") || unsigned.starts_with("0X") {
            Self::from_str_radix(trimmed, FieldBase::Hex)
        } else {
            Self::from_str_radix(trimmed, FieldBase::Decimal)
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ARITHMETIC (mod r)
// ============================================================================

impl Add for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 + &rhs.0) % field_size())
    }
}

impl Sub for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        // Both operands are below r, so adding r keeps the difference non-negative.
        FieldElement((&self.0 + field_size() - &rhs.0) % field_size())
    }
}

impl Mul for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 * &rhs.0) % field_size())
    }
}

impl Add for FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: FieldElement) -> FieldElement {
        &self + &rhs
    }
}

impl Sub for FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: FieldElement) -> FieldElement {
        &self - &rhs
    }
}

impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: FieldElement) -> FieldElement {
        &self * &rhs
    }
}

// ============================================================================
// TESTS
// ============================================================================
