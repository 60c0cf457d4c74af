// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Strict encodings of prime field elements.
//!
//! Text form:
//! ```text
//! element  := decimal | hex
//! decimal  := "0" | [1-9][0-9]{0,77}
//! hex      := "0x" [0-9a-fA-F]{1,64}
//! ```
//! The value must be strictly smaller than the modulus of the target field. Signs, whitespace,
//! leading zeros in decimal form and any other prefix are rejected.
//!
//! Binary form: 32 bytes, big-endian, strictly smaller than the modulus.
//!
//! # Example
//! ```rust
//! # use zkcheck::encoding::*;
//! let x: ark_bn254::Fr = parse_field_element("6").unwrap();
//! assert_eq!(x, parse_field_element("0x06").unwrap());
//! assert!(parse_field_element::<ark_bn254::Fr>("06").is_err());
//! assert!(parse_field_element::<ark_bn254::Fr>(" 6").is_err());
//! ```

use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{VerifierError, VerifierResult};

/// Byte length of a serialized BN254 field element (both the base and the scalar field).
pub const FIELD_ELEMENT_BYTE_LENGTH: usize = 32;

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9][0-9]{0,77})$").expect("Hard-coded regex is valid"));
static HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{1,64}$").expect("Hard-coded regex is valid"));

/// The modulus of `F` as a [BigUint].
pub fn modulus<F: PrimeField>() -> BigUint {
    BigUint::from_bytes_be(&F::MODULUS.to_bytes_be())
}

/// Convert an integer into an element of `F`, failing if it is not reduced.
pub fn biguint_to_field<F: PrimeField>(value: &BigUint) -> VerifierResult<F> {
    if *value >= modulus::<F>() {
        return Err(VerifierError::encoding(
            "value is not smaller than the field modulus",
        ));
    }
    Ok(F::from_be_bytes_mod_order(&value.to_bytes_be()))
}

/// Parse a field element from its canonical text form (see the module documentation).
pub fn parse_field_element<F: PrimeField>(s: &str) -> VerifierResult<F> {
    let value = if DECIMAL.is_match(s) {
        BigUint::parse_bytes(s.as_bytes(), 10)
    } else if HEX.is_match(s) {
        BigUint::parse_bytes(&s.as_bytes()[2..], 16)
    } else {
        None
    }
    .ok_or_else(|| {
        VerifierError::encoding(format!(
            "'{s}' is neither a canonical decimal nor a 0x-prefixed hex field element"
        ))
    })?;
    biguint_to_field(&value)
}

/// Decimal text form of a field element, as used by snarkjs.
pub fn field_element_to_decimal<F: PrimeField>(x: &F) -> String {
    BigUint::from_bytes_be(&x.into_bigint().to_bytes_be()).to_str_radix(10)
}

/// `0x`-prefixed, zero-padded 64 digit hex form of a field element, as used in EVM calldata.
pub fn field_element_to_hex<F: PrimeField>(x: &F) -> String {
    format!("0x{}", hex::encode(field_element_to_be_bytes(x)))
}

/// Decode a big-endian field element of exactly [FIELD_ELEMENT_BYTE_LENGTH] bytes.
pub fn field_element_from_be_bytes<F: PrimeField>(bytes: &[u8]) -> VerifierResult<F> {
    if bytes.len() != FIELD_ELEMENT_BYTE_LENGTH {
        return Err(VerifierError::encoding(format!(
            "expected {FIELD_ELEMENT_BYTE_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }
    biguint_to_field(&BigUint::from_bytes_be(bytes))
}

/// Decode a little-endian field element of exactly [FIELD_ELEMENT_BYTE_LENGTH] bytes.
pub fn field_element_from_le_bytes<F: PrimeField>(bytes: &[u8]) -> VerifierResult<F> {
    if bytes.len() != FIELD_ELEMENT_BYTE_LENGTH {
        return Err(VerifierError::encoding(format!(
            "expected {FIELD_ELEMENT_BYTE_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }
    biguint_to_field(&BigUint::from_bytes_le(bytes))
}

/// Big-endian encoding of a field element.
pub fn field_element_to_be_bytes<F: PrimeField>(x: &F) -> [u8; FIELD_ELEMENT_BYTE_LENGTH] {
    let mut bytes = [0u8; FIELD_ELEMENT_BYTE_LENGTH];
    let be = x.into_bigint().to_bytes_be();
    // BN254 elements are four 64-bit limbs, so this copies exactly 32 bytes.
    let offset = FIELD_ELEMENT_BYTE_LENGTH.saturating_sub(be.len());
    bytes[offset..].copy_from_slice(&be[be.len().saturating_sub(FIELD_ELEMENT_BYTE_LENGTH)..]);
    bytes
}
