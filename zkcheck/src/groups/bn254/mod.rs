// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The BN254 (alt_bn128) construction used by circom, snarkjs and the EVM pairing precompile.

use crate::error::{VerifierError, VerifierResult};
use crate::groups::Pairing;
use ark_bn254::{Bn254, Fq, Fr, G1Projective, G2Projective};
use ark_ec::pairing::{Pairing as ArkworksPairing, PairingOutput};
use derive_more::{Add, AddAssign, From, Into, Neg, Sub, SubAssign};

mod base_field;
mod g1;
mod g2;
mod gt;
mod pairing;
mod scalar;


pub use pairing::{multi_pairing_is_identity, multi_pairing_prepared, G2Prepared};

/// The byte length of a compressed element of G1.
pub const G1_ELEMENT_BYTE_LENGTH: usize = 32;

/// The byte length of an uncompressed (EVM encoded) element of G1.
pub const G1_UNCOMPRESSED_BYTE_LENGTH: usize = 64;

/// The byte length of a compressed element of G2.
pub const G2_ELEMENT_BYTE_LENGTH: usize = 64;

/// The byte length of an uncompressed (EVM encoded) element of G2.
pub const G2_UNCOMPRESSED_BYTE_LENGTH: usize = 128;

/// The byte length of a scalar.
pub const SCALAR_LENGTH: usize = 32;

/// Mask of the two flag bits arkworks stores in the last byte of a compressed point.
const COMPRESSION_FLAG_MASK: u8 = 0b1100_0000;
const INFINITY_FLAG: u8 = 0b0100_0000;

/// Elements of the group G1 in BN254.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Add, AddAssign, Sub, SubAssign, Neg, From, Into)]
#[repr(transparent)]
pub struct G1Element(pub(crate) G1Projective);

/// Elements of the group G2 in BN254.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Add, AddAssign, Sub, SubAssign, Neg, From, Into)]
#[repr(transparent)]
pub struct G2Element(pub(crate) G2Projective);

/// Elements of the subgroup GT of F_q^{12} in BN254. Note that it is written in additive notation here.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Add, AddAssign, Sub, SubAssign, Neg, From)]
pub struct GTElement(pub(crate) PairingOutput<Bn254>);

/// This represents a scalar modulo r = 21888242871839275222246405745257275088548364400416034343698204186575808495617
/// which is the order of the groups G1, G2 and GT. Note that r is a 254 bit prime.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Add, AddAssign, Sub, SubAssign, Neg, From, Into)]
pub struct Scalar(pub(crate) Fr);

/// An element of the base field modulo q = 21888242871839275222246405745257275088696311157297823662689037894645226208583,
/// over which the coordinates of G1 points are defined (G2 coordinates live in F_q^2).
#[derive(Clone, Copy, Eq, PartialEq, Debug, Add, AddAssign, Sub, SubAssign, Neg, From)]
pub struct BaseFieldElement(pub(crate) Fq);

impl Pairing for G1Element {
    type Other = G2Element;
    type Output = GTElement;

    fn pairing(&self, other: &Self::Other) -> <Self as Pairing>::Output {
        GTElement(Bn254::pairing(self.0, other.0))
    }

    fn multi_pairing(
        points_g1: &[Self],
        points_g2: &[Self::Other],
    ) -> VerifierResult<<Self as Pairing>::Output> {
        if points_g1.len() != points_g2.len() {
            return Err(VerifierError::InvalidInput);
        }
        Ok(GTElement(Bn254::multi_pairing(
            points_g1.iter().map(|x| x.0),
            points_g2.iter().map(|x| x.0),
        )))
    }
}

/// Split a compressed point into its coordinate bytes and whether the infinity flag is set.
fn strip_compression_flags<const N: usize>(bytes: &[u8; N]) -> VerifierResult<([u8; N], bool)> {
    let mut coordinate = *bytes;
    let flags = coordinate[N - 1] & COMPRESSION_FLAG_MASK;
    coordinate[N - 1] &= !COMPRESSION_FLAG_MASK;
    match flags {
        COMPRESSION_FLAG_MASK => Err(VerifierError::encoding(
            "both the infinity and the sign flag are set",
        )),
        INFINITY_FLAG => {
            // Arkworks only checks the infinity flag, but we require all-zeros to have unique serialization
            if coordinate.iter().any(|x| *x != 0) {
                return Err(VerifierError::encoding(
                    "point at infinity with a non-zero coordinate",
                ));
            }
            Ok((coordinate, true))
        }
        _ => Ok((coordinate, false)),
    }
}

fn wrong_length(expected: usize, actual: usize) -> VerifierError {
    VerifierError::encoding(format!("expected {expected} bytes, got {actual}"))
}
