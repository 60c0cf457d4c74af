// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use core::ops::{Add, Div, Mul, Neg, Sub};
use std::fmt::Debug;
use std::ops::{AddAssign, SubAssign};

use rand::{CryptoRng, RngCore};

use crate::error::VerifierResult;

pub mod bn254;

/// Trait impl'd by elements of an additive cyclic group.
pub trait GroupElement:
    Copy
    + Clone
    + Debug
    + Eq
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Neg<Output = Self>
    + Mul<Self::ScalarType, Output = Self>
    + Div<Self::ScalarType, Output = VerifierResult<Self>>
    + Sized
    + 'static
{
    /// Type of scalars used in the [Self::mul] multiplication method.
    type ScalarType: Scalar;

    /// Return an instance of the identity element in this group.
    fn zero() -> Self;

    /// Return an instance of the generator for this group.
    fn generator() -> Self;
}

/// Trait impl'd by scalars to be used with [GroupElement].
pub trait Scalar: GroupElement<ScalarType = Self> + Copy + From<u128> + Sized + Debug {
    fn rand<R: RngCore + CryptoRng>(rng: &mut R) -> Self;
    fn inverse(&self) -> VerifierResult<Self>;
}

/// Trait for groups that have a bilinear map into a target group.
pub trait Pairing: GroupElement {
    type Other: GroupElement;
    type Output;

    fn pairing(&self, other: &Self::Other) -> <Self as Pairing>::Output;

    /// Compute the product of the pairings `e(points_g1[i], points_g2[i])` with a single shared
    /// Miller loop. Fails if the two slices have different lengths.
    fn multi_pairing(
        points_g1: &[Self],
        points_g2: &[Self::Other],
    ) -> VerifierResult<<Self as Pairing>::Output>;
}

/// Trait for groups that support variable-base multi-scalar multiplication.
pub trait MultiScalarMul: GroupElement {
    fn multi_scalar_mul(scalars: &[Self::ScalarType], points: &[Self]) -> VerifierResult<Self>;
}

/// Selects one of the two wire formats for curve points.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PointFormat {
    /// Arkworks canonical compressed form: little-endian x coordinate, sign and infinity flags in
    /// the two most significant bits of the last byte.
    Compressed,
    /// EVM (EIP-197) form: big-endian affine coordinates, with the two F_q limbs of a G2
    /// coordinate in (c1, c0) order. The identity is encoded as all zeros.
    Uncompressed,
}

/// Trait impl'd by curve points that can be read from and written to both [PointFormat]s.
pub trait EncodedPoint: Sized {
    const COMPRESSED_LENGTH: usize;
    const UNCOMPRESSED_LENGTH: usize;

    /// Number of bytes used by one point in the given format.
    fn encoded_length(format: PointFormat) -> usize {
        match format {
            PointFormat::Compressed => Self::COMPRESSED_LENGTH,
            PointFormat::Uncompressed => Self::UNCOMPRESSED_LENGTH,
        }
    }

    /// Decode a point. The slice must have exactly [Self::encoded_length] bytes.
    fn decode(bytes: &[u8], format: PointFormat) -> VerifierResult<Self>;

    fn encode(&self, format: PointFormat) -> Vec<u8>;
}
