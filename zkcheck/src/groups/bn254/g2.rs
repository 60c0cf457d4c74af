// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::{Div, Mul};

use crate::encoding::{field_element_from_be_bytes, field_element_from_le_bytes};
use crate::error::{VerifierError, VerifierResult};
use crate::groups::bn254::{
    strip_compression_flags, wrong_length, BaseFieldElement, G2Element, Scalar,
    G2_ELEMENT_BYTE_LENGTH, G2_UNCOMPRESSED_BYTE_LENGTH,
};
use crate::groups::{EncodedPoint, GroupElement, PointFormat, Scalar as ScalarType};
use crate::serde_helpers::ToFromByteArray;
use crate::serialize_deserialize_with_to_from_byte_array;
use ark_bn254::{Fq, Fq2, G2Affine, G2Projective};
use ark_ec::{CurveGroup, Group};
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

/// An element of F_q^2 as its (c0, c1) limbs, where the element is c0 + c1 * u.
pub type Fq2Limbs = [BaseFieldElement; 2];

impl GroupElement for G2Element {
    type ScalarType = Scalar;

    fn zero() -> Self {
        G2Element(G2Projective::zero())
    }

    fn generator() -> Self {
        G2Element(G2Projective::generator())
    }
}

impl Div<Scalar> for G2Element {
    type Output = VerifierResult<Self>;

    fn div(self, rhs: Scalar) -> Self::Output {
        let inverse = rhs.inverse()?;
        Ok(self.mul(inverse))
    }
}

impl Mul<Scalar> for G2Element {
    type Output = Self;

    fn mul(self, rhs: Scalar) -> Self::Output {
        Self(self.0.mul(rhs.0))
    }
}

impl G2Element {
    /// Build a point on the twist from affine coordinates given as (c0, c1) limbs. All-zero
    /// coordinates denote the identity. Unlike G1, the twist has a large cofactor, so points must
    /// also be checked to be in the subgroup of order r.
    pub fn from_affine_coordinates(x: Fq2Limbs, y: Fq2Limbs) -> VerifierResult<Self> {
        if x.iter().chain(y.iter()).all(BaseFieldElement::is_zero) {
            return Ok(Self::zero());
        }
        let point = G2Affine::new_unchecked(Fq2::new(x[0].0, x[1].0), Fq2::new(y[0].0, y[1].0));
        if !point.is_on_curve() {
            return Err(VerifierError::PointNotOnCurve);
        }
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(VerifierError::PointNotInSubgroup);
        }
        Ok(Self(G2Projective::from(point)))
    }

    /// Affine coordinates as (c0, c1) limbs, or `None` for the identity.
    pub fn affine_coordinates(&self) -> Option<(Fq2Limbs, Fq2Limbs)> {
        let point = self.0.into_affine();
        if point.infinity {
            return None;
        }
        Some((
            [BaseFieldElement(point.x.c0), BaseFieldElement(point.x.c1)],
            [BaseFieldElement(point.y.c0), BaseFieldElement(point.y.c1)],
        ))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Decode the EIP-197 form `x.c1 || x.c0 || y.c1 || y.c0`, all big-endian. All zeros is the
    /// identity.
    pub fn from_uncompressed_byte_array(
        bytes: &[u8; G2_UNCOMPRESSED_BYTE_LENGTH],
    ) -> VerifierResult<Self> {
        let limb = |i: usize| {
            field_element_from_be_bytes(&bytes[32 * i..32 * (i + 1)]).map(BaseFieldElement)
        };
        Self::from_affine_coordinates([limb(1)?, limb(0)?], [limb(3)?, limb(2)?])
    }

    pub fn to_uncompressed_byte_array(&self) -> [u8; G2_UNCOMPRESSED_BYTE_LENGTH] {
        let mut bytes = [0u8; G2_UNCOMPRESSED_BYTE_LENGTH];
        if let Some((x, y)) = self.affine_coordinates() {
            for (chunk, limb) in bytes.chunks_mut(32).zip([x[1], x[0], y[1], y[0]]) {
                chunk.copy_from_slice(&limb.to_byte_array());
            }
        }
        bytes
    }
}

impl ToFromByteArray<G2_ELEMENT_BYTE_LENGTH> for G2Element {
    fn from_byte_array(bytes: &[u8; G2_ELEMENT_BYTE_LENGTH]) -> Result<Self, VerifierError> {
        let (x, is_infinity) = strip_compression_flags(bytes)?;
        if is_infinity {
            return Ok(Self::zero());
        }
        let (c0, c1) = x.split_at(G2_ELEMENT_BYTE_LENGTH / 2);
        field_element_from_le_bytes::<Fq>(c0)?;
        field_element_from_le_bytes::<Fq>(c1)?;

        let point = G2Affine::deserialize_compressed_unchecked(bytes.as_slice())
            .map_err(|_| VerifierError::PointNotOnCurve)?;
        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(VerifierError::PointNotInSubgroup);
        }
        Ok(Self(G2Projective::from(point)))
    }

    fn to_byte_array(&self) -> [u8; G2_ELEMENT_BYTE_LENGTH] {
        let mut bytes = [0u8; G2_ELEMENT_BYTE_LENGTH];
        self.0
            .into_affine()
            .serialize_compressed(bytes.as_mut_slice())
            .expect("Never fails");
        bytes
    }
}

serialize_deserialize_with_to_from_byte_array!(G2Element, G2_ELEMENT_BYTE_LENGTH);

impl EncodedPoint for G2Element {
    const COMPRESSED_LENGTH: usize = G2_ELEMENT_BYTE_LENGTH;
    const UNCOMPRESSED_LENGTH: usize = G2_UNCOMPRESSED_BYTE_LENGTH;

    fn decode(bytes: &[u8], format: PointFormat) -> VerifierResult<Self> {
        let expected = Self::encoded_length(format);
        match format {
            PointFormat::Compressed => Self::from_byte_array(
                bytes
                    .try_into()
                    .map_err(|_| wrong_length(expected, bytes.len()))?,
            ),
            PointFormat::Uncompressed => Self::from_uncompressed_byte_array(
                bytes
                    .try_into()
                    .map_err(|_| wrong_length(expected, bytes.len()))?,
            ),
        }
    }

    fn encode(&self, format: PointFormat) -> Vec<u8> {
        match format {
            PointFormat::Compressed => self.to_byte_array().to_vec(),
            PointFormat::Uncompressed => self.to_uncompressed_byte_array().to_vec(),
        }
    }
}
