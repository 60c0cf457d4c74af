// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::{Div, Mul};

use crate::encoding::{field_element_from_be_bytes, field_element_from_le_bytes};
use crate::error::{VerifierError, VerifierResult};
use crate::groups::bn254::{
    strip_compression_flags, wrong_length, BaseFieldElement, G1Element, Scalar,
    G1_ELEMENT_BYTE_LENGTH, G1_UNCOMPRESSED_BYTE_LENGTH,
};
use crate::groups::{
    EncodedPoint, GroupElement, MultiScalarMul, PointFormat, Scalar as ScalarType,
};
use crate::serde_helpers::ToFromByteArray;
use crate::serialize_deserialize_with_to_from_byte_array;
use ark_bn254::{Fq, G1Affine, G1Projective};
use ark_ec::{CurveGroup, Group, VariableBaseMSM};
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

impl GroupElement for G1Element {
    type ScalarType = Scalar;

    fn zero() -> Self {
        G1Element(G1Projective::zero())
    }

    fn generator() -> Self {
        G1Element(G1Projective::generator())
    }
}

impl Div<Scalar> for G1Element {
    type Output = VerifierResult<Self>;

    fn div(self, rhs: Scalar) -> Self::Output {
        let inverse = rhs.inverse()?;
        Ok(self.mul(inverse))
    }
}

impl Mul<Scalar> for G1Element {
    type Output = Self;

    fn mul(self, rhs: Scalar) -> Self::Output {
        Self(self.0.mul(rhs.0))
    }
}

impl G1Element {
    /// Build a point from affine coordinates. `(0, 0)` is not on the curve and denotes the
    /// identity, following the EVM convention. G1 has cofactor 1, so every point on the curve is
    /// in the prime-order subgroup and no further check is needed.
    pub fn from_affine_coordinates(
        x: BaseFieldElement,
        y: BaseFieldElement,
    ) -> VerifierResult<Self> {
        if x.is_zero() && y.is_zero() {
            return Ok(Self::zero());
        }
        let point = G1Affine::new_unchecked(x.0, y.0);
        if !point.is_on_curve() {
            return Err(VerifierError::PointNotOnCurve);
        }
        Ok(Self(G1Projective::from(point)))
    }

    /// Affine coordinates of this point, or `None` for the identity.
    pub fn affine_coordinates(&self) -> Option<(BaseFieldElement, BaseFieldElement)> {
        let point = self.0.into_affine();
        if point.infinity {
            return None;
        }
        Some((BaseFieldElement(point.x), BaseFieldElement(point.y)))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Decode the EVM form `x || y`, both big-endian. All zeros is the identity.
    pub fn from_uncompressed_byte_array(
        bytes: &[u8; G1_UNCOMPRESSED_BYTE_LENGTH],
    ) -> VerifierResult<Self> {
        let (x, y) = bytes.split_at(G1_UNCOMPRESSED_BYTE_LENGTH / 2);
        Self::from_affine_coordinates(
            BaseFieldElement(field_element_from_be_bytes(x)?),
            BaseFieldElement(field_element_from_be_bytes(y)?),
        )
    }

    pub fn to_uncompressed_byte_array(&self) -> [u8; G1_UNCOMPRESSED_BYTE_LENGTH] {
        let mut bytes = [0u8; G1_UNCOMPRESSED_BYTE_LENGTH];
        if let Some((x, y)) = self.affine_coordinates() {
            bytes[..32].copy_from_slice(&x.to_byte_array());
            bytes[32..].copy_from_slice(&y.to_byte_array());
        }
        bytes
    }
}

impl ToFromByteArray<G1_ELEMENT_BYTE_LENGTH> for G1Element {
    fn from_byte_array(bytes: &[u8; G1_ELEMENT_BYTE_LENGTH]) -> Result<Self, VerifierError> {
        let (x, is_infinity) = strip_compression_flags(bytes)?;
        if is_infinity {
            return Ok(Self::zero());
        }
        field_element_from_le_bytes::<Fq>(&x)?;

        // The x coordinate is canonical, so the only remaining failure is that x^3 + 3 has no
        // square root, i.e. there is no point with this x coordinate.
        let point = G1Affine::deserialize_compressed_unchecked(bytes.as_slice())
            .map_err(|_| VerifierError::PointNotOnCurve)?;
        Ok(Self(G1Projective::from(point)))
    }

    fn to_byte_array(&self) -> [u8; G1_ELEMENT_BYTE_LENGTH] {
        let mut bytes = [0u8; G1_ELEMENT_BYTE_LENGTH];
        self.0
            .into_affine()
            .serialize_compressed(bytes.as_mut_slice())
            .expect("Never fails");
        bytes
    }
}

serialize_deserialize_with_to_from_byte_array!(G1Element, G1_ELEMENT_BYTE_LENGTH);

impl EncodedPoint for G1Element {
    const COMPRESSED_LENGTH: usize = G1_ELEMENT_BYTE_LENGTH;
    const UNCOMPRESSED_LENGTH: usize = G1_UNCOMPRESSED_BYTE_LENGTH;

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

impl MultiScalarMul for G1Element {
    fn multi_scalar_mul(scalars: &[Self::ScalarType], points: &[Self]) -> VerifierResult<Self> {
        if scalars.len() != points.len() {
            return Err(VerifierError::InvalidInput);
        }
        if scalars.is_empty() {
            return Ok(Self::zero());
        }
        Ok(Self(G1Projective::msm_unchecked(
            &G1Projective::normalize_batch(&points.iter().map(|x| x.0).collect::<Vec<_>>()),
            &scalars.iter().map(|x| x.0).collect::<Vec<_>>(),
        )))
    }
}
