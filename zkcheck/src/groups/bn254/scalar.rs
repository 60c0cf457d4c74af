// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::{Div, Mul};
use std::str::FromStr;

use crate::encoding::{
    field_element_from_be_bytes, field_element_to_be_bytes, field_element_to_decimal,
    parse_field_element,
};
use crate::error::{VerifierError, VerifierResult};
use crate::groups::bn254::{Scalar, SCALAR_LENGTH};
use crate::groups::GroupElement;
use crate::serde_helpers::ToFromByteArray;
use crate::{groups, serialize_deserialize_with_to_from_byte_array};
use ark_bn254::Fr;
use ark_ff::{Field, One, UniformRand, Zero};
use rand::{CryptoRng, RngCore};

impl Div<Self> for Scalar {
    type Output = VerifierResult<Self>;

    fn div(self, rhs: Self) -> VerifierResult<Self> {
        if rhs.0.is_zero() {
            return Err(VerifierError::InvalidInput);
        }
        Ok(Self(self.0.div(rhs.0)))
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Self;

    fn mul(self, rhs: Scalar) -> Self::Output {
        Self(self.0.mul(rhs.0))
    }
}

impl GroupElement for Scalar {
    type ScalarType = Scalar;

    fn zero() -> Self {
        Self(Fr::zero())
    }

    fn generator() -> Self {
        Self(Fr::one())
    }
}

impl From<u128> for Scalar {
    fn from(value: u128) -> Self {
        Self(Fr::from(value))
    }
}

impl groups::Scalar for Scalar {
    fn rand<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    fn inverse(&self) -> VerifierResult<Self> {
        Ok(Self(self.0.inverse().ok_or(VerifierError::InvalidInput)?))
    }
}

impl Scalar {
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Decimal representation, as found in snarkjs `public.json` files.
    pub fn to_decimal_string(&self) -> String {
        field_element_to_decimal(&self.0)
    }
}

/// Parses the canonical text form defined in [crate::encoding]. Values that are not reduced
/// modulo r are rejected rather than reduced.
impl FromStr for Scalar {
    type Err = VerifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_element(s).map(Scalar)
    }
}

impl ToFromByteArray<SCALAR_LENGTH> for Scalar {
    fn from_byte_array(bytes: &[u8; SCALAR_LENGTH]) -> Result<Self, VerifierError> {
        // Big-endian, to match the EVM word layout of public inputs.
        field_element_from_be_bytes(bytes).map(Scalar)
    }

    fn to_byte_array(&self) -> [u8; SCALAR_LENGTH] {
        field_element_to_be_bytes(&self.0)
    }
}

serialize_deserialize_with_to_from_byte_array!(Scalar, SCALAR_LENGTH);
