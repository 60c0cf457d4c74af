// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::{Div, Mul};
use std::str::FromStr;

use crate::encoding::{
    field_element_from_be_bytes, field_element_to_be_bytes, field_element_to_decimal,
    field_element_to_hex, parse_field_element, FIELD_ELEMENT_BYTE_LENGTH,
};
use crate::error::{VerifierError, VerifierResult};
use crate::groups::bn254::BaseFieldElement;
use crate::serde_helpers::ToFromByteArray;
use ark_bn254::Fq;
use ark_ff::{Field, One, Zero};

impl BaseFieldElement {
    pub fn zero() -> Self {
        Self(Fq::zero())
    }

    pub fn one() -> Self {
        Self(Fq::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn inverse(&self) -> VerifierResult<Self> {
        self.0
            .inverse()
            .map(Self)
            .ok_or(VerifierError::InvalidInput)
    }

    pub fn to_decimal_string(&self) -> String {
        field_element_to_decimal(&self.0)
    }

    pub fn to_hex_string(&self) -> String {
        field_element_to_hex(&self.0)
    }
}

impl Mul<BaseFieldElement> for BaseFieldElement {
    type Output = Self;

    fn mul(self, rhs: BaseFieldElement) -> Self::Output {
        Self(self.0.mul(rhs.0))
    }
}

impl Div<BaseFieldElement> for BaseFieldElement {
    type Output = VerifierResult<Self>;

    fn div(self, rhs: BaseFieldElement) -> Self::Output {
        if rhs.0.is_zero() {
            return Err(VerifierError::InvalidInput);
        }
        Ok(Self(self.0.div(rhs.0)))
    }
}

impl From<u128> for BaseFieldElement {
    fn from(value: u128) -> Self {
        Self(Fq::from(value))
    }
}

impl FromStr for BaseFieldElement {
    type Err = VerifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_field_element(s).map(BaseFieldElement)
    }
}

impl ToFromByteArray<FIELD_ELEMENT_BYTE_LENGTH> for BaseFieldElement {
    fn from_byte_array(bytes: &[u8; FIELD_ELEMENT_BYTE_LENGTH]) -> Result<Self, VerifierError> {
        field_element_from_be_bytes(bytes).map(BaseFieldElement)
    }

    fn to_byte_array(&self) -> [u8; FIELD_ELEMENT_BYTE_LENGTH] {
        field_element_to_be_bytes(&self.0)
    }
}
