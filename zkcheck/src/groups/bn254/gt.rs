// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::ops::{Div, Mul};

use ark_bn254::Bn254;
use ark_ec::pairing::PairingOutput;
use ark_ff::Zero;
use once_cell::sync::Lazy;

use crate::error::VerifierResult;
use crate::groups::bn254::{G1Element, G2Element, GTElement, Scalar};
use crate::groups::{GroupElement, Pairing, Scalar as ScalarType};

/// e(g1, g2) for the generators of G1 and G2.
static GENERATOR: Lazy<GTElement> =
    Lazy::new(|| G1Element::generator().pairing(&G2Element::generator()));

#[allow(clippy::suspicious_arithmetic_impl)]
impl Div<Scalar> for GTElement {
    type Output = VerifierResult<GTElement>;

    fn div(self, rhs: Scalar) -> Self::Output {
        Ok(self * rhs.inverse()?)
    }
}

impl Mul<Scalar> for GTElement {
    type Output = GTElement;

    fn mul(self, rhs: Scalar) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl GroupElement for GTElement {
    type ScalarType = Scalar;

    fn zero() -> Self {
        GTElement(PairingOutput::<Bn254>::zero())
    }

    fn generator() -> Self {
        *GENERATOR
    }
}

impl GTElement {
    /// Whether this is the identity of GT, i.e. 1 in F_q^{12}. A Groth16 proof is accepted exactly
    /// when its pairing check evaluates to this element.
    pub fn is_identity(&self) -> bool {
        self.0.is_zero()
    }
}
