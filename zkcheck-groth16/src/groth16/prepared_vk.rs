// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{multi_pairing_is_identity, G1Element, G2Prepared, Scalar};
use zkcheck::groups::MultiScalarMul;

use crate::groth16::{Proof, VerifyingKey};

/// A verifying key in the form used by the pairing check. The G2 points are negated where needed
/// and their Miller loop coefficients precomputed, so a verification only has to prepare `B`.
///
/// This is roughly homologous to [`ark_groth16::PreparedVerifyingKey`], except that `e(alpha, beta)`
/// is not precomputed: `-alpha` and the prepared `beta` are paired inside the same Miller loop as
/// the rest of the equation, which lets batch verification fold all `alpha` terms into one.
#[derive(Clone, Debug)]
pub struct PreparedVerifyingKey {
    /// The elements `IC[0..=N]`, where N is the number of public inputs.
    ic: Vec<G1Element>,

    /// The element `-alpha` in G1.
    neg_alpha: G1Element,

    /// The element `beta` in G2, prepared for pairings.
    beta: G2Prepared,

    /// The element `-gamma` in G2, prepared for pairings.
    neg_gamma: G2Prepared,

    /// The element `-delta` in G2, prepared for pairings.
    neg_delta: G2Prepared,
}

impl TryFrom<&VerifyingKey> for PreparedVerifyingKey {
    type Error = VerifierError;

    fn try_from(vk: &VerifyingKey) -> VerifierResult<Self> {
        if vk.ic.is_empty() {
            return Err(VerifierError::MalformedKey("no IC points".to_string()));
        }
        Ok(PreparedVerifyingKey {
            ic: vk.ic.clone(),
            neg_alpha: -vk.alpha,
            beta: vk.beta.prepare(),
            neg_gamma: (-vk.gamma).prepare(),
            neg_delta: (-vk.delta).prepare(),
        })
    }
}

impl PreparedVerifyingKey {
    /// The number of public inputs this key expects.
    pub fn num_public_inputs(&self) -> usize {
        self.ic.len() - 1
    }

    /// Compute `vk_x = IC[0] + sum_i public_inputs[i] * IC[i + 1]`. Fails if the number of
    /// inputs does not match the key.
    pub fn prepare_inputs(&self, public_inputs: &[Scalar]) -> VerifierResult<G1Element> {
        self.check_input_count(public_inputs.len())?;
        Ok(self.ic[0] + G1Element::multi_scalar_mul(public_inputs, &self.ic[1..])?)
    }

    /// Check `e(A, B) + e(-alpha, beta) + e(vk_x, -gamma) + e(C, -delta) = 0` with a single
    /// multi-pairing, where `vk_x` is the output of [PreparedVerifyingKey::prepare_inputs].
    pub fn verify_with_prepared_inputs(
        &self,
        prepared_inputs: &G1Element,
        proof: &Proof,
    ) -> VerifierResult<bool> {
        multi_pairing_is_identity(
            &[proof.a, self.neg_alpha, *prepared_inputs, proof.c],
            &[
                proof.b.prepare(),
                self.beta.clone(),
                self.neg_gamma.clone(),
                self.neg_delta.clone(),
            ],
        )
    }

    /// Verify a proof against the given public inputs.
    pub fn verify(&self, public_inputs: &[Scalar], proof: &Proof) -> VerifierResult<bool> {
        let prepared_inputs = self.prepare_inputs(public_inputs)?;
        self.verify_with_prepared_inputs(&prepared_inputs, proof)
    }

    pub(crate) fn check_input_count(&self, actual: usize) -> VerifierResult<()> {
        if actual != self.num_public_inputs() {
            return Err(VerifierError::InputCountMismatch {
                expected: self.num_public_inputs(),
                actual,
            });
        }
        Ok(())
    }

    pub(crate) fn ic(&self) -> &[G1Element] {
        &self.ic
    }

    pub(crate) fn neg_alpha(&self) -> &G1Element {
        &self.neg_alpha
    }

    pub(crate) fn prepared_g2_points(&self) -> [G2Prepared; 3] {
        [
            self.beta.clone(),
            self.neg_gamma.clone(),
            self.neg_delta.clone(),
        ]
    }
}
