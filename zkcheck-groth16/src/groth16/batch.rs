// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use rand::{CryptoRng, RngCore};
use tracing::debug;
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{multi_pairing_is_identity, G1Element, Scalar};
use zkcheck::groups::{GroupElement, MultiScalarMul, Scalar as _};

use crate::groth16::{Proof, Verdict, Verifier};
use crate::inputs::PublicInputs;

impl Verifier {
    /// Verify a batch of proofs with one multi-pairing of `k + 3` pairs instead of `k` pairings
    /// of four pairs each.
    ///
    /// Each equation `e(A_i, B_i) - e(alpha, beta) - e(vk_x_i, gamma) - e(C_i, delta) = 0` is
    /// multiplied by a random scalar `r_i` and the results are summed, so the terms for `alpha`,
    /// `gamma` and `delta` collapse into a single pairing each. If any proof in the batch is
    /// invalid the batch is rejected, except with negligible probability over the choice of the
    /// `r_i`, but the verdict does not say which proof is invalid.
    ///
    /// Input counts are checked for every proof before any pairing is computed. An empty batch is
    /// an error.
    pub fn verify_batch<R: RngCore + CryptoRng>(
        &self,
        batch: &[(Proof, PublicInputs)],
        rng: &mut R,
    ) -> VerifierResult<Verdict> {
        if batch.is_empty() {
            return Err(VerifierError::InvalidInput);
        }
        let pvk = self.prepared_key();
        for (_, inputs) in batch {
            pvk.check_input_count(inputs.len())?;
        }

        let randomizers = batch
            .iter()
            .map(|_| random_nonzero_scalar(rng))
            .collect::<Vec<_>>();
        let randomizer_sum = randomizers
            .iter()
            .fold(Scalar::zero(), |acc, r| acc + *r);

        // sum_i r_i * vk_x_i = (sum_i r_i) * IC[0] + sum_j (sum_i r_i * x_ij) * IC[j + 1]
        let mut input_scalars = vec![Scalar::zero(); pvk.num_public_inputs()];
        for ((_, inputs), r) in batch.iter().zip(&randomizers) {
            for (acc, x) in input_scalars.iter_mut().zip(inputs.iter()) {
                *acc += *x * *r;
            }
        }
        let ic = pvk.ic();
        let combined_inputs =
            ic[0] * randomizer_sum + G1Element::multi_scalar_mul(&input_scalars, &ic[1..])?;

        let cs = batch.iter().map(|(proof, _)| *proof.c()).collect::<Vec<_>>();
        let combined_c = G1Element::multi_scalar_mul(&randomizers, &cs)?;

        let (mut points_g1, mut points_g2): (Vec<_>, Vec<_>) = batch
            .iter()
            .zip(&randomizers)
            .map(|((proof, _), r)| (*proof.a() * *r, proof.b().prepare()))
            .unzip();
        points_g1.extend([
            *pvk.neg_alpha() * randomizer_sum,
            combined_inputs,
            combined_c,
        ]);
        points_g2.extend(pvk.prepared_g2_points());

        let verdict = Verdict::from(multi_pairing_is_identity(&points_g1, &points_g2)?);
        debug!("Verified batch of {} proofs: {}", batch.len(), verdict);
        Ok(verdict)
    }
}

fn random_nonzero_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
    loop {
        let r = Scalar::rand(rng);
        if !r.is_zero() {
            return r;
        }
    }
}
