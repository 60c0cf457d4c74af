// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use ark_bn254::Fr;
use ark_ff::{batch_inversion, Field, One, Zero};
use tracing::{debug, warn};
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{multi_pairing_is_identity, G1Element, G2Element, G2Prepared, Scalar};
use zkcheck::groups::{GroupElement, MultiScalarMul};

use crate::groth16::Verdict;
use crate::inputs::PublicInputs;
use crate::plonk::transcript::Keccak256Transcript;
use crate::plonk::{PlonkProof, PlonkVerifyingKey};

/// Verifies snarkjs PLONK proofs against one verifying key. Cloning is cheap and clones can be
/// used from several threads.
#[derive(Clone, Debug)]
pub struct PlonkVerifier {
    inner: Arc<PreparedKey>,
}

#[derive(Debug)]
struct PreparedKey {
    vk: PlonkVerifyingKey,
    x_2: G2Prepared,
    generator: G2Prepared,
}

/// The Fiat-Shamir challenges of one proof.
#[derive(Debug)]
struct Challenges {
    beta: Fr,
    gamma: Fr,
    alpha: Fr,
    xi: Fr,
    /// `v, v^2, ..., v^5`
    v: [Fr; 5],
    u: Fr,
}

impl Challenges {
    fn derive(vk: &PlonkVerifyingKey, proof: &PlonkProof, inputs: &[Fr]) -> Self {
        let mut transcript = Keccak256Transcript::new();
        for point in [
            &vk.qm, &vk.ql, &vk.qr, &vk.qo, &vk.qc, &vk.s1, &vk.s2, &vk.s3,
        ] {
            transcript.append_point(point);
        }
        for input in inputs {
            transcript.append_scalar(input);
        }
        let beta = transcript
            .append_point(&proof.a)
            .append_point(&proof.b)
            .append_point(&proof.c)
            .challenge();
        let gamma = transcript.append_scalar(&beta).challenge();
        let alpha = transcript
            .append_scalar(&beta)
            .append_scalar(&gamma)
            .append_point(&proof.z)
            .challenge();
        let xi = transcript
            .append_scalar(&alpha)
            .append_point(&proof.t1)
            .append_point(&proof.t2)
            .append_point(&proof.t3)
            .challenge();

        transcript.append_scalar(&xi);
        for evaluation in proof.evaluations() {
            transcript.append_scalar(&Fr::from(*evaluation));
        }
        let v1 = transcript.challenge();
        let mut v = [v1; 5];
        for i in 1..v.len() {
            v[i] = v[i - 1] * v1;
        }

        let u = transcript
            .append_point(&proof.wxi)
            .append_point(&proof.wxiw)
            .challenge();

        Challenges {
            beta,
            gamma,
            alpha,
            xi,
            v,
            u,
        }
    }
}

impl PlonkVerifier {
    /// Create a verifier for the given key, preparing its G2 points once.
    pub fn new(vk: &PlonkVerifyingKey) -> Self {
        debug!(
            "Prepared PLONK verifying key with {} public inputs and domain 2^{}",
            vk.n_public, vk.power
        );
        PlonkVerifier {
            inner: Arc::new(PreparedKey {
                vk: vk.clone(),
                x_2: vk.x_2.prepare(),
                generator: G2Element::generator().prepare(),
            }),
        }
    }

    /// The number of public inputs the key expects.
    pub fn num_public_inputs(&self) -> usize {
        self.inner.vk.n_public
    }

    /// The key this verifier checks proofs against.
    pub fn verifying_key(&self) -> &PlonkVerifyingKey {
        &self.inner.vk
    }

    /// Verify a proof against the given public inputs.
    ///
    /// Returns an error, without doing any pairing, if the number of inputs does not match the
    /// key. Otherwise the proof is [Verdict::Accepted] exactly if the KZG opening check holds.
    pub fn verify(
        &self,
        proof: &PlonkProof,
        public_inputs: &PublicInputs,
    ) -> VerifierResult<Verdict> {
        let vk = &self.inner.vk;
        if public_inputs.len() != vk.n_public {
            return Err(VerifierError::InputCountMismatch {
                expected: vk.n_public,
                actual: public_inputs.len(),
            });
        }
        let inputs = public_inputs
            .iter()
            .map(|x| Fr::from(*x))
            .collect::<Vec<_>>();
        let challenges = Challenges::derive(vk, proof, &inputs);

        let verdict = match self.opening_points(proof, &inputs, &challenges)? {
            Some((a1, b1)) => Verdict::from(multi_pairing_is_identity(
                &[-a1, b1],
                &[self.inner.x_2.clone(), self.inner.generator.clone()],
            )?),
            None => Verdict::Rejected,
        };
        debug!(
            "Verified PLONK proof with {} public inputs: {}",
            public_inputs.len(),
            verdict
        );
        Ok(verdict)
    }

    /// The two G1 points of the batched KZG check `e(-A1, [x]_2) + e(B1, [1]_2) = 0`, or `None`
    /// if the evaluation point `xi` falls inside the domain.
    fn opening_points(
        &self,
        proof: &PlonkProof,
        inputs: &[Fr],
        challenges: &Challenges,
    ) -> VerifierResult<Option<(G1Element, G1Element)>> {
        let vk = &self.inner.vk;
        let Challenges {
            beta,
            gamma,
            alpha,
            xi,
            v,
            u,
        } = *challenges;

        let n = Fr::from(1u64 << vk.power);
        let xi_n = xi.pow([1u64 << vk.power]);
        let zh = xi_n - Fr::one();

        // L_i(xi) = omega^i * zh / (n * (xi - omega^i)) for the first max(1, n_public) rows.
        let mut roots = Vec::with_capacity(inputs.len().max(1));
        let mut root = Fr::one();
        for _ in 0..inputs.len().max(1) {
            roots.push(root);
            root *= vk.omega;
        }
        let mut denominators = roots.iter().map(|w| n * (xi - w)).collect::<Vec<_>>();
        if denominators.iter().any(Zero::is_zero) {
            warn!("Rejecting PLONK proof: the evaluation point is in the domain");
            return Ok(None);
        }
        batch_inversion(&mut denominators);
        let lagrange = roots
            .iter()
            .zip(denominators)
            .map(|(w, d)| *w * zh * d)
            .collect::<Vec<_>>();
        let l1 = lagrange[0];
        let pi = -inputs
            .iter()
            .zip(&lagrange)
            .map(|(x, l)| *x * l)
            .sum::<Fr>();

        let [eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw] =
            proof.evaluations().map(|x| Fr::from(*x));
        let alpha_squared = alpha.square();
        let permuted_a = eval_a + beta * eval_s1 + gamma;
        let permuted_b = eval_b + beta * eval_s2 + gamma;

        // The constant term of the linearisation polynomial.
        let r0 = pi
            - l1 * alpha_squared
            - permuted_a * permuted_b * (eval_c + gamma) * eval_zw * alpha;

        let beta_xi = beta * xi;
        let z_coefficient = (eval_a + beta_xi + gamma)
            * (eval_b + beta_xi * vk.k1 + gamma)
            * (eval_c + beta_xi * vk.k2 + gamma)
            * alpha
            + l1 * alpha_squared
            + u;
        let s3_coefficient = permuted_a * permuted_b * alpha * beta * eval_zw;
        let e = -r0
            + v[0] * eval_a
            + v[1] * eval_b
            + v[2] * eval_c
            + v[3] * eval_s1
            + v[4] * eval_s2
            + u * eval_zw;

        // B1 = xi * Wxi + u * xi * omega * Wxiw + F - E, where F is the linearisation commitment
        // plus the v-weighted commitments opened at xi, and E = e * G.
        let points = [
            vk.qm,
            vk.ql,
            vk.qr,
            vk.qo,
            vk.qc,
            proof.z,
            vk.s3,
            proof.t1,
            proof.t2,
            proof.t3,
            proof.a,
            proof.b,
            proof.c,
            vk.s1,
            vk.s2,
            proof.wxi,
            proof.wxiw,
            G1Element::generator(),
        ];
        let scalars = [
            eval_a * eval_b,
            eval_a,
            eval_b,
            eval_c,
            Fr::one(),
            z_coefficient,
            -s3_coefficient,
            -zh,
            -zh * xi_n,
            -zh * xi_n.square(),
            v[0],
            v[1],
            v[2],
            v[3],
            v[4],
            xi,
            u * xi * vk.omega,
            -e,
        ]
        .map(Scalar::from);
        let b1 = G1Element::multi_scalar_mul(&scalars, &points)?;
        let a1 = proof.wxi + proof.wxiw * Scalar::from(u);
        Ok(Some((a1, b1)))
    }
}
