// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! PLONK proofs over BN254 in the form produced by snarkjs (`snarkjs plonk prove`), with KZG
//! commitments and a Keccak-256 Fiat-Shamir transcript. A proof is accepted exactly when the
//! batched KZG opening check `e(-W, [x]_2) + e(B, [1]_2) = 0` holds, computed with one
//! multi-pairing.

use ark_bn254::Fr;
use ark_ff::{FftField, Field, Zero};
use tracing::warn;
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{
    G1Element, G2Element, Scalar, G1_UNCOMPRESSED_BYTE_LENGTH, SCALAR_LENGTH,
};
use zkcheck::serde_helpers::ToFromByteArray;

pub mod calldata;
pub mod circom;
mod transcript;
mod verifier;

pub use verifier::PlonkVerifier;

#[cfg(test)]
#[path = "../unit_tests/plonk_tests.rs"]
mod plonk_tests;

/// The number of G1 commitments in a proof.
pub const PROOF_COMMITMENTS: usize = 9;

/// The number of opening evaluations in a proof.
pub const PROOF_EVALUATIONS: usize = 6;

/// The byte length of a proof in the EVM layout: every commitment as `x || y` and every evaluation
/// as one 32 byte big-endian word.
pub const PROOF_BYTE_LENGTH: usize =
    PROOF_COMMITMENTS * G1_UNCOMPRESSED_BYTE_LENGTH + PROOF_EVALUATIONS * SCALAR_LENGTH;

/// The largest supported domain is 2^28, the two-adicity of the BN254 scalar field.
pub const MAX_POWER: u32 = 28;

/// A PLONK verifying key: the selector and permutation commitments of a circuit, the domain and
/// the G2 point `[x]_2` of the KZG setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlonkVerifyingKey {
    pub(crate) n_public: usize,
    pub(crate) power: u32,
    pub(crate) k1: Fr,
    pub(crate) k2: Fr,
    pub(crate) qm: G1Element,
    pub(crate) ql: G1Element,
    pub(crate) qr: G1Element,
    pub(crate) qo: G1Element,
    pub(crate) qc: G1Element,
    pub(crate) s1: G1Element,
    pub(crate) s2: G1Element,
    pub(crate) s3: G1Element,
    pub(crate) x_2: G2Element,
    pub(crate) omega: Fr,
}

/// The eight G1 commitments of a verifying key, in transcript order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// Multiplication selector.
    pub qm: G1Element,
    /// Left wire selector.
    pub ql: G1Element,
    /// Right wire selector.
    pub qr: G1Element,
    /// Output wire selector.
    pub qo: G1Element,
    /// Constant selector.
    pub qc: G1Element,
    /// Permutation of the left wires.
    pub s1: G1Element,
    /// Permutation of the right wires.
    pub s2: G1Element,
    /// Permutation of the output wires.
    pub s3: G1Element,
}

impl PlonkVerifyingKey {
    /// Create a key for a domain of size `2^power`. Fails if the domain is larger than the field
    /// supports, if there are more public inputs than rows, or if `k1` and `k2` do not separate
    /// the three wire columns.
    pub fn new(
        n_public: usize,
        power: u32,
        k1: Scalar,
        k2: Scalar,
        selectors: Selectors,
        x_2: G2Element,
    ) -> VerifierResult<Self> {
        if power == 0 || power > MAX_POWER {
            return Err(malformed_key(format!(
                "power must be between 1 and {MAX_POWER}, got {power}"
            )));
        }
        if n_public as u64 > 1u64 << power {
            return Err(malformed_key(format!(
                "{n_public} public inputs do not fit in a domain of size 2^{power}"
            )));
        }
        let (k1, k2) = (Fr::from(k1), Fr::from(k2));
        if k1.is_zero() || k2.is_zero() {
            return Err(malformed_key("k1 and k2 must be non-zero"));
        }
        let n = 1u64 << power;
        // k1 * H and k2 * H must be cosets of H distinct from H and from each other.
        if k1.pow([n]) == Fr::ONE || k2.pow([n]) == Fr::ONE || (k2 / k1).pow([n]) == Fr::ONE {
            return Err(malformed_key("k1 and k2 must select distinct cosets"));
        }
        let omega = Fr::get_root_of_unity(n)
            .ok_or_else(|| malformed_key(format!("no root of unity of order 2^{power}")))?;
        Ok(PlonkVerifyingKey {
            n_public,
            power,
            k1,
            k2,
            qm: selectors.qm,
            ql: selectors.ql,
            qr: selectors.qr,
            qo: selectors.qo,
            qc: selectors.qc,
            s1: selectors.s1,
            s2: selectors.s2,
            s3: selectors.s3,
            x_2,
            omega,
        })
    }

    /// The number of public inputs the key expects.
    pub fn num_public_inputs(&self) -> usize {
        self.n_public
    }

    /// The circuit domain has `2^power` rows.
    pub fn power(&self) -> u32 {
        self.power
    }

    /// The coset shift of the right wires.
    pub fn k1(&self) -> Scalar {
        Scalar::from(self.k1)
    }

    /// The coset shift of the output wires.
    pub fn k2(&self) -> Scalar {
        Scalar::from(self.k2)
    }

    /// The generator of the domain, a root of unity of order `2^power`.
    pub fn omega(&self) -> Scalar {
        Scalar::from(self.omega)
    }

    /// The selector and permutation commitments.
    pub fn selectors(&self) -> Selectors {
        Selectors {
            qm: self.qm,
            ql: self.ql,
            qr: self.qr,
            qo: self.qo,
            qc: self.qc,
            s1: self.s1,
            s2: self.s2,
            s3: self.s3,
        }
    }

    /// The point `[x]_2` of the setup.
    pub fn x_2(&self) -> &G2Element {
        &self.x_2
    }
}

/// A PLONK proof: the wire, permutation, quotient and opening commitments, and the evaluations at
/// the challenge point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlonkProof {
    /// Left wire commitment.
    pub a: G1Element,
    /// Right wire commitment.
    pub b: G1Element,
    /// Output wire commitment.
    pub c: G1Element,
    /// Permutation accumulator commitment.
    pub z: G1Element,
    /// Low part of the quotient.
    pub t1: G1Element,
    /// Middle part of the quotient.
    pub t2: G1Element,
    /// High part of the quotient.
    pub t3: G1Element,
    /// Opening proof at the challenge `xi`.
    pub wxi: G1Element,
    /// Opening proof at `xi * omega`.
    pub wxiw: G1Element,
    /// `a(xi)`
    pub eval_a: Scalar,
    /// `b(xi)`
    pub eval_b: Scalar,
    /// `c(xi)`
    pub eval_c: Scalar,
    /// `s1(xi)`
    pub eval_s1: Scalar,
    /// `s2(xi)`
    pub eval_s2: Scalar,
    /// `z(xi * omega)`
    pub eval_zw: Scalar,
}

impl PlonkProof {
    /// Create a proof from `[A, B, C, Z, T1, T2, T3, Wxi, Wxiw]` and
    /// `[eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw]`.
    pub fn from_parts(
        commitments: [G1Element; PROOF_COMMITMENTS],
        evaluations: [Scalar; PROOF_EVALUATIONS],
    ) -> Self {
        let [a, b, c, z, t1, t2, t3, wxi, wxiw] = commitments;
        let [eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw] = evaluations;
        PlonkProof {
            a,
            b,
            c,
            z,
            t1,
            t2,
            t3,
            wxi,
            wxiw,
            eval_a,
            eval_b,
            eval_c,
            eval_s1,
            eval_s2,
            eval_zw,
        }
    }

    /// The commitments in the order they appear in calldata.
    pub fn commitments(&self) -> [&G1Element; PROOF_COMMITMENTS] {
        [
            &self.a, &self.b, &self.c, &self.z, &self.t1, &self.t2, &self.t3, &self.wxi,
            &self.wxiw,
        ]
    }

    /// The evaluations in the order they appear in calldata.
    pub fn evaluations(&self) -> [&Scalar; PROOF_EVALUATIONS] {
        [
            &self.eval_a,
            &self.eval_b,
            &self.eval_c,
            &self.eval_s1,
            &self.eval_s2,
            &self.eval_zw,
        ]
    }

    /// Decode the EVM layout: the nine commitments as uncompressed points (all zeros is the
    /// identity) followed by the six evaluations, each reduced modulo r.
    pub fn from_bytes(bytes: &[u8]) -> VerifierResult<Self> {
        if bytes.len() != PROOF_BYTE_LENGTH {
            return Err(malformed_proof(format!(
                "expected {PROOF_BYTE_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }
        let (points, scalars) = bytes.split_at(PROOF_COMMITMENTS * G1_UNCOMPRESSED_BYTE_LENGTH);
        let commitments = points
            .chunks_exact(G1_UNCOMPRESSED_BYTE_LENGTH)
            .zip(COMMITMENT_NAMES)
            .map(|(chunk, name)| {
                chunk
                    .try_into()
                    .map_err(|_| VerifierError::InvalidInput)
                    .and_then(G1Element::from_uncompressed_byte_array)
                    .map_err(|e| rejected(name, e))
            })
            .collect::<VerifierResult<Vec<_>>>()?;
        let evaluations = scalars
            .chunks_exact(SCALAR_LENGTH)
            .zip(EVALUATION_NAMES)
            .map(|(chunk, name)| {
                chunk
                    .try_into()
                    .map_err(|_| VerifierError::InvalidInput)
                    .and_then(Scalar::from_byte_array)
                    .map_err(|e| rejected(name, e))
            })
            .collect::<VerifierResult<Vec<_>>>()?;
        Ok(Self::from_parts(
            commitments
                .try_into()
                .map_err(|_| VerifierError::InvalidInput)?,
            evaluations
                .try_into()
                .map_err(|_| VerifierError::InvalidInput)?,
        ))
    }

    /// Serialize in the EVM layout read by [PlonkProof::from_bytes].
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PROOF_BYTE_LENGTH);
        for point in self.commitments() {
            bytes.extend(point.to_uncompressed_byte_array());
        }
        for scalar in self.evaluations() {
            bytes.extend(scalar.to_byte_array());
        }
        bytes
    }
}

const COMMITMENT_NAMES: [&str; PROOF_COMMITMENTS] =
    ["A", "B", "C", "Z", "T1", "T2", "T3", "Wxi", "Wxiw"];

const EVALUATION_NAMES: [&str; PROOF_EVALUATIONS] =
    ["eval_a", "eval_b", "eval_c", "eval_s1", "eval_s2", "eval_zw"];

fn rejected(name: &str, error: VerifierError) -> VerifierError {
    warn!("Rejecting PLONK proof, {} is invalid: {}", name, error);
    error
}

pub(crate) fn malformed_key(reason: impl Into<String>) -> VerifierError {
    let reason = reason.into();
    warn!("Rejecting PLONK verifying key: {}", reason);
    VerifierError::MalformedKey(reason)
}

pub(crate) fn malformed_proof(reason: impl Into<String>) -> VerifierError {
    let reason = reason.into();
    warn!("Rejecting PLONK proof: {}", reason);
    VerifierError::MalformedProof(reason)
}
