// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The snarkjs PLONK `verification_key.json` and `proof.json` files. Points use the same projective
//! string form as the Groth16 files in [crate::circom].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::Scalar;

use crate::circom::{
    g1_from_str_projective, g1_to_str_projective, g2_from_str_projective, g2_to_str_projective,
    CircomG1, CircomG2,
};
use crate::plonk::{malformed_key, malformed_proof, PlonkProof, PlonkVerifyingKey, Selectors};

const PROTOCOL: &str = "plonk";
const CURVE: &str = "bn128";

/// The contents of a snarkjs PLONK `verification_key.json` file.
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CircomPlonkVerifyingKey {
    /// Always `plonk`.
    pub protocol: String,
    /// Always `bn128`.
    pub curve: String,
    /// The number of public inputs.
    pub nPublic: usize,
    /// The domain has `2^power` rows.
    pub power: u32,
    /// Coset shift of the right wires.
    pub k1: String,
    /// Coset shift of the output wires.
    pub k2: String,
    /// Multiplication selector.
    pub Qm: CircomG1,
    /// Left wire selector.
    pub Ql: CircomG1,
    /// Right wire selector.
    pub Qr: CircomG1,
    /// Output wire selector.
    pub Qo: CircomG1,
    /// Constant selector.
    pub Qc: CircomG1,
    /// Permutation of the left wires.
    pub S1: CircomG1,
    /// Permutation of the right wires.
    pub S2: CircomG1,
    /// Permutation of the output wires.
    pub S3: CircomG1,
    /// `[x]_2` of the setup.
    pub X_2: CircomG2,
    /// The generator of the domain. Must match `power`.
    pub w: String,
}

/// The contents of a snarkjs PLONK `proof.json` file.
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CircomPlonkProof {
    pub A: CircomG1,
    pub B: CircomG1,
    pub C: CircomG1,
    pub Z: CircomG1,
    pub T1: CircomG1,
    pub T2: CircomG1,
    pub T3: CircomG1,
    pub Wxi: CircomG1,
    pub Wxiw: CircomG1,
    pub eval_a: String,
    pub eval_b: String,
    pub eval_c: String,
    pub eval_s1: String,
    pub eval_s2: String,
    pub eval_zw: String,
    /// Always `plonk`.
    pub protocol: String,
    /// Always `bn128`.
    pub curve: String,
}

impl TryFrom<&CircomPlonkVerifyingKey> for PlonkVerifyingKey {
    type Error = VerifierError;

    fn try_from(vk: &CircomPlonkVerifyingKey) -> VerifierResult<Self> {
        if vk.protocol != PROTOCOL {
            return Err(malformed_key(format!("unsupported protocol {}", vk.protocol)));
        }
        if vk.curve != CURVE {
            return Err(malformed_key(format!("unsupported curve {}", vk.curve)));
        }
        let g1 = |name: &str, p: &CircomG1| {
            g1_from_str_projective(p).map_err(|e| malformed_key(format!("{name}: {e}")))
        };
        let scalar = |name: &str, s: &str| {
            s.parse::<Scalar>()
                .map_err(|e| malformed_key(format!("{name}: {e}")))
        };
        let selectors = Selectors {
            qm: g1("Qm", &vk.Qm)?,
            ql: g1("Ql", &vk.Ql)?,
            qr: g1("Qr", &vk.Qr)?,
            qo: g1("Qo", &vk.Qo)?,
            qc: g1("Qc", &vk.Qc)?,
            s1: g1("S1", &vk.S1)?,
            s2: g1("S2", &vk.S2)?,
            s3: g1("S3", &vk.S3)?,
        };
        let x_2 = g2_from_str_projective(&vk.X_2)
            .map_err(|e| malformed_key(format!("X_2: {e}")))?;

        let key = PlonkVerifyingKey::new(
            vk.nPublic,
            vk.power,
            scalar("k1", &vk.k1)?,
            scalar("k2", &vk.k2)?,
            selectors,
            x_2,
        )?;
        if scalar("w", &vk.w)? != key.omega() {
            return Err(malformed_key(format!(
                "w is not the domain generator for power {}",
                vk.power
            )));
        }
        Ok(key)
    }
}

impl From<&PlonkVerifyingKey> for CircomPlonkVerifyingKey {
    fn from(vk: &PlonkVerifyingKey) -> Self {
        CircomPlonkVerifyingKey {
            protocol: PROTOCOL.to_string(),
            curve: CURVE.to_string(),
            nPublic: vk.num_public_inputs(),
            power: vk.power(),
            k1: vk.k1().to_decimal_string(),
            k2: vk.k2().to_decimal_string(),
            Qm: g1_to_str_projective(&vk.qm),
            Ql: g1_to_str_projective(&vk.ql),
            Qr: g1_to_str_projective(&vk.qr),
            Qo: g1_to_str_projective(&vk.qo),
            Qc: g1_to_str_projective(&vk.qc),
            S1: g1_to_str_projective(&vk.s1),
            S2: g1_to_str_projective(&vk.s2),
            S3: g1_to_str_projective(&vk.s3),
            X_2: g2_to_str_projective(vk.x_2()),
            w: vk.omega().to_decimal_string(),
        }
    }
}

impl TryFrom<&CircomPlonkProof> for PlonkProof {
    type Error = VerifierError;

    fn try_from(proof: &CircomPlonkProof) -> VerifierResult<Self> {
        if proof.protocol != PROTOCOL {
            return Err(malformed_proof(format!(
                "unsupported protocol {}",
                proof.protocol
            )));
        }
        if proof.curve != CURVE {
            return Err(malformed_proof(format!("unsupported curve {}", proof.curve)));
        }
        Ok(PlonkProof::from_parts(
            map_array(
                [
                    &proof.A,
                    &proof.B,
                    &proof.C,
                    &proof.Z,
                    &proof.T1,
                    &proof.T2,
                    &proof.T3,
                    &proof.Wxi,
                    &proof.Wxiw,
                ],
                g1_from_str_projective,
            )?,
            map_array(
                [
                    &proof.eval_a,
                    &proof.eval_b,
                    &proof.eval_c,
                    &proof.eval_s1,
                    &proof.eval_s2,
                    &proof.eval_zw,
                ],
                |s| s.parse::<Scalar>(),
            )?,
        ))
    }
}

/// Fallible element-wise map of a fixed size array.
fn map_array<T, U, const N: usize>(
    items: [T; N],
    f: impl FnMut(T) -> VerifierResult<U>,
) -> VerifierResult<[U; N]> {
    items
        .into_iter()
        .map(f)
        .collect::<VerifierResult<Vec<U>>>()?
        .try_into()
        .map_err(|_| VerifierError::InvalidInput)
}

impl From<&PlonkProof> for CircomPlonkProof {
    fn from(proof: &PlonkProof) -> Self {
        CircomPlonkProof {
            A: g1_to_str_projective(&proof.a),
            B: g1_to_str_projective(&proof.b),
            C: g1_to_str_projective(&proof.c),
            Z: g1_to_str_projective(&proof.z),
            T1: g1_to_str_projective(&proof.t1),
            T2: g1_to_str_projective(&proof.t2),
            T3: g1_to_str_projective(&proof.t3),
            Wxi: g1_to_str_projective(&proof.wxi),
            Wxiw: g1_to_str_projective(&proof.wxiw),
            eval_a: proof.eval_a.to_decimal_string(),
            eval_b: proof.eval_b.to_decimal_string(),
            eval_c: proof.eval_c.to_decimal_string(),
            eval_s1: proof.eval_s1.to_decimal_string(),
            eval_s2: proof.eval_s2.to_decimal_string(),
            eval_zw: proof.eval_zw.to_decimal_string(),
            protocol: PROTOCOL.to_string(),
            curve: CURVE.to_string(),
        }
    }
}

/// Parse the contents of a snarkjs PLONK `verification_key.json` file.
pub fn plonk_verifying_key_from_json(json: &str) -> VerifierResult<PlonkVerifyingKey> {
    let vk: CircomPlonkVerifyingKey =
        serde_json::from_str(json).map_err(|e| malformed_key(e.to_string()))?;
    PlonkVerifyingKey::try_from(&vk)
}

/// Write a key in the format of a snarkjs PLONK `verification_key.json` file.
pub fn plonk_verifying_key_to_json(vk: &PlonkVerifyingKey) -> VerifierResult<String> {
    serde_json::to_string_pretty(&CircomPlonkVerifyingKey::from(vk))
        .map_err(|e| VerifierError::MalformedKey(e.to_string()))
}

/// Parse the contents of a snarkjs PLONK `proof.json` file.
pub fn plonk_proof_from_json(json: &str) -> VerifierResult<PlonkProof> {
    let proof: CircomPlonkProof =
        serde_json::from_str(json).map_err(|e| malformed_proof(e.to_string()))?;
    PlonkProof::try_from(&proof)
}

/// Write a proof in the format of a snarkjs PLONK `proof.json` file.
pub fn plonk_proof_to_json(proof: &PlonkProof) -> VerifierResult<String> {
    serde_json::to_string_pretty(&CircomPlonkProof::from(proof))
        .map_err(|e| VerifierError::MalformedProof(e.to_string()))
}

/// Read a snarkjs PLONK `verification_key.json` file.
pub fn read_plonk_vkey(path: &Path) -> VerifierResult<PlonkVerifyingKey> {
    let json = fs::read_to_string(path)
        .map_err(|e| malformed_key(format!("cannot read {}: {e}", path.display())))?;
    plonk_verifying_key_from_json(&json)
}

/// Read a snarkjs PLONK `proof.json` file.
pub fn read_plonk_proof(path: &Path) -> VerifierResult<PlonkProof> {
    let json = fs::read_to_string(path)
        .map_err(|e| malformed_proof(format!("cannot read {}: {e}", path.display())))?;
    plonk_proof_from_json(&json)
}
