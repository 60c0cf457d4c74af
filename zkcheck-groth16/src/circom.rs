// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing the JSON files produced by snarkjs for Groth16 over BN254
//! (`verification_key.json`, `proof.json` and `public.json`).
//!
//! Points are given in projective coordinates as decimal strings, with `z = 1` for affine points
//! and `z = 0` for the identity. Coordinates must be in canonical form and points must be valid,
//! exactly as for the binary formats.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{BaseFieldElement, G1Element, G2Element};
use zkcheck::groups::GroupElement;

use crate::groth16::{b_point_error, Proof, VerifyingKey};
use crate::inputs::PublicInputs;

const PROTOCOL: &str = "groth16";
const CURVE: &str = "bn128";

type StrPair = (String, String);
type StrTriplet = (String, String, String);

/// A G1 point as `[x, y, z]`.
pub type CircomG1 = StrTriplet;

/// A G2 point as `[[x.c0, x.c1], [y.c0, y.c1], [z.c0, z.c1]]`.
pub type CircomG2 = (StrPair, StrPair, StrPair);

/// The contents of a snarkjs `verification_key.json` file. `vk_alphabeta_12` is not read, since
/// it is not needed for verification.
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CircomVerifyingKey {
    /// Always `groth16`.
    pub protocol: String,
    /// Always `bn128`.
    pub curve: String,
    /// The number of public inputs.
    pub nPublic: usize,
    /// alpha in G1.
    pub vk_alpha_1: CircomG1,
    /// beta in G2.
    pub vk_beta_2: CircomG2,
    /// gamma in G2.
    pub vk_gamma_2: CircomG2,
    /// delta in G2.
    pub vk_delta_2: CircomG2,
    /// The `nPublic + 1` input commitment points.
    pub IC: Vec<CircomG1>,
}

/// The contents of a snarkjs `proof.json` file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CircomProof {
    /// The point A.
    pub pi_a: CircomG1,
    /// The point B.
    pub pi_b: CircomG2,
    /// The point C.
    pub pi_c: CircomG1,
    /// Always `groth16`.
    pub protocol: String,
    /// Always `bn128`.
    pub curve: String,
}

fn base_field_element(s: &str) -> VerifierResult<BaseFieldElement> {
    s.parse::<BaseFieldElement>()
}

fn is_one(limbs: &[BaseFieldElement; 2]) -> bool {
    limbs[0] == BaseFieldElement::one() && limbs[1].is_zero()
}

/// Parse a projective G1 point with `z` equal to 1, or the identity written as `[0, 1, 0]`.
pub fn g1_from_str_projective(s: &CircomG1) -> VerifierResult<G1Element> {
    let x = base_field_element(&s.0)?;
    let y = base_field_element(&s.1)?;
    let z = base_field_element(&s.2)?;
    if z.is_zero() {
        if !x.is_zero() || y != BaseFieldElement::one() {
            return Err(VerifierError::encoding(
                "the identity must be written as [0, 1, 0]",
            ));
        }
        return Ok(G1Element::zero());
    }
    if z != BaseFieldElement::one() {
        return Err(VerifierError::encoding("projective z must be 0 or 1"));
    }
    G1Element::from_affine_coordinates(x, y)
}

/// Parse a projective G2 point with `z` equal to 1, or the identity written as
/// `[[0, 0], [1, 0], [0, 0]]`.
pub fn g2_from_str_projective(s: &CircomG2) -> VerifierResult<G2Element> {
    let limbs = |pair: &StrPair| -> VerifierResult<[BaseFieldElement; 2]> {
        Ok([base_field_element(&pair.0)?, base_field_element(&pair.1)?])
    };
    let x = limbs(&s.0)?;
    let y = limbs(&s.1)?;
    let z = limbs(&s.2)?;
    if z.iter().all(BaseFieldElement::is_zero) {
        if !x.iter().all(BaseFieldElement::is_zero) || !is_one(&y) {
            return Err(VerifierError::encoding(
                "the identity must be written as [[0, 0], [1, 0], [0, 0]]",
            ));
        }
        return Ok(G2Element::zero());
    }
    if !is_one(&z) {
        return Err(VerifierError::encoding("projective z must be 0 or 1"));
    }
    G2Element::from_affine_coordinates(x, y)
}

/// The projective form of a G1 point, with the identity written as `[0, 1, 0]`.
pub fn g1_to_str_projective(p: &G1Element) -> CircomG1 {
    match p.affine_coordinates() {
        Some((x, y)) => (x.to_decimal_string(), y.to_decimal_string(), "1".to_string()),
        None => ("0".to_string(), "1".to_string(), "0".to_string()),
    }
}

/// The projective form of a G2 point, with the identity written as `[[0, 0], [1, 0], [0, 0]]`.
pub fn g2_to_str_projective(p: &G2Element) -> CircomG2 {
    let pair = |a: &str, b: &str| (a.to_string(), b.to_string());
    match p.affine_coordinates() {
        Some((x, y)) => (
            (x[0].to_decimal_string(), x[1].to_decimal_string()),
            (y[0].to_decimal_string(), y[1].to_decimal_string()),
            pair("1", "0"),
        ),
        None => (pair("0", "0"), pair("1", "0"), pair("0", "0")),
    }
}

fn malformed_key(reason: impl Into<String>) -> VerifierError {
    let reason = reason.into();
    warn!("Rejecting snarkjs verifying key: {}", reason);
    VerifierError::MalformedKey(reason)
}

fn malformed_proof(reason: impl Into<String>) -> VerifierError {
    let reason = reason.into();
    warn!("Rejecting snarkjs proof: {}", reason);
    VerifierError::MalformedProof(reason)
}

impl TryFrom<&CircomVerifyingKey> for VerifyingKey {
    type Error = VerifierError;

    fn try_from(vk: &CircomVerifyingKey) -> VerifierResult<Self> {
        if vk.protocol != PROTOCOL {
            return Err(malformed_key(format!("unsupported protocol {}", vk.protocol)));
        }
        if vk.curve != CURVE {
            return Err(malformed_key(format!("unsupported curve {}", vk.curve)));
        }
        let expected = vk
            .nPublic
            .checked_add(1)
            .ok_or_else(|| malformed_key(format!("nPublic {} is too large", vk.nPublic)))?;
        if expected != vk.IC.len() {
            return Err(VerifierError::InputCountMismatch {
                expected,
                actual: vk.IC.len(),
            });
        }

        let g1 = |name: &str, p: &CircomG1| {
            g1_from_str_projective(p).map_err(|e| malformed_key(format!("{name}: {e}")))
        };
        let g2 = |name: &str, p: &CircomG2| {
            g2_from_str_projective(p).map_err(|e| malformed_key(format!("{name}: {e}")))
        };
        let ic = vk
            .IC
            .iter()
            .enumerate()
            .map(|(i, p)| g1(&format!("IC[{i}]"), p))
            .collect::<VerifierResult<Vec<_>>>()?;

        Ok(VerifyingKey::new(
            g1("vk_alpha_1", &vk.vk_alpha_1)?,
            g2("vk_beta_2", &vk.vk_beta_2)?,
            g2("vk_gamma_2", &vk.vk_gamma_2)?,
            g2("vk_delta_2", &vk.vk_delta_2)?,
            ic,
        ))
    }
}

impl From<&VerifyingKey> for CircomVerifyingKey {
    fn from(vk: &VerifyingKey) -> Self {
        CircomVerifyingKey {
            protocol: PROTOCOL.to_string(),
            curve: CURVE.to_string(),
            nPublic: vk.num_public_inputs(),
            vk_alpha_1: g1_to_str_projective(vk.alpha()),
            vk_beta_2: g2_to_str_projective(vk.beta()),
            vk_gamma_2: g2_to_str_projective(vk.gamma()),
            vk_delta_2: g2_to_str_projective(vk.delta()),
            IC: vk.ic().iter().map(g1_to_str_projective).collect(),
        }
    }
}

impl TryFrom<&CircomProof> for Proof {
    type Error = VerifierError;

    fn try_from(proof: &CircomProof) -> VerifierResult<Self> {
        if proof.protocol != PROTOCOL {
            return Err(malformed_proof(format!(
                "unsupported protocol {}",
                proof.protocol
            )));
        }
        if proof.curve != CURVE {
            return Err(malformed_proof(format!("unsupported curve {}", proof.curve)));
        }
        let b = g2_from_str_projective(&proof.pi_b).map_err(b_point_error)?;
        Ok(Proof::new(
            g1_from_str_projective(&proof.pi_a)?,
            b,
            g1_from_str_projective(&proof.pi_c)?,
        ))
    }
}

impl From<&Proof> for CircomProof {
    fn from(proof: &Proof) -> Self {
        CircomProof {
            pi_a: g1_to_str_projective(proof.a()),
            pi_b: g2_to_str_projective(proof.b()),
            pi_c: g1_to_str_projective(proof.c()),
            protocol: PROTOCOL.to_string(),
            curve: CURVE.to_string(),
        }
    }
}

/// Parse the contents of a snarkjs `verification_key.json` file.
pub fn verifying_key_from_json(json: &str) -> VerifierResult<VerifyingKey> {
    let vk: CircomVerifyingKey =
        serde_json::from_str(json).map_err(|e| malformed_key(e.to_string()))?;
    VerifyingKey::try_from(&vk)
}

/// Write a verifying key in the format of a snarkjs `verification_key.json` file.
pub fn verifying_key_to_json(vk: &VerifyingKey) -> VerifierResult<String> {
    serde_json::to_string_pretty(&CircomVerifyingKey::from(vk))
        .map_err(|e| VerifierError::MalformedKey(e.to_string()))
}

/// Parse the contents of a snarkjs `proof.json` file.
pub fn proof_from_json(json: &str) -> VerifierResult<Proof> {
    let proof: CircomProof =
        serde_json::from_str(json).map_err(|e| malformed_proof(e.to_string()))?;
    Proof::try_from(&proof)
}

/// Write a proof in the format of a snarkjs `proof.json` file.
pub fn proof_to_json(proof: &Proof) -> VerifierResult<String> {
    serde_json::to_string_pretty(&CircomProof::from(proof))
        .map_err(|e| VerifierError::MalformedProof(e.to_string()))
}

/// Read a snarkjs `verification_key.json` file.
pub fn read_vkey(path: &Path) -> VerifierResult<VerifyingKey> {
    let json = fs::read_to_string(path)
        .map_err(|e| malformed_key(format!("cannot read {}: {e}", path.display())))?;
    verifying_key_from_json(&json)
}

/// Read a snarkjs `proof.json` file.
pub fn read_proof(path: &Path) -> VerifierResult<Proof> {
    let json = fs::read_to_string(path)
        .map_err(|e| malformed_proof(format!("cannot read {}: {e}", path.display())))?;
    proof_from_json(&json)
}

/// Read a snarkjs `public.json` file.
pub fn read_public_inputs(path: &Path) -> VerifierResult<PublicInputs> {
    let json = fs::read_to_string(path).map_err(|e| {
        VerifierError::encoding(format!("cannot read {}: {e}", path.display()))
    })?;
    PublicInputs::from_json(&json)
}

#[cfg(test)]
#[path = "unit_tests/circom_tests.rs"]
mod circom_tests;
