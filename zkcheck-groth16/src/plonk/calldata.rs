// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The arguments of the PLONK Solidity verifier, as exported by `snarkjs plonk
//! exportSolidityCallData`. Two forms are read:
//! ```text
//! ["0x..", "0x..", ... 24 words],["0x..", ...]
//! 0x<768 bytes as hex>,["0x..", ...]
//! ```
//! The 24 words are the nine commitments as `x, y` followed by the six evaluations, which is
//! also the byte layout of [PlonkProof::from_bytes]. The second form passes the same words as one
//! `bytes` argument.

use std::fmt::{Display, Formatter};

use ark_bn254::Fq;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use zkcheck::encoding::{field_element_to_hex, parse_field_element};
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{BaseFieldElement, G1Element, Scalar};

use crate::calldata::{quoted_list, Word};
use crate::groth16::Verdict;
use crate::inputs::PublicInputs;
use crate::plonk::{
    malformed_proof, PlonkProof, PlonkVerifier, PROOF_BYTE_LENGTH, PROOF_COMMITMENTS,
    PROOF_EVALUATIONS,
};

/// The number of 32 byte words in a proof.
pub const PROOF_WORDS: usize = 2 * PROOF_COMMITMENTS + PROOF_EVALUATIONS;

/// The typed arguments of `verifyProof(uint256[24] proof, uint256[] pubSignals)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlonkCall {
    /// The proof words.
    pub proof: Vec<String>,
    /// The public inputs.
    pub input: Vec<String>,
}

fn words(list: Vec<Word>) -> Vec<String> {
    list.into_iter().map(String::from).collect()
}

impl PlonkCall {
    /// Parse either form printed by snarkjs. Whitespace between tokens is ignored.
    pub fn parse(text: &str) -> VerifierResult<Self> {
        let text = text.trim();
        let shape_error = |e: serde_json::Error| {
            malformed_proof(format!("calldata does not have the expected shape: {e}"))
        };

        if let Some(hex_proof) = text.strip_prefix("0x") {
            let (hex_proof, input) = hex_proof
                .split_once(',')
                .ok_or_else(|| malformed_proof("missing public inputs after the proof bytes"))?;
            let bytes = hex::decode(hex_proof.trim())
                .map_err(|e| malformed_proof(format!("proof bytes are not hex: {e}")))?;
            if bytes.len() != PROOF_BYTE_LENGTH {
                return Err(malformed_proof(format!(
                    "expected {PROOF_BYTE_LENGTH} proof bytes, got {}",
                    bytes.len()
                )));
            }
            let input: Vec<Word> = serde_json::from_str(input.trim()).map_err(shape_error)?;
            return Ok(PlonkCall {
                proof: bytes
                    .chunks_exact(32)
                    .map(|word| format!("0x{}", hex::encode(word)))
                    .collect(),
                input: words(input),
            });
        }

        let (proof, input): (Vec<Word>, Vec<Word>) =
            serde_json::from_str(&format!("[{text}]")).map_err(shape_error)?;
        Ok(PlonkCall {
            proof: words(proof),
            input: words(input),
        })
    }

    /// Create the call arguments for a proof and its public inputs.
    pub fn new(proof: &PlonkProof, inputs: &PublicInputs) -> Self {
        let mut words = Vec::with_capacity(PROOF_WORDS);
        for point in proof.commitments() {
            let (x, y) = point
                .affine_coordinates()
                .unwrap_or((BaseFieldElement::zero(), BaseFieldElement::zero()));
            words.push(x.to_hex_string());
            words.push(y.to_hex_string());
        }
        for evaluation in proof.evaluations() {
            words.push(field_element_to_hex(&ark_bn254::Fr::from(*evaluation)));
        }
        PlonkCall {
            proof: words,
            input: inputs
                .iter()
                .map(|x| field_element_to_hex(&ark_bn254::Fr::from(*x)))
                .collect(),
        }
    }

    /// Decode the proof and public inputs. Every coordinate must be reduced modulo q and every
    /// evaluation and input modulo r.
    pub fn to_proof_and_inputs(&self) -> VerifierResult<(PlonkProof, PublicInputs)> {
        if self.proof.len() != PROOF_WORDS {
            return Err(malformed_proof(format!(
                "expected {PROOF_WORDS} proof words, got {}",
                self.proof.len()
            )));
        }
        let (coordinates, evaluations) = self.proof.split_at(2 * PROOF_COMMITMENTS);
        let commitments = coordinates
            .iter()
            .tuples()
            .map(|(x, y)| {
                G1Element::from_affine_coordinates(
                    BaseFieldElement::from(parse_field_element::<Fq>(x)?),
                    BaseFieldElement::from(parse_field_element::<Fq>(y)?),
                )
            })
            .collect::<VerifierResult<Vec<_>>>()?;
        let evaluations = evaluations
            .iter()
            .map(|s| s.parse::<Scalar>())
            .collect::<VerifierResult<Vec<_>>>()?;
        let proof = PlonkProof::from_parts(
            commitments
                .try_into()
                .map_err(|_| VerifierError::InvalidInput)?,
            evaluations
                .try_into()
                .map_err(|_| VerifierError::InvalidInput)?,
        );
        Ok((proof, PublicInputs::from_strings(&self.input)?))
    }

    /// Decode and verify the call against the given verifier.
    pub fn verify(&self, verifier: &PlonkVerifier) -> VerifierResult<Verdict> {
        let (proof, inputs) = self.to_proof_and_inputs()?;
        verifier.verify(&proof, &inputs)
    }
}

impl Display for PlonkCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", quoted_list(&self.proof), quoted_list(&self.input))
    }
}
