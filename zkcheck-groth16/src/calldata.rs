// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The arguments of the Solidity verifier's `verifyProof(a, b, c, input)` function, in the text
//! form printed by `snarkjs zkey export soliditycalldata`:
//! ```text
//! ["0x..", "0x.."],[["0x..", "0x.."],["0x..", "0x.."]],["0x..", "0x.."],["0x..", ...]
//! ```
//! All values are field elements in canonical text form, or small JSON integers such as the `0`
//! in `[0, 0]`. As in EIP-197, the two limbs of each G2 coordinate are ordered `(c1, c0)`.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use zkcheck::encoding::field_element_to_hex;
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{BaseFieldElement, G1Element, G2Element};

use crate::groth16::{b_point_error, Proof, Verdict, Verifier};
use crate::inputs::PublicInputs;

/// The typed argument tuple of `verifyProof(uint[2] a, uint[2][2] b, uint[2] c, uint[] input)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidityCall {
    /// The point A as `[x, y]`.
    pub a: [String; 2],
    /// The point B as `[[x.c1, x.c0], [y.c1, y.c0]]`.
    pub b: [[String; 2]; 2],
    /// The point C as `[x, y]`.
    pub c: [String; 2],
    /// The public inputs.
    pub input: Vec<String>,
}

/// A calldata value. Integers too large for a u64 are not valid JSON numbers for this purpose.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Word {
    Text(String),
    Small(u64),
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        match word {
            Word::Text(s) => s,
            Word::Small(n) => n.to_string(),
        }
    }
}

type CalldataTuple = ([Word; 2], [[Word; 2]; 2], [Word; 2], Vec<Word>);

fn base_field_element(s: &str) -> VerifierResult<BaseFieldElement> {
    s.parse()
}

fn g1_from_strings(p: &[String; 2]) -> VerifierResult<G1Element> {
    G1Element::from_affine_coordinates(base_field_element(&p[0])?, base_field_element(&p[1])?)
}

fn g1_to_strings(p: &G1Element) -> [String; 2] {
    let (x, y) = p
        .affine_coordinates()
        .unwrap_or((BaseFieldElement::zero(), BaseFieldElement::zero()));
    [x.to_hex_string(), y.to_hex_string()]
}

impl SolidityCall {
    /// Parse the text printed by snarkjs. Whitespace between tokens is ignored.
    pub fn parse(text: &str) -> VerifierResult<Self> {
        let (a, b, c, input): CalldataTuple = serde_json::from_str(&format!("[{}]", text.trim()))
            .map_err(|e| {
                VerifierError::MalformedProof(format!("calldata does not have the expected shape: {e}"))
            })?;
        Ok(SolidityCall {
            a: a.map(String::from),
            b: b.map(|row| row.map(String::from)),
            c: c.map(String::from),
            input: input.into_iter().map(String::from).collect(),
        })
    }

    /// Create the call arguments for a proof and its public inputs.
    pub fn new(proof: &Proof, inputs: &PublicInputs) -> Self {
        let (x, y) = proof.b().affine_coordinates().unwrap_or((
            [BaseFieldElement::zero(); 2],
            [BaseFieldElement::zero(); 2],
        ));
        SolidityCall {
            a: g1_to_strings(proof.a()),
            b: [
                [x[1].to_hex_string(), x[0].to_hex_string()],
                [y[1].to_hex_string(), y[0].to_hex_string()],
            ],
            c: g1_to_strings(proof.c()),
            input: inputs
                .iter()
                .map(|x| field_element_to_hex(&ark_bn254::Fr::from(*x)))
                .collect(),
        }
    }

    /// Decode the proof and public inputs. Points are validated as in [Proof::decode].
    pub fn to_proof_and_inputs(&self) -> VerifierResult<(Proof, PublicInputs)> {
        let limbs = |pair: &[String; 2]| -> VerifierResult<[BaseFieldElement; 2]> {
            Ok([base_field_element(&pair[1])?, base_field_element(&pair[0])?])
        };
        let b = G2Element::from_affine_coordinates(limbs(&self.b[0])?, limbs(&self.b[1])?)
            .map_err(b_point_error)?;
        let proof = Proof::new(g1_from_strings(&self.a)?, b, g1_from_strings(&self.c)?);
        Ok((proof, PublicInputs::from_strings(&self.input)?))
    }

    /// Decode and verify the call against the given verifier.
    pub fn verify(&self, verifier: &Verifier) -> VerifierResult<Verdict> {
        let (proof, inputs) = self.to_proof_and_inputs()?;
        verifier.verify(&proof, &inputs)
    }
}

pub(crate) fn quoted_list(values: &[String]) -> String {
    format!("[{}]", values.iter().map(|v| format!("\"{v}\"")).join(", "))
}

impl Display for SolidityCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},[{},{}],{},{}",
            quoted_list(&self.a),
            quoted_list(&self.b[0]),
            quoted_list(&self.b[1]),
            quoted_list(&self.c),
            quoted_list(&self.input)
        )
    }
}

#[cfg(test)]
#[path = "unit_tests/calldata_tests.rs"]
mod calldata_tests;
