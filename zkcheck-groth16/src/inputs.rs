// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Public inputs are scalars modulo the group order r, given in circuit order. They are read from
//! either
//! - concatenated 32 byte big-endian words (the EVM layout), or
//! - a JSON array of strings in the canonical text form of [zkcheck::encoding], as in the
//!   `public.json` file written by snarkjs.
//!
//! Values that are not reduced modulo r are rejected in both forms.

use std::slice::Iter;

use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{Scalar, SCALAR_LENGTH};
use zkcheck::serde_helpers::ToFromByteArray;

/// The ordered public inputs of a circuit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicInputs(Vec<Scalar>);

impl PublicInputs {
    /// Create public inputs from scalars in circuit order.
    pub fn new(inputs: Vec<Scalar>) -> Self {
        PublicInputs(inputs)
    }

    /// Read concatenated 32 byte big-endian scalars.
    pub fn from_be_bytes(bytes: &[u8]) -> VerifierResult<Self> {
        if bytes.len() % SCALAR_LENGTH != 0 {
            return Err(VerifierError::encoding(format!(
                "public inputs must be a multiple of {SCALAR_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }
        bytes
            .chunks_exact(SCALAR_LENGTH)
            .map(|chunk| {
                Scalar::from_byte_array(
                    chunk
                        .try_into()
                        .map_err(|_| VerifierError::InvalidInput)?,
                )
            })
            .collect::<VerifierResult<Vec<_>>>()
            .map(PublicInputs)
    }

    /// Parse every string as a scalar in canonical text form.
    pub fn from_strings<S: AsRef<str>>(strings: &[S]) -> VerifierResult<Self> {
        strings
            .iter()
            .map(|s| s.as_ref().parse::<Scalar>())
            .collect::<VerifierResult<Vec<_>>>()
            .map(PublicInputs)
    }

    /// Parse a JSON array of strings, e.g. `["6", "0x07"]`. JSON numbers are not accepted since
    /// most values do not fit in a double.
    pub fn from_json(json: &str) -> VerifierResult<Self> {
        let strings: Vec<String> = serde_json::from_str(json).map_err(|e| {
            VerifierError::encoding(format!("public inputs are not a JSON array of strings: {e}"))
        })?;
        Self::from_strings(&strings)
    }

    /// Concatenated 32 byte big-endian scalars.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|x| x.to_byte_array()).collect()
    }

    /// Decimal strings, as in a snarkjs `public.json` file.
    pub fn to_decimal_strings(&self) -> Vec<String> {
        self.0.iter().map(Scalar::to_decimal_string).collect()
    }

    /// A JSON array of decimal strings.
    pub fn to_json(&self) -> String {
        serde_json::Value::from(self.to_decimal_strings()).to_string()
    }

    /// The number of inputs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no inputs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The inputs as a slice.
    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    /// Iterate over the inputs in circuit order.
    pub fn iter(&self) -> Iter<'_, Scalar> {
        self.0.iter()
    }
}

impl From<Vec<Scalar>> for PublicInputs {
    fn from(inputs: Vec<Scalar>) -> Self {
        PublicInputs(inputs)
    }
}

impl FromIterator<Scalar> for PublicInputs {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        PublicInputs(iter.into_iter().collect())
    }
}
