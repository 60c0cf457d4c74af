// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use tracing::warn;
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{G1Element, G2Element};
use zkcheck::groups::{EncodedPoint, PointFormat};

use crate::groth16::Proof;

impl Proof {
    /// The byte length of a proof in the given format: 128 bytes compressed, 256 uncompressed.
    pub fn encoded_length(format: PointFormat) -> usize {
        2 * G1Element::encoded_length(format) + G2Element::encoded_length(format)
    }

    /// Deserialize `A || B || C`, inferring the point format from the length of the input: 128
    /// bytes are read as compressed points and 256 bytes as EVM encoded points.
    pub fn from_bytes(bytes: &[u8]) -> VerifierResult<Self> {
        let format = [PointFormat::Compressed, PointFormat::Uncompressed]
            .into_iter()
            .find(|format| Self::encoded_length(*format) == bytes.len())
            .ok_or_else(|| {
                VerifierError::MalformedProof(format!(
                    "expected {} or {} bytes, got {}",
                    Self::encoded_length(PointFormat::Compressed),
                    Self::encoded_length(PointFormat::Uncompressed),
                    bytes.len()
                ))
            })?;
        Self::decode(bytes, format)
    }

    /// Deserialize `A || B || C` in the given format.
    ///
    /// Encoding errors of the individual points are returned as is, except that a `B` outside the
    /// prime-order subgroup of G2 makes the whole proof malformed.
    pub fn decode(bytes: &[u8], format: PointFormat) -> VerifierResult<Self> {
        if bytes.len() != Self::encoded_length(format) {
            return Err(VerifierError::MalformedProof(format!(
                "expected {} bytes, got {}",
                Self::encoded_length(format),
                bytes.len()
            )));
        }
        let (a, rest) = bytes.split_at(G1Element::encoded_length(format));
        let (b, c) = rest.split_at(G2Element::encoded_length(format));

        let a = G1Element::decode(a, format).map_err(|e| rejected("A", e))?;
        let b = G2Element::decode(b, format).map_err(|e| rejected("B", b_point_error(e)))?;
        let c = G1Element::decode(c, format).map_err(|e| rejected("C", e))?;
        Ok(Proof::new(a, b, c))
    }

    /// Serialize the proof as `A || B || C` in the given format.
    pub fn to_bytes(&self, format: PointFormat) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::encoded_length(format));
        bytes.extend(self.a.encode(format));
        bytes.extend(self.b.encode(format));
        bytes.extend(self.c.encode(format));
        bytes
    }
}

/// Decoding errors for `B` pass through unchanged, except that a point outside the prime-order
/// subgroup makes the proof malformed.
pub(crate) fn b_point_error(error: VerifierError) -> VerifierError {
    match error {
        VerifierError::PointNotInSubgroup => {
            VerifierError::MalformedProof("B is not in the prime-order subgroup".to_string())
        }
        e => e,
    }
}

fn rejected(point: &str, error: VerifierError) -> VerifierError {
    warn!("Rejecting proof, point {} is invalid: {}", point, error);
    error
}
