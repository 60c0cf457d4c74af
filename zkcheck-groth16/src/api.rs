// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use tracing::debug;
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::PointFormat;

use crate::circom::verifying_key_from_json;
use crate::groth16::{Proof, Verdict, Verifier, VerifyingKey, KEY_MAGIC};
use crate::inputs::PublicInputs;

#[cfg(test)]
#[path = "unit_tests/api_tests.rs"]
mod api_tests;

/// Verify a Groth16 proof given as bytes.
///
/// - `vk_bytes` is a verifying key in the binary format of [VerifyingKey::from_bytes].
/// - `proof_points_as_bytes` is `A || B || C`, either 128 bytes of compressed points or 256 bytes
///   of EVM encoded points.
/// - `public_inputs_as_bytes` is the concatenation of the public inputs as 32 byte big-endian
///   scalars.
///
/// Malformed inputs are returned as errors, never as [Verdict::Rejected].
pub fn verify_groth16_in_bytes(
    vk_bytes: &[u8],
    proof_points_as_bytes: &[u8],
    public_inputs_as_bytes: &[u8],
) -> VerifierResult<Verdict> {
    let verifier = Verifier::load(vk_bytes)?;
    let proof = Proof::from_bytes(proof_points_as_bytes)?;
    let public_inputs = PublicInputs::from_be_bytes(public_inputs_as_bytes)?;
    verifier.verify(&proof, &public_inputs)
}

/// Read a verifying key given either in the binary format of [VerifyingKey::from_bytes] (in any
/// point format) or as a snarkjs `verification_key.json` file.
pub fn read_verifying_key(vk_bytes: &[u8]) -> VerifierResult<VerifyingKey> {
    if vk_bytes.starts_with(KEY_MAGIC) {
        debug!("Reading binary verifying key");
        return VerifyingKey::from_bytes(vk_bytes);
    }
    let json = std::str::from_utf8(vk_bytes).map_err(|_| {
        VerifierError::MalformedKey("neither a binary key nor a snarkjs JSON key".to_string())
    })?;
    debug!("Reading snarkjs verifying key");
    verifying_key_from_json(json)
}

/// Normalise a verifying key in any supported encoding (see [read_verifying_key]) to the binary
/// format with points in the given format.
pub fn prepare_key_bytes(vk_bytes: &[u8], format: PointFormat) -> VerifierResult<Vec<u8>> {
    read_verifying_key(vk_bytes)?.to_bytes(format)
}
