// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use zkcheck::error::VerifierError;
use zkcheck::groups::PointFormat;

use crate::api::{prepare_key_bytes, read_verifying_key, verify_groth16_in_bytes};
use crate::circom::verifying_key_to_json;
use crate::groth16::Verdict;
use crate::test_helpers::{INPUT_ECHO, MULTIPLIER};

#[test]
fn test_verify_groth16_in_bytes() {
    let vk_bytes = MULTIPLIER.vk.to_bytes(PointFormat::Compressed).unwrap();
    let proof_bytes = MULTIPLIER.proof.to_bytes(PointFormat::Uncompressed);
    let mut inputs_bytes = MULTIPLIER.inputs.to_be_bytes();
    assert_eq!(
        verify_groth16_in_bytes(&vk_bytes, &proof_bytes, &inputs_bytes).unwrap(),
        Verdict::Accepted
    );

    inputs_bytes[31] += 1;
    assert_eq!(
        verify_groth16_in_bytes(&vk_bytes, &proof_bytes, &inputs_bytes).unwrap(),
        Verdict::Rejected
    );

    // Malformed inputs are errors, not negative verdicts.
    assert!(matches!(
        verify_groth16_in_bytes(&vk_bytes[1..], &proof_bytes, &inputs_bytes),
        Err(VerifierError::MalformedKey(_))
    ));
    assert!(matches!(
        verify_groth16_in_bytes(&vk_bytes, &proof_bytes[1..], &inputs_bytes),
        Err(VerifierError::MalformedProof(_))
    ));
    assert!(matches!(
        verify_groth16_in_bytes(&vk_bytes, &proof_bytes, &inputs_bytes[1..]),
        Err(VerifierError::InvalidEncoding(_))
    ));
    assert_eq!(
        verify_groth16_in_bytes(&vk_bytes, &proof_bytes, &[]),
        Err(VerifierError::InputCountMismatch {
            expected: 1,
            actual: 0
        })
    );
}

#[test]
fn test_verify_with_several_inputs() {
    let vk_bytes = INPUT_ECHO.vk.to_bytes(PointFormat::Uncompressed).unwrap();
    let proof_bytes = INPUT_ECHO.proof.to_bytes(PointFormat::Compressed);
    let mut inputs_bytes = INPUT_ECHO.inputs.to_be_bytes();
    assert_eq!(inputs_bytes.len(), 96);
    assert_eq!(
        verify_groth16_in_bytes(&vk_bytes, &proof_bytes, &inputs_bytes).unwrap(),
        Verdict::Accepted
    );

    inputs_bytes.swap(31, 63);
    assert_eq!(
        verify_groth16_in_bytes(&vk_bytes, &proof_bytes, &inputs_bytes).unwrap(),
        Verdict::Rejected
    );
}

#[test]
fn test_prepare_key_bytes() {
    let compressed = MULTIPLIER.vk.to_bytes(PointFormat::Compressed).unwrap();
    let uncompressed = MULTIPLIER.vk.to_bytes(PointFormat::Uncompressed).unwrap();
    let json = verifying_key_to_json(&MULTIPLIER.vk).unwrap();

    for input in [compressed.as_slice(), uncompressed.as_slice(), json.as_bytes()] {
        assert_eq!(
            prepare_key_bytes(input, PointFormat::Compressed).unwrap(),
            compressed
        );
        assert_eq!(
            prepare_key_bytes(input, PointFormat::Uncompressed).unwrap(),
            uncompressed
        );
        assert_eq!(read_verifying_key(input).unwrap(), MULTIPLIER.vk);
    }

    assert!(matches!(
        prepare_key_bytes(&[0xff, 0xfe], PointFormat::Compressed),
        Err(VerifierError::MalformedKey(_))
    ));
    assert!(matches!(
        prepare_key_bytes(b"not a key", PointFormat::Compressed),
        Err(VerifierError::MalformedKey(_))
    ));
}
