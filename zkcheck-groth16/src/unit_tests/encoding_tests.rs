// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use ark_bn254::Bn254;
use zkcheck::error::VerifierError;
use zkcheck::groups::bn254::{G1Element, G2Element};
use zkcheck::groups::{EncodedPoint, GroupElement, PointFormat};

use crate::groth16::{Proof, VerifyingKey, KEY_HEADER_LENGTH, KEY_MAGIC};
use crate::test_helpers::{INPUT_ECHO, MULTIPLIER};

const FORMATS: [PointFormat; 2] = [PointFormat::Compressed, PointFormat::Uncompressed];

#[test]
fn test_key_encoding() {
    for format in FORMATS {
        let bytes = INPUT_ECHO.vk.to_bytes(format).unwrap();
        assert_eq!(&bytes[..4], KEY_MAGIC);
        assert_eq!(bytes[4..7], [1, 1, (format == PointFormat::Uncompressed) as u8]);
        assert_eq!(bytes[7..11], [0, 0, 0, 3]);
        assert_eq!(
            bytes.len(),
            KEY_HEADER_LENGTH
                + 5 * G1Element::encoded_length(format)
                + 3 * G2Element::encoded_length(format)
        );
        assert_eq!(VerifyingKey::from_bytes(&bytes).unwrap(), INPUT_ECHO.vk);
    }
}

#[test]
fn test_key_header_errors() {
    let bytes = MULTIPLIER.vk.to_bytes(PointFormat::Compressed).unwrap();
    let malformed = |bytes: &[u8]| {
        matches!(
            VerifyingKey::from_bytes(bytes),
            Err(VerifierError::MalformedKey(_))
        )
    };

    assert!(malformed(&[]));
    assert!(malformed(&bytes[..KEY_HEADER_LENGTH - 1]));
    assert!(malformed(&bytes[..KEY_HEADER_LENGTH]));

    for (offset, value) in [(0, b'X'), (4, 2), (5, 2), (6, 2)] {
        let mut modified = bytes.clone();
        modified[offset] = value;
        assert!(malformed(&modified), "byte {offset} set to {value}");
    }

    // A truncated G2 point, and a truncated IC point.
    assert!(malformed(&bytes[..KEY_HEADER_LENGTH + 32 + 64 + 10]));
    assert!(malformed(&bytes[..bytes.len() - 1]));

    let mut trailing = bytes.clone();
    trailing.push(0);
    assert!(malformed(&trailing));
}

#[test]
fn test_key_ic_count_mismatch() {
    let mut bytes = MULTIPLIER.vk.to_bytes(PointFormat::Uncompressed).unwrap();
    bytes[10] = 3;
    assert_eq!(
        VerifyingKey::from_bytes(&bytes),
        Err(VerifierError::InputCountMismatch {
            expected: 4,
            actual: 2
        })
    );

    // One IC point too many.
    let mut bytes = MULTIPLIER.vk.to_bytes(PointFormat::Compressed).unwrap();
    bytes.extend(G1Element::generator().encode(PointFormat::Compressed));
    assert_eq!(
        VerifyingKey::from_bytes(&bytes),
        Err(VerifierError::InputCountMismatch {
            expected: 2,
            actual: 3
        })
    );
}

#[test]
fn test_key_with_invalid_points() {
    let bytes = MULTIPLIER.vk.to_bytes(PointFormat::Uncompressed).unwrap();

    // alpha = (1, 1) is not on the curve.
    let mut modified = bytes.clone();
    modified[KEY_HEADER_LENGTH..KEY_HEADER_LENGTH + 64].fill(0);
    modified[KEY_HEADER_LENGTH + 31] = 1;
    modified[KEY_HEADER_LENGTH + 63] = 1;
    assert!(matches!(
        VerifyingKey::from_bytes(&modified),
        Err(VerifierError::MalformedKey(_))
    ));

    // A coordinate of the last IC point is not reduced.
    let mut modified = bytes;
    let len = modified.len();
    modified[len - 32..].fill(0xff);
    assert!(matches!(
        VerifyingKey::from_bytes(&modified),
        Err(VerifierError::MalformedKey(_))
    ));
}

#[test]
fn test_key_without_ic_cannot_be_serialized() {
    let vk = &MULTIPLIER.vk;
    let empty = VerifyingKey::new(*vk.alpha(), *vk.beta(), *vk.gamma(), *vk.delta(), vec![]);
    assert!(empty.to_bytes(PointFormat::Compressed).is_err());
    assert_eq!(empty.num_public_inputs(), 0);
}

#[test]
fn test_proof_encoding() {
    let proof = MULTIPLIER.proof;
    for format in FORMATS {
        let bytes = proof.to_bytes(format);
        assert_eq!(bytes.len(), Proof::encoded_length(format));
        assert_eq!(Proof::from_bytes(&bytes).unwrap(), proof);
        assert_eq!(Proof::decode(&bytes, format).unwrap(), proof);
    }
    assert_eq!(Proof::encoded_length(PointFormat::Compressed), 128);
    assert_eq!(Proof::encoded_length(PointFormat::Uncompressed), 256);

    // The EVM form starts with A = (x, y) and B = (x.c1, x.c0, y.c1, y.c0).
    let bytes = proof.to_bytes(PointFormat::Uncompressed);
    assert_eq!(bytes[..64], proof.a().to_uncompressed_byte_array());
    assert_eq!(bytes[64..192], proof.b().to_uncompressed_byte_array());
}

#[test]
fn test_proof_length_errors() {
    for length in [0, 64, 127, 129, 192, 255, 257, 384] {
        assert!(matches!(
            Proof::from_bytes(&vec![0u8; length]),
            Err(VerifierError::MalformedProof(_))
        ));
    }
    let bytes = MULTIPLIER.proof.to_bytes(PointFormat::Compressed);
    assert!(matches!(
        Proof::decode(&bytes, PointFormat::Uncompressed),
        Err(VerifierError::MalformedProof(_))
    ));
}

#[test]
fn test_proof_with_invalid_points() {
    let bytes = MULTIPLIER.proof.to_bytes(PointFormat::Uncompressed);

    // A = (1, 1) is not on the curve.
    let mut modified = bytes.clone();
    modified[..64].fill(0);
    modified[31] = 1;
    modified[63] = 1;
    assert_eq!(
        Proof::from_bytes(&modified),
        Err(VerifierError::PointNotOnCurve)
    );

    // C has a coordinate larger than q.
    let mut modified = bytes.clone();
    modified[192..224].fill(0xff);
    assert!(matches!(
        Proof::from_bytes(&modified),
        Err(VerifierError::InvalidEncoding(_))
    ));

    // Swapping the limbs of B gives a point that is not on the twist.
    let mut modified = bytes;
    let (x_c1, x_c0) = modified[64..128].split_at_mut(32);
    x_c1.swap_with_slice(x_c0);
    assert_eq!(
        Proof::from_bytes(&modified),
        Err(VerifierError::PointNotOnCurve)
    );
}

#[test]
fn test_proof_with_b_outside_subgroup() {
    use ark_bn254::{Fq, Fq2, G2Affine};
    use ark_ff::{BigInteger, PrimeField};

    let point = (1u64..)
        .filter_map(|i| {
            G2Affine::get_point_from_x_unchecked(Fq2::new(Fq::from(i), Fq::from(1u64)), false)
        })
        .find(|p| !p.is_in_correct_subgroup_assuming_on_curve())
        .unwrap();

    let mut bytes = MULTIPLIER.proof.to_bytes(PointFormat::Uncompressed);
    for (chunk, limb) in bytes[64..192]
        .chunks_mut(32)
        .zip([point.x.c1, point.x.c0, point.y.c1, point.y.c0])
    {
        chunk.copy_from_slice(&limb.into_bigint().to_bytes_be());
    }
    assert!(matches!(
        Proof::from_bytes(&bytes),
        Err(VerifierError::MalformedProof(_))
    ));
}

#[test]
fn test_identity_points_are_valid_encodings() {
    let proof = Proof::new(G1Element::zero(), G2Element::zero(), *MULTIPLIER.proof.c());
    for format in FORMATS {
        assert_eq!(Proof::from_bytes(&proof.to_bytes(format)).unwrap(), proof);
    }
}

#[test]
fn test_serde() {
    let json = serde_json::to_string(&MULTIPLIER.proof).unwrap();
    assert_eq!(
        serde_json::from_str::<Proof>(&json).unwrap(),
        MULTIPLIER.proof
    );
    let json = serde_json::to_string(&MULTIPLIER.vk).unwrap();
    assert_eq!(
        serde_json::from_str::<VerifyingKey>(&json).unwrap(),
        MULTIPLIER.vk
    );
}

#[test]
fn test_arkworks_conversions() {
    let ark_proof = ark_groth16::Proof::<Bn254>::from(&MULTIPLIER.proof);
    assert_eq!(Proof::from(&ark_proof), MULTIPLIER.proof);
    let ark_vk = ark_groth16::VerifyingKey::<Bn254>::from(&MULTIPLIER.vk);
    assert_eq!(VerifyingKey::from(&ark_vk), MULTIPLIER.vk);
    assert_eq!(ark_vk.gamma_abc_g1.len(), 2);
}
