// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use zkcheck::error::VerifierError;
use zkcheck::groups::bn254::{G1Element, G2Element};
use zkcheck::groups::{GroupElement, PointFormat};

use crate::calldata::SolidityCall;
use crate::groth16::{Proof, Verdict};
use crate::test_helpers::{MULTIPLIER, MULTIPLIER3};

#[test]
fn test_calldata_roundtrip() {
    let call = SolidityCall::new(&MULTIPLIER.proof, &MULTIPLIER.inputs);
    assert_eq!(call.input, vec![format!("0x{}06", "0".repeat(62))]);

    let text = call.to_string();
    assert!(text.starts_with("[\"0x"));
    assert_eq!(SolidityCall::parse(&text).unwrap(), call);

    let (proof, inputs) = call.to_proof_and_inputs().unwrap();
    assert_eq!(proof, MULTIPLIER.proof);
    assert_eq!(inputs, MULTIPLIER.inputs);
    assert_eq!(call.verify(&MULTIPLIER.verifier()).unwrap(), Verdict::Accepted);
}

#[test]
fn test_calldata_matches_evm_encoding() {
    // Every word of the calldata is a 32 byte word of the EVM encoded proof.
    let call = SolidityCall::new(&MULTIPLIER3.proof, &MULTIPLIER3.inputs);
    let words = call
        .a
        .iter()
        .chain(call.b.iter().flatten())
        .chain(call.c.iter())
        .map(|w| hex::decode(&w[2..]).unwrap())
        .collect::<Vec<_>>()
        .concat();
    assert_eq!(words, MULTIPLIER3.proof.to_bytes(PointFormat::Uncompressed));
}

#[test]
fn test_parse_snarkjs_output() {
    let text = format!(
        "\n[\"0x{a0}\", \"0x{a1}\"],[[\"0x{b}\", \"0x{b}\"],[\"0x{b}\", \"0x{b}\"]],[\"0x{a0}\", \"0x{a1}\"],[\"0x{i}\"]\n",
        a0 = format!("{:064x}", 1),
        a1 = format!("{:064x}", 2),
        b = "0".repeat(64),
        i = format!("{:064x}", 6),
    );
    let call = SolidityCall::parse(&text).unwrap();
    let (proof, inputs) = call.to_proof_and_inputs().unwrap();
    assert_eq!(
        proof,
        Proof::new(G1Element::generator(), G2Element::zero(), G1Element::generator())
    );
    assert_eq!(inputs.to_decimal_strings(), vec!["6".to_string()]);
}

#[test]
fn test_all_zero_call_is_rejected() {
    let call = SolidityCall::parse("[0, 0], [[0, 0], [0, 0]], [0, 0], [0]").unwrap();
    assert_eq!(call.a, ["0".to_string(), "0".to_string()]);
    assert_eq!(call.verify(&MULTIPLIER.verifier()).unwrap(), Verdict::Rejected);
}

#[test]
fn test_malformed_calldata() {
    for text in [
        "",
        "[0, 0]",
        "[0, 0], [[0, 0], [0, 0]], [0, 0]",
        "[0, 0, 0], [[0, 0], [0, 0]], [0, 0], [0]",
        "[0, 0], [[0, 0], [0]], [0, 0], [0]",
        "[-1, 0], [[0, 0], [0, 0]], [0, 0], [0]",
        "[0.5, 0], [[0, 0], [0, 0]], [0, 0], [0]",
    ] {
        assert!(
            matches!(
                SolidityCall::parse(text),
                Err(VerifierError::MalformedProof(_))
            ),
            "{text:?} should be rejected"
        );
    }

    // Well formed, but the values are not canonical field elements.
    let call = SolidityCall::parse(r#"["0x", "0"], [[0, 0], [0, 0]], [0, 0], [0]"#).unwrap();
    assert!(matches!(
        call.to_proof_and_inputs(),
        Err(VerifierError::InvalidEncoding(_))
    ));
    let call = SolidityCall::parse(r#"[1, 3], [[0, 0], [0, 0]], [0, 0], [0]"#).unwrap();
    assert_eq!(
        call.to_proof_and_inputs(),
        Err(VerifierError::PointNotOnCurve)
    );

    // Public inputs must be reduced modulo r.
    let call = SolidityCall::parse(&format!(
        r#"[0, 0], [[0, 0], [0, 0]], [0, 0], ["0x{}"]"#,
        "f".repeat(64)
    ))
    .unwrap();
    assert!(matches!(
        call.to_proof_and_inputs(),
        Err(VerifierError::InvalidEncoding(_))
    ));
}
