// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use assert_cmd::Command;
use regex::Regex;
use tempfile::TempDir;
use zkcheck::groups::PointFormat;
use zkcheck_groth16::calldata::SolidityCall;
use zkcheck_groth16::circom::{proof_to_json, verifying_key_to_json};
use zkcheck_groth16::dummy_circuits::Multiplier;
use zkcheck_groth16::groth16::{Proof, VerifyingKey};
use zkcheck_groth16::inputs::PublicInputs;
use zkcheck_groth16::plonk::circom::plonk_proof_from_json;

/// Files for a proof that 6 = 2 * 3, in every encoding the tool reads.
struct Files {
    dir: TempDir,
    vk: VerifyingKey,
    proof: Proof,
}

impl Files {
    fn new() -> Self {
        let circuit = Multiplier {
            a: Some(Fr::from(2u64)),
            b: Some(Fr::from(3u64)),
        };
        let mut rng = StdRng::seed_from_u64(7);
        let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(circuit, &mut rng).unwrap();
        let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).unwrap();
        let vk = VerifyingKey::from(&vk);
        let proof = Proof::from(&proof);
        let inputs = PublicInputs::from([Fr::from(6u64)].as_slice());

        let files = Files {
            dir: tempfile::tempdir().unwrap(),
            vk,
            proof,
        };
        files.write("key.bin", vk_bytes(&files.vk));
        files.write("key.json", verifying_key_to_json(&files.vk).unwrap());
        files.write("proof.bin", proof.to_bytes(PointFormat::Compressed));
        files.write("proof.json", proof_to_json(&proof).unwrap());
        files.write("inputs.bin", inputs.to_be_bytes());
        files.write("public.json", inputs.to_json());
        files.write("calldata.txt", SolidityCall::new(&proof, &inputs).to_string());
        files.write(
            "wrong_inputs.bin",
            PublicInputs::from([Fr::from(7u64)].as_slice()).to_be_bytes(),
        );
        files
    }

    fn write(&self, name: &str, contents: impl AsRef<[u8]>) {
        std::fs::write(self.path(name), contents).unwrap();
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn vk_bytes(vk: &VerifyingKey) -> Vec<u8> {
    vk.to_bytes(PointFormat::Compressed).unwrap()
}

fn verify(key: &Path, proof: &Path, inputs: Option<&Path>, format: &str) -> Command {
    verify_with("verify", key, proof, inputs, format)
}

fn verify_with(
    subcommand: &str,
    key: &Path,
    proof: &Path,
    inputs: Option<&Path>,
    format: &str,
) -> Command {
    let mut cmd = Command::cargo_bin("groth16-cli").unwrap();
    cmd.arg(subcommand)
        .arg("--key")
        .arg(key)
        .arg("--proof")
        .arg(proof)
        .arg("--format")
        .arg(format);
    if let Some(inputs) = inputs {
        cmd.arg("--inputs").arg(inputs);
    }
    cmd
}

#[test]
fn integration_test_verify_binary() {
    let files = Files::new();
    let result = verify(
        &files.path("key.bin"),
        &files.path("proof.bin"),
        Some(&files.path("inputs.bin")),
        "binary",
    )
    .ok();
    assert!(result.is_ok());
    let output = String::from_utf8(result.unwrap().stdout).unwrap();
    assert_eq!(output, "accepted\n");
}

#[test]
fn integration_test_verify_snarkjs() {
    let files = Files::new();
    for key in ["key.json", "key.bin"] {
        verify(
            &files.path(key),
            &files.path("proof.json"),
            Some(&files.path("public.json")),
            "snarkjs",
        )
        .assert()
        .code(0)
        .stdout("accepted\n");
    }
}

#[test]
fn integration_test_verify_calldata() {
    let files = Files::new();
    verify(
        &files.path("key.json"),
        &files.path("calldata.txt"),
        None,
        "calldata",
    )
    .assert()
    .code(0)
    .stdout("accepted\n");

    files.write("zeros.txt", "[0, 0], [[0, 0], [0, 0]], [0, 0], [0]");
    verify(&files.path("key.bin"), &files.path("zeros.txt"), None, "calldata")
        .assert()
        .code(1)
        .stdout("rejected\n");
}

#[test]
fn integration_test_verify_rejected() {
    let files = Files::new();
    verify(
        &files.path("key.bin"),
        &files.path("proof.bin"),
        Some(&files.path("wrong_inputs.bin")),
        "binary",
    )
    .assert()
    .code(1)
    .stdout("rejected\n");
}

#[test]
fn integration_test_verify_malformed() {
    let files = Files::new();
    let malformed = Regex::new(r"^Error: .+\n$").unwrap();
    let check = |mut cmd: Command| {
        let output = cmd.output().unwrap();
        assert_eq!(output.status.code(), Some(2));
        assert!(malformed.is_match(&String::from_utf8(output.stdout).unwrap()));
    };

    // Missing file.
    check(verify(
        &files.path("missing.bin"),
        &files.path("proof.bin"),
        Some(&files.path("inputs.bin")),
        "binary",
    ));

    // Missing inputs.
    check(verify(
        &files.path("key.bin"),
        &files.path("proof.bin"),
        None,
        "binary",
    ));

    // Truncated proof.
    files.write("short.bin", &files.proof.to_bytes(PointFormat::Compressed)[..100]);
    check(verify(
        &files.path("key.bin"),
        &files.path("short.bin"),
        Some(&files.path("inputs.bin")),
        "binary",
    ));

    // Two inputs for a key expecting one.
    files.write("two_inputs.bin", [0u8; 64]);
    check(verify(
        &files.path("key.bin"),
        &files.path("proof.bin"),
        Some(&files.path("two_inputs.bin")),
        "binary",
    ));

    // An input which is not reduced modulo r.
    files.write("large_input.bin", [0xffu8; 32]);
    check(verify(
        &files.path("key.bin"),
        &files.path("proof.bin"),
        Some(&files.path("large_input.bin")),
        "binary",
    ));

    // A corrupted key header.
    let mut key = vk_bytes(&files.vk);
    key[4] = 9;
    files.write("bad_key.bin", key);
    check(verify(
        &files.path("bad_key.bin"),
        &files.path("proof.bin"),
        Some(&files.path("inputs.bin")),
        "binary",
    ));
}

#[test]
fn integration_test_convert_key() {
    let files = Files::new();
    let result = Command::cargo_bin("groth16-cli")
        .unwrap()
        .arg("convert-key")
        .arg("--key")
        .arg(files.path("key.json"))
        .ok();
    assert!(result.is_ok());
    let output = String::from_utf8(result.unwrap().stdout).unwrap();
    assert_eq!(output, format!("{}\n", hex::encode(vk_bytes(&files.vk))));

    let output_path = files.path("key_uncompressed.bin");
    Command::cargo_bin("groth16-cli")
        .unwrap()
        .arg("convert-key")
        .arg("--key")
        .arg(files.path("key.bin"))
        .arg("--uncompressed")
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();
    let bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(bytes, files.vk.to_bytes(PointFormat::Uncompressed).unwrap());
    assert_eq!(VerifyingKey::from_bytes(&bytes).unwrap(), files.vk);
}

#[test]
fn integration_test_convert_proof() {
    let files = Files::new();
    let output_path = files.path("proof_uncompressed.bin");
    Command::cargo_bin("groth16-cli")
        .unwrap()
        .arg("convert-proof")
        .arg("--proof")
        .arg(files.path("proof.json"))
        .arg("--uncompressed")
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(format!("Wrote 256 bytes to {}\n", output_path.display()));
    let bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(Proof::from_bytes(&bytes).unwrap(), files.proof);

    // The converted proof verifies.
    verify(
        &files.path("key.bin"),
        &output_path,
        Some(&files.path("inputs.bin")),
        "binary",
    )
    .assert()
    .code(0);

    Command::cargo_bin("groth16-cli")
        .unwrap()
        .arg("convert-proof")
        .arg("--proof")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(format!(
            "{}\n",
            hex::encode(files.proof.to_bytes(PointFormat::Compressed))
        ));
}

// A snarkjs PLONK proof that 6 = 1 * 2 * 3.
const PLONK_KEY: &str =
    include_str!("../../zkcheck-groth16/src/unit_tests/data/plonk_verification_key.json");
const PLONK_PROOF: &str = include_str!("../../zkcheck-groth16/src/unit_tests/data/plonk_proof.json");
const PLONK_PUBLIC: &str =
    include_str!("../../zkcheck-groth16/src/unit_tests/data/plonk_public.json");
const PLONK_CALLDATA: &str =
    include_str!("../../zkcheck-groth16/src/unit_tests/data/plonk_calldata_bytes.txt");

#[test]
fn integration_test_verify_plonk() {
    let files = Files::new();
    files.write("plonk_key.json", PLONK_KEY);
    files.write("plonk_proof.json", PLONK_PROOF);
    files.write("plonk_public.json", PLONK_PUBLIC);
    files.write("plonk_calldata.txt", PLONK_CALLDATA);
    let proof = plonk_proof_from_json(PLONK_PROOF).unwrap();
    files.write("plonk_proof.bin", proof.to_bytes());

    let plonk = |proof: &str, inputs: Option<&str>, format: &str| {
        verify_with(
            "verify-plonk",
            &files.path("plonk_key.json"),
            &files.path(proof),
            inputs.map(|i| files.path(i)).as_deref(),
            format,
        )
    };

    plonk("plonk_proof.json", Some("plonk_public.json"), "snarkjs")
        .assert()
        .code(0)
        .stdout("accepted\n");
    plonk("plonk_calldata.txt", None, "calldata")
        .assert()
        .code(0)
        .stdout("accepted\n");
    plonk("plonk_proof.bin", Some("inputs.bin"), "binary")
        .assert()
        .code(0)
        .stdout("accepted\n");
    plonk("plonk_proof.bin", Some("wrong_inputs.bin"), "binary")
        .assert()
        .code(1)
        .stdout("rejected\n");

    files.write("zeros.txt", "0x00,[\"0\"]");
    plonk("zeros.txt", None, "calldata").assert().code(2);

    // A Groth16 key is not a PLONK key.
    verify_with(
        "verify-plonk",
        &files.path("key.json"),
        &files.path("plonk_proof.json"),
        Some(&files.path("plonk_public.json")),
        "snarkjs",
    )
    .assert()
    .code(2);
}
