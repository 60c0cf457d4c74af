// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::info;
use zkcheck::error::VerifierError;
use zkcheck::groups::PointFormat;
use zkcheck_cli::setup_logger;
use zkcheck_groth16::api::read_verifying_key;
use zkcheck_groth16::calldata::SolidityCall;
use zkcheck_groth16::circom::proof_from_json;
use zkcheck_groth16::groth16::{Proof, Verdict, Verifier};
use zkcheck_groth16::inputs::PublicInputs;
use zkcheck_groth16::plonk::calldata::PlonkCall;
use zkcheck_groth16::plonk::circom::{plonk_proof_from_json, read_plonk_vkey};
use zkcheck_groth16::plonk::{PlonkProof, PlonkVerifier};

/// Exit code for a well-formed proof which does not verify.
const REJECTED: exitcode::ExitCode = 1;

/// Exit code for a key, proof or input which cannot be read or decoded.
const MALFORMED: exitcode::ExitCode = 2;

#[derive(Parser)]
#[command(name = "groth16-cli")]
#[command(about = "Verify Groth16 and PLONK proofs over BN254 and convert keys and proofs between encodings", long_about = None)]
enum Command {
    /// Verify a proof. Exits with 0 if the proof is accepted, 1 if it is rejected and 2 if the
    /// key, proof or inputs are malformed.
    Verify(VerifyArguments),

    /// Verify a snarkjs PLONK proof against a PLONK verification_key.json. Exit codes are as for
    /// `verify`.
    VerifyPlonk(VerifyArguments),

    /// Convert a verifying key, binary or snarkjs JSON, to the binary key format.
    ConvertKey(ConvertKeyArguments),

    /// Convert a proof, binary or snarkjs JSON, to the binary proof format.
    ConvertProof(ConvertProofArguments),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Proof as 128 or 256 bytes (768 for PLONK), public inputs as 32 byte big-endian scalars.
    Binary,
    /// Proof as snarkjs proof.json, public inputs as public.json.
    Snarkjs,
    /// Proof and public inputs as the output of snarkjs `zkey export soliditycalldata`, or of
    /// `plonk exportsoliditycalldata` for PLONK proofs.
    Calldata,
}

#[derive(Parser, Clone)]
struct VerifyArguments {
    /// Path to the verifying key, in the binary key format or as snarkjs verification_key.json.
    /// PLONK keys are read from verification_key.json only.
    #[clap(short, long)]
    key: PathBuf,

    /// Path to the proof.
    #[clap(short, long)]
    proof: PathBuf,

    /// Path to the public inputs. Not used with calldata, which carries its own inputs.
    #[clap(short, long)]
    inputs: Option<PathBuf>,

    /// Encoding of the proof and public inputs.
    #[clap(short, long, value_enum, default_value_t = InputFormat::Binary)]
    format: InputFormat,
}

#[derive(Parser, Clone)]
struct ConvertKeyArguments {
    /// Path to the verifying key, in the binary key format or as snarkjs verification_key.json.
    #[clap(short, long)]
    key: PathBuf,

    /// Write EVM encoded points instead of compressed points.
    #[clap(short, long)]
    uncompressed: bool,

    /// Write the key to this file. If not given, the key is printed as hex.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Clone)]
struct ConvertProofArguments {
    /// Path to the proof, in binary or as snarkjs proof.json.
    #[clap(short, long)]
    proof: PathBuf,

    /// Write EVM encoded points instead of compressed points.
    #[clap(short, long)]
    uncompressed: bool,

    /// Write the proof to this file. If not given, the proof is printed as hex.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    setup_logger();
    match execute(Command::parse()) {
        Ok(Some(Verdict::Rejected)) => {
            std::process::exit(REJECTED);
        }
        Ok(_) => {
            std::process::exit(exitcode::OK);
        }
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(MALFORMED);
        }
    }
}

fn execute(cmd: Command) -> Result<Option<Verdict>, Error> {
    match cmd {
        Command::Verify(args) => {
            let verifier = Verifier::new(&read_verifying_key(&read(&args.key)?).map_err(invalid)?)
                .map_err(invalid)?;
            info!(
                "Loaded verifying key with {} public inputs",
                verifier.num_public_inputs()
            );

            let (proof, inputs) = match args.format {
                InputFormat::Binary => (
                    Proof::from_bytes(&read(&args.proof)?).map_err(invalid)?,
                    PublicInputs::from_be_bytes(&read(required(&args.inputs)?)?)
                        .map_err(invalid)?,
                ),
                InputFormat::Snarkjs => (
                    proof_from_json(&read_to_string(&args.proof)?).map_err(invalid)?,
                    PublicInputs::from_json(&read_to_string(required(&args.inputs)?)?)
                        .map_err(invalid)?,
                ),
                InputFormat::Calldata => SolidityCall::parse(&read_to_string(&args.proof)?)
                    .and_then(|call| call.to_proof_and_inputs())
                    .map_err(invalid)?,
            };

            let verdict = verifier.verify(&proof, &inputs).map_err(invalid)?;
            println!("{}", verdict);
            Ok(Some(verdict))
        }
        Command::VerifyPlonk(args) => {
            let verifier = PlonkVerifier::new(&read_plonk_vkey(&args.key).map_err(invalid)?);
            info!(
                "Loaded PLONK verifying key with {} public inputs",
                verifier.num_public_inputs()
            );

            let (proof, inputs) = match args.format {
                InputFormat::Binary => (
                    PlonkProof::from_bytes(&read(&args.proof)?).map_err(invalid)?,
                    PublicInputs::from_be_bytes(&read(required(&args.inputs)?)?)
                        .map_err(invalid)?,
                ),
                InputFormat::Snarkjs => (
                    plonk_proof_from_json(&read_to_string(&args.proof)?).map_err(invalid)?,
                    PublicInputs::from_json(&read_to_string(required(&args.inputs)?)?)
                        .map_err(invalid)?,
                ),
                InputFormat::Calldata => PlonkCall::parse(&read_to_string(&args.proof)?)
                    .and_then(|call| call.to_proof_and_inputs())
                    .map_err(invalid)?,
            };

            let verdict = verifier.verify(&proof, &inputs).map_err(invalid)?;
            println!("{}", verdict);
            Ok(Some(verdict))
        }
        Command::ConvertKey(args) => {
            let vk = read_verifying_key(&read(&args.key)?).map_err(invalid)?;
            info!("Loaded verifying key with {} public inputs", vk.num_public_inputs());
            let bytes = vk.to_bytes(point_format(args.uncompressed)).map_err(invalid)?;
            write(&bytes, args.output.as_deref())?;
            Ok(None)
        }
        Command::ConvertProof(args) => {
            let bytes = read(&args.proof)?;
            let proof = match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
                Some(b'{') => {
                    let json = String::from_utf8(bytes)
                        .map_err(|_| Error::new(ErrorKind::InvalidData, "Proof is not UTF-8"))?;
                    proof_from_json(&json)
                }
                _ => Proof::from_bytes(&bytes),
            }
            .map_err(invalid)?;
            write(
                &proof.to_bytes(point_format(args.uncompressed)),
                args.output.as_deref(),
            )?;
            Ok(None)
        }
    }
}

fn point_format(uncompressed: bool) -> PointFormat {
    if uncompressed {
        PointFormat::Uncompressed
    } else {
        PointFormat::Compressed
    }
}

fn invalid(e: VerifierError) -> Error {
    Error::new(ErrorKind::InvalidData, e)
}

fn required(path: &Option<PathBuf>) -> Result<&Path, Error> {
    path.as_deref()
        .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "Missing --inputs"))
}

fn read(path: &Path) -> Result<Vec<u8>, Error> {
    fs::read(path)
        .map_err(|e| Error::new(e.kind(), format!("Cannot read {}: {}", path.display(), e)))
}

fn read_to_string(path: &Path) -> Result<String, Error> {
    String::from_utf8(read(path)?).map_err(|_| {
        Error::new(
            ErrorKind::InvalidData,
            format!("{} is not UTF-8", path.display()),
        )
    })
}

fn write(bytes: &[u8], output: Option<&Path>) -> Result<(), Error> {
    match output {
        Some(path) => {
            fs::write(path, bytes).map_err(|e| {
                Error::new(e.kind(), format!("Cannot write {}: {}", path.display(), e))
            })?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => println!("{}", hex::encode(bytes)),
    }
    Ok(())
}
