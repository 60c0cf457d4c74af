// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
#![warn(missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms, missing_debug_implementations)]

//! Groth16 and PLONK verifiers over BN254. Keys and proofs can be read from a compact binary
//! format, from the JSON files written by snarkjs, or from the Solidity calldata that snarkjs
//! exports, and are checked with a single multi-pairing.
//!
//! # Example
//! ```rust,no_run
//! # use zkcheck_groth16::groth16::{Proof, Verdict, Verifier};
//! # use zkcheck_groth16::inputs::PublicInputs;
//! # fn load(key: &[u8], proof: &[u8]) -> zkcheck::error::VerifierResult<()> {
//! let verifier = Verifier::load(key)?;
//! let proof = Proof::from_bytes(proof)?;
//! let inputs = PublicInputs::from_json(r#"["6"]"#)?;
//! assert_eq!(verifier.verify(&proof, &inputs)?, Verdict::Accepted);
//! # Ok(())
//! # }
//! ```

/// Groth16 keys, proofs and the verifier
pub mod groth16;

/// Public inputs of a circuit
pub mod inputs;

/// API that takes in serialized inputs
pub mod api;

/// Reading and writing snarkjs JSON files
pub mod circom;

/// Solidity calldata as exported by snarkjs
pub mod calldata;

/// PLONK keys, proofs and the verifier
pub mod plonk;

/// Conversions from arkworks types
pub mod conversions;

/// Simple circuits used in tests, benchmarks and demos
pub mod dummy_circuits;

#[cfg(test)]
pub(crate) mod test_helpers;
