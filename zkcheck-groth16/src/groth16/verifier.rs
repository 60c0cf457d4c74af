// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use tracing::debug;
use zkcheck::error::VerifierResult;

use crate::groth16::{PreparedVerifyingKey, Proof, Verdict, VerifyingKey};
use crate::inputs::PublicInputs;

/// Verifies Groth16 proofs against one verifying key.
///
/// The prepared key is computed once and shared, so cloning a verifier is cheap and clones may be
/// used from any number of threads at the same time.
#[derive(Clone, Debug)]
pub struct Verifier {
    pvk: Arc<PreparedVerifyingKey>,
}

impl Verifier {
    /// Create a verifier from a key in the binary format of [VerifyingKey::from_bytes].
    pub fn load(key_bytes: &[u8]) -> VerifierResult<Self> {
        Self::new(&VerifyingKey::from_bytes(key_bytes)?)
    }

    /// Create a verifier for the given key.
    pub fn new(vk: &VerifyingKey) -> VerifierResult<Self> {
        let pvk = PreparedVerifyingKey::try_from(vk)?;
        debug!(
            "Prepared verifying key with {} public inputs",
            pvk.num_public_inputs()
        );
        Ok(Verifier { pvk: Arc::new(pvk) })
    }

    /// The number of public inputs the key expects.
    pub fn num_public_inputs(&self) -> usize {
        self.pvk.num_public_inputs()
    }

    /// The prepared key shared by all clones of this verifier.
    pub fn prepared_key(&self) -> &PreparedVerifyingKey {
        &self.pvk
    }

    /// Verify a proof against the given public inputs.
    ///
    /// Returns an error, without doing any pairing, if the number of inputs does not match the
    /// key. Otherwise the proof is [Verdict::Accepted] exactly if the Groth16 pairing equation
    /// holds.
    pub fn verify(&self, proof: &Proof, public_inputs: &PublicInputs) -> VerifierResult<Verdict> {
        let accepted = self.pvk.verify(public_inputs.as_slice(), proof)?;
        let verdict = Verdict::from(accepted);
        debug!(
            "Verified proof with {} public inputs: {}",
            public_inputs.len(),
            verdict
        );
        Ok(verdict)
    }
}
