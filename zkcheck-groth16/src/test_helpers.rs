// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_relations::r1cs::ConstraintSynthesizer;
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use once_cell::sync::Lazy;

use crate::dummy_circuits::{InputEcho, Multiplier, Multiplier3};
use crate::groth16::{Proof, Verifier, VerifyingKey};
use crate::inputs::PublicInputs;

/// A key with a valid proof for it.
#[derive(Clone, Debug)]
pub(crate) struct Fixture {
    pub(crate) vk: VerifyingKey,
    pub(crate) proof: Proof,
    pub(crate) inputs: PublicInputs,
}

impl Fixture {
    pub(crate) fn verifier(&self) -> Verifier {
        Verifier::new(&self.vk).unwrap()
    }
}

/// Run the trusted setup for `circuit` and prove it, checking the proof with arkworks.
pub(crate) fn prove<C: ConstraintSynthesizer<Fr> + Clone>(
    circuit: C,
    public_inputs: &[Fr],
    seed: u64,
) -> Fixture {
    let mut rng = StdRng::seed_from_u64(seed);
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(circuit.clone(), &mut rng).unwrap();
    let proof = Groth16::<Bn254>::prove(&pk, circuit, &mut rng).unwrap();
    assert!(Groth16::<Bn254>::verify(&vk, public_inputs, &proof).unwrap());

    Fixture {
        vk: VerifyingKey::from(&vk),
        proof: Proof::from(&proof),
        inputs: PublicInputs::from(public_inputs),
    }
}

/// A proof that 6 = 2 * 3.
pub(crate) static MULTIPLIER: Lazy<Fixture> = Lazy::new(|| multiplier(2, 3, 1));

/// A proof that 6 = 1 * 2 * 3.
pub(crate) static MULTIPLIER3: Lazy<Fixture> = Lazy::new(|| {
    prove(
        Multiplier3 {
            a: Some(Fr::from(1u64)),
            b: Some(Fr::from(2u64)),
            c: Some(Fr::from(3u64)),
        },
        &[Fr::from(6u64)],
        2,
    )
});

/// A key with three public inputs, and a proof for the inputs 1, 2, 3.
pub(crate) static INPUT_ECHO: Lazy<Fixture> = Lazy::new(|| input_echo(&[1, 2, 3], 3));

pub(crate) fn multiplier(a: u64, b: u64, seed: u64) -> Fixture {
    prove(
        Multiplier {
            a: Some(Fr::from(a)),
            b: Some(Fr::from(b)),
        },
        &[Fr::from(a) * Fr::from(b)],
        seed,
    )
}

pub(crate) fn input_echo(values: &[u64], seed: u64) -> Fixture {
    let values = values.iter().map(|v| Fr::from(*v)).collect::<Vec<_>>();
    prove(InputEcho::new(&values), &values, seed)
}
