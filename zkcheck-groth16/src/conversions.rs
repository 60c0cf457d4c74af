// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use ark_bn254::{Bn254, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::CurveGroup;
use zkcheck::groups::bn254::{G1Element, G2Element, Scalar};

use crate::groth16::{Proof, VerifyingKey};
use crate::inputs::PublicInputs;

fn g1(p: &G1Affine) -> G1Element {
    G1Element::from(G1Projective::from(*p))
}

fn g2(p: &G2Affine) -> G2Element {
    G2Element::from(G2Projective::from(*p))
}

impl From<&ark_groth16::Proof<Bn254>> for Proof {
    fn from(proof: &ark_groth16::Proof<Bn254>) -> Self {
        Proof::new(g1(&proof.a), g2(&proof.b), g1(&proof.c))
    }
}

impl From<&Proof> for ark_groth16::Proof<Bn254> {
    fn from(proof: &Proof) -> Self {
        ark_groth16::Proof {
            a: G1Projective::from(*proof.a()).into_affine(),
            b: G2Projective::from(*proof.b()).into_affine(),
            c: G1Projective::from(*proof.c()).into_affine(),
        }
    }
}

impl From<&ark_groth16::VerifyingKey<Bn254>> for VerifyingKey {
    fn from(vk: &ark_groth16::VerifyingKey<Bn254>) -> Self {
        VerifyingKey::new(
            g1(&vk.alpha_g1),
            g2(&vk.beta_g2),
            g2(&vk.gamma_g2),
            g2(&vk.delta_g2),
            vk.gamma_abc_g1.iter().map(g1).collect(),
        )
    }
}

impl From<&VerifyingKey> for ark_groth16::VerifyingKey<Bn254> {
    fn from(vk: &VerifyingKey) -> Self {
        ark_groth16::VerifyingKey {
            alpha_g1: G1Projective::from(*vk.alpha()).into_affine(),
            beta_g2: G2Projective::from(*vk.beta()).into_affine(),
            gamma_g2: G2Projective::from(*vk.gamma()).into_affine(),
            delta_g2: G2Projective::from(*vk.delta()).into_affine(),
            gamma_abc_g1: G1Projective::normalize_batch(
                &vk.ic()
                    .iter()
                    .map(|p| G1Projective::from(*p))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

impl From<&[Fr]> for PublicInputs {
    fn from(inputs: &[Fr]) -> Self {
        inputs.iter().map(|x| Scalar::from(*x)).collect()
    }
}
