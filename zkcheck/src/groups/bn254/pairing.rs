// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use ark_bn254::Bn254;
use ark_ec::pairing::Pairing as ArkworksPairing;

use crate::error::{VerifierError, VerifierResult};
use crate::groups::bn254::{G1Element, G2Element, GTElement};

/// A G2 point with its Miller loop line coefficients precomputed. Preparing is as expensive as a
/// large part of a pairing, so fixed points (e.g. those in a verifying key) should be prepared
/// once and reused.
#[derive(Clone, Debug)]
pub struct G2Prepared(<Bn254 as ArkworksPairing>::G2Prepared);

impl From<&G2Element> for G2Prepared {
    fn from(point: &G2Element) -> Self {
        G2Prepared(point.0.into())
    }
}

impl G2Element {
    pub fn prepare(&self) -> G2Prepared {
        G2Prepared::from(self)
    }
}

/// Compute `e(points_g1[0], points_g2[0]) + ... + e(points_g1[n-1], points_g2[n-1])` in GT using
/// a single Miller loop over all pairs followed by one final exponentiation.
pub fn multi_pairing_prepared(
    points_g1: &[G1Element],
    points_g2: &[G2Prepared],
) -> VerifierResult<GTElement> {
    if points_g1.len() != points_g2.len() {
        return Err(VerifierError::InvalidInput);
    }
    let miller_loop_output = Bn254::multi_miller_loop(
        points_g1.iter().map(|p| p.0),
        points_g2.iter().map(|q| q.0.clone()),
    );
    Bn254::final_exponentiation(miller_loop_output)
        .map(GTElement)
        .ok_or(VerifierError::InvalidInput)
}

/// Whether the sum of the pairings of the given pairs is the identity in GT.
pub fn multi_pairing_is_identity(
    points_g1: &[G1Element],
    points_g2: &[G2Prepared],
) -> VerifierResult<bool> {
    multi_pairing_prepared(points_g1, points_g2).map(|result| result.is_identity())
}
