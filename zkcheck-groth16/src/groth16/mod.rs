// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use zkcheck::groups::bn254::{G1Element, G2Element};

mod batch;
mod prepared_vk;
mod proof;
mod verifier;
mod vk;

pub use prepared_vk::PreparedVerifyingKey;
pub(crate) use proof::b_point_error;
pub use verifier::Verifier;
pub use vk::{CURVE_ID_BN254, KEY_FORMAT_VERSION, KEY_HEADER_LENGTH, KEY_MAGIC};

#[cfg(test)]
#[path = "../unit_tests/verifier_tests.rs"]
mod verifier_tests;

#[cfg(test)]
#[path = "../unit_tests/batch_tests.rs"]
mod batch_tests;

#[cfg(test)]
#[path = "../unit_tests/encoding_tests.rs"]
mod encoding_tests;

/// A Groth16 proof `(A, B, C)` with `A, C` in G1 and `B` in G2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    a: G1Element,
    b: G2Element,
    c: G1Element,
}

impl Proof {
    /// Create a proof from its three points.
    pub fn new(a: G1Element, b: G2Element, c: G1Element) -> Self {
        Proof { a, b, c }
    }

    /// The point `A`.
    pub fn a(&self) -> &G1Element {
        &self.a
    }

    /// The point `B`.
    pub fn b(&self) -> &G2Element {
        &self.b
    }

    /// The point `C`.
    pub fn c(&self) -> &G1Element {
        &self.c
    }
}

/// A Groth16 verifying key for a circuit with `ic.len() - 1` public inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    alpha: G1Element,
    beta: G2Element,
    gamma: G2Element,
    delta: G2Element,
    /// `[(beta * u_i(x) + alpha * v_i(x) + w_i(x)) / gamma] * G` for the constant term and each
    /// public input, in circuit order.
    ic: Vec<G1Element>,
}

impl VerifyingKey {
    /// Create a verifying key from its points. `ic` holds one point more than the number of public
    /// inputs.
    pub fn new(
        alpha: G1Element,
        beta: G2Element,
        gamma: G2Element,
        delta: G2Element,
        ic: Vec<G1Element>,
    ) -> Self {
        VerifyingKey {
            alpha,
            beta,
            gamma,
            delta,
            ic,
        }
    }

    /// The number of public inputs this key expects.
    pub fn num_public_inputs(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }

    /// The point `alpha` in G1.
    pub fn alpha(&self) -> &G1Element {
        &self.alpha
    }

    /// The point `beta` in G2.
    pub fn beta(&self) -> &G2Element {
        &self.beta
    }

    /// The point `gamma` in G2.
    pub fn gamma(&self) -> &G2Element {
        &self.gamma
    }

    /// The point `delta` in G2.
    pub fn delta(&self) -> &G2Element {
        &self.delta
    }

    /// The input commitment points `IC[0..=N]`.
    pub fn ic(&self) -> &[G1Element] {
        &self.ic
    }
}

/// The outcome of verifying a well-formed proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The pairing equation holds.
    Accepted,
    /// The pairing equation does not hold.
    Rejected,
}

impl Verdict {
    /// Whether this is [Verdict::Accepted].
    pub fn is_accepted(&self) -> bool {
        *self == Verdict::Accepted
    }
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        if accepted {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::Rejected => write!(f, "rejected"),
        }
    }
}
