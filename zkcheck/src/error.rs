// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Collection of errors to be used across the verifier crates.
//!
//! Every structural problem with a key, a proof or a public input is reported as one of these
//! errors *before* any pairing is computed. A well-formed proof that fails the pairing equation is
//! not an error: it is a negative verdict, and the two must never be conflated.

use thiserror::Error;

pub type VerifierResult<T> = Result<T, VerifierError>;

/// Collection of errors to be used in zkcheck.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum VerifierError {
    /// Invalid value was given to the function
    #[error("Invalid value was given to the function")]
    InvalidInput,

    /// A field element or point is not in its canonical encoding.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The coordinates do not satisfy the curve equation.
    #[error("Point is not on the curve")]
    PointNotOnCurve,

    /// The point is on the curve but not in the prime-order subgroup.
    #[error("Point is not in the prime-order subgroup")]
    PointNotInSubgroup,

    /// The verifying key could not be decoded.
    #[error("Malformed verifying key: {0}")]
    MalformedKey(String),

    /// The proof could not be decoded.
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// The number of public inputs does not match what the verifying key expects.
    #[error("Expected {expected} public inputs, got {actual}")]
    InputCountMismatch { expected: usize, actual: usize },
}

impl VerifierError {
    /// Shorthand for [VerifierError::InvalidEncoding].
    pub fn encoding(reason: impl Into<String>) -> Self {
        VerifierError::InvalidEncoding(reason.into())
    }
}
