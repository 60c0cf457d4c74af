// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![deny(unused_must_use, missing_debug_implementations)]

//! Arithmetic over the BN254 pairing-friendly curve, as needed to verify SNARK proofs: the
//! scalar and base fields, the groups G1, G2 and GT, multi-scalar multiplication and the
//! optimal-ate multi-pairing. Every decoder in this crate is strict: non-canonical encodings,
//! off-curve points and points outside the prime-order subgroup are rejected.

#[cfg(test)]
#[path = "tests/encoding_tests.rs"]
pub mod encoding_tests;

pub mod encoding;
pub mod error;
pub mod groups;
pub mod serde_helpers;
