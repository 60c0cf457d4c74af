// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use ark_bn254::Fr;
use ark_ff::PrimeField;
use sha3::{Digest, Keccak256};
use zkcheck::encoding::field_element_to_be_bytes;
use zkcheck::groups::bn254::G1Element;

/// The Fiat-Shamir transcript of snarkjs PLONK. Points are absorbed as `x || y` (big-endian, all
/// zeros for the identity) and scalars as 32 big-endian bytes. A challenge is the Keccak-256 hash
/// of everything absorbed since the previous challenge, read big-endian and reduced modulo r.
#[derive(Debug, Default)]
pub(crate) struct Keccak256Transcript {
    buffer: Vec<u8>,
}

impl Keccak256Transcript {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append_point(&mut self, point: &G1Element) -> &mut Self {
        self.buffer.extend(point.to_uncompressed_byte_array());
        self
    }

    pub(crate) fn append_scalar(&mut self, scalar: &Fr) -> &mut Self {
        self.buffer.extend(field_element_to_be_bytes(scalar));
        self
    }

    /// Hash and clear the buffer. Earlier challenges are not chained automatically, callers
    /// append them where the protocol asks for them.
    pub(crate) fn challenge(&mut self) -> Fr {
        let digest = Keccak256::digest(&self.buffer);
        self.buffer.clear();
        Fr::from_be_bytes_mod_order(&digest)
    }
}
