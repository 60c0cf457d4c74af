// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serde support for points and scalars through their canonical byte arrays: human readable
//! formats such as JSON get a hex string, binary formats get a fixed size byte array. Decoding
//! runs the same validation as [ToFromByteArray::from_byte_array].

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::serde_as;

use crate::error::VerifierError;

/// Types with a canonical fixed length byte encoding.
pub trait ToFromByteArray<const LENGTH: usize>: Sized {
    const BYTE_LENGTH: usize = LENGTH;
    fn from_byte_array(bytes: &[u8; LENGTH]) -> Result<Self, VerifierError>;
    fn to_byte_array(&self) -> [u8; LENGTH];
}

// Serde only has fixed size array impls up to 32 elements.
#[serde_as]
#[derive(Serialize, Deserialize)]
struct FixedBytes<const N: usize>(#[serde_as(as = "[_; N]")] [u8; N]);

pub fn serialize_byte_array<T, S, const N: usize>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: ToFromByteArray<N>,
    S: Serializer,
{
    let bytes = value.to_byte_array();
    if serializer.is_human_readable() {
        hex::encode(bytes).serialize(serializer)
    } else {
        FixedBytes(bytes).serialize(serializer)
    }
}

pub fn deserialize_byte_array<'de, T, D, const N: usize>(deserializer: D) -> Result<T, D::Error>
where
    T: ToFromByteArray<N>,
    D: Deserializer<'de>,
{
    let bytes: [u8; N] = if deserializer.is_human_readable() {
        let decoded = hex::decode(String::deserialize(deserializer)?)
            .map_err(|e| D::Error::custom(format!("invalid hex: {e}")))?;
        decoded.try_into().map_err(|v: Vec<u8>| {
            D::Error::custom(format!("expected {N} bytes, got {}", v.len()))
        })?
    } else {
        FixedBytes::<N>::deserialize(deserializer)?.0
    };
    T::from_byte_array(&bytes).map_err(D::Error::custom)
}

/// Implement Serialize and Deserialize for a type implementing [ToFromByteArray] with the given
/// length.
#[macro_export]
macro_rules! serialize_deserialize_with_to_from_byte_array {
    ($type:ty, $length:expr) => {
        impl ::serde::Serialize for $type {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::serde_helpers::serialize_byte_array::<_, _, { $length }>(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $type {
            fn deserialize<D: ::serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                $crate::serde_helpers::deserialize_byte_array::<_, _, { $length }>(deserializer)
            }
        }
    };
}
