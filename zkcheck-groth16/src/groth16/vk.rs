// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::mem::size_of;

use tracing::warn;
use zkcheck::error::{VerifierError, VerifierResult};
use zkcheck::groups::bn254::{G1Element, G2Element};
use zkcheck::groups::{EncodedPoint, PointFormat};

use crate::groth16::VerifyingKey;

/// The first four bytes of a serialized verifying key.
pub const KEY_MAGIC: &[u8; 4] = b"G16K";

/// The only supported version of the key format.
pub const KEY_FORMAT_VERSION: u8 = 0x01;

/// Curve identifier for BN254.
pub const CURVE_ID_BN254: u8 = 0x01;

/// Magic, version, curve id, point format and the number of public inputs.
pub const KEY_HEADER_LENGTH: usize = KEY_MAGIC.len() + 3 + size_of::<u32>();

fn format_to_byte(format: PointFormat) -> u8 {
    match format {
        PointFormat::Compressed => 0x00,
        PointFormat::Uncompressed => 0x01,
    }
}

fn format_from_byte(byte: u8) -> VerifierResult<PointFormat> {
    match byte {
        0x00 => Ok(PointFormat::Compressed),
        0x01 => Ok(PointFormat::Uncompressed),
        _ => Err(malformed(format!("unknown point format {byte:#04x}"))),
    }
}

fn malformed(reason: impl Into<String>) -> VerifierError {
    let reason = reason.into();
    warn!("Rejecting verifying key: {}", reason);
    VerifierError::MalformedKey(reason)
}

/// Reads consecutive points from a byte slice, mapping any failure to a malformed key.
struct PointReader<'a> {
    bytes: &'a [u8],
    format: PointFormat,
}

impl<'a> PointReader<'a> {
    fn next<P: EncodedPoint>(&mut self, name: &str) -> VerifierResult<P> {
        let length = P::encoded_length(self.format);
        if self.bytes.len() < length {
            return Err(malformed(format!("truncated before {name}")));
        }
        let (point, rest) = self.bytes.split_at(length);
        self.bytes = rest;
        P::decode(point, self.format).map_err(|e| malformed(format!("{name}: {e}")))
    }
}

impl VerifyingKey {
    /// Deserialize a verifying key from the binary format below. Every point is checked to be a
    /// canonical encoding of a point on the curve and, for G2, in the prime-order subgroup.
    ///
    /// ```text
    /// offset  size  field
    /// 0       4     magic "G16K"
    /// 4       1     version 0x01
    /// 5       1     curve id 0x01 (BN254)
    /// 6       1     point format: 0x00 compressed, 0x01 uncompressed
    /// 7       4     N, the number of public inputs, big-endian
    /// 11      ...   alpha (G1) || beta (G2) || gamma (G2) || delta (G2) || IC[0] || ... || IC[N] (G1)
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> VerifierResult<Self> {
        if bytes.len() < KEY_HEADER_LENGTH {
            return Err(malformed(format!(
                "expected at least {KEY_HEADER_LENGTH} bytes, got {}",
                bytes.len()
            )));
        }
        let (header, body) = bytes.split_at(KEY_HEADER_LENGTH);
        if &header[..4] != KEY_MAGIC {
            return Err(malformed("bad magic"));
        }
        if header[4] != KEY_FORMAT_VERSION {
            return Err(malformed(format!("unsupported version {}", header[4])));
        }
        if header[5] != CURVE_ID_BN254 {
            return Err(malformed(format!("unsupported curve {}", header[5])));
        }
        let format = format_from_byte(header[6])?;
        let num_public_inputs = u32::from_be_bytes([header[7], header[8], header[9], header[10]]);

        let mut reader = PointReader {
            bytes: body,
            format,
        };
        let alpha = reader.next::<G1Element>("alpha")?;
        let beta = reader.next::<G2Element>("beta")?;
        let gamma = reader.next::<G2Element>("gamma")?;
        let delta = reader.next::<G2Element>("delta")?;

        let g1_length = G1Element::encoded_length(format);
        if reader.bytes.len() % g1_length != 0 {
            return Err(malformed("trailing bytes after the IC points"));
        }
        let ic_length = reader.bytes.len() / g1_length;
        let expected = num_public_inputs as usize + 1;
        if ic_length != expected {
            warn!(
                "Rejecting verifying key: declares {} public inputs but has {} IC points",
                num_public_inputs, ic_length
            );
            return Err(VerifierError::InputCountMismatch {
                expected,
                actual: ic_length,
            });
        }
        let ic = (0..ic_length)
            .map(|i| reader.next::<G1Element>(&format!("IC[{i}]")))
            .collect::<VerifierResult<Vec<_>>>()?;

        Ok(VerifyingKey::new(alpha, beta, gamma, delta, ic))
    }

    /// Serialize this key in the format read by [VerifyingKey::from_bytes]. Fails if the key has
    /// no IC points or more public inputs than fit in the header.
    pub fn to_bytes(&self, format: PointFormat) -> VerifierResult<Vec<u8>> {
        let num_public_inputs = match self.ic.len().checked_sub(1) {
            Some(n) => u32::try_from(n).map_err(|_| malformed("too many public inputs"))?,
            None => return Err(malformed("no IC points")),
        };
        let mut bytes = Vec::with_capacity(
            KEY_HEADER_LENGTH
                + (self.ic.len() + 1) * G1Element::encoded_length(format)
                + 3 * G2Element::encoded_length(format),
        );
        bytes.extend_from_slice(KEY_MAGIC);
        bytes.push(KEY_FORMAT_VERSION);
        bytes.push(CURVE_ID_BN254);
        bytes.push(format_to_byte(format));
        bytes.extend_from_slice(&num_public_inputs.to_be_bytes());
        bytes.extend(self.alpha.encode(format));
        bytes.extend(self.beta.encode(format));
        bytes.extend(self.gamma.encode(format));
        bytes.extend(self.delta.encode(format));
        for point in &self.ic {
            bytes.extend(point.encode(format));
        }
        Ok(bytes)
    }
}
