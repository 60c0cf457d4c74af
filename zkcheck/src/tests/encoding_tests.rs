// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use ark_bn254::{Fq, Fr};
use ark_ff::PrimeField;
use num_bigint::BigUint;
use proptest::prelude::*;

use crate::encoding::*;
use crate::error::VerifierError;

// r and q, the orders of the scalar and base fields.
const R: &str = "21888242871839275222246405745257275088548364400416034343698204186575808495617";
const Q: &str = "21888242871839275222246405745257275088696311157297823662689037894645226208583";

#[test]
fn test_modulus() {
    assert_eq!(modulus::<Fr>().to_str_radix(10), R);
    assert_eq!(modulus::<Fq>().to_str_radix(10), Q);
}

#[test]
fn test_parse_accepts_canonical_forms() {
    assert_eq!(parse_field_element::<Fr>("0").unwrap(), Fr::from(0u64));
    assert_eq!(parse_field_element::<Fr>("0x0").unwrap(), Fr::from(0u64));
    assert_eq!(parse_field_element::<Fr>("255").unwrap(), Fr::from(255u64));
    assert_eq!(parse_field_element::<Fr>("0xff").unwrap(), Fr::from(255u64));
    assert_eq!(parse_field_element::<Fr>("0xFF").unwrap(), Fr::from(255u64));
    assert_eq!(parse_field_element::<Fr>("0x00ff").unwrap(), Fr::from(255u64));

    // r - 1 is the largest scalar, and it is a valid base field element too since r < q.
    let r_minus_one = (BigUint::parse_bytes(R.as_bytes(), 10).unwrap() - 1u32).to_str_radix(10);
    assert_eq!(
        parse_field_element::<Fr>(&r_minus_one).unwrap(),
        -Fr::from(1u64)
    );
    assert!(parse_field_element::<Fq>(&r_minus_one).is_ok());
    assert!(parse_field_element::<Fq>(R).is_ok());
}

#[test]
fn test_parse_rejects_non_canonical_forms() {
    for s in [
        "", "00", "01", "-1", "+1", " 1", "1 ", "0x", "0X1", "1e3", "0b1", "1.0", "abc", "0xg",
        "1_000",
    ] {
        assert!(
            matches!(
                parse_field_element::<Fr>(s),
                Err(VerifierError::InvalidEncoding(_))
            ),
            "{s:?} should be rejected"
        );
    }

    // 79 decimal digits and 65 hex digits are always too long.
    assert!(parse_field_element::<Fr>(&"1".repeat(79)).is_err());
    assert!(parse_field_element::<Fr>(&format!("0x{}", "0".repeat(65))).is_err());
}

#[test]
fn test_parse_rejects_unreduced_values() {
    assert!(parse_field_element::<Fr>(R).is_err());
    assert!(parse_field_element::<Fq>(Q).is_err());
    assert!(parse_field_element::<Fr>(Q).is_err());
    assert!(parse_field_element::<Fr>(&format!("0x{}", "f".repeat(64))).is_err());
    assert!(parse_field_element::<Fr>(&"9".repeat(78)).is_err());
}

#[test]
fn test_text_forms() {
    let x = Fr::from(0xabcdu64);
    assert_eq!(field_element_to_decimal(&x), "43981");
    assert_eq!(
        field_element_to_hex(&x),
        format!("0x{}abcd", "0".repeat(60))
    );
    assert_eq!(field_element_to_decimal(&Fr::from(0u64)), "0");
}

#[test]
fn test_bytes() {
    let x = Fq::from(0x0102u64);
    let be = field_element_to_be_bytes(&x);
    assert_eq!(be[30..], [1, 2]);
    assert!(be[..30].iter().all(|b| *b == 0));
    assert_eq!(field_element_from_be_bytes::<Fq>(&be).unwrap(), x);

    let mut le = be;
    le.reverse();
    assert_eq!(field_element_from_le_bytes::<Fq>(&le).unwrap(), x);

    assert!(field_element_from_be_bytes::<Fq>(&be[1..]).is_err());
    assert!(field_element_from_be_bytes::<Fq>(&[0xff; 32]).is_err());
    assert!(field_element_from_le_bytes::<Fq>(&[0xff; 32]).is_err());

    let q = BigUint::parse_bytes(Q.as_bytes(), 10).unwrap().to_bytes_be();
    assert!(field_element_from_be_bytes::<Fq>(&q).is_err());
    assert!(field_element_from_be_bytes::<Fr>(&q).is_err());
}

proptest! {
    #[test]
    fn decimal_roundtrip(bytes in any::<[u8; 32]>()) {
        let x = Fr::from_le_bytes_mod_order(&bytes);
        let decimal = field_element_to_decimal(&x);
        prop_assert_eq!(parse_field_element::<Fr>(&decimal).unwrap(), x);
        let hex = field_element_to_hex(&x);
        prop_assert_eq!(parse_field_element::<Fr>(&hex).unwrap(), x);
        prop_assert_eq!(field_element_from_be_bytes::<Fr>(&field_element_to_be_bytes(&x)).unwrap(), x);
    }

    #[test]
    fn arbitrary_strings_never_panic(s in "\\PC*") {
        let _ = parse_field_element::<Fr>(&s);
    }
}
