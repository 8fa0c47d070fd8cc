//! Secret exponents must not reach `Debug` output or error messages.

use dhcheck_core::{validate_private_key, KeyPair, NoNamedGroups, PrivateKey};
use num_bigint::BigUint;

use super::common::toy_subgroup;

/// Recognizable secret, big enough that any leak is unambiguous.
const SENTINEL: u64 = 0xDEAD_BEEF_CAFE_F00D;

#[test]
fn private_key_debug_is_masked() {
    let key = PrivateKey::new(BigUint::from(SENTINEL));
    let debug = format!("{key:?}");
    assert_eq!(debug, "PrivateKey(***)");
    assert!(!debug.contains(&SENTINEL.to_string()));
    assert!(!debug.to_lowercase().contains("deadbeef"));
}

#[test]
fn key_pair_debug_is_masked() {
    let params = toy_subgroup();
    let pair = KeyPair::new(&params)
        .with_private(PrivateKey::new(BigUint::from(SENTINEL)))
        .with_public(BigUint::from(40u32));
    let debug = format!("{pair:#?}");
    assert!(debug.contains("PrivateKey(***)"));
    assert!(!debug.contains(&SENTINEL.to_string()));
}

#[test]
fn rejected_private_key_report_carries_no_value() {
    let params = toy_subgroup();
    let report = validate_private_key(
        &params,
        &PrivateKey::new(BigUint::from(SENTINEL)),
        None,
        &NoNamedGroups,
    )
    .unwrap();
    let err = report.into_result().unwrap_err();
    let message = err.to_string();
    assert_eq!(message, "validation rejected: privkey_too_large");
    assert!(!message.contains(&SENTINEL.to_string()));
}

#[test]
fn cloned_key_is_independent_and_masked() {
    let key = PrivateKey::new(BigUint::from(SENTINEL));
    let copy = key.clone();
    drop(key);
    assert_eq!(copy.expose(), &BigUint::from(SENTINEL));
    assert_eq!(format!("{copy:?}"), "PrivateKey(***)");
}
