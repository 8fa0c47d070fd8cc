//! Read-only validation of shared parameters from many threads.

use std::thread;

use dhcheck_core::{
    check_pairwise_consistency, validate_params_full, validate_public_key_full,
    GeneralValidator, ModExpDerivation, NoNamedGroups, PrivateKey, StandardGroups,
};
use num_bigint::BigUint;

use super::common::{toy_policy, toy_safe_prime, toy_subgroup};

#[test]
fn shared_parameters_validate_identically_across_threads() {
    let params = toy_subgroup();
    let validator = GeneralValidator::new(toy_policy());
    let recognizer = StandardGroups::default();
    let expected = validate_params_full(&params, &recognizer, &validator).unwrap();

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| validate_params_full(&params, &recognizer, &validator).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn key_checks_run_concurrently() {
    let params = toy_safe_prime();
    let private = PrivateKey::new(BigUint::from(1000u32));
    let public = params.g().modpow(private.expose(), params.p());

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                assert!(validate_public_key_full(&params, &public).unwrap().is_acceptable());
                assert!(check_pairwise_consistency(
                    &params,
                    Some(&private),
                    Some(&public),
                    &ModExpDerivation
                ));
                let report = validate_params_full(
                    &params,
                    &NoNamedGroups,
                    &GeneralValidator::new(toy_policy()),
                )
                .unwrap();
                assert!(report.is_acceptable());
            });
        }
    });
}
