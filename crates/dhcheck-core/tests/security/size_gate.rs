//! Size gate regression: a huge attacker-supplied modulus must be rejected
//! on its bit length alone, before any primality test.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use dhcheck_core::{
    validate_params_full, validate_public_key_full, DhError, DomainParameters,
    GeneralValidator, NamedGroup, NoNamedGroups, Primality, PrimalityTester,
    SizePolicy, StandardGroups, ValidationFlag,
};
use num_bigint::BigUint;

use super::common::{odd_modulus, toy_policy, CountingPrimality};

/// Records the bit length of every value it is asked about and calls it prime.
#[derive(Default)]
struct RecordingPrimality {
    inputs: Mutex<Vec<usize>>,
}

impl RecordingPrimality {
    fn input_bits(&self) -> Vec<usize> {
        self.inputs.lock().unwrap().clone()
    }
}

impl PrimalityTester for RecordingPrimality {
    fn test_primality(&self, n: &BigUint) -> Result<Primality, DhError> {
        self.inputs.lock().unwrap().push(n.bits());
        Ok(Primality::Prime)
    }
}

#[test]
fn fifty_thousand_bit_modulus_is_rejected_without_primality() {
    let counting = CountingPrimality::default();
    let validator = GeneralValidator::with_primality(SizePolicy::default(), &counting);
    let params = DomainParameters::new(odd_modulus(50_000), BigUint::from(2u32))
        .with_subgroup_order(odd_modulus(4_000));

    let start = Instant::now();
    let report = validate_params_full(&params, &StandardGroups::default(), &validator).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.flags().collect::<Vec<_>>(), vec![ValidationFlag::ModulusTooLarge]);
    assert_eq!(counting.calls(), 0, "primality test ran on an oversized modulus");
    assert!(
        elapsed < Duration::from_millis(100),
        "size gate took {elapsed:?}"
    );
}

#[test]
fn gate_applies_with_generator_edge_cases() {
    // Basic-check failures must not leak into a gated report.
    let counting = CountingPrimality::default();
    let validator = GeneralValidator::with_primality(SizePolicy::default(), &counting);
    for g in [0u32, 1] {
        let params = DomainParameters::new(odd_modulus(40_000), BigUint::from(g));
        let report = validate_params_full(&params, &NoNamedGroups, &validator).unwrap();
        assert_eq!(report.flags().collect::<Vec<_>>(), vec![ValidationFlag::ModulusTooLarge]);
    }
    assert_eq!(counting.calls(), 0);
}

#[test]
fn gate_boundary_is_exclusive() {
    let counting = CountingPrimality::default();
    let validator = GeneralValidator::with_primality(toy_policy(), &counting);

    // Exactly at the ceiling: tested.
    let at = DomainParameters::new(odd_modulus(128), BigUint::from(2u32));
    let report = validate_params_full(&at, &NoNamedGroups, &validator).unwrap();
    assert!(report.contains(ValidationFlag::ModulusTooLarge));
    assert!(counting.calls() > 0);

    // One bit over: gated.
    let before = counting.calls();
    let over = DomainParameters::new(odd_modulus(129), BigUint::from(2u32));
    let report = validate_params_full(&over, &NoNamedGroups, &validator).unwrap();
    assert_eq!(report.flags().collect::<Vec<_>>(), vec![ValidationFlag::ModulusTooLarge]);
    assert_eq!(counting.calls(), before);
}

#[test]
fn validation_ceiling_cannot_collapse_onto_generation_ceiling() {
    assert!(SizePolicy::new(512, 10_000, 10_000).is_err());
    assert!(SizePolicy::new(512, 10_000, 9_000).is_err());
    assert!(SizePolicy::new(512, 10_000, 10_001).is_ok());

    // The wire form goes through the same check, so an inverted policy
    // never reaches a validator.
    let inverted = r#"{"minModulusBits":2,"maxGenerationBits":64,"maxValidationBits":8}"#;
    assert!(serde_json::from_str::<SizePolicy>(inverted).is_err());
}

#[test]
fn million_bit_subgroup_order_is_rejected_without_testing_it() {
    let recording = RecordingPrimality::default();
    let validator = GeneralValidator::with_primality(SizePolicy::default(), &recording);
    let p = NamedGroup::modp_2048().parameters().p().clone();
    let q = odd_modulus(1_000_001);
    let params = DomainParameters::new(p.clone(), BigUint::from(2u32)).with_subgroup_order(q);

    let start = Instant::now();
    let report = validate_params_full(&params, &NoNamedGroups, &validator).unwrap();
    let elapsed = start.elapsed();

    assert!(report.contains(ValidationFlag::QNotPrime));
    assert!(report.contains(ValidationFlag::InvalidQValue));
    assert!(!report.contains(ValidationFlag::PNotPrime));
    let inputs = recording.input_bits();
    assert_eq!(inputs, vec![2048]);
    assert!(inputs.iter().all(|&bits| bits <= p.bits()));
    assert!(elapsed < Duration::from_millis(250), "subgroup check took {elapsed:?}");
}

#[test]
fn million_bit_subgroup_order_skips_public_key_exponentiation() {
    let p = NamedGroup::modp_2048().parameters().p().clone();
    let params = DomainParameters::new(p, BigUint::from(2u32))
        .with_subgroup_order(odd_modulus(1_000_001));

    let start = Instant::now();
    let report = validate_public_key_full(&params, &BigUint::from(4u32)).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(report.flags().collect::<Vec<_>>(), vec![ValidationFlag::PubkeyInvalid]);
    assert!(elapsed < Duration::from_millis(100), "public key check took {elapsed:?}");
}
