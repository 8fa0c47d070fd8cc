//! Both strategies sit behind the same gate and agree on what they share.

use dhcheck_core::{
    validate_params_full, CertifiedValidator, DhError, DomainParameters,
    ExplicitDomainValidator, GeneralValidator, NoNamedGroups, ParameterValidator,
    ValidationFlag, ValidationReport,
};
use num_bigint::BigUint;

use super::common::{odd_modulus, toy_policy, toy_safe_prime, toy_subgroup};

/// Certified routine that runs the general checks, so results can be compared.
struct ReferenceRoutine(GeneralValidator);

impl ExplicitDomainValidator for ReferenceRoutine {
    fn validate_explicit_domain_params(
        &self,
        params: &DomainParameters,
    ) -> Result<ValidationReport, DhError> {
        self.0.validate_explicit(params)
    }
}

/// Certified routine that must never be reached.
struct Unreachable;

impl ExplicitDomainValidator for Unreachable {
    fn validate_explicit_domain_params(
        &self,
        _params: &DomainParameters,
    ) -> Result<ValidationReport, DhError> {
        panic!("certified routine called past the size gate");
    }
}

fn samples() -> Vec<DomainParameters> {
    vec![
        toy_safe_prime(),
        toy_subgroup(),
        DomainParameters::new(BigUint::from(67u32), BigUint::from(2u32)),
        DomainParameters::new(BigUint::from(2581u32), BigUint::from(4u32)),
        DomainParameters::new(BigUint::from(2580u32), BigUint::from(1u32)),
        DomainParameters::new(BigUint::from(67u32), BigUint::from(2u32))
            .with_subgroup_order(BigUint::from(12u32)),
        DomainParameters::new(odd_modulus(500), BigUint::from(2u32)),
    ]
}

#[test]
fn general_and_certified_reports_match() {
    let general = GeneralValidator::new(toy_policy());
    let certified =
        CertifiedValidator::new(toy_policy(), ReferenceRoutine(GeneralValidator::new(toy_policy())));

    for params in samples() {
        let a = validate_params_full(&params, &NoNamedGroups, &general).unwrap();
        let b = validate_params_full(&params, &NoNamedGroups, &certified).unwrap();
        assert_eq!(a, b, "strategies disagree on p = {}", params.p());
    }
}

#[test]
fn certified_routine_is_never_reached_for_oversized_modulus() {
    let certified = CertifiedValidator::new(toy_policy(), Unreachable);
    let params = DomainParameters::new(odd_modulus(10_000), BigUint::from(2u32));
    let report = validate_params_full(&params, &NoNamedGroups, &certified).unwrap();
    assert_eq!(report.flags().collect::<Vec<_>>(), vec![ValidationFlag::ModulusTooLarge]);
}

#[test]
fn both_strategies_share_the_policy() {
    let general = GeneralValidator::new(toy_policy());
    let certified = CertifiedValidator::new(toy_policy(), Unreachable);
    assert_eq!(general.size_policy(), certified.size_policy());
}
