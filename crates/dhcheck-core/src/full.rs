//! Full cryptographic validation of domain parameters.
//!
//! Pipeline:
//!
//! ```text
//! GroupCheck ─named─▶ Done (empty report)
//!     │unknown
//! SizeGate ─over validation ceiling─▶ Done (ModulusTooLarge, no primality test)
//!     │
//! BasicCheck ─▶ SubgroupCheck (q present) ─▶ PrimalityCheck(p) ─▶ SafePrimeCheck (q absent)
//! ```
//!
//! Group recognition is done once in [`validate_params_full`] for every
//! strategy. Everything after it is a [`ParameterValidator`]: either the
//! [`GeneralValidator`] below or a [`CertifiedValidator`] wrapping an
//! externally certified routine. Both apply the same size gate first.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::basic::validate_params_basic;
use crate::error::DhError;
use crate::groups::{GroupIdentity, GroupRecognizer};
use crate::params::DomainParameters;
use crate::primality::{MillerRabin, Primality, PrimalityTester};
use crate::report::{ValidationFlag, ValidationReport};
use crate::size_policy::SizePolicy;

// ---------------------------------------------------------------------------
// Strategy interface
// ---------------------------------------------------------------------------

/// Validation of parameters that were *not* recognized as a named group.
///
/// Implementations must enforce the validation ceiling of their
/// [`SizePolicy`] before doing anything whose cost grows with `p`.
pub trait ParameterValidator {
    /// Validate `params` explicitly.
    ///
    /// # Errors
    ///
    /// Returns a [`DhError`] when validation could not run to completion.
    fn validate_explicit(&self, params: &DomainParameters) -> Result<ValidationReport, DhError>;

    /// The size policy this validator enforces.
    fn size_policy(&self) -> &SizePolicy;
}

impl<T: ParameterValidator + ?Sized> ParameterValidator for Box<T> {
    fn validate_explicit(&self, params: &DomainParameters) -> Result<ValidationReport, DhError> {
        (**self).validate_explicit(params)
    }

    fn size_policy(&self) -> &SizePolicy {
        (**self).size_policy()
    }
}

/// Run full parameter validation.
///
/// Named groups short-circuit to an empty report without any further
/// work: correctness then rests entirely on `recognizer` never naming
/// attacker-supplied parameters. Everything else goes to `validator`.
///
/// # Errors
///
/// Propagates fatal errors from `validator`. On `Err` no flag state can be
/// trusted.
pub fn validate_params_full(
    params: &DomainParameters,
    recognizer: &dyn GroupRecognizer,
    validator: &dyn ParameterValidator,
) -> Result<ValidationReport, DhError> {
    if let GroupIdentity::Named(group) = recognizer.recognize_named_group(params) {
        tracing::debug!(%group, "named group recognized, explicit validation skipped");
        return Ok(ValidationReport::new());
    }

    let report = validator
        .validate_explicit(params)
        .inspect_err(|e| tracing::warn!(error = %e, "parameter validation aborted"))?;
    tracing::debug!(
        bits = params.modulus_bits(),
        flags = report.len(),
        "parameter validation complete"
    );
    Ok(report)
}

/// Reject moduli above the validation ceiling before anything expensive.
fn size_gate(params: &DomainParameters, policy: &SizePolicy) -> Option<ValidationReport> {
    let bits = params.modulus_bits();
    if policy.exceeds_validation(bits) {
        tracing::warn!(
            bits,
            ceiling = policy.max_validation_bits(),
            "modulus exceeds validation ceiling, primality testing skipped"
        );
        let mut report = ValidationReport::new();
        report.set(ValidationFlag::ModulusTooLarge);
        return Some(report);
    }
    None
}

// ---------------------------------------------------------------------------
// General-purpose strategy
// ---------------------------------------------------------------------------

/// Direct implementation of the subgroup, primality and safe-prime checks.
#[derive(Clone, Debug, Default)]
pub struct GeneralValidator<T = MillerRabin> {
    policy: SizePolicy,
    primality: T,
}

impl GeneralValidator<MillerRabin> {
    /// Validator with the default primality tester.
    #[must_use]
    pub fn new(policy: SizePolicy) -> Self {
        Self {
            policy,
            primality: MillerRabin::default(),
        }
    }
}

impl<T: PrimalityTester> GeneralValidator<T> {
    /// Validator with a caller-supplied primality tester.
    #[must_use]
    pub const fn with_primality(policy: SizePolicy, primality: T) -> Self {
        Self { policy, primality }
    }

    /// The primality backend.
    #[must_use]
    pub const fn primality(&self) -> &T {
        &self.primality
    }

    fn is_prime(&self, n: &BigUint) -> Result<bool, DhError> {
        Ok(self.primality.test_primality(n)? == Primality::Prime)
    }

    /// `q` present: `g` generates the order-`q` subgroup, `q` is prime,
    /// `q | p - 1` and `j = (p-1)/q`. Every check runs regardless of the others.
    ///
    /// A `q` not below `p` is flagged without exponentiation or primality
    /// testing, so the size gate on `p` bounds the cost of this step too.
    fn check_subgroup(
        &self,
        params: &DomainParameters,
        q: &BigUint,
        report: &mut ValidationReport,
    ) -> Result<(), DhError> {
        let p = params.p();
        let g = params.g();

        if q >= p {
            tracing::warn!(
                q_bits = q.bits(),
                p_bits = p.bits(),
                "subgroup order not below modulus, subgroup tests skipped"
            );
            report.set_if(g <= &BigUint::one() || g >= p, ValidationFlag::UnsuitableGenerator);
            report.set(ValidationFlag::QNotPrime);
            report.set(ValidationFlag::InvalidQValue);
            check_cofactor(params, q, report);
            return Ok(());
        }

        if g <= &BigUint::one() || g >= p {
            report.set(ValidationFlag::UnsuitableGenerator);
        } else if !g.modpow(q, p).is_one() {
            report.set(ValidationFlag::UnsuitableGenerator);
        }

        report.set_if(!self.is_prime(q)?, ValidationFlag::QNotPrime);

        if q.is_zero() {
            return Err(DhError::Arithmetic("division by zero subgroup order".into()));
        }
        report.set_if(!(p % q).is_one(), ValidationFlag::InvalidQValue);

        check_cofactor(params, q, report);
        Ok(())
    }
}

/// `j = (p-1)/q` when `j` is supplied. `q` must be non-zero.
fn check_cofactor(params: &DomainParameters, q: &BigUint, report: &mut ValidationReport) {
    if let Some(j) = params.j() {
        let (cofactor, _) = (params.p() - BigUint::one()).div_rem(q);
        report.set_if(*j != cofactor, ValidationFlag::InvalidJValue);
    }
}

impl<T: PrimalityTester> ParameterValidator for GeneralValidator<T> {
    fn validate_explicit(&self, params: &DomainParameters) -> Result<ValidationReport, DhError> {
        if let Some(report) = size_gate(params, &self.policy) {
            return Ok(report);
        }
        if params.p().is_zero() {
            return Err(DhError::MissingParameter("p"));
        }

        let mut report = validate_params_basic(params, &self.policy)?;

        if let Some(q) = params.q() {
            self.check_subgroup(params, q, &mut report)?;
        }

        let p = params.p();
        if !self.is_prime(p)? {
            report.set(ValidationFlag::PNotPrime);
        } else if params.q().is_none() {
            let half = p >> 1usize;
            report.set_if(!self.is_prime(&half)?, ValidationFlag::PNotSafePrime);
        }

        Ok(report)
    }

    fn size_policy(&self) -> &SizePolicy {
        &self.policy
    }
}

// ---------------------------------------------------------------------------
// Certified strategy
// ---------------------------------------------------------------------------

/// An externally certified explicit-domain-parameter validation routine.
///
/// Its internal mathematics is opaque to this crate. It may raise flags
/// the general strategy never does, such as
/// [`ValidationFlag::UnableToCheckGenerator`].
pub trait ExplicitDomainValidator {
    /// Validate `params` according to the certified procedure.
    ///
    /// # Errors
    ///
    /// Returns a [`DhError`] when the routine could not complete.
    fn validate_explicit_domain_params(
        &self,
        params: &DomainParameters,
    ) -> Result<ValidationReport, DhError>;
}

impl<T: ExplicitDomainValidator + ?Sized> ExplicitDomainValidator for Box<T> {
    fn validate_explicit_domain_params(
        &self,
        params: &DomainParameters,
    ) -> Result<ValidationReport, DhError> {
        (**self).validate_explicit_domain_params(params)
    }
}

impl<T: ExplicitDomainValidator + ?Sized> ExplicitDomainValidator for &T {
    fn validate_explicit_domain_params(
        &self,
        params: &DomainParameters,
    ) -> Result<ValidationReport, DhError> {
        (**self).validate_explicit_domain_params(params)
    }
}

/// Strategy that hands explicit validation to a certified routine after
/// the size gate.
#[derive(Clone, Debug)]
pub struct CertifiedValidator<E> {
    policy: SizePolicy,
    delegate: E,
}

impl<E: ExplicitDomainValidator> CertifiedValidator<E> {
    /// Wrap `delegate`, gating on `policy`.
    #[must_use]
    pub const fn new(policy: SizePolicy, delegate: E) -> Self {
        Self { policy, delegate }
    }
}

impl<E: ExplicitDomainValidator> ParameterValidator for CertifiedValidator<E> {
    fn validate_explicit(&self, params: &DomainParameters) -> Result<ValidationReport, DhError> {
        if let Some(report) = size_gate(params, &self.policy) {
            return Ok(report);
        }
        self.delegate.validate_explicit_domain_params(params)
    }

    fn size_policy(&self) -> &SizePolicy {
        &self.policy
    }
}
