//! Cheap structural checks on `(p, g)`.
//!
//! No primality testing happens here: the cost is a handful of comparisons
//! regardless of whether `p` is actually prime, so this is safe to run on
//! any untrusted input as a first gate.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::DhError;
use crate::params::DomainParameters;
use crate::report::{ValidationFlag, ValidationReport};
use crate::size_policy::SizePolicy;

/// Validate oddness of `p`, the range of `g`, and the size of `p`.
///
/// Flags raised (all checks run, flags accumulate):
/// - [`ValidationFlag::PNotPrime`] if `p` is even
/// - [`ValidationFlag::UnsuitableGenerator`] if `g` is 0, 1 or `>= p - 1`
/// - [`ValidationFlag::ModulusTooSmall`] below the minimum security size
/// - [`ValidationFlag::ModulusTooLarge`] above the *generation* ceiling
///
/// Negative generators cannot be represented by [`BigUint`].
///
/// # Errors
///
/// None of the checks can fail today; the `Result` keeps the fatal/flag
/// split uniform across all validators.
pub fn validate_params_basic(
    params: &DomainParameters,
    policy: &SizePolicy,
) -> Result<ValidationReport, DhError> {
    let mut report = ValidationReport::new();
    let p = params.p();
    let g = params.g();

    report.set_if(!p.is_odd(), ValidationFlag::PNotPrime);

    report.set_if(
        g.is_zero() || g.is_one() || generator_at_or_above_p_minus_one(g, p),
        ValidationFlag::UnsuitableGenerator,
    );

    let bits = params.modulus_bits();
    report.set_if(policy.is_too_small(bits), ValidationFlag::ModulusTooSmall);
    report.set_if(
        policy.exceeds_generation(bits),
        ValidationFlag::ModulusTooLarge,
    );

    Ok(report)
}

/// `g >= p - 1`, treating `p = 0` as "every generator is too large".
fn generator_at_or_above_p_minus_one(g: &BigUint, p: &BigUint) -> bool {
    if p.is_zero() {
        return true;
    }
    *g >= p - BigUint::one()
}
