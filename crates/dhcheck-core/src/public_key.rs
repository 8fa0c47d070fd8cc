//! Public key validation.
//!
//! Two profiles share one signature. [`validate_public_key_full`] is the
//! default and the only correct choice for static keys or for any peer key
//! under custom parameters. [`validate_public_key_partial`] drops the
//! subgroup exponentiation and is sound only for ephemeral keys in a named
//! safe-prime group; the function cannot detect misuse.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::DhError;
use crate::params::DomainParameters;
use crate::report::{ValidationFlag, ValidationReport};

/// Which public key checks to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PublicKeyProfile {
    /// Range check plus subgroup membership.
    #[default]
    Full,
    /// Range check only. Ephemeral keys in named safe-prime groups only.
    Partial,
}

/// Validate `public` under `profile`.
///
/// # Errors
///
/// Returns [`DhError::MissingParameter`] when `p` is zero.
pub fn validate_public_key(
    params: &DomainParameters,
    public: &BigUint,
    profile: PublicKeyProfile,
) -> Result<ValidationReport, DhError> {
    match profile {
        PublicKeyProfile::Full => validate_public_key_full(params, public),
        PublicKeyProfile::Partial => validate_public_key_partial(params, public),
    }
}

/// `2 <= y <= p - 2`, and `y^q = 1 (mod p)` when `q` is known.
///
/// A `q` that is not below `p` cannot be a subgroup order; the key is
/// flagged [`ValidationFlag::PubkeyInvalid`] without exponentiating.
///
/// # Errors
///
/// Returns [`DhError::MissingParameter`] when `p` is zero.
pub fn validate_public_key_full(
    params: &DomainParameters,
    public: &BigUint,
) -> Result<ValidationReport, DhError> {
    let mut report = check_range(params, public)?;
    if let Some(q) = params.q() {
        let p = params.p();
        if q >= p {
            tracing::warn!(q_bits = q.bits(), p_bits = p.bits(), "subgroup order not below modulus");
            report.set(ValidationFlag::PubkeyInvalid);
        } else {
            report.set_if(!public.modpow(q, p).is_one(), ValidationFlag::PubkeyInvalid);
        }
    }
    Ok(report)
}

/// Range check `2 <= y <= p - 2` only.
///
/// Caller contract: use this solely for single-use keys under a named
/// safe-prime group. Anywhere else it under-validates without any signal.
///
/// # Errors
///
/// Returns [`DhError::MissingParameter`] when `p` is zero.
pub fn validate_public_key_partial(
    params: &DomainParameters,
    public: &BigUint,
) -> Result<ValidationReport, DhError> {
    check_range(params, public)
}

fn check_range(params: &DomainParameters, public: &BigUint) -> Result<ValidationReport, DhError> {
    let p = params.p();
    if p.is_zero() {
        return Err(DhError::MissingParameter("p"));
    }
    let mut report = ValidationReport::new();
    report.set_if(public <= &BigUint::one(), ValidationFlag::PubkeyTooSmall);
    report.set_if(
        *public >= p - BigUint::one(),
        ValidationFlag::PubkeyTooLarge,
    );
    Ok(report)
}
