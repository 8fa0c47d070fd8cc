//! Private key range validation.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::DhError;
use crate::groups::GroupRecognizer;
use crate::params::{DomainParameters, PrivateKey};
use crate::report::{ValidationFlag, ValidationReport};
use crate::size_policy::bit_length;

/// Validate the secret exponent against the domain parameters.
///
/// With `q` known the key must satisfy `0 < x < upper`, where `upper` is
/// `q`, narrowed to `2^preferred_bits` for named groups whose preferred
/// length is shorter than `q`. Without `q` only the bit length can be
/// judged: it must equal `preferred_bits` when set, otherwise fall in
/// `(1, bits(p) - 1]`. A `preferred_bits` of zero means "not set".
///
/// The secret is compared, never logged or formatted.
///
/// # Errors
///
/// Returns [`DhError::MissingParameter`] when `p` is zero. Range
/// violations are flags, not errors.
pub fn validate_private_key(
    params: &DomainParameters,
    private: &PrivateKey,
    preferred_bits: Option<u32>,
    recognizer: &dyn GroupRecognizer,
) -> Result<ValidationReport, DhError> {
    if params.p().is_zero() {
        return Err(DhError::MissingParameter("p"));
    }
    let preferred_bits = preferred_bits.filter(|&bits| bits > 0);
    let x = private.expose();
    let mut report = ValidationReport::new();

    let Some(q) = params.q() else {
        let bits = private.bits();
        let (lower, upper) = match preferred_bits {
            Some(length) => (length, length),
            None => (2, params.modulus_bits().saturating_sub(1)),
        };
        report.set_if(bits < lower, ValidationFlag::PrivkeyTooSmall);
        report.set_if(bits > upper, ValidationFlag::PrivkeyTooLarge);
        return Ok(report);
    };

    let narrowed = preferred_bits
        .filter(|&length| length < bit_length(q))
        .filter(|_| recognizer.recognize_named_group(params).is_named())
        .map(|length| BigUint::one() << length as usize);
    let upper = narrowed.as_ref().unwrap_or(q);

    report.set_if(x.is_zero(), ValidationFlag::PrivkeyTooSmall);
    report.set_if(x >= upper, ValidationFlag::PrivkeyTooLarge);
    Ok(report)
}
