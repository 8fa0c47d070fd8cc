//! Pairwise consistency: does the public key belong to the private key?
//!
//! Detects corruption or mismatched key material. It says nothing about
//! cryptographic strength; run the key validators for that.

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use crate::error::DhError;
use crate::params::{DomainParameters, PrivateKey};

// ---------------------------------------------------------------------------
// Key derivation capability
// ---------------------------------------------------------------------------

/// Computes the public key for a private key.
pub trait KeyDerivation {
    /// Derive `g^x mod p`.
    ///
    /// # Errors
    ///
    /// Returns a [`DhError`] when the derivation cannot be carried out.
    fn derive_public_key(
        &self,
        params: &DomainParameters,
        private: &PrivateKey,
    ) -> Result<BigUint, DhError>;
}

impl<T: KeyDerivation + ?Sized> KeyDerivation for &T {
    fn derive_public_key(
        &self,
        params: &DomainParameters,
        private: &PrivateKey,
    ) -> Result<BigUint, DhError> {
        (**self).derive_public_key(params, private)
    }
}

/// Plain modular exponentiation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ModExpDerivation;

impl KeyDerivation for ModExpDerivation {
    fn derive_public_key(
        &self,
        params: &DomainParameters,
        private: &PrivateKey,
    ) -> Result<BigUint, DhError> {
        if params.p().is_zero() {
            return Err(DhError::KeyDerivation("modulus is zero".into()));
        }
        Ok(params.g().modpow(private.expose(), params.p()))
    }
}

// ---------------------------------------------------------------------------
// Consistency check
// ---------------------------------------------------------------------------

/// Returns `true` only if `public == derive(private)` exactly.
///
/// Fails closed: a missing key, a zero `p` or `g`, or a derivation error
/// all yield `false`.
#[must_use]
pub fn check_pairwise_consistency(
    params: &DomainParameters,
    private: Option<&PrivateKey>,
    public: Option<&BigUint>,
    derivation: &dyn KeyDerivation,
) -> bool {
    let (Some(private), Some(public)) = (private, public) else {
        return false;
    };
    if params.p().is_zero() || params.g().is_zero() {
        return false;
    }

    let candidate = match derivation.derive_public_key(params, private) {
        Ok(candidate) => candidate,
        Err(e) => {
            tracing::warn!(error = %e, "pairwise check: public key derivation failed");
            return false;
        }
    };

    let width = byte_width(params.p())
        .max(byte_width(&candidate))
        .max(byte_width(public));
    match (fixed_width(&candidate, width), fixed_width(public, width)) {
        (Some(a), Some(b)) => constant_time_eq(&a, &b),
        _ => false,
    }
}

fn byte_width(n: &BigUint) -> usize {
    n.bits().div_ceil(8)
}

/// Big-endian encoding left-padded to `width` bytes, or `None` if it does not fit.
///
/// The buffer is wiped on drop: the candidate is a function of the secret.
fn fixed_width(n: &BigUint, width: usize) -> Option<Zeroizing<Vec<u8>>> {
    let bytes = Zeroizing::new(n.to_bytes_be());
    let pad = width.checked_sub(bytes.len())?;
    let mut out = Zeroizing::new(vec![0u8; width]);
    out[pad..].copy_from_slice(&bytes);
    Some(out)
}

/// Compare two byte slices without an early exit on the first difference.
///
/// Lengths are public (both are padded to the same width).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
