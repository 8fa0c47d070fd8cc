//! Domain parameters and the validation-time view of a key pair.
//!
//! All values are untrusted until a validator has accepted them. Nothing in
//! this crate mutates parameters or retains references past a single call.

use std::fmt;

use num_bigint::BigUint;
use secrecy::{ExposeSecret, SecretBox};

use crate::error::DhError;
use crate::groups::GroupRecognizer;
use crate::pairwise::{check_pairwise_consistency, KeyDerivation};
use crate::private_key::validate_private_key;
use crate::public_key::{validate_public_key, PublicKeyProfile};
use crate::report::ValidationReport;
use crate::size_policy::bit_length;

// ---------------------------------------------------------------------------
// DomainParameters
// ---------------------------------------------------------------------------

/// Finite-field Diffie-Hellman domain parameters `(p, g, q?, j?)`.
///
/// Construction performs no checks; run [`crate::validate_params_basic`] or
/// [`crate::validate_params_full`] before trusting the values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters {
    p: BigUint,
    g: BigUint,
    q: Option<BigUint>,
    j: Option<BigUint>,
}

impl DomainParameters {
    /// Parameters with modulus `p` and generator `g`, no subgroup order.
    #[must_use]
    pub const fn new(p: BigUint, g: BigUint) -> Self {
        Self {
            p,
            g,
            q: None,
            j: None,
        }
    }

    /// Attach the subgroup order `q`.
    #[must_use]
    pub fn with_subgroup_order(mut self, q: BigUint) -> Self {
        self.q = Some(q);
        self
    }

    /// Attach the cofactor `j = (p-1)/q`.
    #[must_use]
    pub fn with_cofactor(mut self, j: BigUint) -> Self {
        self.j = Some(j);
        self
    }

    /// The modulus.
    #[must_use]
    pub const fn p(&self) -> &BigUint {
        &self.p
    }

    /// The generator.
    #[must_use]
    pub const fn g(&self) -> &BigUint {
        &self.g
    }

    /// The subgroup order, if supplied.
    #[must_use]
    pub const fn q(&self) -> Option<&BigUint> {
        self.q.as_ref()
    }

    /// The cofactor, if supplied.
    #[must_use]
    pub const fn j(&self) -> Option<&BigUint> {
        self.j.as_ref()
    }

    /// Bit length of `p`.
    #[must_use]
    pub fn modulus_bits(&self) -> u32 {
        bit_length(&self.p)
    }
}

// ---------------------------------------------------------------------------
// PrivateKey
// ---------------------------------------------------------------------------

/// Secret exponent.
///
/// Held in a [`SecretBox`] and zeroized on drop. `Debug` output is masked
/// and the type deliberately does not implement `Serialize`.
pub struct PrivateKey {
    inner: SecretBox<BigUint>,
}

impl PrivateKey {
    /// Wrap a secret exponent.
    #[must_use]
    pub fn new(value: BigUint) -> Self {
        Self {
            inner: SecretBox::new(Box::new(value)),
        }
    }

    /// Expose the secret value. Keep the borrow short.
    #[must_use]
    pub fn expose(&self) -> &BigUint {
        self.inner.expose_secret()
    }

    /// Bit length of the secret exponent.
    #[must_use]
    pub fn bits(&self) -> u32 {
        bit_length(self.expose())
    }
}

impl From<BigUint> for PrivateKey {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self::new(self.expose().clone())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(***)")
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// Validation-time view of a key pair bound to its domain parameters.
///
/// Either key may be absent; `public` in particular often arrives from a
/// network peer with no private half.
#[derive(Clone, Debug)]
pub struct KeyPair<'a> {
    params: &'a DomainParameters,
    public: Option<BigUint>,
    private: Option<PrivateKey>,
    preferred_private_bits: Option<u32>,
}

impl<'a> KeyPair<'a> {
    /// A key pair with no keys yet.
    #[must_use]
    pub const fn new(params: &'a DomainParameters) -> Self {
        Self {
            params,
            public: None,
            private: None,
            preferred_private_bits: None,
        }
    }

    /// Attach a public key.
    #[must_use]
    pub fn with_public(mut self, public: BigUint) -> Self {
        self.public = Some(public);
        self
    }

    /// Attach a private key.
    #[must_use]
    pub fn with_private(mut self, private: PrivateKey) -> Self {
        self.private = Some(private);
        self
    }

    /// Set the preferred private key length in bits.
    #[must_use]
    pub const fn with_preferred_private_bits(mut self, bits: u32) -> Self {
        self.preferred_private_bits = Some(bits);
        self
    }

    /// The domain parameters this pair belongs to.
    #[must_use]
    pub const fn params(&self) -> &'a DomainParameters {
        self.params
    }

    /// The public key, if present.
    #[must_use]
    pub const fn public(&self) -> Option<&BigUint> {
        self.public.as_ref()
    }

    /// The private key, if present.
    #[must_use]
    pub const fn private(&self) -> Option<&PrivateKey> {
        self.private.as_ref()
    }

    /// The preferred private key length, if set.
    #[must_use]
    pub const fn preferred_private_bits(&self) -> Option<u32> {
        self.preferred_private_bits
    }

    /// Validate the public half under `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::MissingKey`] if no public key is attached, or any
    /// fatal error from the validator itself.
    pub fn validate_public_key(
        &self,
        profile: PublicKeyProfile,
    ) -> Result<ValidationReport, DhError> {
        let public = self.public.as_ref().ok_or(DhError::MissingKey("public"))?;
        validate_public_key(self.params, public, profile)
    }

    /// Validate the private half.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::MissingKey`] if no private key is attached, or any
    /// fatal error from the validator itself.
    pub fn validate_private_key(
        &self,
        recognizer: &dyn GroupRecognizer,
    ) -> Result<ValidationReport, DhError> {
        let private = self
            .private
            .as_ref()
            .ok_or(DhError::MissingKey("private"))?;
        validate_private_key(
            self.params,
            private,
            self.preferred_private_bits,
            recognizer,
        )
    }

    /// Whether the public key is `g^private mod p`. Fails closed.
    #[must_use]
    pub fn is_pairwise_consistent(&self, derivation: &dyn KeyDerivation) -> bool {
        check_pairwise_consistency(
            self.params,
            self.private.as_ref(),
            self.public.as_ref(),
            derivation,
        )
    }
}
