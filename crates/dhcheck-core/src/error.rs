//! Fatal error types for `dhcheck-core`.
//!
//! A [`DhError`] means the call did not run to completion: no flag state
//! from that call can be trusted and the input must be treated as
//! unvalidated. Data-dependent rejections are *not* errors; they are
//! accumulated in a [`ValidationReport`].

use thiserror::Error;

use crate::report::ValidationReport;

/// Errors that abort a validation call.
#[derive(Debug, Error)]
pub enum DhError {
    /// The arithmetic collaborator could not complete an operation
    /// (zero modulus, division by zero).
    #[error("arithmetic failure: {0}")]
    Arithmetic(String),

    /// A primality test returned neither "prime" nor "composite".
    #[error("primality test indeterminate: {0}")]
    PrimalityIndeterminate(String),

    /// A required domain parameter is absent or zero.
    #[error("missing domain parameter: {0}")]
    MissingParameter(&'static str),

    /// The key pair does not carry the key being validated.
    #[error("missing key material: {0}")]
    MissingKey(&'static str),

    /// Re-deriving a public key from a private key failed.
    #[error("public key derivation failed: {0}")]
    KeyDerivation(String),

    /// Invalid size policy or validator configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A completed validation produced one or more flags.
    ///
    /// Only raised by [`ValidationReport::into_result`].
    #[error("validation rejected: {0}")]
    Rejected(ValidationReport),
}
