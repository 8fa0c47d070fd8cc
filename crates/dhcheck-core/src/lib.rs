//! `dhcheck-core`: Diffie-Hellman domain parameter and key validation.
//!
//! This crate is the audit target: zero network, zero async, no I/O beyond
//! the optional config loader. Every entry point takes immutable references
//! and returns `Ok(report)` (empty means accepted) or a fatal [`DhError`]
//! after which nothing about the input may be trusted.
//!
//! Primality testing on untrusted moduli is bounded by
//! [`SizePolicy::max_validation_bits`], enforced before any test runs.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod report;

pub mod params;
pub mod size_policy;

pub mod groups;
pub mod primality;

pub mod basic;
pub mod full;

pub mod private_key;
pub mod public_key;

pub mod pairwise;

pub mod config;

pub use basic::validate_params_basic;
pub use config::{
    SharedExplicitValidator, SharedParameterValidator, ValidationMode, ValidatorConfig,
};
pub use error::DhError;
pub use full::{
    validate_params_full, CertifiedValidator, ExplicitDomainValidator, GeneralValidator,
    ParameterValidator,
};
pub use groups::{GroupIdentity, GroupRecognizer, NamedGroup, NoNamedGroups, StandardGroups};
pub use pairwise::{check_pairwise_consistency, KeyDerivation, ModExpDerivation};
pub use params::{DomainParameters, KeyPair, PrivateKey};
pub use primality::{MillerRabin, Primality, PrimalityTester, DEFAULT_PRIMALITY_ROUNDS};
pub use private_key::validate_private_key;
pub use public_key::{
    validate_public_key, validate_public_key_full, validate_public_key_partial, PublicKeyProfile,
};
pub use report::{ValidationFlag, ValidationReport};
pub use size_policy::{
    SizeClass, SizePolicy, DEFAULT_MAX_GENERATION_BITS, DEFAULT_MAX_VALIDATION_BITS,
    DEFAULT_MIN_MODULUS_BITS,
};
