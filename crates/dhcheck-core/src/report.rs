//! Accumulating validation reports.
//!
//! Every validator collects *all* failing properties into one
//! [`ValidationReport`] instead of stopping at the first failure. An empty
//! report from a call that returned `Ok` means acceptance.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DhError;

/// A single failed property of domain parameters or keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationFlag {
    /// `p` is even or failed primality testing.
    PNotPrime,
    /// `p` is prime but `(p-1)/2` is not (checked only without `q`).
    PNotSafePrime,
    /// `g` is outside its valid range or does not generate the order-`q` subgroup.
    UnsuitableGenerator,
    /// The generator could not be assessed (certified delegates only).
    UnableToCheckGenerator,
    /// `q` failed primality testing.
    QNotPrime,
    /// `q` does not divide `p - 1`.
    InvalidQValue,
    /// `j` is not equal to `(p-1)/q`.
    InvalidJValue,
    /// `p` is shorter than the minimum security size.
    ModulusTooSmall,
    /// `p` is longer than the generation or validation ceiling.
    ModulusTooLarge,
    /// Public key is below 2.
    PubkeyTooSmall,
    /// Public key is above `p - 2`.
    PubkeyTooLarge,
    /// Public key is not in the order-`q` subgroup.
    PubkeyInvalid,
    /// Private key is zero or too short.
    PrivkeyTooSmall,
    /// Private key is at or above its upper bound.
    PrivkeyTooLarge,
}

impl ValidationFlag {
    /// Stable snake_case identifier, identical to the serde name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PNotPrime => "p_not_prime",
            Self::PNotSafePrime => "p_not_safe_prime",
            Self::UnsuitableGenerator => "unsuitable_generator",
            Self::UnableToCheckGenerator => "unable_to_check_generator",
            Self::QNotPrime => "q_not_prime",
            Self::InvalidQValue => "invalid_q_value",
            Self::InvalidJValue => "invalid_j_value",
            Self::ModulusTooSmall => "modulus_too_small",
            Self::ModulusTooLarge => "modulus_too_large",
            Self::PubkeyTooSmall => "pubkey_too_small",
            Self::PubkeyTooLarge => "pubkey_too_large",
            Self::PubkeyInvalid => "pubkey_invalid",
            Self::PrivkeyTooSmall => "privkey_too_small",
            Self::PrivkeyTooLarge => "privkey_too_large",
        }
    }
}

impl fmt::Display for ValidationFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of flags raised by one validation call.
///
/// Produced fresh per call and owned by the caller; it carries no identity
/// beyond that call. Serializes as a sorted JSON array of flag names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[must_use = "a validation report must be inspected"]
pub struct ValidationReport {
    flags: BTreeSet<ValidationFlag>,
}

impl ValidationReport {
    /// An empty report.
    pub const fn new() -> Self {
        Self {
            flags: BTreeSet::new(),
        }
    }

    /// Raise `flag`. Raising an already-set flag is a no-op.
    pub fn set(&mut self, flag: ValidationFlag) {
        self.flags.insert(flag);
    }

    /// Raise `flag` when `failed` is true.
    pub fn set_if(&mut self, failed: bool, flag: ValidationFlag) {
        if failed {
            self.set(flag);
        }
    }

    /// Fold every flag of `other` into this report.
    pub fn merge(&mut self, other: Self) {
        self.flags.extend(other.flags);
    }

    /// Whether `flag` was raised.
    #[must_use]
    pub fn contains(&self, flag: ValidationFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Raised flags in declaration order.
    pub fn flags(&self) -> impl Iterator<Item = ValidationFlag> + '_ {
        self.flags.iter().copied()
    }

    /// Number of raised flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns `true` if no flag was raised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Alias of [`is_empty`](Self::is_empty) that reads better at call sites.
    #[must_use]
    pub fn is_acceptable(&self) -> bool {
        self.is_empty()
    }

    /// Convert into an exception-style result.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Rejected`] carrying this report if any flag is set.
    pub fn into_result(self) -> Result<(), DhError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DhError::Rejected(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.flags.is_empty() {
            return f.write_str("no flags");
        }
        for (i, flag) in self.flags.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(flag.name())?;
        }
        Ok(())
    }
}

impl FromIterator<ValidationFlag> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationFlag>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
