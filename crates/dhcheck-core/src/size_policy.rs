//! Modulus size policy.
//!
//! Three distinct ceilings/floors govern the bit length of `p`:
//!
//! | Threshold | Default | Enforced by |
//! |---|---|---|
//! | minimum security size | 512 | basic validator (flag) |
//! | generation ceiling | 10 000 | basic validator (flag) |
//! | validation ceiling | 32 768 | full validator, **before** any primality test |
//!
//! The validation ceiling is always strictly larger than the generation
//! ceiling. It bounds the worst-case cost of primality testing on attacker
//! supplied moduli.

use serde::{Deserialize, Serialize};

use crate::error::DhError;

/// Smallest modulus accepted for key agreement, in bits.
pub const DEFAULT_MIN_MODULUS_BITS: u32 = 512;

/// Largest modulus this stack will generate or use for key agreement, in bits.
pub const DEFAULT_MAX_GENERATION_BITS: u32 = 10_000;

/// Largest modulus the full validator will run primality tests on, in bits.
pub const DEFAULT_MAX_VALIDATION_BITS: u32 = 32_768;

/// Outcome of [`SizePolicy::classify_size`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    /// Below the minimum security size.
    TooSmall,
    /// Above the generation ceiling but still within the validation ceiling.
    TooLargeForGeneration,
    /// Above the validation ceiling; primality testing must not run.
    TooLargeForValidation,
    /// Within all bounds.
    Ok,
}

/// Bit-length thresholds for the modulus `p`.
///
/// Every constructor enforces
/// `1 <= min_modulus_bits <= max_generation_bits < max_validation_bits`:
/// [`SizePolicy::new`] directly, deserialization through
/// [`SizePolicy::check`]. A policy that violates the ordering cannot exist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSizePolicy")]
pub struct SizePolicy {
    min_modulus_bits: u32,
    max_generation_bits: u32,
    max_validation_bits: u32,
}

/// Unchecked wire form of [`SizePolicy`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSizePolicy {
    #[serde(default = "default_min")]
    min_modulus_bits: u32,
    #[serde(default = "default_generation")]
    max_generation_bits: u32,
    #[serde(default = "default_validation")]
    max_validation_bits: u32,
}

impl TryFrom<RawSizePolicy> for SizePolicy {
    type Error = DhError;

    fn try_from(raw: RawSizePolicy) -> Result<Self, Self::Error> {
        Self::new(
            raw.min_modulus_bits,
            raw.max_generation_bits,
            raw.max_validation_bits,
        )
    }
}

const fn default_min() -> u32 {
    DEFAULT_MIN_MODULUS_BITS
}
const fn default_generation() -> u32 {
    DEFAULT_MAX_GENERATION_BITS
}
const fn default_validation() -> u32 {
    DEFAULT_MAX_VALIDATION_BITS
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            min_modulus_bits: DEFAULT_MIN_MODULUS_BITS,
            max_generation_bits: DEFAULT_MAX_GENERATION_BITS,
            max_validation_bits: DEFAULT_MAX_VALIDATION_BITS,
        }
    }
}

impl SizePolicy {
    /// Create a policy with explicit thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Config`] unless
    /// `1 <= min_modulus_bits <= max_generation_bits < max_validation_bits`.
    pub fn new(
        min_modulus_bits: u32,
        max_generation_bits: u32,
        max_validation_bits: u32,
    ) -> Result<Self, DhError> {
        let policy = Self {
            min_modulus_bits,
            max_generation_bits,
            max_validation_bits,
        };
        policy.check()?;
        Ok(policy)
    }

    /// Minimum security size in bits.
    #[must_use]
    pub const fn min_modulus_bits(&self) -> u32 {
        self.min_modulus_bits
    }

    /// Generation ceiling in bits.
    #[must_use]
    pub const fn max_generation_bits(&self) -> u32 {
        self.max_generation_bits
    }

    /// Validation ceiling in bits.
    #[must_use]
    pub const fn max_validation_bits(&self) -> u32 {
        self.max_validation_bits
    }

    /// Verify the threshold ordering.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Config`] describing the first violated bound.
    pub fn check(&self) -> Result<(), DhError> {
        if self.min_modulus_bits == 0 {
            return Err(DhError::Config(
                "minimum modulus size must be at least 1 bit".into(),
            ));
        }
        if self.min_modulus_bits > self.max_generation_bits {
            return Err(DhError::Config(format!(
                "minimum modulus size ({}) exceeds generation ceiling ({})",
                self.min_modulus_bits, self.max_generation_bits
            )));
        }
        if self.max_validation_bits <= self.max_generation_bits {
            return Err(DhError::Config(format!(
                "validation ceiling ({}) must be larger than generation ceiling ({})",
                self.max_validation_bits, self.max_generation_bits
            )));
        }
        Ok(())
    }

    /// Classify a modulus bit length. Pure and total.
    ///
    /// The validation ceiling is tested before the generation ceiling so an
    /// oversized modulus is always reported as `TooLargeForValidation`.
    #[must_use]
    pub const fn classify_size(&self, bits: u32) -> SizeClass {
        if bits > self.max_validation_bits {
            SizeClass::TooLargeForValidation
        } else if bits > self.max_generation_bits {
            SizeClass::TooLargeForGeneration
        } else if bits < self.min_modulus_bits {
            SizeClass::TooSmall
        } else {
            SizeClass::Ok
        }
    }

    /// Whether `bits` is below the minimum security size.
    #[must_use]
    pub const fn is_too_small(&self, bits: u32) -> bool {
        bits < self.min_modulus_bits
    }

    /// Whether `bits` exceeds the generation ceiling.
    #[must_use]
    pub const fn exceeds_generation(&self, bits: u32) -> bool {
        bits > self.max_generation_bits
    }

    /// Whether `bits` exceeds the validation ceiling.
    #[must_use]
    pub const fn exceeds_validation(&self, bits: u32) -> bool {
        bits > self.max_validation_bits
    }
}

/// Bit length of a big integer, saturating at `u32::MAX`.
pub(crate) fn bit_length(n: &num_bigint::BigUint) -> u32 {
    u32::try_from(n.bits()).unwrap_or(u32::MAX)
}
