//! Probabilistic primality testing capability.
//!
//! Validators never call a primality routine directly; they go through
//! [`PrimalityTester`] so the backing implementation can be swapped (or
//! counted, in tests) without touching validation logic.

use num_bigint::prime::probably_prime;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::DhError;

/// Default Miller-Rabin round count. `probably_prime` adds a Baillie-PSW
/// Lucas test on top, so the combined error bound is far below 2^-40.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 20;

/// Decisive primality verdict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primality {
    /// Probably prime.
    Prime,
    /// Definitely composite.
    Composite,
}

impl Primality {
    /// Returns `true` for [`Primality::Prime`].
    #[must_use]
    pub const fn is_prime(self) -> bool {
        matches!(self, Self::Prime)
    }
}

/// Primality testing backend.
///
/// `Err` is the "indeterminate" outcome and is always fatal to the calling
/// validator; it must never be read as either verdict. Implementations are
/// expected to take time that depends only on the bit length of `n`.
pub trait PrimalityTester {
    /// Test `n` for primality.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::PrimalityIndeterminate`] when no verdict could be
    /// reached.
    fn test_primality(&self, n: &BigUint) -> Result<Primality, DhError>;
}

impl<T: PrimalityTester + ?Sized> PrimalityTester for &T {
    fn test_primality(&self, n: &BigUint) -> Result<Primality, DhError> {
        (**self).test_primality(n)
    }
}

/// Miller-Rabin plus Lucas, via `num-bigint-dig`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MillerRabin {
    rounds: usize,
}

impl MillerRabin {
    /// Tester running `rounds` Miller-Rabin rounds.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Config`] if `rounds` is zero.
    pub fn new(rounds: usize) -> Result<Self, DhError> {
        if rounds == 0 {
            return Err(DhError::Config(
                "primality testing needs at least one round".into(),
            ));
        }
        Ok(Self { rounds })
    }

    /// Configured round count.
    #[must_use]
    pub const fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Default for MillerRabin {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_PRIMALITY_ROUNDS,
        }
    }
}

impl PrimalityTester for MillerRabin {
    fn test_primality(&self, n: &BigUint) -> Result<Primality, DhError> {
        if n.is_zero() {
            return Ok(Primality::Composite);
        }
        if probably_prime(n, self.rounds) {
            Ok(Primality::Prime)
        } else {
            Ok(Primality::Composite)
        }
    }
}
