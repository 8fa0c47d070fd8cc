//! Fixtures shared by the security suite.

use std::sync::atomic::{AtomicUsize, Ordering};

use dhcheck_core::{
    DhError, DomainParameters, MillerRabin, Primality, PrimalityTester, SizePolicy,
};
use num_bigint::BigUint;

/// Primality tester that counts invocations and forwards to Miller-Rabin.
#[derive(Default)]
pub struct CountingPrimality {
    calls: AtomicUsize,
    inner: MillerRabin,
}

impl CountingPrimality {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PrimalityTester for CountingPrimality {
    fn test_primality(&self, n: &BigUint) -> Result<Primality, DhError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.test_primality(n)
    }
}

/// Thresholds small enough for toy groups: 2 / 64 / 128 bits.
pub fn toy_policy() -> SizePolicy {
    SizePolicy::new(2, 64, 128).unwrap()
}

/// `p = 2579 = 2 * 1289 + 1`, `g = 4` generates the order-1289 subgroup.
pub fn toy_safe_prime() -> DomainParameters {
    DomainParameters::new(BigUint::from(2579u32), BigUint::from(4u32))
}

/// `p = 67`, `q = 11`, `g = 64`, `j = 6`.
pub fn toy_subgroup() -> DomainParameters {
    DomainParameters::new(BigUint::from(67u32), BigUint::from(64u32))
        .with_subgroup_order(BigUint::from(11u32))
        .with_cofactor(BigUint::from(6u32))
}

/// An odd modulus of exactly `bits` bits.
pub fn odd_modulus(bits: usize) -> BigUint {
    (BigUint::from(1u32) << (bits - 1)) + BigUint::from(1u32)
}
