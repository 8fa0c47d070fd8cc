//! Named-group recognition.
//!
//! A recognized group is trusted without primality testing, so the
//! recognizer is a trust boundary: it must only ever return
//! [`GroupIdentity::Named`] for parameters that are bit-for-bit equal to a
//! pre-vetted group. Recognition is injected through [`GroupRecognizer`]
//! so callers choose what they trust and tests can substitute it.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::params::DomainParameters;

/// RFC 3526 MODP group 14 modulus (2048-bit safe prime), big-endian.
const MODP_2048_P: [u8; 256] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xC9, 0x0F, 0xDA, 0xA2,
    0x21, 0x68, 0xC2, 0x34, 0xC4, 0xC6, 0x62, 0x8B, 0x80, 0xDC, 0x1C, 0xD1,
    0x29, 0x02, 0x4E, 0x08, 0x8A, 0x67, 0xCC, 0x74, 0x02, 0x0B, 0xBE, 0xA6,
    0x3B, 0x13, 0x9B, 0x22, 0x51, 0x4A, 0x08, 0x79, 0x8E, 0x34, 0x04, 0xDD,
    0xEF, 0x95, 0x19, 0xB3, 0xCD, 0x3A, 0x43, 0x1B, 0x30, 0x2B, 0x0A, 0x6D,
    0xF2, 0x5F, 0x14, 0x37, 0x4F, 0xE1, 0x35, 0x6D, 0x6D, 0x51, 0xC2, 0x45,
    0xE4, 0x85, 0xB5, 0x76, 0x62, 0x5E, 0x7E, 0xC6, 0xF4, 0x4C, 0x42, 0xE9,
    0xA6, 0x37, 0xED, 0x6B, 0x0B, 0xFF, 0x5C, 0xB6, 0xF4, 0x06, 0xB7, 0xED,
    0xEE, 0x38, 0x6B, 0xFB, 0x5A, 0x89, 0x9F, 0xA5, 0xAE, 0x9F, 0x24, 0x11,
    0x7C, 0x4B, 0x1F, 0xE6, 0x49, 0x28, 0x66, 0x51, 0xEC, 0xE4, 0x5B, 0x3D,
    0xC2, 0x00, 0x7C, 0xB8, 0xA1, 0x63, 0xBF, 0x05, 0x98, 0xDA, 0x48, 0x36,
    0x1C, 0x55, 0xD3, 0x9A, 0x69, 0x16, 0x3F, 0xA8, 0xFD, 0x24, 0xCF, 0x5F,
    0x83, 0x65, 0x5D, 0x23, 0xDC, 0xA3, 0xAD, 0x96, 0x1C, 0x62, 0xF3, 0x56,
    0x20, 0x85, 0x52, 0xBB, 0x9E, 0xD5, 0x29, 0x07, 0x70, 0x96, 0x96, 0x6D,
    0x67, 0x0C, 0x35, 0x4E, 0x4A, 0xBC, 0x98, 0x04, 0xF1, 0x74, 0x6C, 0x08,
    0xCA, 0x18, 0x21, 0x7C, 0x32, 0x90, 0x5E, 0x46, 0x2E, 0x36, 0xCE, 0x3B,
    0xE3, 0x9E, 0x77, 0x2C, 0x18, 0x0E, 0x86, 0x03, 0x9B, 0x27, 0x83, 0xA2,
    0xEC, 0x07, 0xA2, 0x8F, 0xB5, 0xC5, 0x5D, 0xF0, 0x6F, 0x4C, 0x52, 0xC9,
    0xDE, 0x2B, 0xCB, 0xF6, 0x95, 0x58, 0x17, 0x18, 0x39, 0x95, 0x49, 0x7C,
    0xEA, 0x95, 0x6A, 0xE5, 0x15, 0xD2, 0x26, 0x18, 0x98, 0xFA, 0x05, 0x10,
    0x15, 0x72, 0x8E, 0x5A, 0x8A, 0xAC, 0xAA, 0x68, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF,
];

/// Generator shared by the RFC 3526 MODP groups.
const MODP_GENERATOR: u32 = 2;

/// Result of named-group recognition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupIdentity {
    /// Not a pre-vetted group; full validation is required.
    Unknown,
    /// Matches the named group with this identifier.
    Named(String),
}

impl GroupIdentity {
    /// Returns `true` for [`GroupIdentity::Named`].
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

/// Maps domain parameters to a named group, or [`GroupIdentity::Unknown`].
pub trait GroupRecognizer {
    /// Identify `params`.
    fn recognize_named_group(&self, params: &DomainParameters) -> GroupIdentity;
}

impl<T: GroupRecognizer + ?Sized> GroupRecognizer for &T {
    fn recognize_named_group(&self, params: &DomainParameters) -> GroupIdentity {
        (**self).recognize_named_group(params)
    }
}

/// A pre-vetted parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedGroup {
    name: String,
    params: DomainParameters,
}

impl NamedGroup {
    /// Register `params` under `name`.
    ///
    /// Only pass parameters that were validated out of band: anything
    /// matching them will skip primality testing.
    #[must_use]
    pub fn new(name: impl Into<String>, params: DomainParameters) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// RFC 3526 group 14: 2048-bit safe prime, `g = 2`, `q = (p-1)/2`.
    #[must_use]
    pub fn modp_2048() -> Self {
        let p = BigUint::from_bytes_be(&MODP_2048_P);
        let q = &p >> 1usize;
        let params =
            DomainParameters::new(p, BigUint::from(MODP_GENERATOR)).with_subgroup_order(q);
        Self::new("modp_2048", params)
    }

    /// Group identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group's domain parameters.
    #[must_use]
    pub const fn parameters(&self) -> &DomainParameters {
        &self.params
    }

    /// Exact match on `p` and `g`; a caller-supplied `q` or `j` must also
    /// agree with the group.
    fn matches(&self, candidate: &DomainParameters) -> bool {
        if candidate.p() != self.params.p() || candidate.g() != self.params.g() {
            return false;
        }
        match (candidate.q(), self.params.q()) {
            (Some(q), Some(expected)) if q != expected => return false,
            (Some(_), None) => return false,
            _ => {}
        }
        match (candidate.j(), self.params.q()) {
            (Some(j), Some(q)) if !q.is_zero() && !self.params.p().is_zero() => {
                let (cofactor, remainder) = (self.params.p() - BigUint::one()).div_rem(q);
                remainder.is_zero() && *j == cofactor
            }
            (Some(_), _) => false,
            (None, _) => true,
        }
    }
}

/// Recognizer backed by a fixed list of named groups.
///
/// [`Default`] holds the built-in groups; [`StandardGroups::with_group`]
/// registers more.
#[derive(Clone, Debug)]
pub struct StandardGroups {
    groups: Vec<NamedGroup>,
}

impl StandardGroups {
    /// A registry with no groups at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self { groups: Vec::new() }
    }

    /// Add a pre-vetted group.
    #[must_use]
    pub fn with_group(mut self, group: NamedGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Registered groups.
    #[must_use]
    pub fn groups(&self) -> &[NamedGroup] {
        &self.groups
    }

    /// Look up a registered group by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&NamedGroup> {
        self.groups.iter().find(|group| group.name == name)
    }
}

impl Default for StandardGroups {
    fn default() -> Self {
        Self::empty().with_group(NamedGroup::modp_2048())
    }
}

impl GroupRecognizer for StandardGroups {
    fn recognize_named_group(&self, params: &DomainParameters) -> GroupIdentity {
        self.groups
            .iter()
            .find(|group| group.matches(params))
            .map_or(GroupIdentity::Unknown, |group| {
                GroupIdentity::Named(group.name.clone())
            })
    }
}

/// Recognizer that trusts nothing. Every input gets full validation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNamedGroups;

impl GroupRecognizer for NoNamedGroups {
    fn recognize_named_group(&self, _params: &DomainParameters) -> GroupIdentity {
        GroupIdentity::Unknown
    }
}
