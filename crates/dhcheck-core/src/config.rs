//! Validator configuration, stored as plain JSON.
//!
//! The strategy is chosen once, when the configuration is turned into a
//! validator, and never switched per call.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DhError;
use crate::full::{CertifiedValidator, ExplicitDomainValidator, GeneralValidator, ParameterValidator};
use crate::primality::{MillerRabin, DEFAULT_PRIMALITY_ROUNDS};
use crate::size_policy::SizePolicy;

// ── Strategy selection ─────────────────────────────────────────────

/// Which full-validation strategy to build.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// Built-in subgroup, primality and safe-prime checks.
    #[default]
    General,
    /// Delegate explicit validation to a certified routine.
    Certified,
}

/// A certified routine that can be shared across threads.
pub type SharedExplicitValidator = Box<dyn ExplicitDomainValidator + Send + Sync>;

/// A built validator that can be shared across threads.
pub type SharedParameterValidator = Box<dyn ParameterValidator + Send + Sync>;

// ── Configuration ──────────────────────────────────────────────────

/// Validator settings. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Modulus size thresholds.
    #[serde(default)]
    pub size_policy: SizePolicy,

    /// Miller-Rabin rounds for the general strategy (at least 1).
    #[serde(default = "default_primality_rounds")]
    pub primality_rounds: usize,

    /// Strategy to build.
    #[serde(default)]
    pub mode: ValidationMode,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            size_policy: SizePolicy::default(),
            primality_rounds: default_primality_rounds(),
            mode: ValidationMode::default(),
        }
    }
}

const fn default_primality_rounds() -> usize {
    DEFAULT_PRIMALITY_ROUNDS
}

impl ValidatorConfig {
    /// Parse and check a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Config`] on malformed JSON or inconsistent values.
    pub fn from_json(json: &str) -> Result<Self, DhError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DhError::Config(format!("malformed validator config: {e}")))?;
        config.check()?;
        Ok(config)
    }

    /// Load from a JSON file.
    ///
    /// A missing file yields [`Default::default()`]. A corrupt file is an
    /// error, never a fallback to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Config`] if the file cannot be read or parsed, or
    /// holds inconsistent values.
    pub fn load(path: &Path) -> Result<Self, DhError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no validator config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(DhError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Check cross-field consistency.
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Config`] for a bad size policy or zero rounds.
    pub fn check(&self) -> Result<(), DhError> {
        self.size_policy.check()?;
        MillerRabin::new(self.primality_rounds)?;
        Ok(())
    }

    /// Build the configured strategy.
    ///
    /// `certified` is required in [`ValidationMode::Certified`] and ignored
    /// in [`ValidationMode::General`].
    ///
    /// # Errors
    ///
    /// Returns [`DhError::Config`] for inconsistent values or a certified
    /// mode with no routine to delegate to.
    pub fn build_validator(
        &self,
        certified: Option<SharedExplicitValidator>,
    ) -> Result<SharedParameterValidator, DhError> {
        self.size_policy.check()?;
        match self.mode {
            ValidationMode::General => {
                if certified.is_some() {
                    tracing::warn!("certified routine supplied but general mode configured, ignoring it");
                }
                let primality = MillerRabin::new(self.primality_rounds)?;
                Ok(Box::new(GeneralValidator::with_primality(
                    self.size_policy,
                    primality,
                )))
            }
            ValidationMode::Certified => {
                let delegate = certified.ok_or_else(|| {
                    DhError::Config("certified mode requires an explicit domain validator".into())
                })?;
                Ok(Box::new(CertifiedValidator::new(self.size_policy, delegate)))
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
