//! Rate constants for the rule families.
//!
//! Binding and migration rates depend on domain lengths, everything else
//! is a fixed constant. Lengths not found in the table fall back to a
//! default for toeholds and long domains respectively.

use std::fmt;
use std::path::Path;

use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde::Serialize;

use dsd_structure::Domain;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateModel {
    /// Domain lengths (in nucleotides) by label.
    pub lengths: AHashMap<String, u32>,
    pub default_toehold_length: u32,
    pub default_domain_length: u32,
    pub toehold_binding_scale: f64,
    pub migration_constant: f64,
    pub unbinding_rate: f64,
    pub covering_rate: f64,
    pub leak_rate: f64,
}

impl Default for RateModel {
    fn default() -> Self {
        RateModel {
            lengths: AHashMap::default(),
            default_toehold_length: 6,
            default_domain_length: 20,
            toehold_binding_scale: 1. / 2500.,
            migration_constant: 8000.,
            unbinding_rate: 0.1126,
            covering_rate: 699.,
            leak_rate: 0.000003,
        }
    }
}

static DEFAULT_RATES: Lazy<RateModel> = Lazy::new(RateModel::default);

/// Binding rate of a toehold under the default model.
pub fn binding_rate(label: &str) -> f64 {
    DEFAULT_RATES.binding_rate(label)
}

/// Branch migration rate of a domain under the default model.
pub fn migration_rate(label: &str) -> f64 {
    DEFAULT_RATES.migration_rate(label)
}

impl RateModel {
    pub fn with_length(mut self, label: impl Into<String>, length: u32) -> Self {
        self.lengths.insert(label.into(), length);
        self
    }

    /// Length of a domain label, or the default for its kind.
    pub fn length(&self, label: &str, toehold: bool) -> u32 {
        match self.lengths.get(label) {
            Some(&l) => l,
            None if toehold => self.default_toehold_length,
            None => self.default_domain_length,
        }
    }

    pub fn binding_rate(&self, label: &str) -> f64 {
        (self.length(label, true) as f64).log10() * self.toehold_binding_scale
    }

    pub fn migration_rate(&self, label: &str) -> f64 {
        let l = self.length(label, false) as f64;
        self.migration_constant / (l * l)
    }

    pub(crate) fn binding_rate_of(&self, domain: &Domain) -> f64 {
        self.binding_rate(domain.name())
    }

    pub(crate) fn migration_rate_of(&self, domain: &Domain) -> f64 {
        self.migration_rate(domain.name())
    }

    pub fn from_json_str(json: &str) -> Result<Self, RateModelError> {
        serde_json::from_str(json).map_err(RateModelError::Json)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RateModelError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| RateModelError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_json_str(&text)
    }
}

/// Error type for reading a rate configuration.
#[derive(Debug)]
pub enum RateModelError {
    /// The file could not be read.
    Io(String, std::io::Error),

    /// The content is not a valid rate model.
    Json(serde_json::Error),
}

impl fmt::Display for RateModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateModelError::Io(path, e) => write!(f, "cannot read rate file '{path}': {e}"),
            RateModelError::Json(e) => write!(f, "invalid rate model: {e}"),
        }
    }
}

impl std::error::Error for RateModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RateModelError::Io(_, e) => Some(e),
            RateModelError::Json(e) => Some(e),
        }
    }
}
