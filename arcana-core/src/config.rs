//! Realm configuration.

use crate::chooser::{Chooser, RngChooser};
use crate::error::MagicResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a [`Realm`](crate::realm::Realm).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    /// Realm name, used in log output.
    pub name: String,
    /// Seed for random choices. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            name: "Realm".to_string(),
            seed: None,
        }
    }
}

impl RealmConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Make every random choice reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> MagicResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> MagicResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> MagicResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The chooser this configuration calls for.
    pub fn chooser(&self) -> Box<dyn Chooser> {
        match self.seed {
            Some(seed) => Box::new(RngChooser::seeded(seed)),
            None => Box::new(RngChooser::from_entropy()),
        }
    }
}
