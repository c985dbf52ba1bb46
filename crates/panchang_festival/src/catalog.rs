//! Festival catalogs: the built-in table and user-supplied TOML files.
//!
//! ```toml
//! [[festival]]
//! id = "ugadi"
//! name_key = "festival.ugadi"
//! tithi = 0
//! masa = 0
//! basis = "sunrise"
//! priority = 1
//!
//! [[sankranti]]
//! id = "bhogi"
//! name_key = "festival.bhogi"
//! sign = 9
//! offset_days = -1
//! priority = 1
//! ```
//!
//! Catalog order is registration order: it breaks ties between festivals
//! of equal priority on the same date.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FestivalError;
use crate::rule::{FestivalRule, SankrantiRule};

const BUILTIN_CATALOG: &str = include_str!("../data/festivals.toml");

/// Validated, immutable set of festival rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FestivalCatalog {
    #[serde(default, rename = "festival")]
    rules: Vec<FestivalRule>,
    #[serde(default, rename = "sankranti")]
    sankranti_rules: Vec<SankrantiRule>,
}

impl FestivalCatalog {
    /// Build a catalog from rule lists, validating every entry.
    pub fn new(
        rules: Vec<FestivalRule>,
        sankranti_rules: Vec<SankrantiRule>,
    ) -> Result<Self, FestivalError> {
        let catalog = Self {
            rules,
            sankranti_rules,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, FestivalError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, FestivalError> {
        let catalog: Self = toml::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> Result<Self, FestivalError> {
        let content = std::fs::read_to_string(path).map_err(|source| FestivalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            rules = catalog.rules.len(),
            sankranti_rules = catalog.sankranti_rules.len(),
            "loaded festival catalog"
        );
        Ok(catalog)
    }

    /// Append `other`'s rules after this catalog's, rejecting duplicate ids.
    pub fn extend(&mut self, other: FestivalCatalog) -> Result<(), FestivalError> {
        let mut merged = self.clone();
        merged.rules.extend(other.rules);
        merged.sankranti_rules.extend(other.sankranti_rules);
        merged.validate()?;
        *self = merged;
        Ok(())
    }

    pub fn rules(&self) -> &[FestivalRule] {
        &self.rules
    }

    pub fn sankranti_rules(&self) -> &[SankrantiRule] {
        &self.sankranti_rules
    }

    pub fn len(&self) -> usize {
        self.rules.len() + self.sankranti_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any rule is keyed on a nakshatra.
    pub fn uses_nakshatra(&self) -> bool {
        self.rules.iter().any(|r| r.nakshatra.is_some())
    }

    fn validate(&self) -> Result<(), FestivalError> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            rule.validate()
                .map_err(|reason| FestivalError::catalog(&rule.id, reason))?;
            if !seen.insert(rule.id.as_str()) {
                return Err(FestivalError::catalog(&rule.id, "duplicate id"));
            }
        }
        for rule in &self.sankranti_rules {
            rule.validate()
                .map_err(|reason| FestivalError::catalog(&rule.id, reason))?;
            if !seen.insert(rule.id.as_str()) {
                return Err(FestivalError::catalog(&rule.id, "duplicate id"));
            }
        }
        Ok(())
    }
}
