use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::category::CategoryDefinition;
use crate::error::{Error, Result};
use crate::types::normalize_label;

/// Configuration for one reconstruction run
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Canonical keys of the bills to reconstruct, in watchlist order
    pub tracked_bills: Vec<String>,
    /// Topical category definitions
    pub categories: Vec<CategoryDefinition>,
    /// When set, meetings before this date are dropped from the output
    pub as_of: Option<NaiveDate>,
    /// Cap on the number of bills processed
    pub limit: Option<usize>,
}

impl Config {
    pub fn new(tracked_bills: Vec<String>) -> Self {
        Config {
            tracked_bills,
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.tracked_bills.is_empty() {
            return Err(Error::Config(
                "no tracked bills: supply a watchlist or --bills".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(default)]
    terms: Vec<String>,
    #[serde(default = "default_category_threshold")]
    threshold: f64,
}

fn default_category_threshold() -> f64 {
    0.1
}

#[derive(Debug, Deserialize)]
struct RawWatchlist {
    #[serde(default)]
    bills: Vec<String>,
    #[serde(default)]
    categories: HashMap<String, RawCategory>,
}

/// Builder for creating configurations
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one raw bill label; labels that fail to normalize are skipped
    /// with a warning
    pub fn add_bill(mut self, raw: impl AsRef<str>) -> Self {
        let key = normalize_label(raw.as_ref());
        if key.is_empty() {
            warn!(label = raw.as_ref(), "skipping unrecognized bill label");
        } else if !self.config.tracked_bills.contains(&key) {
            self.config.tracked_bills.push(key);
        }
        self
    }

    /// Add raw bill labels in bulk
    pub fn bills<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            self = self.add_bill(label);
        }
        self
    }

    pub fn categories(mut self, categories: Vec<CategoryDefinition>) -> Self {
        self.config.categories = categories;
        self
    }

    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.config.as_of = Some(date);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    /// Merge a YAML watchlist file (bills plus category definitions)
    pub fn watchlist<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let raw: RawWatchlist = serde_yaml::from_str(&contents)?;
        self = self.bills(raw.bills);
        // BTreeMap-like stable order for deterministic category precedence
        let mut names: Vec<&String> = raw.categories.keys().collect();
        names.sort();
        for name in names {
            let raw_category = &raw.categories[name];
            self.config.categories.push(CategoryDefinition {
                name: name.clone(),
                terms: raw_category.terms.clone(),
                threshold: raw_category.threshold,
            });
        }
        Ok(self)
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
