//! Configuration system for AllocForge.
//!
//! Two documents live here:
//! - [`RuleDocument`]: the canonical JSON form of a rule configuration
//!   (rules plus prioritization weights), used to export and re-import
//!   what users built in the rule editor.
//! - [`AllocatorConfig`]: tuning for the allocator itself, loaded from TOML
//!   or YAML files.
//!
//! # Examples
//!
//! Import a rule document:
//!
//! ```
//! use allocforge_config::RuleDocument;
//!
//! let doc = RuleDocument::from_json_str(r#"{
//!     "rules": [
//!         {"type": "coRun", "tasks": ["T1", "T2"]},
//!         {"type": "loadLimit", "group": "Sales", "maxSlots": 3}
//!     ],
//!     "prioritization": {"priorityWeight": 3, "fairnessWeight": 2, "fulfillmentWeight": 10}
//! }"#).unwrap();
//!
//! assert_eq!(doc.rules.len(), 2);
//! assert_eq!(doc.prioritization.fulfillment_weight, 10);
//! ```
//!
//! Load allocator configuration, using defaults when the file is missing:
//!
//! ```
//! use allocforge_config::AllocatorConfig;
//!
//! let config = AllocatorConfig::load("allocator.toml").unwrap_or_default();
//! assert_eq!(config.fulfillment_baseline, 10);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use allocforge_core::{InvalidRuleHandling, PolicyPreset, PrioritizationPolicy, Rule};


/// Largest accepted term multiplier; keeps milli-point arithmetic far from overflow.
pub const MAX_TERM_MULTIPLIER: u32 = 1_000_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Rules and prioritization weights in their exported form.
///
/// Export followed by import reproduces the same rules, in the same order,
/// with the same weights. A document without a `prioritization` object
/// imports with the balanced preset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDocument {
    #[serde(default)]
    pub rules: Vec<Rule>,

    #[serde(default)]
    pub prioritization: PrioritizationPolicy,
}

impl RuleDocument {
    pub fn new(rules: Vec<Rule>, prioritization: PrioritizationPolicy) -> Self {
        Self {
            rules,
            prioritization,
        }
    }

    /// Parses a document from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a document from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Renders the document as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to a JSON file.
    pub fn write_json_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Appends a rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replaces the weights with a preset.
    pub fn with_preset(mut self, preset: PolicyPreset) -> Self {
        self.prioritization = preset.policy();
        self
    }

    /// Removes and returns the rule at `index`, if present.
    pub fn remove_rule(&mut self, index: usize) -> Option<Rule> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Runs the context-free rule checks (member counts, bounds, group names).
    ///
    /// References to tasks and groups are checked later, against the data
    /// of an actual run.
    pub fn check_rules(&self) -> Result<(), ConfigError> {
        for (index, rule) in self.rules.iter().enumerate() {
            rule.check_shape()
                .map_err(|e| ConfigError::Invalid(format!("rule #{}: {}", index, e)))?;
        }
        Ok(())
    }
}

/// How the allocator picks among eligible workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Highest score, ties to the smallest worker ID.
    #[default]
    BestScore,

    /// Smallest eligible worker ID, scored but not ranked.
    FirstEligible,
}

/// Allocator tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AllocatorConfig {
    /// Points per fulfillment weight unit for a serviceable task.
    pub fulfillment_baseline: u32,

    /// Points per fairness weight unit for a worker with no load.
    pub fairness_scale: u32,

    /// Candidate selection strategy.
    pub selection: SelectionStrategy,

    /// What to do with rules that fail validation.
    pub invalid_rules: InvalidRuleHandling,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            fulfillment_baseline: 10,
            fairness_scale: 10,
            selection: SelectionStrategy::default(),
            invalid_rules: InvalidRuleHandling::default(),
        }
    }
}

impl AllocatorConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fulfillment_baseline > MAX_TERM_MULTIPLIER {
            return Err(ConfigError::Invalid(format!(
                "fulfillment_baseline {} exceeds {}",
                self.fulfillment_baseline, MAX_TERM_MULTIPLIER
            )));
        }
        if self.fairness_scale > MAX_TERM_MULTIPLIER {
            return Err(ConfigError::Invalid(format!(
                "fairness_scale {} exceeds {}",
                self.fairness_scale, MAX_TERM_MULTIPLIER
            )));
        }
        Ok(())
    }

    pub fn with_fulfillment_baseline(mut self, baseline: u32) -> Self {
        self.fulfillment_baseline = baseline;
        self
    }

    pub fn with_fairness_scale(mut self, scale: u32) -> Self {
        self.fairness_scale = scale;
        self
    }

    pub fn with_selection(mut self, selection: SelectionStrategy) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_invalid_rules(mut self, handling: InvalidRuleHandling) -> Self {
        self.invalid_rules = handling;
        self
    }
}
