//! Page naming options.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::page::{CounterPageNamer, DEFAULT_EXTENSION, HashPageNamer, PageNamer};

/// How colliding Base names are told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NamingStrategy {
    /// `-1`, `-2`, ... in first-request order.
    #[default]
    Counter,
    /// Digest of the parameter list; order-independent.
    Hash,
}

impl NamingStrategy {
    /// A fresh namer for this strategy using `extension`.
    pub fn build(self, extension: &str) -> Box<dyn PageNamer> {
        match self {
            NamingStrategy::Counter => Box::new(CounterPageNamer::with_extension(extension)),
            NamingStrategy::Hash => Box::new(HashPageNamer::with_extension(extension)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NamingStrategy::Counter => "counter",
            NamingStrategy::Hash => "hash",
        }
    }
}

impl fmt::Display for NamingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for turning descriptors into page names and links.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NamingOptions {
    /// Collision strategy
    pub strategy: NamingStrategy,
    /// Prepended to file names to form links (e.g. `api/` or `/docs/`)
    pub url_prefix: String,
    /// Appended to every file name, including the dot
    pub extension: String,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            strategy: NamingStrategy::Counter,
            url_prefix: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl NamingOptions {
    pub fn with_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// A fresh namer as configured.
    pub fn namer(&self) -> Box<dyn PageNamer> {
        self.strategy.build(&self.extension)
    }
}
