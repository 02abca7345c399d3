use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use crate::vocab::DEFAULT_WHITELIST_PATTERNS;

/// Immutable set of substrings. An external-analyzer diagnostic whose message
/// contains any of them is suppressed as a known false positive.
///
/// Built once and shared read-only (`Arc`) across concurrent checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistConfig {
    patterns: Vec<String>,
}

impl WhitelistConfig {
    /// Build from arbitrary patterns. Empty patterns are dropped because they
    /// would match every message.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: normalize(patterns),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn suppresses(&self, message: &str) -> bool {
        self.patterns.iter().any(|p| message.contains(p.as_str()))
    }
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self::from_patterns(DEFAULT_WHITELIST_PATTERNS.iter().copied())
    }
}

fn normalize<I, S>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| p.as_ref().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Memoizes `WhitelistConfig` values by their pattern set so repeated
/// identical caller configurations share one instance.
#[derive(Debug)]
pub struct WhitelistCache {
    entries: Mutex<HashMap<Vec<String>, Arc<WhitelistConfig>>>,
    capacity: usize,
}

impl Default for WhitelistCache {
    fn default() -> Self {
        Self::new(64)
    }
}

impl WhitelistCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn get_or_build<I, S>(&self, patterns: I) -> Arc<WhitelistConfig>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let key = normalize(patterns);
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(hit) = entries.get(&key) {
            return Arc::clone(hit);
        }
        if entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "whitelist cache full, clearing");
            entries.clear();
        }
        let config = Arc::new(WhitelistConfig {
            patterns: key.clone(),
        });
        entries.insert(key, Arc::clone(&config));
        config
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
