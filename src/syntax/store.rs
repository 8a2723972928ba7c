//! Active rule set storage
//!
//! The store publishes the active `RuleSet` as an immutable `Arc` snapshot.
//! A reload builds a complete new set off to the side and swaps the pointer,
//! so readers always see either the old set or the new one in full.

use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use super::builtin;
use super::rules::RuleSet;

/// Holder of the currently active rule set
#[derive(Debug)]
pub struct RuleStore {
    active: RwLock<Arc<RuleSet>>,
}

impl RuleStore {
    /// Create a store holding the built-in default rules
    pub fn new() -> Self {
        Self::with_rules(default_rule_set())
    }

    /// Create a store holding the given rules
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            active: RwLock::new(Arc::new(rules)),
        }
    }

    /// Snapshot of the active rule set
    pub fn get_active(&self) -> Arc<RuleSet> {
        // The guarded value is a complete Arc even if a writer panicked
        let guard = self.active.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Install a new rule set, returning the one it replaced
    pub fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let next = Arc::new(rules);
        let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Reinstall the built-in default rules
    pub fn reset(&self) {
        let previous = self.replace(default_rule_set());
        info!("restored default rules (replaced {} rules)", previous.len());
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in fallback rule set
pub fn default_rule_set() -> RuleSet {
    builtin::default_rule_set()
}
