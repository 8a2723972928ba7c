//! Host-facing highlighter
//!
//! A `Highlighter` is owned by the document it highlights. The host calls
//! `highlight` for each changed line and `load_rules` when the user picks a
//! new rule-definition document; both go straight through to the store,
//! loader and engine.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;

use super::engine;
use super::loader::{self, LoadReport, RuleFormat};
use super::rules::RuleSet;
use super::store::{default_rule_set, RuleStore};
use super::style::{StyleRun, StyledSpan};
use crate::error::LoadError;

/// Rule-driven line highlighter
#[derive(Debug)]
pub struct Highlighter {
    store: RuleStore,
    /// Set once the empty-rule-set notice has been logged
    empty_notice: AtomicBool,
}

impl Highlighter {
    /// Create a highlighter using the built-in default rules
    pub fn new() -> Self {
        Self::with_rules(default_rule_set())
    }

    /// Create a highlighter using the given rules
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            store: RuleStore::with_rules(rules),
            empty_notice: AtomicBool::new(false),
        }
    }

    /// Styled spans for one line, in rule order
    pub fn highlight(&self, line: &str) -> Vec<StyledSpan> {
        let rules = self.store.get_active();
        if rules.is_empty() && !self.empty_notice.swap(true, Ordering::Relaxed) {
            info!("highlighting with an empty rule set");
        }
        engine::highlight(line, &rules)
    }

    /// Resolved, non-overlapping style runs for one line
    pub fn highlight_runs(&self, line: &str) -> Vec<StyleRun> {
        engine::flatten(&self.highlight(line))
    }

    /// Replace the active rules from a rule-definition document
    ///
    /// `source_name` labels the document in errors and log lines. On error
    /// the active rules are unchanged.
    pub fn load_rules(
        &self,
        source: &[u8],
        format: RuleFormat,
        source_name: &str,
    ) -> Result<LoadReport, LoadError> {
        let report = loader::load_rules(&self.store, source, format, source_name)?;
        self.empty_notice.store(false, Ordering::Relaxed);
        Ok(report)
    }

    /// Replace the active rules from a document on disk
    pub fn load_rules_from_path(
        &self,
        path: &Path,
        format: Option<RuleFormat>,
    ) -> Result<LoadReport, LoadError> {
        let report = loader::load_rules_from_path(&self.store, path, format)?;
        self.empty_notice.store(false, Ordering::Relaxed);
        Ok(report)
    }

    /// Snapshot of the active rules
    pub fn current_rule_set(&self) -> Arc<RuleSet> {
        self.store.get_active()
    }

    /// Go back to the built-in default rules
    pub fn reset_rules(&self) {
        self.store.reset();
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
