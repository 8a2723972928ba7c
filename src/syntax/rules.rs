//! Pattern rules for syntax highlighting
//!
//! A rule pairs a compiled regex with the style applied to its matches.
//! Rules are collected into an ordered `RuleSet`; later rules win where
//! their matches overlap earlier ones.

use std::slice;

use regex::Regex;

use super::style::TextStyle;

/// Capture group name that narrows the styled part of a match
pub const HIGHLIGHT_GROUP: &str = "hl";

/// A single-line pattern rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Name for diagnostics
    name: Option<String>,
    /// Compiled regex pattern
    pattern: Regex,
    /// Style applied to matches
    style: TextStyle,
    /// Index of the `hl` capture group, if the pattern has one
    highlight_group: Option<usize>,
}

impl Rule {
    /// Compile a new rule
    pub fn new(pattern: &str, style: TextStyle) -> Result<Self, regex::Error> {
        let pattern = Regex::new(pattern)?;
        let highlight_group = pattern
            .capture_names()
            .position(|name| name == Some(HIGHLIGHT_GROUP));
        Ok(Self {
            name: None,
            pattern,
            style,
            highlight_group,
        })
    }

    /// Builder: attach a diagnostic name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The compiled pattern
    pub fn regex(&self) -> &Regex {
        &self.pattern
    }

    /// Source text of the pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Capture group index whose range is styled instead of the whole match
    pub fn highlight_group(&self) -> Option<usize> {
        self.highlight_group
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern() && self.style == other.style && self.name == other.name
    }
}

impl Eq for Rule {}

/// An ordered, immutable collection of rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Grammar name (e.g. "C++")
    name: Option<String>,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set from rules in priority order
    pub fn new(name: Option<String>, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    /// An empty rule set
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            name: None,
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Color;

    #[test]
    fn test_rule_compiles() {
        let rule = Rule::new(r"\d+", TextStyle::fg(Color::Red)).unwrap();
        assert_eq!(rule.pattern(), r"\d+");
        assert_eq!(rule.style(), TextStyle::fg(Color::Red));
        assert_eq!(rule.highlight_group(), None);
        assert_eq!(rule.name(), None);
    }

    #[test]
    fn test_rule_rejects_invalid_pattern() {
        assert!(Rule::new(r"(unclosed", TextStyle::default()).is_err());
        // No look-around in this regex dialect
        assert!(Rule::new(r"\w+(?=\()", TextStyle::default()).is_err());
    }

    #[test]
    fn test_highlight_group_index() {
        let rule = Rule::new(r"(\s*)(?P<hl>\w+)\(", TextStyle::default()).unwrap();
        assert_eq!(rule.highlight_group(), Some(2));
    }

    #[test]
    fn test_rule_equality() {
        let a = Rule::new(r"\bint\b", TextStyle::default().with_bold()).unwrap();
        let b = Rule::new(r"\bint\b", TextStyle::default().with_bold()).unwrap();
        let c = Rule::new(r"\bint\b", TextStyle::default()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a.clone().named("int"), b);
    }

    #[test]
    fn test_rule_set_order() {
        let set: RuleSet = ["a", "b", "a"]
            .iter()
            .map(|p| Rule::new(p, TextStyle::default()).unwrap())
            .collect();
        let patterns: Vec<_> = set.iter().map(|r| r.pattern()).collect();
        assert_eq!(patterns, vec!["a", "b", "a"]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert!(RuleSet::empty().is_empty());
    }
}
