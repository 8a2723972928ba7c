//! Syntax highlighting module
//!
//! Rules pair a regex with a text style. The active rule set lives in a
//! `RuleStore` and can be swapped wholesale by loading a rule-definition
//! document; the engine applies the rules one line at a time.

mod style;
mod rules;
mod builtin;
mod store;
mod loader;
mod engine;
mod highlighter;

pub use style::{Color, FontWeight, StyleRun, StyledSpan, TextStyle};
pub use rules::{Rule, RuleSet, HIGHLIGHT_GROUP};
pub use store::{default_rule_set, RuleStore};
pub use loader::{load_rules, load_rules_from_path, parse_rules, LoadReport, ParsedRules, RuleFormat};
pub use engine::{flatten, highlight};
pub use highlighter::Highlighter;
