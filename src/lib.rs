//! rulelight - rule-driven syntax highlighting
//!
//! Highlights text one line at a time using an ordered list of regex rules.
//! The rules are data: a rule-definition document can replace them at
//! runtime, and a document that fails to load never disturbs the rules
//! already in use.
//!
//! ```no_run
//! use rulelight::{Highlighter, RuleFormat};
//!
//! let highlighter = Highlighter::new();
//! let spans = highlighter.highlight("int x = 1;");
//! assert_eq!(spans[0].len, 3);
//!
//! let doc = br#"
//! [[rule]]
//! color = "green"
//! pattern = '#.*'
//! "#;
//! highlighter.load_rules(doc, RuleFormat::Toml, "comments.toml").unwrap();
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod syntax;
pub mod terminal;

pub use error::{Error, LoadError, RecordField, Result};
pub use syntax::{
    Color, FontWeight, Highlighter, LoadReport, Rule, RuleFormat, RuleSet, RuleStore, StyleRun,
    StyledSpan, TextStyle,
};
