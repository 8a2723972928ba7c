//! Built-in rule sets
//!
//! The default grammar is installed whenever a store is created and stays
//! active until a rule-definition document is loaded successfully.

mod cpp;

use super::rules::RuleSet;

/// The built-in fallback rule set
pub fn default_rule_set() -> RuleSet {
    cpp::cpp_rule_set()
}
