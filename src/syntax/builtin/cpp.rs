//! C++ default rule set

use crate::syntax::rules::{Rule, RuleSet};
use crate::syntax::style::{Color, TextStyle};

/// Keywords highlighted by the default grammar, in rule order
pub const KEYWORDS: [&str; 29] = [
    "char", "class", "const", "double", "enum", "explicit", "friend", "inline", "int", "long",
    "namespace", "operator", "private", "protected", "public", "short", "signals", "signed",
    "slots", "static", "struct", "template", "typedef", "typename", "union", "unsigned", "virtual",
    "void", "volatile",
];

/// Color of function-call names
pub const FUNCTION_COLOR: Color = Color::Rgb(175, 207, 219);

/// Create the C++ rule set
///
/// Order matters: comments come last so they override anything matched
/// inside them. Each style builds on the previous one, so strings and
/// function names keep the bold weight set for class names.
pub fn cpp_rule_set() -> RuleSet {
    let mut rules = Vec::new();

    // Keywords
    let keyword_style = TextStyle::fg(Color::DarkBlue).with_bold();
    for keyword in KEYWORDS {
        push(&mut rules, keyword, &format!(r"\b{}\b", keyword), keyword_style);
    }

    // Class names
    let class_style = keyword_style.with_color(Color::DarkRed);
    push(&mut rules, "class_name", r"\b[A-Z][A-Za-z0-9_]*\b", class_style);

    // Quoted strings
    let string_style = class_style.with_color(Color::Blue);
    push(&mut rules, "double_quoted", r#"".*?""#, string_style);
    push(&mut rules, "single_quoted", r"'.*?'", string_style);

    // Function calls: the name only, the paren is trailing context
    let function_style = string_style.with_color(FUNCTION_COLOR);
    push(&mut rules, "function_call", r"\b(?P<hl>[A-Za-z0-9_]+)\(", function_style);

    // Line comments
    let comment_style = function_style.with_normal_weight().with_color(Color::LightGray);
    push(&mut rules, "line_comment", r"//.*", comment_style);

    RuleSet::new(Some("C++".to_string()), rules)
}

fn push(rules: &mut Vec<Rule>, name: &str, pattern: &str, style: TextStyle) {
    if let Ok(rule) = Rule::new(pattern, style) {
        rules.push(rule.named(name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::FontWeight;

    #[test]
    fn test_every_builtin_pattern_compiles() {
        let set = cpp_rule_set();
        assert_eq!(set.len(), KEYWORDS.len() + 5);
        assert_eq!(set.name(), Some("C++"));
    }

    #[test]
    fn test_keywords_come_first() {
        let set = cpp_rule_set();
        for (rule, keyword) in set.iter().zip(KEYWORDS) {
            assert_eq!(rule.pattern(), format!(r"\b{}\b", keyword));
            assert_eq!(rule.style(), TextStyle::fg(Color::DarkBlue).with_bold());
        }
    }

    #[test]
    fn test_comment_rule_is_last() {
        let set = cpp_rule_set();
        let last = set.get(set.len() - 1).unwrap();
        assert_eq!(last.name(), Some("line_comment"));
        assert_eq!(last.style().color, Some(Color::LightGray));
        assert_eq!(last.style().weight, Some(FontWeight::Normal));
        assert_eq!(last.style().italic, None);
    }

    #[test]
    fn test_function_rule_styles_name_only() {
        let set = cpp_rule_set();
        let rule = set.iter().find(|r| r.name() == Some("function_call")).unwrap();
        assert!(rule.highlight_group().is_some());
        assert_eq!(rule.style().color, Some(FUNCTION_COLOR));
        assert!(rule.style().is_bold());
    }
}
