//! Highlight engine
//!
//! Applies every rule of a `RuleSet` to one line of text. Each rule sweeps
//! the line independently from left to right; the engine keeps no state
//! between calls.

use std::ops::Range;

use super::rules::{Rule, RuleSet};
use super::style::{StyleRun, StyledSpan, TextStyle};

/// Highlight a single line of text
///
/// Returns one span per match, grouped by rule in rule-set order and by
/// position within each rule. Spans of later rules take precedence where
/// they overlap earlier ones (see [`flatten`]).
pub fn highlight(line: &str, rules: &RuleSet) -> Vec<StyledSpan> {
    let mut spans = Vec::new();
    if line.is_empty() {
        return spans;
    }

    for rule in rules {
        scan_rule(line, rule, &mut spans);
    }

    spans
}

/// Collect every non-overlapping match of one rule
fn scan_rule(line: &str, rule: &Rule, spans: &mut Vec<StyledSpan>) {
    let mut pos = 0;

    while pos <= line.len() {
        let Some((matched, styled)) = find_at(line, rule, pos) else {
            break;
        };

        if let Some(range) = styled.clone().filter(|r| !r.is_empty()) {
            spans.push(StyledSpan::new(range.start, range.len(), rule.style()));
        }

        // Text after the highlight group is context, not consumed
        let resume = styled.map_or(matched.end, |r| r.end);
        if resume > matched.start {
            pos = resume;
        } else {
            // Empty match: step over one character
            match line[matched.start..].chars().next() {
                Some(ch) => pos = matched.start + ch.len_utf8(),
                None => break,
            }
        }
    }
}

/// Find the next match of `rule` at or after `pos`
///
/// Returns the whole match range and the range that receives the style.
/// The styled range is `None` when the rule's highlight group did not take
/// part in the match.
fn find_at(line: &str, rule: &Rule, pos: usize) -> Option<(Range<usize>, Option<Range<usize>>)> {
    match rule.highlight_group() {
        None => rule
            .regex()
            .find_at(line, pos)
            .map(|m| (m.range(), Some(m.range()))),
        Some(group) => {
            let caps = rule.regex().captures_at(line, pos)?;
            let whole = caps.get(0)?.range();
            Some((whole, caps.get(group).map(|g| g.range())))
        }
    }
}

/// Resolve overlapping spans into non-overlapping style runs
///
/// Spans are overlaid in order, so a later span's attributes win and the
/// attributes it leaves unset show through from earlier spans. Ranges no
/// span styles are left out, and neighbouring runs with the same style are
/// merged.
pub fn flatten(spans: &[StyledSpan]) -> Vec<StyleRun> {
    let mut bounds: Vec<usize> = spans
        .iter()
        .filter(|s| !s.is_empty())
        .flat_map(|s| [s.start, s.end()])
        .collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut runs: Vec<StyleRun> = Vec::new();
    for pair in bounds.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let style = spans
            .iter()
            .filter(|s| !s.is_empty() && s.start <= start && s.end() >= end)
            .fold(TextStyle::default(), |acc, s| acc.overlay(s.style));
        if style.is_unset() {
            continue;
        }

        match runs.last_mut() {
            Some(last) if last.end == start && last.style == style => last.end = end,
            _ => runs.push(StyleRun { start, end, style }),
        }
    }

    runs
}
