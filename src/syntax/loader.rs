//! Rule-definition document loading
//!
//! A rule-definition document is a list of `rule` records, each with an
//! optional color, an optional style and a pattern:
//!
//! ```text
//! name = "C++"
//!
//! [[rule]]
//! color = "dark-blue"
//! style = "bold"
//! pattern = '\bint\b'
//! ```
//!
//! The same schema is accepted as JSON. Records with a bad field are skipped
//! and reported; a document whose structure is wrong, or that yields no
//! rules at all, is rejected as a whole and the active rules stay in place.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::rules::{Rule, RuleSet};
use super::store::RuleStore;
use super::style::{Color, TextStyle};
use crate::error::{LoadError, RecordField};

/// Surface syntax of a rule-definition document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleFormat {
    #[default]
    Toml,
    Json,
}

impl RuleFormat {
    /// Guess the format from a file extension
    ///
    /// `.json` is JSON, anything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RuleFormat::Json,
            _ => RuleFormat::Toml,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuleFormat::Toml => "toml",
            RuleFormat::Json => "json",
        }
    }
}

impl FromStr for RuleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "toml" => Ok(RuleFormat::Toml),
            "json" => Ok(RuleFormat::Json),
            other => Err(format!("unknown rule format `{}` (expected toml or json)", other)),
        }
    }
}

impl fmt::Display for RuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candidate rules built from a document, not yet installed
#[derive(Debug)]
pub struct ParsedRules {
    /// Valid records in document order
    pub rules: RuleSet,
    /// One `InvalidRecord` per skipped record
    pub rejected: Vec<LoadError>,
}

/// Outcome of a successful reload
#[derive(Debug)]
pub struct LoadReport {
    /// Grammar name declared by the document
    pub name: Option<String>,
    /// Number of rules now active
    pub loaded: usize,
    /// One `InvalidRecord` per skipped record
    pub rejected: Vec<LoadError>,
}

/// Top-level document shape
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDocument {
    #[serde(default)]
    name: Option<String>,
    rule: Vec<Value>,
}

const RECORD_KEYS: [&str; 4] = ["name", "color", "style", "pattern"];

/// Parse a document into candidate rules without touching any store
pub fn parse_rules(
    source: &[u8],
    format: RuleFormat,
    source_name: &str,
) -> Result<ParsedRules, LoadError> {
    let malformed = |reason: String| LoadError::MalformedDocument {
        source_name: source_name.to_string(),
        reason,
    };

    let text = std::str::from_utf8(source)
        .map_err(|e| malformed(format!("not valid UTF-8: {}", e)))?;

    let document: RawDocument = match format {
        RuleFormat::Toml => {
            toml::from_str(text).map_err(|e| malformed(e.message().to_string()))?
        }
        RuleFormat::Json => serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?,
    };

    let mut rules = Vec::new();
    let mut rejected = Vec::new();

    for (i, value) in document.rule.iter().enumerate() {
        let index = i + 1;
        let record = value
            .as_object()
            .ok_or_else(|| malformed(format!("rule #{} is not a table", index)))?;

        match parse_record(index, record) {
            Ok(rule) => {
                info!(
                    "{}: rule #{} `{}` ({})",
                    source_name,
                    index,
                    rule.pattern(),
                    rule.style()
                );
                rules.push(rule);
            }
            Err(err) => {
                warn!("{}: skipping {}", source_name, err);
                rejected.push(err);
            }
        }
    }

    if rules.is_empty() {
        return Err(LoadError::EmptyResult {
            source_name: source_name.to_string(),
            rejected: rejected.len(),
        });
    }

    Ok(ParsedRules {
        rules: RuleSet::new(document.name, rules),
        rejected,
    })
}

/// Parse a document and install it in `store` on success
///
/// On any fatal error the store keeps the rules it had.
pub fn load_rules(
    store: &RuleStore,
    source: &[u8],
    format: RuleFormat,
    source_name: &str,
) -> Result<LoadReport, LoadError> {
    let parsed = match parse_rules(source, format, source_name) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("keeping current rules: {}", err);
            return Err(err);
        }
    };

    let name = parsed.rules.name().map(str::to_string);
    let loaded = parsed.rules.len();
    store.replace(parsed.rules);
    info!(
        "loaded {} rules from {} ({} skipped)",
        loaded,
        source_name,
        parsed.rejected.len()
    );

    Ok(LoadReport {
        name,
        loaded,
        rejected: parsed.rejected,
    })
}

/// Read a document from disk and install it in `store` on success
///
/// When `format` is `None` it is inferred from the file extension.
pub fn load_rules_from_path(
    store: &RuleStore,
    path: &Path,
    format: Option<RuleFormat>,
) -> Result<LoadReport, LoadError> {
    let source_name = path.display().to_string();
    let source = fs::read(path).map_err(|error| {
        let err = LoadError::SourceUnavailable {
            source_name: source_name.clone(),
            error,
        };
        warn!("keeping current rules: {}", err);
        err
    })?;

    let format = format.unwrap_or_else(|| RuleFormat::from_path(path));
    load_rules(store, &source, format, &source_name)
}

/// Validate one record and compile its rule
fn parse_record(index: usize, record: &Map<String, Value>) -> Result<Rule, LoadError> {
    for key in record.keys() {
        if !RECORD_KEYS.contains(&key.as_str()) {
            debug!("rule #{}: ignoring unknown key `{}`", index, key);
        }
    }

    let name = string_field(index, record, RecordField::Name)?;
    let mut style = TextStyle::default();

    if let Some(color) = string_field(index, record, RecordField::Color)? {
        let color = Color::from_name(color).ok_or_else(|| {
            invalid(
                index,
                RecordField::Color,
                color,
                "expected one of blue, dark-blue, gray, light-gray, red, green",
            )
        })?;
        style = style.with_color(color);
    }

    if let Some(keyword) = string_field(index, record, RecordField::Style)? {
        style = apply_style_name(style, keyword).ok_or_else(|| {
            invalid(index, RecordField::Style, keyword, "expected one of bold, italic, normal")
        })?;
    }

    let pattern = string_field(index, record, RecordField::Pattern)?
        .ok_or_else(|| invalid(index, RecordField::Pattern, "", "missing pattern"))?;
    if pattern.is_empty() {
        return Err(invalid(index, RecordField::Pattern, pattern, "empty pattern"));
    }

    let rule = Rule::new(pattern, style)
        .map_err(|e| invalid(index, RecordField::Pattern, pattern, &e.to_string()))?;

    Ok(match name {
        Some(name) => rule.named(name),
        None => rule,
    })
}

/// Fetch an optional string field, rejecting other value types
///
/// An explicit JSON `null` counts as absent.
fn string_field<'a>(
    index: usize,
    record: &'a Map<String, Value>,
    field: RecordField,
) -> Result<Option<&'a str>, LoadError> {
    match record.get(field.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(invalid(index, field, &other.to_string(), "expected a string")),
    }
}

/// Apply a document style keyword
fn apply_style_name(style: TextStyle, name: &str) -> Option<TextStyle> {
    match name {
        "bold" => Some(style.with_bold()),
        "italic" => Some(style.with_italic()),
        "normal" => Some(style.with_normal_weight()),
        _ => None,
    }
}

fn invalid(index: usize, field: RecordField, value: &str, reason: &str) -> LoadError {
    LoadError::InvalidRecord {
        index,
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
