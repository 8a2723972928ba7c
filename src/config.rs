//! Configuration file support
//!
//! Loads settings from ~/.rulelight.conf (or %USERPROFILE%\.rulelight.conf on
//! Windows), or from a file given with `--config`.
//!
//! Format: simple key=value pairs, one per line
//! Lines starting with # are comments
//!
//! Example:
//! ```text
//! # rulelight configuration
//! rules = /home/me/grammars/python.toml
//! format = toml
//! color = true
//! line-numbers = false
//! log-level = warn
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;

use crate::syntax::RuleFormat;

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Rule-definition document loaded at startup
    pub rules: Option<PathBuf>,
    /// Forced document format (inferred from the extension when unset)
    pub format: Option<RuleFormat>,
    /// Whether to emit styled output
    pub color: bool,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
    /// Log level for diagnostics on stderr
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: None,
            format: None,
            color: true,
            show_line_numbers: false,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".rulelight.conf"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".rulelight.conf"))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if let Ok(contents) = fs::read_to_string(&path) {
                let settings = Self::parse(&contents);
                config.apply(&settings);
            }
        }

        config
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Config::default();
        config.apply(&Self::parse(&contents));
        Ok(config)
    }

    /// Parse config file contents into key-value pairs
    fn parse(contents: &str) -> HashMap<String, String> {
        let mut settings = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key = value
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim().to_string();
                settings.insert(key, value);
            }
        }

        settings
    }

    /// Apply settings from parsed config
    fn apply(&mut self, settings: &HashMap<String, String>) {
        if let Some(value) = settings.get("rules") {
            if !value.is_empty() {
                self.rules = Some(PathBuf::from(value));
            }
        }

        if let Some(value) = settings.get("format") {
            if let Ok(format) = value.parse::<RuleFormat>() {
                self.format = Some(format);
            }
        }

        if let Some(value) = settings.get("color") {
            self.color = parse_bool(value);
        }

        if let Some(value) = settings.get("line-numbers") {
            self.show_line_numbers = parse_bool(value);
        }

        if let Some(value) = settings.get("log-level") {
            if let Ok(level) = LevelFilter::from_str(value) {
                self.log_level = level;
            }
        }
    }
}

/// Parse a boolean value from string
fn parse_bool(s: &str) -> bool {
    let s = s.to_lowercase();
    matches!(s.as_str(), "true" | "yes" | "on" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
rules = grammars/python.toml
format = json
color = false
log-level = debug
        "#;

        let settings = Config::parse(contents);
        assert_eq!(settings.get("rules"), Some(&"grammars/python.toml".to_string()));
        assert_eq!(settings.get("format"), Some(&"json".to_string()));
        assert_eq!(settings.get("color"), Some(&"false".to_string()));
        assert_eq!(settings.get("log-level"), Some(&"debug".to_string()));
    }

    #[test]
    fn test_apply_settings() {
        let mut config = Config::default();
        let mut settings = HashMap::new();
        settings.insert("rules".to_string(), "cpp.toml".to_string());
        settings.insert("format".to_string(), "toml".to_string());
        settings.insert("color".to_string(), "no".to_string());
        settings.insert("line-numbers".to_string(), "on".to_string());
        settings.insert("log-level".to_string(), "INFO".to_string());

        config.apply(&settings);

        assert_eq!(config.rules, Some(PathBuf::from("cpp.toml")));
        assert_eq!(config.format, Some(RuleFormat::Toml));
        assert!(!config.color);
        assert!(config.show_line_numbers);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let mut config = Config::default();
        let settings = Config::parse("format = xml\nlog-level = loud\nrules =\n");
        config.apply(&settings);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("rulelight-missing.conf");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("yes"));
        assert!(parse_bool("on"));
        assert!(parse_bool("1"));

        assert!(!parse_bool("false"));
        assert!(!parse_bool("no"));
        assert!(!parse_bool("off"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("anything"));
    }
}
