//! Style types for highlighted text
//!
//! Styles are sparse: every attribute is optional, and an unset attribute
//! inherits whatever the block's base style is. Overlaying one style on
//! another only replaces the attributes the upper style actually sets.

use std::fmt;

/// Foreground colors a rule can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    DarkBlue,
    Gray,
    LightGray,
    Red,
    DarkRed,
    Green,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Colors a rule-definition document may name
    pub const DOCUMENT_PALETTE: [Color; 6] = [
        Color::Blue,
        Color::DarkBlue,
        Color::Gray,
        Color::LightGray,
        Color::Red,
        Color::Green,
    ];

    /// Parse a color from its document name
    ///
    /// Only the document palette is accepted; `dark-red` and RGB colors are
    /// reserved for built-in rules.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "blue" => Some(Color::Blue),
            "dark-blue" => Some(Color::DarkBlue),
            "gray" => Some(Color::Gray),
            "light-gray" => Some(Color::LightGray),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            _ => None,
        }
    }

    /// Canonical name of this color
    pub fn name(&self) -> String {
        match self {
            Color::Blue => "blue".to_string(),
            Color::DarkBlue => "dark-blue".to_string(),
            Color::Gray => "gray".to_string(),
            Color::LightGray => "light-gray".to_string(),
            Color::Red => "red".to_string(),
            Color::DarkRed => "dark-red".to_string(),
            Color::Green => "green".to_string(),
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Text style attributes, each one optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    /// Foreground color
    pub color: Option<Color>,
    /// Font weight
    pub weight: Option<FontWeight>,
    /// Italic text
    pub italic: Option<bool>,
}

impl TextStyle {
    /// Create a style with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set foreground color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Builder: set bold weight
    pub fn with_bold(mut self) -> Self {
        self.weight = Some(FontWeight::Bold);
        self
    }

    /// Builder: set normal weight
    pub fn with_normal_weight(mut self) -> Self {
        self.weight = Some(FontWeight::Normal);
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    /// Whether the weight resolves to bold
    pub fn is_bold(&self) -> bool {
        self.weight == Some(FontWeight::Bold)
    }

    /// Whether italics are switched on
    pub fn is_italic(&self) -> bool {
        self.italic == Some(true)
    }

    /// Check if no attribute is set
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Lay `top` over this style
    ///
    /// Attributes set in `top` win, attributes it leaves unset keep their
    /// current value.
    pub fn overlay(self, top: TextStyle) -> Self {
        Self {
            color: top.color.or(self.color),
            weight: top.weight.or(self.weight),
            italic: top.italic.or(self.italic),
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(color) = self.color {
            parts.push(color.name());
        }
        match self.weight {
            Some(FontWeight::Bold) => parts.push("bold".to_string()),
            Some(FontWeight::Normal) => parts.push("normal".to_string()),
            None => {}
        }
        if self.is_italic() {
            parts.push("italic".to_string());
        }
        if parts.is_empty() {
            f.write_str("unset")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// A styled range of one line, produced by a single rule match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    /// Byte offset where this span starts
    pub start: usize,
    /// Length in bytes
    pub len: usize,
    /// Style to apply to this span
    pub style: TextStyle,
}

impl StyledSpan {
    /// Create a new span
    pub fn new(start: usize, len: usize, style: TextStyle) -> Self {
        Self { start, len, style }
    }

    /// Byte offset one past the end of this span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end()
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The text this span covers
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end()]
    }
}

/// A resolved, non-overlapping style range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRun {
    /// Byte offset where this run starts (inclusive)
    pub start: usize,
    /// Byte offset where this run ends (exclusive)
    pub end: usize,
    /// Effective style of the range
    pub style: TextStyle,
}
