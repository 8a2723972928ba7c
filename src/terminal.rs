//! Styled terminal output using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::syntax::{Color, FontWeight, StyleRun, StyledSpan, TextStyle};

/// Writer that renders highlighted lines
pub struct StyledWriter<W: Write> {
    out: W,
    /// Emit escape sequences (false = plain text)
    color: bool,
}

impl<W: Write> StyledWriter<W> {
    /// Wrap an output stream
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Write one line with its style runs, followed by a newline
    pub fn write_line(&mut self, line: &str, runs: &[StyleRun]) -> Result<()> {
        let mut pos = 0;

        for run in runs {
            if run.start > pos {
                self.write_str(&line[pos..run.start])?;
            }
            self.apply_style(&run.style)?;
            self.write_str(&line[run.start..run.end])?;
            self.reset_attributes()?;
            pos = run.end;
        }

        if pos < line.len() {
            self.write_str(&line[pos..])?;
        }
        self.write_str("\n")
    }

    /// Write a dimmed line-number gutter
    pub fn write_gutter(&mut self, line_no: usize) -> Result<()> {
        if self.color {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        self.write_str(&format!("{:>5} ", line_no))?;
        self.reset_attributes()
    }

    /// Write a string at the current position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(self.out, Print(s))?;
        Ok(())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Unwrap the output stream
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Switch on the attributes a style sets
    fn apply_style(&mut self, text_style: &TextStyle) -> Result<()> {
        if !self.color {
            return Ok(());
        }
        if let Some(color) = text_style.color {
            queue!(self.out, SetForegroundColor(term_color(color)))?;
        }
        match text_style.weight {
            Some(FontWeight::Bold) => queue!(self.out, SetAttribute(Attribute::Bold))?,
            Some(FontWeight::Normal) => queue!(self.out, SetAttribute(Attribute::NormalIntensity))?,
            None => {}
        }
        if text_style.is_italic() {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        Ok(())
    }

    /// Reset all attributes
    fn reset_attributes(&mut self) -> Result<()> {
        if self.color {
            queue!(self.out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Map a rule color onto the terminal palette
pub fn term_color(color: Color) -> style::Color {
    match color {
        Color::Blue => style::Color::Blue,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::Gray => style::Color::DarkGrey,
        Color::LightGray => style::Color::Grey,
        Color::Red => style::Color::Red,
        Color::DarkRed => style::Color::DarkRed,
        Color::Green => style::Color::Green,
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}

/// Display columns covered by a span (start inclusive, end exclusive)
pub fn span_columns(line: &str, span: &StyledSpan) -> (usize, usize) {
    let start = line[..span.start].width();
    (start, start + span.slice(line).width())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(line: &str, runs: &[StyleRun], color: bool) -> String {
        let mut writer = StyledWriter::new(Vec::new(), color);
        writer.write_line(line, runs).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let runs = [StyleRun {
            start: 0,
            end: 3,
            style: TextStyle::fg(Color::DarkBlue).with_bold(),
        }];
        assert_eq!(render("int x;", &runs, false), "int x;\n");
    }

    #[test]
    fn test_styled_output_wraps_runs() {
        let runs = [StyleRun {
            start: 4,
            end: 6,
            style: TextStyle::default().with_bold(),
        }];
        let out = render("let xy = 1;", &runs, true);
        assert!(out.starts_with("let "));
        assert!(out.contains("\x1b[1mxy"));
        assert!(out.ends_with(" = 1;\n"));
    }

    #[test]
    fn test_gutter() {
        let mut writer = StyledWriter::new(Vec::new(), false);
        writer.write_gutter(12).unwrap();
        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), "   12 ");
    }

    #[test]
    fn test_span_columns_use_display_width() {
        let line = "名前 = \"値\"";
        let start = line.find('"').unwrap();
        let span = StyledSpan::new(start, line.len() - start, TextStyle::default());
        // Each CJK character is two columns wide
        assert_eq!(span_columns(line, &span), (7, 11));
    }

    #[test]
    fn test_term_color() {
        assert_eq!(
            term_color(Color::Rgb(175, 207, 219)),
            style::Color::Rgb { r: 175, g: 207, b: 219 }
        );
        assert_eq!(term_color(Color::LightGray), style::Color::Grey);
    }
}
