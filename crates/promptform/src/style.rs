//! Terminal text styles.
//!
//! [`Style`] is a small, immutable builder over `crossterm::style` that knows
//! how to decorate a block of text: colors and attributes per line, padding,
//! margins, and a left border. Rendering is a pure function of the style and
//! the input text; no terminal state is touched.
//!
//! # Example
//!
//! ```rust
//! use promptform::style::{Border, Style};
//!
//! let style = Style::new().border_left(Border::thick()).padding_left(1);
//! assert_eq!(style.render("hi"), "┃ hi");
//! ```

use crossterm::style::{Attribute, Color, ContentStyle};
use unicode_width::UnicodeWidthStr;

/// Characters drawn on the left edge of a bordered block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Border {
    /// Left edge character(s).
    pub left: String,
}

impl Border {
    /// Thick vertical bar (┃).
    pub fn thick() -> Self {
        Self {
            left: "┃".to_string(),
        }
    }

    /// Thin vertical bar (│).
    pub fn normal() -> Self {
        Self {
            left: "│".to_string(),
        }
    }

    /// Invisible border that still occupies one column.
    pub fn hidden() -> Self {
        Self {
            left: " ".to_string(),
        }
    }
}

/// Parses a color given as `#RRGGBB` or as an ANSI-256 index ("0".."255").
///
/// Returns `None` for anything else.
pub fn parse_color(spec: &str) -> Option<Color> {
    if let Some(hex) = spec.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        });
    }
    spec.parse::<u8>().ok().map(Color::AnsiValue)
}

/// A text style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    faint: bool,
    reverse: bool,
    value: String,
    padding_top: u16,
    padding_bottom: u16,
    padding_left: u16,
    padding_right: u16,
    margin_left: u16,
    margin_right: u16,
    margin_bottom: u16,
    border: Option<Border>,
    border_fg: Option<Color>,
}

impl Style {
    /// Creates a new empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a string rendered in front of every text passed to [`Style::render`].
    pub fn set_string(mut self, s: impl Into<String>) -> Self {
        self.value = s.into();
        self
    }

    /// Get the underlying string value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the foreground color (`#RRGGBB` or ANSI-256 index).
    pub fn foreground(mut self, color: &str) -> Self {
        self.fg = parse_color(color);
        self
    }

    /// Set the background color (`#RRGGBB` or ANSI-256 index).
    pub fn background(mut self, color: &str) -> Self {
        self.bg = parse_color(color);
        self
    }

    /// Enable bold text.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Enable faint text.
    pub fn faint(mut self) -> Self {
        self.faint = true;
        self
    }

    /// Swap foreground and background.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Padding as `(vertical, horizontal)`, like CSS shorthand with two values.
    ///
    /// Vertical padding adds blank lines of the block's width above and below.
    pub fn padding(mut self, (vertical, horizontal): (u16, u16)) -> Self {
        self.padding_top = vertical;
        self.padding_bottom = vertical;
        self.padding_left = horizontal;
        self.padding_right = horizontal;
        self
    }

    /// Left padding.
    pub fn padding_left(mut self, n: u16) -> Self {
        self.padding_left = n;
        self
    }

    /// Left margin.
    pub fn margin_left(mut self, n: u16) -> Self {
        self.margin_left = n;
        self
    }

    /// Right margin.
    pub fn margin_right(mut self, n: u16) -> Self {
        self.margin_right = n;
        self
    }

    /// Blank lines after the block.
    pub fn margin_bottom(mut self, n: u16) -> Self {
        self.margin_bottom = n;
        self
    }

    /// Draw a border on the left edge of every line.
    pub fn border_left(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Color of the border.
    pub fn border_foreground(mut self, color: &str) -> Self {
        self.border_fg = parse_color(color);
        self
    }

    /// Returns a copy without any colors or attributes.
    ///
    /// Layout (strings, padding, margins, border characters) is kept so plain
    /// output has the same shape as styled output.
    pub fn plain(mut self) -> Self {
        self.fg = None;
        self.bg = None;
        self.border_fg = None;
        self.bold = false;
        self.faint = false;
        self.reverse = false;
        self
    }

    fn content_style(&self) -> Option<ContentStyle> {
        if self.fg.is_none() && self.bg.is_none() && !self.bold && !self.faint && !self.reverse {
            return None;
        }
        let mut style = ContentStyle::new();
        style.foreground_color = self.fg;
        style.background_color = self.bg;
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        if self.faint {
            style.attributes.set(Attribute::Dim);
        }
        if self.reverse {
            style.attributes.set(Attribute::Reverse);
        }
        Some(style)
    }

    /// Render the given text with this style applied.
    pub fn render(&self, text: &str) -> String {
        let text = format!("{}{text}", self.value);
        let content = self.content_style();
        let border = self.border.as_ref().map(|b| match self.border_fg {
            Some(color) => {
                let mut style = ContentStyle::new();
                style.foreground_color = Some(color);
                style.apply(b.left.as_str()).to_string()
            }
            None => b.left.clone(),
        });

        let width = text.split('\n').map(UnicodeWidthStr::width).max().unwrap_or(0);
        let blank = " ".repeat(width);
        let rows = std::iter::repeat_n(blank.as_str(), self.padding_top.into())
            .chain(text.split('\n'))
            .chain(std::iter::repeat_n(blank.as_str(), self.padding_bottom.into()));

        let lines: Vec<String> = rows
            .map(|line| {
                let mut padded = String::with_capacity(line.len() + 8);
                padded.push_str(&" ".repeat(self.padding_left.into()));
                padded.push_str(line);
                padded.push_str(&" ".repeat(self.padding_right.into()));
                let styled = match content {
                    Some(style) if !padded.is_empty() => style.apply(padded).to_string(),
                    _ => padded,
                };

                let mut out = " ".repeat(self.margin_left.into());
                if let Some(border) = &border {
                    out.push_str(border);
                }
                out.push_str(&styled);
                out.push_str(&" ".repeat(self.margin_right.into()));
                out
            })
            .collect();

        let mut out = lines.join("\n");
        for _ in 0..self.margin_bottom {
            out.push('\n');
        }
        out
    }
}
