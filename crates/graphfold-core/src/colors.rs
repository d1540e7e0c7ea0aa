//! ANSI color codes for graph dumps.
//!
//! Colors are assigned by role, not by hue:
//! - `name`: node names at the start of a line (blue)
//! - `literal`: attribute and tensor literals (green)
//! - `attrs`: the attribute block around them (dim)

/// Escape sequences for each role in a dump line.
///
/// Standard 16-color codes only, so dumps read the same on light and dark
/// terminals.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub name: &'static str,
    pub literal: &'static str,
    pub attrs: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        name: "\x1b[34m",
        literal: "\x1b[32m",
        attrs: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Plain text; every role is the empty string.
    pub const OFF: Self = Self {
        name: "",
        literal: "",
        attrs: "",
        reset: "",
    };

    /// `ON` for terminals, `OFF` for pipes and files.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// Wrap a literal, returning to the attribute style afterwards.
    pub fn paint_literal(&self, text: impl std::fmt::Display) -> String {
        format!("{}{}{}", self.literal, text, self.attrs)
    }
}
