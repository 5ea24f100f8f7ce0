//! Terminal capability detection and utilities

use owo_colors::{colors::css, OwoColorize};
use safety_framework::domain::ColorChoice;

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Resolves a configured colour choice against the terminal
pub fn use_color(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Auto => supports_color(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

/// Output styles, fixed to colour or plain at construction.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// Resolves the configured colour choice against stdout
    pub fn for_terminal(choice: ColorChoice) -> Self {
        Self::new(use_color(choice))
    }

    /// Confirmation messages (green)
    pub fn success(self, text: &str) -> String {
        if self.color {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Errors reported without aborting (amber)
    pub fn warning(self, text: &str) -> String {
        if self.color {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    /// A search match: black on yellow, or bracketed without colour
    pub fn matched(self, text: &str) -> String {
        if self.color {
            text.fg::<css::Black>().bg::<css::Yellow>().to_string()
        } else {
            format!("[{text}]")
        }
    }

    /// Section and page headings
    pub fn heading(self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// The selected filter button
    pub fn active(self, text: &str) -> String {
        if self.color {
            text.fg::<css::White>().bg::<css::RoyalBlue>().to_string()
        } else {
            format!("[{text}]")
        }
    }

    /// Secondary information such as keys and counts
    pub fn dim(self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_palette_writes_no_escape_codes() {
        let palette = Palette::new(false);

        let styled = [
            palette.success("saved"),
            palette.warning("error: nope"),
            palette.dim("3 sections"),
            palette.heading("Induction"),
            palette.matched("glov"),
            palette.active("All"),
        ];

        assert!(styled.iter().all(|text| !text.contains('\x1b')), "{styled:?}");
        assert_eq!(palette.matched("glov"), "[glov]");
    }

    #[test]
    fn colour_palette_styles_text() {
        let palette = Palette::new(true);

        assert!(palette.dim("3 sections").contains('\x1b'));
        assert!(palette.warning("error: nope").contains("error: nope"));
    }

    #[test]
    fn configured_choice_overrides_detection() {
        assert!(use_color(ColorChoice::Always));
        assert!(!use_color(ColorChoice::Never));
    }
}
