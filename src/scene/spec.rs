use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb;

/// How bottom caption text is placed relative to the source frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomMode {
    /// Bottom text gets its own canvas extension below the frame.
    #[default]
    Boxed,
    /// Bottom text is drawn directly over the frame pixels; the canvas does
    /// not grow.
    Overlay,
}

/// Immutable description of one captioning request.
///
/// The literal two-character sequence `\n` in caption strings is normalized
/// to a hard line break at construction; hard breaks are preserved by the
/// wrapping stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionSpec {
    /// Caption text placed above the frame. Required.
    pub top_text: String,
    /// Optional caption text placed below (or over) the frame.
    #[serde(default)]
    pub bottom_text: Option<String>,
    /// Simulate bold via offset-stacked draws.
    #[serde(default)]
    pub bold: bool,
    /// Simulate italic via an affine shear.
    #[serde(default)]
    pub italic: bool,
    /// Top caption text color.
    #[serde(default = "default_font_color")]
    pub top_font_color: Rgb,
    /// Bottom caption text color.
    #[serde(default = "default_font_color")]
    pub bottom_font_color: Rgb,
    /// Optional fill behind the top caption block.
    #[serde(default)]
    pub top_background: Option<Rgb>,
    /// Optional fill behind the boxed bottom caption block.
    #[serde(default)]
    pub bottom_background: Option<Rgb>,
    /// Separator line color; `None` disables the separator.
    #[serde(default)]
    pub separator: Option<Rgb>,
    /// Bottom text placement mode.
    #[serde(default)]
    pub bottom_mode: BottomMode,
}

fn default_font_color() -> Rgb {
    Rgb::BLACK
}

impl CaptionSpec {
    /// Create a spec with the given top text and defaults everywhere else.
    pub fn new(top_text: impl Into<String>) -> Self {
        Self {
            top_text: normalize_breaks(&top_text.into()),
            bottom_text: None,
            bold: false,
            italic: false,
            top_font_color: Rgb::BLACK,
            bottom_font_color: Rgb::BLACK,
            top_background: None,
            bottom_background: None,
            separator: None,
            bottom_mode: BottomMode::Boxed,
        }
    }

    /// Set the bottom caption text.
    pub fn with_bottom_text(mut self, text: impl Into<String>) -> Self {
        self.bottom_text = Some(normalize_breaks(&text.into()));
        self
    }

    /// Set the bold/italic simulation flags.
    pub fn with_style(mut self, bold: bool, italic: bool) -> Self {
        self.bold = bold;
        self.italic = italic;
        self
    }

    /// Set the top and bottom text colors.
    pub fn with_font_colors(mut self, top: Rgb, bottom: Rgb) -> Self {
        self.top_font_color = top;
        self.bottom_font_color = bottom;
        self
    }

    /// Enable the separator line in the given color.
    pub fn with_separator(mut self, color: Rgb) -> Self {
        self.separator = Some(color);
        self
    }

    /// Set the bottom text placement mode.
    pub fn with_bottom_mode(mut self, mode: BottomMode) -> Self {
        self.bottom_mode = mode;
        self
    }

    /// Return the bottom text, treating empty strings as absent.
    pub fn bottom_text(&self) -> Option<&str> {
        self.bottom_text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Turn literal `\n` escape sequences into hard line breaks.
pub(crate) fn normalize_breaks(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
#[path = "../../tests/unit/scene/spec.rs"]
mod tests;
