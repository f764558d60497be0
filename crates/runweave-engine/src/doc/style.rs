use serde::{Deserialize, Serialize};

/// Character-level formatting carried by a [`Run`](crate::doc::Run).
///
/// Unset fields mean the document-level defaults apply. Colors and font
/// values are kept as opaque CSS strings (`#ff0000`, `14px`, `Georgia`)
/// exactly as the surface hands them over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSet {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// The boolean attributes that flip on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAttr {
    Bold,
    Italic,
    Underline,
}

/// The valued attributes that overwrite rather than toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueAttr {
    TextColor,
    HighlightColor,
    FontSize,
    FontFamily,
}

impl StyleSet {
    /// A style that adds nothing on top of the document defaults.
    pub fn plain() -> Self {
        Self::default()
    }

    /// True when every field is unset.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    pub fn has(&self, attr: ToggleAttr) -> bool {
        match attr {
            ToggleAttr::Bold => self.bold,
            ToggleAttr::Italic => self.italic,
            ToggleAttr::Underline => self.underline,
        }
    }

    pub fn set(&mut self, attr: ToggleAttr, on: bool) {
        match attr {
            ToggleAttr::Bold => self.bold = on,
            ToggleAttr::Italic => self.italic = on,
            ToggleAttr::Underline => self.underline = on,
        }
    }

    pub fn set_value(&mut self, attr: ValueAttr, value: &str) {
        let slot = match attr {
            ValueAttr::TextColor => &mut self.text_color,
            ValueAttr::HighlightColor => &mut self.highlight_color,
            ValueAttr::FontSize => &mut self.font_size,
            ValueAttr::FontFamily => &mut self.font_family,
        };
        *slot = Some(value.to_string());
    }

    pub fn value(&self, attr: ValueAttr) -> Option<&str> {
        let slot = match attr {
            ValueAttr::TextColor => &self.text_color,
            ValueAttr::HighlightColor => &self.highlight_color,
            ValueAttr::FontSize => &self.font_size,
            ValueAttr::FontFamily => &self.font_family,
        };
        slot.as_deref()
    }
}
