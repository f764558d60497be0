//! Encoding and decoding of `style="..."` attribute values.
//!
//! Run styles and block presentation both travel through inline CSS
//! declarations. Emission always writes properties in one fixed order so
//! that equal styles produce byte-equal markup.

use crate::doc::{Alignment, Block, ListKind, StyleSet, ToggleAttr, ValueAttr};
use crate::snapshot::{SnapshotError, malformed};

/// Renders a run's style as an attribute value, or `None` for plain text.
pub(crate) fn run_style_attr(style: &StyleSet) -> Option<String> {
    let mut decls = Vec::new();
    if style.has(ToggleAttr::Bold) {
        decls.push("font-weight: bold".to_string());
    }
    if style.has(ToggleAttr::Italic) {
        decls.push("font-style: italic".to_string());
    }
    if style.has(ToggleAttr::Underline) {
        decls.push("text-decoration: underline".to_string());
    }
    if let Some(color) = style.value(ValueAttr::TextColor) {
        decls.push(format!("color: {color}"));
    }
    if let Some(color) = style.value(ValueAttr::HighlightColor) {
        decls.push(format!("background-color: {color}"));
    }
    if let Some(size) = style.value(ValueAttr::FontSize) {
        decls.push(format!("font-size: {size}"));
    }
    if let Some(family) = style.value(ValueAttr::FontFamily) {
        decls.push(format!("font-family: {family}"));
    }
    if decls.is_empty() {
        None
    } else {
        Some(decls.join("; "))
    }
}

/// Renders a block's alignment and list presentation, or `None` for the
/// default left-aligned non-list block.
pub(crate) fn block_style_attr(block: &Block) -> Option<String> {
    let mut decls = Vec::new();
    match block.alignment {
        Alignment::Left => {}
        Alignment::Center => decls.push("text-align: center".to_string()),
        Alignment::Right => decls.push("text-align: right".to_string()),
    }
    match block.list {
        ListKind::None => {}
        ListKind::Bulleted => {
            decls.push("display: list-item".to_string());
            decls.push("list-style-type: disc".to_string());
            decls.push("list-style-position: inside".to_string());
        }
        ListKind::Numbered => {
            decls.push("display: list-item".to_string());
            decls.push("list-style-type: decimal".to_string());
            decls.push("list-style-position: inside".to_string());
        }
    }
    if decls.is_empty() {
        None
    } else {
        Some(decls.join("; "))
    }
}

/// Parses a run `style` attribute back into a [`StyleSet`].
pub(crate) fn parse_run_style(attr: &str) -> Result<StyleSet, SnapshotError> {
    let mut style = StyleSet::plain();
    for (prop, value) in declarations(attr)? {
        match prop {
            "font-weight" => style.set(ToggleAttr::Bold, value == "bold"),
            "font-style" => style.set(ToggleAttr::Italic, value == "italic"),
            "text-decoration" => {
                style.set(ToggleAttr::Underline, value.contains("underline"));
            }
            "color" => style.set_value(ValueAttr::TextColor, value),
            "background-color" => style.set_value(ValueAttr::HighlightColor, value),
            "font-size" => style.set_value(ValueAttr::FontSize, value),
            "font-family" => style.set_value(ValueAttr::FontFamily, value),
            other => {
                return Err(malformed(format!("unsupported run style property `{other}`")));
            }
        }
    }
    Ok(style)
}

/// Parses a block `style` attribute into alignment and list kind.
pub(crate) fn parse_block_style(attr: &str) -> Result<(Alignment, ListKind), SnapshotError> {
    let mut alignment = Alignment::Left;
    let mut list = ListKind::None;
    for (prop, value) in declarations(attr)? {
        match prop {
            "text-align" => {
                alignment = match value {
                    "left" => Alignment::Left,
                    "center" => Alignment::Center,
                    "right" => Alignment::Right,
                    other => {
                        return Err(malformed(format!("unsupported text-align `{other}`")));
                    }
                };
            }
            // `display: list-item` on its own means a disc marker; an
            // explicit `list-style-type` overrides it either way.
            "display" => {
                if value != "list-item" {
                    return Err(malformed(format!("unsupported display `{value}`")));
                }
                if list == ListKind::None {
                    list = ListKind::Bulleted;
                }
            }
            "list-style-type" => {
                list = match value {
                    "disc" => ListKind::Bulleted,
                    "decimal" => ListKind::Numbered,
                    other => {
                        return Err(malformed(format!("unsupported list-style-type `{other}`")));
                    }
                };
            }
            "list-style-position" => {}
            other => {
                return Err(malformed(format!(
                    "unsupported block style property `{other}`"
                )));
            }
        }
    }
    Ok((alignment, list))
}

/// Splits an attribute value into trimmed `(property, value)` pairs.
fn declarations(attr: &str) -> Result<Vec<(&str, &str)>, SnapshotError> {
    let mut pairs = Vec::new();
    for decl in attr.split(';') {
        let decl = decl.trim();
        if decl.is_empty() {
            continue;
        }
        let Some((prop, value)) = decl.split_once(':') else {
            return Err(malformed(format!("style declaration without `:`: `{decl}`")));
        };
        pairs.push((prop.trim(), value.trim()));
    }
    Ok(pairs)
}
