//! Parser for the canonical markup subset emitted by [`render_markup`].
//!
//! The grammar is deliberately small: a document is a sequence of `<p>`,
//! `<h1>` and `<h2>` elements, each holding text and single-level
//! `<span>` elements, with presentation carried entirely in `style`
//! attributes. Anything outside that subset is rejected rather than
//! guessed at.
//!
//! [`render_markup`]: crate::markup::render::render_markup

use crate::doc::{Alignment, Block, BlockKind, ListKind, Run, StyleSet};
use crate::markup::cursor::Cursor;
use crate::markup::style_attr::{parse_block_style, parse_run_style};
use crate::snapshot::{SnapshotError, malformed};

/// Parses markup into blocks. Empty input yields a single empty
/// paragraph, and every returned block is in canonical run form.
pub fn parse_markup(input: &str) -> Result<Vec<Block>, SnapshotError> {
    let mut cur = Cursor::new(input);
    let mut blocks = Vec::new();
    loop {
        cur.skip_whitespace();
        if cur.eof() {
            break;
        }
        blocks.push(parse_block(&mut cur)?);
    }
    if blocks.is_empty() {
        blocks.push(Block::new(BlockKind::Paragraph));
    }
    Ok(blocks)
}

fn parse_block(cur: &mut Cursor<'_>) -> Result<Block, SnapshotError> {
    if !cur.eat("<") {
        return Err(unexpected(cur));
    }
    let name = cur.take_while(|b| b.is_ascii_alphanumeric());
    let kind = match name {
        "p" => BlockKind::Paragraph,
        "h1" => BlockKind::Heading1,
        "h2" => BlockKind::Heading2,
        other => return Err(malformed(format!("unsupported block tag `<{other}>`"))),
    };
    let (alignment, list) = match parse_attrs(cur)? {
        Some(attr) => parse_block_style(&attr)?,
        None => (Alignment::Left, ListKind::None),
    };

    let close = format!("</{name}>");
    let mut runs = Vec::new();
    loop {
        if cur.eat(&close) {
            break;
        }
        if cur.eof() {
            return Err(malformed(format!("unclosed `<{name}>`")));
        }
        if cur.starts_with("<") {
            runs.push(parse_span(cur)?);
        } else {
            runs.push(Run::plain(decode(cur.take_until(b'<'))));
        }
    }

    let mut block = Block {
        kind,
        alignment,
        list,
        runs,
    };
    block.ensure_non_empty(StyleSet::plain());
    block.canonicalize();
    Ok(block)
}

fn parse_span(cur: &mut Cursor<'_>) -> Result<Run, SnapshotError> {
    if !cur.eat("<") {
        return Err(unexpected(cur));
    }
    let name = cur.take_while(|b| b.is_ascii_alphanumeric());
    if name != "span" {
        return Err(malformed(format!("unsupported inline tag `<{name}>`")));
    }
    let style = match parse_attrs(cur)? {
        Some(attr) => parse_run_style(&attr)?,
        None => StyleSet::plain(),
    };
    let text = decode(cur.take_until(b'<'));
    if !cur.eat("</span>") {
        return Err(malformed(format!(
            "unexpected tag inside span at byte {}",
            cur.pos()
        )));
    }
    Ok(Run::new(text, style))
}

/// Consumes the attributes and closing `>` of an open tag, returning the
/// decoded `style` value if present. Any other attribute is rejected.
fn parse_attrs(cur: &mut Cursor<'_>) -> Result<Option<String>, SnapshotError> {
    let mut style = None;
    loop {
        cur.skip_whitespace();
        if cur.eat(">") {
            return Ok(style);
        }
        if cur.eof() {
            return Err(malformed("unterminated tag"));
        }
        let name = cur.take_while(|b| b.is_ascii_alphanumeric() || b == b'-');
        if name.is_empty() || !cur.eat("=\"") {
            return Err(unexpected(cur));
        }
        let value = cur.take_until(b'"');
        if !cur.eat("\"") {
            return Err(malformed("unterminated attribute value"));
        }
        if name != "style" {
            return Err(malformed(format!("unsupported attribute `{name}`")));
        }
        style = Some(decode(value));
    }
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

fn unexpected(cur: &Cursor<'_>) -> SnapshotError {
    malformed(format!("unexpected input at byte {}", cur.pos()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::doc::{ToggleAttr, ValueAttr};

    #[test]
    fn plain_paragraph() {
        let blocks = parse_markup("<p>Hello</p>").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        assert_eq!(blocks[0].runs, vec![Run::plain("Hello")]);
    }

    #[test]
    fn headings_carry_their_block_styles() {
        let blocks =
            parse_markup(r#"<h1 style="text-align: center">Title</h1><h2>Sub</h2>"#).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Heading1);
        assert_eq!(blocks[0].alignment, Alignment::Center);
        assert_eq!(blocks[1].kind, BlockKind::Heading2);
        assert_eq!(blocks[1].alignment, Alignment::Left);
    }

    #[test]
    fn list_presentation_maps_back_to_a_list_kind() {
        let blocks = parse_markup(
            r#"<p style="display: list-item; list-style-type: decimal; list-style-position: inside">item</p>"#,
        )
        .unwrap();
        assert_eq!(blocks[0].list, ListKind::Numbered);
    }

    #[test]
    fn spans_become_styled_runs() {
        let blocks =
            parse_markup(r#"<p><span style="font-weight: bold">Hi</span> there</p>"#).unwrap();
        let runs = &blocks[0].runs;
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Hi");
        assert!(runs[0].style.has(ToggleAttr::Bold));
        assert_eq!(runs[1], Run::plain(" there"));
    }

    #[test]
    fn entities_are_decoded() {
        let blocks = parse_markup("<p>a &amp; b &lt;c&gt;</p>").unwrap();
        assert_eq!(blocks[0].text(), "a & b <c>");
    }

    #[test]
    fn quoted_entities_survive_inside_attributes() {
        let blocks =
            parse_markup(r#"<p><span style="font-family: &quot;Georgia&quot;">x</span></p>"#)
                .unwrap();
        assert_eq!(
            blocks[0].runs[0].style.value(ValueAttr::FontFamily),
            Some("\"Georgia\"")
        );
    }

    #[test]
    fn empty_input_is_a_single_empty_paragraph() {
        for input in ["", "   \n  "] {
            let blocks = parse_markup(input).unwrap();
            assert_eq!(blocks.len(), 1);
            assert!(blocks[0].is_empty());
            assert_eq!(blocks[0].kind, BlockKind::Paragraph);
        }
    }

    #[test]
    fn adjacent_equal_spans_collapse_into_one_run() {
        let blocks = parse_markup(
            r#"<p><span style="font-style: italic">a</span><span style="font-style: italic">b</span></p>"#,
        )
        .unwrap();
        assert_eq!(blocks[0].runs.len(), 1);
        assert_eq!(blocks[0].runs[0].text, "ab");
    }

    #[test]
    fn unknown_block_tag_is_rejected() {
        let err = parse_markup("<div>x</div>").unwrap_err();
        assert!(err.to_string().contains("div"));
    }

    #[test]
    fn unknown_attribute_is_rejected() {
        let err = parse_markup(r#"<p class="note">x</p>"#).unwrap_err();
        assert!(err.to_string().contains("class"));
    }

    #[test]
    fn unclosed_block_is_rejected() {
        let err = parse_markup("<p>abc").unwrap_err();
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn nested_spans_are_rejected() {
        let input = r#"<p><span style="font-weight: bold">a<span>b</span></span></p>"#;
        assert!(parse_markup(input).is_err());
    }

    #[test]
    fn top_level_text_is_rejected() {
        assert!(parse_markup("loose text").is_err());
    }

    #[test]
    fn whitespace_between_blocks_is_tolerated() {
        let blocks = parse_markup("<p>a</p>\n  <p>b</p>\n").unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text(), "b");
    }
}
