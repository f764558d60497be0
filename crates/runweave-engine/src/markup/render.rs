//! Rendering of documents to markup and to a standalone HTML page.

use crate::doc::{Block, BlockKind, Document};
use crate::markup::style_attr::{block_style_attr, run_style_attr};

/// Renders the canonical markup for a document's blocks.
///
/// Each block becomes one `<p>`/`<h1>`/`<h2>` element and each non-empty
/// run one `<span>`, with presentation carried in `style` attributes.
/// The placeholder run of an empty block renders nothing, so an empty
/// document comes out as exactly `<p></p>`.
pub fn render_markup(doc: &Document) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        push_block(&mut out, block);
    }
    out
}

fn push_block(out: &mut String, block: &Block) {
    let tag = match block.kind {
        BlockKind::Paragraph => "p",
        BlockKind::Heading1 => "h1",
        BlockKind::Heading2 => "h2",
    };
    out.push('<');
    out.push_str(tag);
    if let Some(attr) = block_style_attr(block) {
        push_style(out, &attr);
    }
    out.push('>');
    for run in &block.runs {
        if run.is_empty() {
            continue;
        }
        out.push_str("<span");
        if let Some(attr) = run_style_attr(&run.style) {
            push_style(out, &attr);
        }
        out.push('>');
        out.push_str(&html_escape::encode_text(&run.text));
        out.push_str("</span>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_style(out: &mut String, attr: &str) {
    out.push_str(" style=\"");
    out.push_str(&html_escape::encode_double_quoted_attribute(attr));
    out.push('"');
}

/// Renders the standalone HTML page used for file export: document title
/// as the page heading, root fonts in the stylesheet, markup as the body.
pub fn render_html_page(doc: &Document) -> String {
    let title = html_escape::encode_text(doc.title());
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: {family};
            font-size: {size};
            line-height: 1.5;
            max-width: 816px;
            margin: 0 auto;
            padding: 48px 96px;
            color: #202124;
        }}
        h1 {{
            font-size: 32px;
            font-weight: 400;
            line-height: 1.2;
            margin: 20px 0 16px 0;
        }}
        h2 {{
            font-size: 24px;
            font-weight: 400;
            line-height: 1.2;
            margin: 18px 0 12px 0;
        }}
        ul, ol {{
            margin: 12px 0;
            padding-left: 32px;
        }}
        li {{
            margin: 4px 0;
        }}
        p {{
            margin: 0 0 12px 0;
        }}
    </style>
</head>
<body>
    <h1>{title}</h1>
    {content}
</body>
</html>"#,
        title = title,
        family = doc.default_font_family(),
        size = doc.default_font_size(),
        content = render_markup(doc),
    )
}
