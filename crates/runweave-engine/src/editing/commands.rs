use std::ops::Range;

use crate::doc::{
    Alignment, BlockKind, Coordinate, Document, EditError, ListKind, Selection, StyleSet,
    ToggleAttr, ValueAttr, check_style_value,
};
use crate::editing::selection::{project, resolve};

/// Every edit and formatting action a surface can request.
///
/// Commands are the only mutation path. Formatting commands against a
/// collapsed selection park their effect in the typing style instead of
/// touching the tree; the next insertion picks it up.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    Bold,
    Italic,
    Underline,
    TextColor(String),
    HighlightColor(String),
    FontFamily(String),
    FontSize(String),
    Align(Alignment),
    List(ListKind),
    BlockType(BlockKind),
    InsertText(String),
    DeleteSelection,
    DeleteBackward,
    DeleteForward,
    SplitBlock,
}

/// What a dispatched command settled on.
pub(crate) struct Outcome {
    pub(crate) selection: Selection,
    pub(crate) typing_style: Option<StyleSet>,
    pub(crate) changed: Range<usize>,
}

enum BlockChange {
    Kind(BlockKind),
    Alignment(Alignment),
    List(ListKind),
}

pub(crate) fn dispatch(
    doc: &mut Document,
    selection: &Selection,
    typing_style: Option<StyleSet>,
    cmd: &Cmd,
) -> Result<Outcome, EditError> {
    match cmd {
        Cmd::Bold => toggle_attr(doc, selection, typing_style, ToggleAttr::Bold),
        Cmd::Italic => toggle_attr(doc, selection, typing_style, ToggleAttr::Italic),
        Cmd::Underline => toggle_attr(doc, selection, typing_style, ToggleAttr::Underline),
        Cmd::TextColor(value) => {
            set_attr_value(doc, selection, typing_style, ValueAttr::TextColor, value)
        }
        Cmd::HighlightColor(value) => {
            set_attr_value(doc, selection, typing_style, ValueAttr::HighlightColor, value)
        }
        Cmd::FontFamily(value) => {
            set_attr_value(doc, selection, typing_style, ValueAttr::FontFamily, value)
        }
        Cmd::FontSize(value) => {
            set_attr_value(doc, selection, typing_style, ValueAttr::FontSize, value)
        }
        Cmd::Align(alignment) => set_block_attr(doc, selection, BlockChange::Alignment(*alignment)),
        Cmd::List(kind) => set_block_attr(doc, selection, BlockChange::List(*kind)),
        Cmd::BlockType(kind) => set_block_attr(doc, selection, BlockChange::Kind(*kind)),
        Cmd::InsertText(text) => insert_text(doc, selection, typing_style, text),
        Cmd::DeleteSelection => delete_selection(doc, selection),
        Cmd::DeleteBackward => delete_backward(doc, selection),
        Cmd::DeleteForward => delete_forward(doc, selection),
        Cmd::SplitBlock => split_block(doc, selection),
    }
}

fn insert_text(
    doc: &mut Document,
    selection: &Selection,
    typing_style: Option<StyleSet>,
    text: &str,
) -> Result<Outcome, EditError> {
    let blocks_before = doc.blocks().len();
    let (start, end) = doc.selection_bounds(selection);
    let at = if start == end {
        start
    } else {
        doc.delete_range(selection)?
    };
    let caret = doc.insert_text(at, text, typing_style.as_ref())?;
    Ok(Outcome {
        selection: Selection::caret(caret),
        typing_style: None,
        changed: changed_span(doc, blocks_before, start.block, caret.block),
    })
}

fn delete_selection(doc: &mut Document, selection: &Selection) -> Result<Outcome, EditError> {
    let blocks_before = doc.blocks().len();
    let caret = doc.delete_range(selection)?;
    Ok(Outcome {
        selection: Selection::caret(caret),
        typing_style: None,
        changed: changed_span(doc, blocks_before, caret.block, caret.block),
    })
}

fn delete_backward(doc: &mut Document, selection: &Selection) -> Result<Outcome, EditError> {
    let blocks_before = doc.blocks().len();
    let caret = if selection.is_collapsed() {
        doc.delete_backward(selection.focus)?
    } else {
        doc.delete_range(selection)?
    };
    Ok(Outcome {
        selection: Selection::caret(caret),
        typing_style: None,
        changed: changed_span(doc, blocks_before, caret.block, caret.block),
    })
}

fn delete_forward(doc: &mut Document, selection: &Selection) -> Result<Outcome, EditError> {
    let blocks_before = doc.blocks().len();
    let caret = if selection.is_collapsed() {
        doc.delete_forward(selection.focus)?
    } else {
        doc.delete_range(selection)?
    };
    Ok(Outcome {
        selection: Selection::caret(caret),
        typing_style: None,
        changed: changed_span(doc, blocks_before, caret.block, caret.block),
    })
}

fn split_block(doc: &mut Document, selection: &Selection) -> Result<Outcome, EditError> {
    let blocks_before = doc.blocks().len();
    let (start, end) = doc.selection_bounds(selection);
    let at = if start == end {
        start
    } else {
        doc.delete_range(selection)?
    };
    let caret = doc.split_block(at)?;
    Ok(Outcome {
        selection: Selection::caret(caret),
        typing_style: None,
        changed: changed_span(doc, blocks_before, at.block, caret.block),
    })
}

fn toggle_attr(
    doc: &mut Document,
    selection: &Selection,
    typing_style: Option<StyleSet>,
    attr: ToggleAttr,
) -> Result<Outcome, EditError> {
    if selection.is_collapsed() {
        let mut style = typing_style.unwrap_or_else(|| caret_style(doc, selection.focus));
        let on = !style.has(attr);
        style.set(attr, on);
        return Ok(Outcome {
            selection: *selection,
            typing_style: Some(style),
            changed: 0..0,
        });
    }
    // set-wins: clear only when everything covered already has the
    // attribute, otherwise set it everywhere
    let on = !doc.range_has_attr(selection, attr);
    restyle(doc, selection, |doc, sel| doc.set_attr(sel, attr, on))
}

fn set_attr_value(
    doc: &mut Document,
    selection: &Selection,
    typing_style: Option<StyleSet>,
    attr: ValueAttr,
    value: &str,
) -> Result<Outcome, EditError> {
    // checked up front so a collapsed selection cannot park an
    // unstorable value in the typing style
    check_style_value(value)?;
    if selection.is_collapsed() {
        let mut style = typing_style.unwrap_or_else(|| caret_style(doc, selection.focus));
        style.set_value(attr, value);
        return Ok(Outcome {
            selection: *selection,
            typing_style: Some(style),
            changed: 0..0,
        });
    }
    restyle(doc, selection, |doc, sel| doc.set_attr_value(sel, attr, value))
}

/// Run one restyling operation, then re-resolve the selection onto the
/// new run structure. The text has not moved, so each end keeps its
/// block-local offset.
fn restyle(
    doc: &mut Document,
    selection: &Selection,
    op: impl FnOnce(&mut Document, &Selection) -> Result<(), EditError>,
) -> Result<Outcome, EditError> {
    let (start, end) = doc.selection_bounds(selection);
    let anchor = project(doc, selection.anchor);
    let focus = project(doc, selection.focus);
    op(doc, selection)?;
    Ok(Outcome {
        selection: Selection::new(resolve(doc, anchor), resolve(doc, focus)),
        typing_style: None,
        changed: start.block..end.block + 1,
    })
}

fn set_block_attr(
    doc: &mut Document,
    selection: &Selection,
    change: BlockChange,
) -> Result<Outcome, EditError> {
    let (start, end) = doc.selection_bounds(selection);
    for index in start.block..=end.block {
        match change {
            BlockChange::Kind(kind) => doc.set_block_kind(index, kind)?,
            BlockChange::Alignment(alignment) => doc.set_alignment(index, alignment)?,
            BlockChange::List(kind) => doc.set_list_kind(index, kind)?,
        }
    }
    Ok(Outcome {
        selection: *selection,
        typing_style: None,
        changed: start.block..end.block + 1,
    })
}

/// Style a collapsed-selection toggle starts from: the run the caret
/// sits in, left-affine.
fn caret_style(doc: &Document, at: Coordinate) -> StyleSet {
    let block = at.block.min(doc.blocks().len() - 1);
    let b = &doc.blocks()[block];
    let run = at.run.min(b.runs.len() - 1);
    b.runs[run].style.clone()
}

/// Changed block range for an edit that touched `first..=last`, widened
/// to the document end when the block count moved.
fn changed_span(doc: &Document, blocks_before: usize, first: usize, last: usize) -> Range<usize> {
    let now = doc.blocks().len();
    if now == blocks_before {
        first..(last + 1).min(now)
    } else {
        first.min(now)..now
    }
}
