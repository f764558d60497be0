use thiserror::Error;

use crate::doc::block::{Alignment, Block, BlockKind, ListKind, Run};
use crate::doc::coords::{Coordinate, Selection};
use crate::doc::style::{StyleSet, ToggleAttr, ValueAttr};

/// Title given to a document that has never been renamed.
pub const DEFAULT_TITLE: &str = "Untitled Document";
/// Font size applied at the document root unless configured otherwise.
pub const DEFAULT_FONT_SIZE: &str = "14px";
/// Font family applied at the document root unless configured otherwise.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// A caller handed the model an argument it cannot take: a position
/// that does not exist, or a style value the markup could not carry.
/// The tree is left untouched either way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("coordinate out of bounds: block {block}, run {run}, offset {offset}")]
    InvalidCoordinate {
        block: usize,
        run: usize,
        offset: usize,
    },
    /// The value would not read back unchanged from a `style`
    /// attribute, whose decoder splits declarations on `;` and trims
    /// each side.
    #[error("unsupported style value `{value}`")]
    InvalidStyleValue { value: String },
}

impl EditError {
    fn invalid(at: Coordinate) -> Self {
        Self::InvalidCoordinate {
            block: at.block,
            run: at.run,
            offset: at.offset,
        }
    }
}

/// A storable value must survive emission into a `style` attribute, so
/// the `;` declaration separator and edge whitespace are out.
pub(crate) fn check_style_value(value: &str) -> Result<(), EditError> {
    if value.contains(';') || value.trim() != value {
        return Err(EditError::InvalidStyleValue {
            value: value.to_string(),
        });
    }
    Ok(())
}

fn check_style(style: &StyleSet) -> Result<(), EditError> {
    for attr in [
        ValueAttr::TextColor,
        ValueAttr::HighlightColor,
        ValueAttr::FontSize,
        ValueAttr::FontFamily,
    ] {
        if let Some(value) = style.value(attr) {
            check_style_value(value)?;
        }
    }
    Ok(())
}

/// The authoritative rich text tree.
///
/// A document is a flat sequence of [`Block`]s, each a sequence of styled
/// [`Run`]s, plus the root settings: title and the default font size and
/// family. Every mutation goes through the operations below; they keep
/// the canonical form invariants (at least one block, at least one run
/// per block, no adjacent equal-style runs) and reject out-of-bounds
/// positions with [`EditError`] instead of panicking.
///
/// Surfaces never hold references into the tree. They address it through
/// [`Coordinate`]s resolved per event and re-resolved after each change.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) title: String,
    pub(crate) default_font_size: String,
    pub(crate) default_font_family: String,
    pub(crate) blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh document: stock defaults and a single empty paragraph.
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_FONT_SIZE, DEFAULT_FONT_FAMILY)
    }

    /// A fresh document with configured root fonts.
    pub fn with_defaults(font_size: &str, font_family: &str) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            default_font_size: font_size.to_string(),
            default_font_family: font_family.to_string(),
            blocks: vec![Block::new(BlockKind::Paragraph)],
        }
    }

    /// Rebuild a document from decoded parts, restoring the canonical
    /// form invariants on the way in.
    pub fn from_parts(
        title: &str,
        font_size: &str,
        font_family: &str,
        mut blocks: Vec<Block>,
    ) -> Self {
        if blocks.is_empty() {
            blocks.push(Block::new(BlockKind::Paragraph));
        }
        for block in &mut blocks {
            block.ensure_non_empty(StyleSet::plain());
            block.canonicalize();
        }
        Self {
            title: title.to_string(),
            default_font_size: font_size.to_string(),
            default_font_family: font_family.to_string(),
            blocks,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn default_font_size(&self) -> &str {
        &self.default_font_size
    }

    pub fn default_font_family(&self) -> &str {
        &self.default_font_family
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_default_font_size(&mut self, size: &str) {
        self.default_font_size = size.to_string();
    }

    pub fn set_default_font_family(&mut self, family: &str) {
        self.default_font_family = family.to_string();
    }

    /// True when no block carries any text.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    /// Text content with one line per block and nothing else. An empty
    /// document yields the empty string.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn block_text(&self, index: usize) -> Option<String> {
        self.blocks.get(index).map(Block::text)
    }

    /// Character count of one block's text.
    pub fn block_len(&self, index: usize) -> Option<usize> {
        self.blocks.get(index).map(Block::char_len)
    }

    /// Check that `at` names an existing position.
    pub fn validate(&self, at: Coordinate) -> Result<(), EditError> {
        let run = self
            .blocks
            .get(at.block)
            .and_then(|block| block.runs.get(at.run))
            .ok_or_else(|| EditError::invalid(at))?;
        if at.offset > run.char_len() {
            return Err(EditError::invalid(at));
        }
        Ok(())
    }

    /// Selection bounds in document order as canonical coordinates,
    /// clamping out-of-range input instead of failing.
    pub fn selection_bounds(&self, selection: &Selection) -> (Coordinate, Coordinate) {
        let a = self.abs_point(selection.anchor);
        let f = self.abs_point(selection.focus);
        let (start, end) = if a <= f { (a, f) } else { (f, a) };
        (self.coord_at(start.0, start.1), self.coord_at(end.0, end.1))
    }

    /// Insert `text` at `at`, returning the coordinate just after the
    /// last inserted character. Newlines split the receiving block the
    /// way Enter does, so run texts never contain `'\n'`.
    ///
    /// With `style` set the new text carries it; otherwise it inherits
    /// the style already in effect at `at`. An explicit style gets the
    /// same value check as [`Document::set_attr_value`].
    pub fn insert_text(
        &mut self,
        at: Coordinate,
        text: &str,
        style: Option<&StyleSet>,
    ) -> Result<Coordinate, EditError> {
        self.validate(at)?;
        if let Some(style) = style {
            check_style(style)?;
        }
        let mut cursor = at;
        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                cursor = self.split_block(cursor)?;
            }
            if !segment.is_empty() {
                cursor = self.insert_segment(cursor, segment, style);
            }
        }
        Ok(cursor)
    }

    fn insert_segment(
        &mut self,
        at: Coordinate,
        segment: &str,
        style: Option<&StyleSet>,
    ) -> Coordinate {
        let block = &mut self.blocks[at.block];
        let abs = block.offset_of(at.run, at.offset);
        let style = style
            .cloned()
            .unwrap_or_else(|| block.style_at(abs).clone());
        block.insert_span(abs, segment, style);
        let (run, offset) = block.locate(abs + segment.chars().count());
        Coordinate::new(at.block, run, offset)
    }

    /// Remove every character between the selection bounds and return the
    /// collapse point. Cross-block ranges keep the head of the first
    /// block and the tail of the last, merged into the first block; the
    /// first block always survives, so the document never loses its last
    /// block. Collapsed input is a no-op.
    pub fn delete_range(&mut self, selection: &Selection) -> Result<Coordinate, EditError> {
        self.validate(selection.anchor)?;
        self.validate(selection.focus)?;
        let a = self.abs_point(selection.anchor);
        let f = self.abs_point(selection.focus);
        let ((sb, sa), (eb, ea)) = if a <= f { (a, f) } else { (f, a) };
        if (sb, sa) == (eb, ea) {
            return Ok(self.coord_at(sb, sa));
        }
        if sb == eb {
            self.blocks[sb].remove_span(sa, ea);
        } else {
            let head_len = self.blocks[sb].char_len();
            self.blocks[sb].remove_span(sa, head_len);
            self.blocks[eb].remove_span(0, ea);
            let tail: Vec<Run> = self
                .blocks
                .drain(sb + 1..=eb)
                .last()
                .map(|block| block.runs)
                .unwrap_or_default();
            self.blocks[sb].runs.extend(tail);
            self.blocks[sb].canonicalize();
        }
        Ok(self.coord_at(sb, sa))
    }

    /// Delete the character before `at`, merging with the previous block
    /// when `at` sits at a block start. A no-op at the very start of the
    /// document.
    pub fn delete_backward(&mut self, at: Coordinate) -> Result<Coordinate, EditError> {
        self.validate(at)?;
        let (block, abs) = self.abs_point(at);
        if abs > 0 {
            self.blocks[block].remove_span(abs - 1, abs);
            return Ok(self.coord_at(block, abs - 1));
        }
        if block == 0 {
            return Ok(self.coord_at(0, 0));
        }
        let seam = self.blocks[block - 1].char_len();
        self.merge_with_previous(block);
        Ok(self.coord_at(block - 1, seam))
    }

    /// Delete the character after `at`, merging with the next block when
    /// `at` sits at a block end. A no-op at the very end of the document.
    pub fn delete_forward(&mut self, at: Coordinate) -> Result<Coordinate, EditError> {
        self.validate(at)?;
        let (block, abs) = self.abs_point(at);
        if abs < self.blocks[block].char_len() {
            self.blocks[block].remove_span(abs, abs + 1);
            return Ok(self.coord_at(block, abs));
        }
        if block + 1 == self.blocks.len() {
            return Ok(self.coord_at(block, abs));
        }
        self.merge_with_previous(block + 1);
        Ok(self.coord_at(block, abs))
    }

    /// Split the block holding `at` in two. Kind, alignment and list
    /// decoration carry over, so Enter inside a list item continues the
    /// list. Returns the start of the new block.
    pub fn split_block(&mut self, at: Coordinate) -> Result<Coordinate, EditError> {
        self.validate(at)?;
        let block = &mut self.blocks[at.block];
        let abs = block.offset_of(at.run, at.offset);
        let at_style = block.style_at(abs).clone();
        let tail = block.split_runs_off(abs);
        block.ensure_non_empty(at_style.clone());
        block.canonicalize();
        let mut next = Block {
            kind: block.kind,
            alignment: block.alignment,
            list: block.list,
            runs: tail,
        };
        next.ensure_non_empty(at_style);
        next.canonicalize();
        self.blocks.insert(at.block + 1, next);
        Ok(Coordinate::block_start(at.block + 1))
    }

    pub fn set_block_kind(&mut self, index: usize, kind: BlockKind) -> Result<(), EditError> {
        self.block_mut(index)?.kind = kind;
        Ok(())
    }

    pub fn set_alignment(&mut self, index: usize, alignment: Alignment) -> Result<(), EditError> {
        self.block_mut(index)?.alignment = alignment;
        Ok(())
    }

    pub fn set_list_kind(&mut self, index: usize, list: ListKind) -> Result<(), EditError> {
        self.block_mut(index)?.list = list;
        Ok(())
    }

    /// True when every non-empty run the selection touches carries
    /// `attr`. Empty placeholder runs do not vote.
    pub fn range_has_attr(&self, selection: &Selection, attr: ToggleAttr) -> bool {
        let (start, end) = self.selection_bounds(selection);
        let s = self.abs_point(start);
        let e = self.abs_point(end);
        for (index, local_start, local_end) in self.block_spans(s, e) {
            let mut acc = 0;
            for run in &self.blocks[index].runs {
                let run_start = acc;
                let run_end = acc + run.char_len();
                acc = run_end;
                if run.is_empty() || run_end <= local_start || run_start >= local_end {
                    continue;
                }
                if !run.style.has(attr) {
                    return false;
                }
            }
        }
        true
    }

    /// Set or clear `attr` over the selection, splitting the runs at the
    /// selection edges first.
    pub fn set_attr(
        &mut self,
        selection: &Selection,
        attr: ToggleAttr,
        on: bool,
    ) -> Result<(), EditError> {
        self.restyle_range(selection, |style| style.set(attr, on))
    }

    /// Overwrite `attr`'s value over the selection, splitting the runs at
    /// the selection edges first.
    ///
    /// A value carrying `;` or edge whitespace would come back changed
    /// from the markup round trip, so it is rejected up front and
    /// nothing is stored.
    pub fn set_attr_value(
        &mut self,
        selection: &Selection,
        attr: ValueAttr,
        value: &str,
    ) -> Result<(), EditError> {
        check_style_value(value)?;
        self.restyle_range(selection, |style| style.set_value(attr, value))
    }

    fn restyle_range(
        &mut self,
        selection: &Selection,
        apply: impl Fn(&mut StyleSet),
    ) -> Result<(), EditError> {
        self.validate(selection.anchor)?;
        self.validate(selection.focus)?;
        let (start, end) = self.selection_bounds(selection);
        let s = self.abs_point(start);
        let e = self.abs_point(end);
        for (index, local_start, local_end) in self.block_spans(s, e) {
            let block = &mut self.blocks[index];
            if local_start >= local_end {
                // an empty block inside the range still takes the style,
                // so its caret style keeps step with the text around it
                if block.is_empty() {
                    apply(&mut block.runs[0].style);
                }
                continue;
            }
            block.ensure_run_boundary(local_end);
            block.ensure_run_boundary(local_start);
            let mut acc = 0;
            for run in &mut block.runs {
                let run_start = acc;
                let run_end = acc + run.char_len();
                acc = run_end;
                if !run.is_empty() && run_start >= local_start && run_end <= local_end {
                    apply(&mut run.style);
                }
            }
            block.canonicalize();
        }
        Ok(())
    }

    /// Per-block slices `(block index, local start, local end)` of the
    /// span between two ordered points.
    fn block_spans(
        &self,
        start: (usize, usize),
        end: (usize, usize),
    ) -> Vec<(usize, usize, usize)> {
        let mut spans = Vec::with_capacity(end.0 - start.0 + 1);
        for index in start.0..=end.0 {
            let local_start = if index == start.0 { start.1 } else { 0 };
            let local_end = if index == end.0 {
                end.1
            } else {
                self.blocks[index].char_len()
            };
            spans.push((index, local_start, local_end));
        }
        spans
    }

    fn merge_with_previous(&mut self, index: usize) {
        let tail = self.blocks.remove(index);
        let previous = &mut self.blocks[index - 1];
        previous.runs.extend(tail.runs);
        previous.canonicalize();
    }

    /// `(block, block-local char offset)` of a coordinate, clamped into
    /// range.
    fn abs_point(&self, at: Coordinate) -> (usize, usize) {
        let block = at.block.min(self.blocks.len() - 1);
        let b = &self.blocks[block];
        let run = at.run.min(b.runs.len() - 1);
        let offset = at.offset.min(b.runs[run].char_len());
        (block, b.offset_of(run, offset))
    }

    fn coord_at(&self, block: usize, abs: usize) -> Coordinate {
        let (run, offset) = self.blocks[block].locate(abs);
        Coordinate::new(block, run, offset)
    }

    fn block_mut(&mut self, index: usize) -> Result<&mut Block, EditError> {
        self.blocks
            .get_mut(index)
            .ok_or(EditError::InvalidCoordinate {
                block: index,
                run: 0,
                offset: 0,
            })
    }
}
