use serde::{Deserialize, Serialize};

use crate::doc::style::StyleSet;

/// The element a block renders as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    #[default]
    Paragraph,
    Heading1,
    Heading2,
}

/// Horizontal alignment of a block's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// List decoration of a block. Lists are flat: one block per item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    #[default]
    None,
    Bulleted,
    Numbered,
}

/// A maximal span of identically styled text inside one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default, skip_serializing_if = "StyleSet::is_plain")]
    pub style: StyleSet,
}

impl Run {
    pub fn new(text: impl Into<String>, style: StyleSet) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleSet::plain())
    }

    /// The placeholder run an empty block keeps so the caret style
    /// survives the text being deleted.
    pub(crate) fn empty(style: StyleSet) -> Self {
        Self::new(String::new(), style)
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One paragraph, heading or list item.
///
/// Run texts concatenate, in order, to exactly the block text. In
/// canonical form no two adjacent runs share a style and empty runs never
/// coexist with text; a block emptied of text keeps a single empty run.
/// All offsets in the API below count characters from the block start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub kind: BlockKind,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub list: ListKind,
    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Block {
    /// An empty block of the given kind, holding only the placeholder run.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            alignment: Alignment::Left,
            list: ListKind::None,
            runs: vec![Run::empty(StyleSet::plain())],
        }
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn char_len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(Run::is_empty)
    }

    /// Find the run holding `offset`, clamping past-the-end input to the
    /// final run's end. An offset on a run boundary resolves to the end
    /// of the earlier run, so a caret there inherits the style on its
    /// left.
    pub fn locate(&self, offset: usize) -> (usize, usize) {
        let mut remaining = offset;
        for (index, run) in self.runs.iter().enumerate() {
            let len = run.char_len();
            if remaining <= len {
                return (index, remaining);
            }
            remaining -= len;
        }
        let last = self.runs.len() - 1;
        (last, self.runs[last].char_len())
    }

    /// Block-local offset of a (run, offset) pair. The pair must be in
    /// bounds.
    pub(crate) fn offset_of(&self, run: usize, offset: usize) -> usize {
        let before: usize = self.runs[..run].iter().map(Run::char_len).sum();
        before + offset
    }

    /// Style in effect at `offset`, i.e. of the run a caret there sits in.
    pub fn style_at(&self, offset: usize) -> &StyleSet {
        let (run, _) = self.locate(offset);
        &self.runs[run].style
    }

    /// Split the run covering `offset` so that `offset` lands exactly on
    /// a run boundary. No-op when it already does.
    pub(crate) fn ensure_run_boundary(&mut self, offset: usize) {
        let (index, local) = self.locate(offset);
        if local == 0 || local == self.runs[index].char_len() {
            return;
        }
        let byte = byte_at(&self.runs[index].text, local);
        let tail = self.runs[index].text.split_off(byte);
        let style = self.runs[index].style.clone();
        self.runs.insert(index + 1, Run::new(tail, style));
    }

    /// Index of the run starting at `offset`. Only meaningful once
    /// `offset` sits on a run boundary.
    fn boundary_index(&self, offset: usize) -> usize {
        let mut acc = 0;
        for (index, run) in self.runs.iter().enumerate() {
            if acc == offset {
                return index;
            }
            acc += run.char_len();
        }
        self.runs.len()
    }

    /// Insert `text` with `style` at `offset`, restoring canonical form.
    pub(crate) fn insert_span(&mut self, offset: usize, text: &str, style: StyleSet) {
        self.ensure_run_boundary(offset);
        let index = self.boundary_index(offset);
        self.runs.insert(index, Run::new(text, style));
        self.canonicalize();
    }

    /// Remove the characters in `[start, end)`, restoring canonical form.
    /// A block emptied here keeps the removed text's style on its
    /// placeholder, so the caret style survives the deletion.
    pub(crate) fn remove_span(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        self.ensure_run_boundary(end);
        self.ensure_run_boundary(start);
        let from = self.boundary_index(start);
        let to = self.boundary_index(end);
        let fallback = self.runs[from].style.clone();
        self.runs.drain(from..to);
        self.ensure_non_empty(fallback);
        self.canonicalize();
    }

    /// Detach every run from `offset` onward, splitting the covering run
    /// first. Either side may come back empty.
    pub(crate) fn split_runs_off(&mut self, offset: usize) -> Vec<Run> {
        self.ensure_run_boundary(offset);
        let index = self.boundary_index(offset);
        self.runs.split_off(index)
    }

    pub(crate) fn ensure_non_empty(&mut self, fallback: StyleSet) {
        if self.runs.is_empty() {
            self.runs.push(Run::empty(fallback));
        }
    }

    /// Restore canonical form: drop empty runs (keeping one placeholder
    /// when nothing else remains) and merge adjacent equal-style runs.
    pub(crate) fn canonicalize(&mut self) {
        let fallback = self
            .runs
            .first()
            .map(|run| run.style.clone())
            .unwrap_or_default();
        self.runs.retain(|run| !run.text.is_empty());
        if self.runs.is_empty() {
            self.runs.push(Run::empty(fallback));
            return;
        }
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.style == run.style => prev.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

/// Byte index of the `char_offset`-th character.
fn byte_at(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}
