// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use runweave_engine::doc::{
    Alignment, Block, BlockKind, Document, ListKind, Run, StyleSet, ToggleAttr,
};

#[allow(dead_code)]
pub fn generate_document(blocks: usize) -> Document {
    let mut bold = StyleSet::plain();
    bold.set(ToggleAttr::Bold, true);

    let mut out = Vec::with_capacity(blocks);
    for index in 0..blocks {
        let kind = if index % 10 == 0 {
            BlockKind::Heading2
        } else {
            BlockKind::Paragraph
        };
        let list = if index % 7 == 3 {
            ListKind::Bulleted
        } else {
            ListKind::None
        };
        out.push(Block {
            kind,
            alignment: Alignment::Left,
            list,
            runs: vec![
                Run::plain(format!("Paragraph {index} with a steady amount of body text, ")),
                Run::new("some of it bold", bold.clone()),
                Run::plain(", and a plain tail to round the block out."),
            ],
        });
    }
    Document::from_parts("Benchmark document", "14px", "Arial", out)
}

#[allow(dead_code)]
pub fn generate_markup(blocks: usize) -> String {
    runweave_engine::markup::render_markup(&generate_document(blocks))
}
