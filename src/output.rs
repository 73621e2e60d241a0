//! Text rendering of blocks in Terraform syntax.

use std::path::Path;

use owo_colors::OwoColorize;

use crate::composer::{Block, BlockKind};

const RULE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
    /// Value of `destroy` in `removed` blocks.
    pub destroy: bool,
}

/// HCL string literal for `value`.
fn quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

pub fn render_block(block: &Block, destroy: bool) -> String {
    match block.kind {
        BlockKind::Import => format!(
            "import {{\n  to = {}\n  id = {}\n}}",
            block.address,
            quoted(block.identifier.as_deref().unwrap_or_default())
        ),
        BlockKind::Move => format!(
            "moved {{\n  from = {address}\n  to   = {address} # TODO\n}}",
            address = block.address
        ),
        BlockKind::Remove => format!(
            "removed {{\n  from = {}\n  lifecycle {{\n    destroy = {destroy}\n  }}\n}}",
            block.address
        ),
    }
}

fn file_header(path: &Path) -> String {
    let rule = "#".repeat(RULE_WIDTH);
    format!("{rule}\n# Source file: {}\n{rule}", path.display())
}

fn paint(text: String, kind: BlockKind) -> String {
    match kind {
        BlockKind::Import => text.green().to_string(),
        BlockKind::Remove => text.red().to_string(),
        BlockKind::Move => text.yellow().to_string(),
    }
}

/// Renders blocks separated by blank lines.
///
/// Blocks that carry a source file are grouped under a header per file, in
/// order of first appearance; blocks without one come last. Order within a
/// group is the order of `blocks`.
pub fn render(blocks: &[Block], options: RenderOptions) -> String {
    let mut groups: Vec<(Option<&Path>, Vec<&Block>)> = Vec::new();
    for block in blocks {
        let file = block.source_file.as_deref();
        match groups.iter_mut().find(|(f, _)| *f == file) {
            Some((_, members)) => members.push(block),
            None => groups.push((file, vec![block])),
        }
    }
    groups.sort_by_key(|(file, _)| file.is_none());

    let rendered: Vec<String> = groups
        .into_iter()
        .map(|(file, members)| {
            let body = members
                .iter()
                .map(|block| render_block(block, options.destroy))
                .collect::<Vec<_>>()
                .join("\n\n");
            let body = match members.first() {
                Some(first) if options.color => paint(body, first.kind),
                _ => body,
            };
            match file {
                Some(path) => format!("{}\n\n{body}", file_header(path)),
                None => body,
            }
        })
        .collect();

    rendered.join("\n\n")
}

/// One address per line.
pub fn render_list<'a, I>(addresses: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    addresses.into_iter().collect::<Vec<_>>().join("\n")
}
