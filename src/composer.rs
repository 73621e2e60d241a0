//! Turns selected resources into block records ready for rendering.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::locator::{self, DeclarationFile};
use crate::matcher::{self, Pattern};
use crate::providers::{FormatError, Registry};
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Import,
    Move,
    Remove,
}

impl BlockKind {
    fn needs_identifier(self) -> bool {
        matches!(self, BlockKind::Import | BlockKind::Move)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockKind::Import => "import",
            BlockKind::Move => "moved",
            BlockKind::Remove => "removed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub address: String,
    pub kind: BlockKind,
    pub identifier: Option<String>,
    pub source_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Drop resource types without an identifier rule (import and move only).
    pub supported_providers_only: bool,
    /// Drop resources not declared in any of the scanned files.
    pub located_only: bool,
}

/// A resource that was selected but could not be turned into a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub address: String,
    pub error: FormatError,
    pub docs_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub blocks: Vec<Block>,
    pub skipped: Vec<Skipped>,
    /// Resources left after pattern and file filtering.
    pub selected: usize,
}

/// A selected resource together with the file that declares it.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<'r> {
    pub resource: &'r Resource,
    pub source_file: Option<PathBuf>,
}

/// Pattern selection followed by file lookup, in state order.
pub fn select_located<'r>(
    resources: &'r [Resource],
    patterns: &[Pattern],
    declarations: &[DeclarationFile],
    options: FilterOptions,
) -> Vec<Located<'r>> {
    let candidates = matcher::select(patterns, resources);
    if !patterns.is_empty() {
        tracing::debug!(count = candidates.len(), "resources matched patterns");
    }

    if declarations.is_empty() {
        return candidates
            .into_iter()
            .map(|resource| Located {
                resource,
                source_file: None,
            })
            .collect();
    }

    let index = locator::build_index(declarations, candidates.iter().copied());
    tracing::debug!(count = index.len(), "resources located in declaration files");

    candidates
        .into_iter()
        .filter_map(|resource| {
            let source_file = index.file_for(&resource.address).map(Path::to_path_buf);
            if options.located_only && source_file.is_none() {
                return None;
            }
            Some(Located {
                resource,
                source_file,
            })
        })
        .collect()
}

/// Builds the blocks of one kind for the resources matching `patterns`.
///
/// Output follows state order. Resources whose identifier cannot be derived
/// are left out and listed in [`Composition::skipped`].
pub fn compose(
    registry: &Registry,
    resources: &[Resource],
    patterns: &[Pattern],
    kind: BlockKind,
    declarations: &[DeclarationFile],
    options: FilterOptions,
) -> Composition {
    let located = select_located(resources, patterns, declarations, options);
    let mut composition = Composition {
        selected: located.len(),
        ..Composition::default()
    };
    let mut removed = HashSet::new();

    for Located {
        resource,
        source_file,
    } in located
    {
        if !kind.needs_identifier() {
            let address = resource.base_address();
            if removed.insert(address.clone()) {
                composition.blocks.push(Block {
                    address,
                    kind,
                    identifier: None,
                    source_file,
                });
            }
            continue;
        }

        if options.supported_providers_only && !registry.supports(&resource.resource_type) {
            tracing::debug!(
                address = %resource.address,
                resource_type = %resource.resource_type,
                "skipping resource without identifier rule"
            );
            continue;
        }

        match registry.format(resource) {
            Ok(identifier) => composition.blocks.push(Block {
                address: resource.address.clone(),
                kind,
                identifier: Some(identifier),
                source_file,
            }),
            Err(error) => {
                let docs_url = resource.import_docs_url();
                match &docs_url {
                    Some(url) => tracing::warn!(
                        address = %resource.address,
                        docs = %url,
                        "skipping resource: {error}"
                    ),
                    None => tracing::warn!(address = %resource.address, "skipping resource: {error}"),
                }
                composition.skipped.push(Skipped {
                    address: resource.address.clone(),
                    error,
                    docs_url,
                });
            }
        }
    }

    composition
}
