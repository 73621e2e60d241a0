//! Maps resources to the `.tf` files that declare them.
//!
//! This is a lexical scan for `resource "<type>" "<name>"` and `module "<name>"`
//! openers, not an HCL parser. Expressions are never evaluated, so every
//! instance of a `count`/`for_each` resource is attributed to the file that
//! declares the block, and addresses generated in other ways cannot be located.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::address;
use crate::resource::Resource;

static RESOURCE_OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*resource\s+"([^"]+)"\s+"([^"]+)""#).expect("resource opener regex")
});
static MODULE_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*module\s+"([^"]+)""#).expect("module opener regex"));

/// A block opener found in a declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Resource { resource_type: String, name: String },
    Module { name: String },
}

impl Declaration {
    pub fn address(&self) -> String {
        match self {
            Declaration::Resource {
                resource_type,
                name,
            } => format!("{resource_type}.{name}"),
            Declaration::Module { name } => format!("module.{name}"),
        }
    }

    /// Whether this declaration is where `resource` comes from.
    ///
    /// Resource blocks match by type and name at any module depth, since files
    /// inside a module directory declare names without the module prefix.
    /// Module calls match everything below their top-level module instance.
    pub fn covers(&self, resource: &Resource) -> bool {
        match self {
            Declaration::Resource {
                resource_type,
                name,
            } => resource.resource_type == *resource_type && resource.name == *name,
            Declaration::Module { name } => resource
                .module_path
                .first()
                .is_some_and(|call| address::base_segment(call) == name.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFile {
    pub path: PathBuf,
    pub declarations: Vec<Declaration>,
}

/// Extracts declarations from the text of one file, in source order.
pub fn scan_source(path: impl Into<PathBuf>, content: &str) -> DeclarationFile {
    let mut found: Vec<(usize, Declaration)> = RESOURCE_OPENER
        .captures_iter(content)
        .map(|cap| {
            let start = cap.get(0).map_or(0, |m| m.start());
            let declaration = Declaration::Resource {
                resource_type: cap[1].to_string(),
                name: cap[2].to_string(),
            };
            (start, declaration)
        })
        .collect();

    found.extend(MODULE_OPENER.captures_iter(content).map(|cap| {
        let start = cap.get(0).map_or(0, |m| m.start());
        (start, Declaration::Module {
            name: cap[1].to_string(),
        })
    }));
    found.sort_by_key(|(start, _)| *start);

    DeclarationFile {
        path: path.into(),
        declarations: found.into_iter().map(|(_, d)| d).collect(),
    }
}

/// Reads and scans each file. Unreadable and empty files are reported and skipped.
pub fn scan_files(paths: &[PathBuf]) -> Vec<DeclarationFile> {
    let mut files = Vec::new();
    for path in paths {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "could not read declaration file");
                continue;
            }
        };

        let file = scan_source(path, &content);
        if file.declarations.is_empty() {
            tracing::warn!(path = %path.display(), "no resources or modules found in file");
            continue;
        }
        tracing::debug!(
            path = %path.display(),
            count = file.declarations.len(),
            "declarations scanned"
        );
        files.push(file);
    }

    if !paths.is_empty() && files.is_empty() {
        tracing::warn!("no resources found in any of the specified files");
    }
    files
}

fn is_declaration_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "tf")
}

fn walk(root: &Path, max_depth: usize) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            entry.depth() == 0 || (name != ".terraform" && name != ".git")
        })
        .filter_map(Result::ok)
}

fn has_glob_meta(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// Translates a shell glob into an anchored regex over `/`-separated paths.
///
/// `*` and `?` stay within one path component, `[...]` and `[!...]` are
/// character classes. An unclosed `[` is literal.
fn glob_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut re = String::from("^");
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            '[' => match chars[i + 1..].iter().position(|&c| c == ']') {
                Some(len) if len > 0 => {
                    let mut class = &chars[i + 1..i + 1 + len];
                    re.push('[');
                    if let Some(('!', rest)) = class.split_first().map(|(c, r)| (*c, r)) {
                        re.push('^');
                        class = rest;
                    }
                    for &c in class {
                        if c == '-' {
                            re.push('-');
                        } else {
                            re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
                        }
                    }
                    re.push(']');
                    i += len + 1;
                }
                _ => re.push_str(&regex::escape("[")),
            },
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }
    re.push('$');
    Regex::new(&re)
}

/// Files under the pattern's literal directory prefix whose path matches the glob.
fn expand_glob(pattern: &str) -> Vec<PathBuf> {
    let matcher = match glob_regex(pattern) {
        Ok(matcher) => matcher,
        Err(err) => {
            tracing::warn!(pattern, error = %err, "invalid file pattern");
            return Vec::new();
        }
    };

    let literal: Vec<&str> = pattern
        .split('/')
        .take_while(|component| !has_glob_meta(component))
        .collect();
    let root = match literal.join("/") {
        prefix if prefix.is_empty() && pattern.starts_with('/') => PathBuf::from("/"),
        prefix if prefix.is_empty() => PathBuf::from("."),
        prefix => PathBuf::from(prefix),
    };
    let relative = !pattern.starts_with("./") && root == Path::new(".");
    let depth = pattern.split('/').count() - literal.len();

    walk(&root, depth)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let path = entry.into_path();
            if relative && let Ok(stripped) = path.strip_prefix(".") {
                return stripped.to_path_buf();
            }
            path
        })
        .filter(|path| matcher.is_match(&path.to_string_lossy()))
        .collect()
}

/// Expands file arguments into the list of files to scan.
///
/// Files are taken as given and directories are walked for `*.tf` files.
/// Anything else containing `*`, `?` or `[` is expanded as a glob. The result
/// is sorted and free of duplicates. Paths matching nothing are reported and
/// dropped.
pub fn expand_paths(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut expanded = BTreeSet::new();
    for input in inputs {
        if input.is_file() {
            expanded.insert(input.clone());
        } else if input.is_dir() {
            expanded.extend(
                walk(input, usize::MAX)
                    .filter(is_declaration_file)
                    .map(walkdir::DirEntry::into_path),
            );
        } else if let Some(pattern) = input.to_str().filter(|text| has_glob_meta(text)) {
            let matched = expand_glob(pattern);
            if matched.is_empty() {
                tracing::warn!(pattern, "no files matched pattern");
            }
            expanded.extend(matched);
        } else {
            tracing::warn!(path = %input.display(), "declaration file does not exist");
        }
    }

    if !inputs.is_empty() && expanded.is_empty() {
        tracing::warn!("no existing files matched the paths given with --files");
    }
    expanded.into_iter().collect()
}

/// Which file declares which resource address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    files: BTreeMap<PathBuf, BTreeSet<String>>,
    owners: HashMap<String, PathBuf>,
}

impl FileIndex {
    pub fn file_for(&self, address: &str) -> Option<&Path> {
        self.owners.get(address).map(PathBuf::as_path)
    }

    pub fn addresses_in(&self, path: &Path) -> Option<&BTreeSet<String>> {
        self.files.get(path)
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, &BTreeSet<String>)> {
        self.files.iter().map(|(path, addresses)| (path.as_path(), addresses))
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }
}

/// The file that declares `resource`.
///
/// A module call covering the resource wins over a bare `resource` block with
/// the same type and name; otherwise the first covering file in order.
fn owner<'d>(
    declarations: &'d [DeclarationFile],
    resource: &Resource,
) -> Option<&'d DeclarationFile> {
    let first_with = |module_calls_only: bool| {
        declarations.iter().find(|file| {
            file.declarations.iter().any(|d| {
                (!module_calls_only || matches!(d, Declaration::Module { .. })) && d.covers(resource)
            })
        })
    };
    first_with(true).or_else(|| first_with(false))
}

/// Assigns each resource to the file that declares it.
pub fn build_index<'r, I>(declarations: &[DeclarationFile], resources: I) -> FileIndex
where
    I: IntoIterator<Item = &'r Resource>,
{
    let mut index = FileIndex::default();
    for resource in resources {
        if let Some(file) = owner(declarations, resource) {
            index
                .files
                .entry(file.path.clone())
                .or_default()
                .insert(resource.address.clone());
            index
                .owners
                .insert(resource.address.clone(), file.path.clone());
        }
    }
    index
}

/// Scans `paths` and locates `resources` in them.
pub fn locate(paths: &[PathBuf], resources: &[Resource]) -> FileIndex {
    if paths.is_empty() {
        return FileIndex::default();
    }
    build_index(&scan_files(paths), resources)
}
