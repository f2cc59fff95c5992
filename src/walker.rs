// src/walker.rs

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directories never descended into.
const SKIP_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "target",
    "build",
    "dist",
    "__pycache__",
    ".idea",
    ".vscode",
];

/// Source-code extensions (lowercase, without the dot) eligible for analysis.
const CODE_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "tsx", "jsx", "java", "go", "rs", "c", "cpp", "h", "hpp", "cs", "rb",
    "php", "swift", "kt", "scala", "clj", "ex", "exs", "erl", "hs", "ml", "fs", "r", "m", "mm",
    "sh", "bash", "zsh", "zig",
];

/// A discovered source file, with the path pieces the snapshot records.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the repository root, as history records it.
    pub rel_path: String,
    pub abs_path: PathBuf,
    pub name: String,
    /// Lowercased extension with leading dot, or "none".
    pub extension: String,
    /// Containing directory relative to the root; empty at the root.
    pub directory: String,
}

/// Walk the tree under `root` and collect analyzable source files in a
/// deterministic order. The walk order is the tie-break for the final
/// ranking, so it must be stable across runs.
pub fn discover(root: &Path) -> Vec<SourceFile> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && SKIP_DIRS.contains(&entry.file_name().to_string_lossy().as_ref()))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| describe(root, entry.path()))
        .collect()
}

fn describe(root: &Path, abs_path: &Path) -> Option<SourceFile> {
    let ext = abs_path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match &ext {
        Some(e) if CODE_EXTENSIONS.contains(&e.as_str()) => {}
        _ => return None,
    }
    let rel = abs_path.strip_prefix(root).ok()?;
    let name = rel.file_name()?.to_string_lossy().into_owned();
    let directory = rel
        .parent()
        .map(|d| d.to_string_lossy().into_owned())
        .unwrap_or_default();
    Some(SourceFile {
        rel_path: rel.to_string_lossy().into_owned(),
        abs_path: abs_path.to_path_buf(),
        name,
        extension: format!(".{}", ext.unwrap_or_default()),
        directory,
    })
}
