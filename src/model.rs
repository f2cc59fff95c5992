// src/model.rs

use serde::Serialize;
use std::collections::HashMap;

/// One parsed log entry: never persisted, consumed by the history aggregator.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub id: git2::Oid,
    pub message: String,
    /// Paths as they appeared in the commit's change list, duplicates kept.
    pub paths: Vec<String>,
}

/// Aggregated touch counts over the full history, keyed by path as it
/// appeared in each commit (no rename tracking, no normalization).
#[derive(Debug, Default)]
pub struct HistoryStats {
    pub commit_touches: HashMap<String, u32>,
    pub bug_touches: HashMap<String, u32>,
    pub start_time: i64,
    pub end_time: i64,
}

impl HistoryStats {
    /// Commit-touch count for a path. Files with no recorded history default
    /// to 1 so the bug-ratio computation never divides by zero; the defaulted
    /// value is what gets persisted.
    pub fn commits_for(&self, path: &str) -> u32 {
        self.commit_touches.get(path).copied().unwrap_or(1)
    }

    pub fn bugs_for(&self, path: &str) -> u32 {
        self.bug_touches.get(path).copied().unwrap_or(0)
    }
}

/// Structural smell indicators for a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SmellIndicators {
    /// More than 500 lines.
    pub long_file: bool,
    /// Heuristic function bodies longer than 50 lines.
    pub long_functions: u32,
    /// Indentation levels beyond a baseline of 4.
    pub deep_nesting: u32,
    /// Lines longer than 120 characters.
    pub long_lines: u32,
    /// Fewer than 5% comment lines in a file of more than 20 lines.
    pub low_comments: bool,
}

/// One analyzed source file. Field names match the snapshot consumed by the
/// visualization frontend; `smell_score` carries the final combined risk
/// score, clamped to [0, 100].
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    pub extension: String,
    pub loc: usize,
    pub commits: u32,
    pub bugs: u32,
    pub directory: String,
    pub smells: SmellIndicators,
    pub smell_score: u32,
}

/// The persisted per-repository snapshot: aggregate totals plus all file
/// records ordered by descending commit count.
#[derive(Debug, Serialize)]
pub struct RepositorySnapshot {
    pub repo_url: String,
    pub org: String,
    pub repo: String,
    pub total_files: usize,
    pub total_loc: usize,
    pub total_commits: u64,
    pub total_bugs: u64,
    pub files_with_bugs: usize,
    pub files: Vec<FileRecord>,
}
