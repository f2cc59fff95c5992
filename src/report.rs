// src/report.rs

use crate::model::{FileRecord, HistoryStats, RepositorySnapshot};
use crate::walker::SourceFile;
use crate::{score, smells};
use anyhow::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Scan every discovered file and join it with its history aggregates.
///
/// Scans are independent, so they run in parallel; each file's record lands
/// in its own slot and discovery order is preserved. Files that cannot be
/// read, or that resolve to zero lines, are dropped as not analyzable.
pub fn build_records(files: &[SourceFile], history: &HistoryStats) -> Vec<FileRecord> {
    let bar = ProgressBar::new(files.len() as u64);
    bar.set_message("Scanning files");

    files
        .par_iter()
        .progress_with(bar)
        .filter_map(|file| {
            let text = smells::read_text(&file.abs_path)?;
            let loc = text.lines().count();
            if loc == 0 {
                return None;
            }
            let (indicators, smell_score) = smells::scan(&text);
            let commits = history.commits_for(&file.rel_path);
            let bugs = history.bugs_for(&file.rel_path);
            Some(FileRecord {
                path: file.rel_path.clone(),
                name: file.name.clone(),
                extension: file.extension.clone(),
                loc,
                commits,
                bugs,
                directory: file.directory.clone(),
                smells: indicators,
                smell_score: score::combine(smell_score, commits, bugs),
            })
        })
        .collect()
}

/// Derive (org, repo) from a repository URL: trailing slashes and a `.git`
/// suffix are stripped, then the last two path segments are taken.
pub fn extract_org_repo(url: &str) -> (String, String) {
    let url = url.trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);
    let parts: Vec<&str> = url.split('/').collect();
    if parts.len() >= 2 {
        (
            parts[parts.len() - 2].to_string(),
            parts[parts.len() - 1].to_string(),
        )
    } else {
        ("unknown".to_string(), "unknown".to_string())
    }
}

/// Order records by descending commit count (stable, so ties keep discovery
/// order) and compute repository-level totals.
pub fn assemble(repo_url: &str, mut files: Vec<FileRecord>) -> RepositorySnapshot {
    files.sort_by(|a, b| b.commits.cmp(&a.commits));

    let (org, repo) = extract_org_repo(repo_url);
    RepositorySnapshot {
        repo_url: repo_url.to_string(),
        org,
        repo,
        total_files: files.len(),
        total_loc: files.iter().map(|f| f.loc).sum(),
        total_commits: files.iter().map(|f| u64::from(f.commits)).sum(),
        total_bugs: files.iter().map(|f| u64::from(f.bugs)).sum(),
        files_with_bugs: files.iter().filter(|f| f.bugs > 0).count(),
        files,
    }
}

/// Write the snapshot as `<org>_<repo>.json` under `out_dir` and register
/// the filename in the `files.json` index (append-once, so re-runs for the
/// same repository stay idempotent). Returns the snapshot path.
pub fn persist(snapshot: &RepositorySnapshot, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let filename = format!("{}_{}.json", snapshot.org, snapshot.repo);
    let out_path = out_dir.join(&filename);
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    fs::write(&out_path, json)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    let index_path = out_dir.join("files.json");
    let mut index: Vec<String> = match fs::read_to_string(&index_path) {
        Ok(raw) => serde_json::from_str(&raw)
            .with_context(|| format!("Malformed index {}", index_path.display()))?,
        Err(_) => Vec::new(),
    };
    if !index.contains(&filename) {
        index.push(filename);
        fs::write(&index_path, serde_json::to_string(&index)?)
            .with_context(|| format!("Failed to write {}", index_path.display()))?;
    }

    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SmellIndicators;

    fn record(path: &str, commits: u32, bugs: u32, loc: usize) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            name: path.rsplit('/').next().unwrap().to_string(),
            extension: ".py".to_string(),
            loc,
            commits,
            bugs,
            directory: String::new(),
            smells: SmellIndicators::default(),
            smell_score: 0,
        }
    }

    #[test]
    fn extracts_org_and_repo_from_urls() {
        assert_eq!(
            extract_org_repo("https://github.com/acme/widget"),
            ("acme".to_string(), "widget".to_string())
        );
        assert_eq!(
            extract_org_repo("https://github.com/acme/widget.git"),
            ("acme".to_string(), "widget".to_string())
        );
        assert_eq!(
            extract_org_repo("git@host:stuff/acme/widget///"),
            ("acme".to_string(), "widget".to_string())
        );
        assert_eq!(
            extract_org_repo("widget"),
            ("unknown".to_string(), "unknown".to_string())
        );
    }

    #[test]
    fn orders_by_commits_descending_with_stable_ties() {
        let files = vec![
            record("a.py", 2, 0, 10),
            record("b.py", 5, 1, 10),
            record("c.py", 2, 0, 10),
        ];
        let snapshot = assemble("https://github.com/acme/widget", files);
        let order: Vec<&str> = snapshot.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(order, vec!["b.py", "a.py", "c.py"]);
    }

    #[test]
    fn computes_repository_totals() {
        let files = vec![
            record("a.py", 3, 1, 100),
            record("b.py", 2, 0, 50),
            record("c.py", 1, 1, 25),
        ];
        let snapshot = assemble("https://github.com/acme/widget", files);
        assert_eq!(snapshot.total_files, 3);
        assert_eq!(snapshot.total_loc, 175);
        assert_eq!(snapshot.total_commits, 6);
        assert_eq!(snapshot.total_bugs, 2);
        assert_eq!(snapshot.files_with_bugs, 2);
        assert_eq!(snapshot.org, "acme");
        assert_eq!(snapshot.repo, "widget");
    }

    #[test]
    fn persist_writes_snapshot_and_appends_index_once() {
        let tmp = tempfile::tempdir().unwrap();
        let snapshot = assemble(
            "https://github.com/acme/widget.git",
            vec![record("a.py", 1, 0, 10)],
        );

        let path = persist(&snapshot, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("acme_widget.json"));
        let raw = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["repo"], "widget");
        assert_eq!(parsed["files"][0]["path"], "a.py");

        // Second run must not duplicate the index entry.
        persist(&snapshot, tmp.path()).unwrap();
        let index: Vec<String> =
            serde_json::from_str(&fs::read_to_string(tmp.path().join("files.json")).unwrap())
                .unwrap();
        assert_eq!(index, vec!["acme_widget.json"]);
    }
}
