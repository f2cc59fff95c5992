// src/history.rs

use crate::classifier;
use crate::model::{CommitRecord, HistoryStats};
use git2::{DiffOptions, Oid, Repository};
use indicatif::ProgressBar;

/// Walk the full commit history once and accumulate per-path touch counts:
/// one map over all commits, one over commits classified as bug-related.
///
/// Paths are counted exactly as they appear in each commit's change list.
/// Commits that cannot be read or diffed are skipped; aggregation never
/// aborts on a single bad entry.
pub fn collect(repo: &Repository) -> Result<HistoryStats, git2::Error> {
    let mut revwalk = repo.revwalk()?;
    // An unborn HEAD (empty repository) simply has no history to aggregate.
    if revwalk.push_head().is_err() {
        return Ok(HistoryStats::default());
    }
    let oids: Vec<Oid> = revwalk.filter_map(|oid| oid.ok()).collect();

    let bar = ProgressBar::new(oids.len() as u64);
    bar.set_message("Aggregating history");

    let mut stats = HistoryStats::default();
    let mut span: Option<(i64, i64)> = None;

    for oid in oids {
        bar.inc(1);
        let (record, time) = match read_commit(repo, oid) {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        span = Some(match span {
            Some((start, end)) => (start.min(time), end.max(time)),
            None => (time, time),
        });

        let is_bug = classifier::classify(&record.message);
        for path in &record.paths {
            *stats.commit_touches.entry(path.clone()).or_insert(0) += 1;
            if is_bug {
                *stats.bug_touches.entry(path.clone()).or_insert(0) += 1;
            }
        }
    }
    bar.finish_with_message("History aggregated");

    if let Some((start, end)) = span {
        stats.start_time = start;
        stats.end_time = end;
    }
    Ok(stats)
}

/// Read one commit as (record, timestamp). Changed paths come from a diff
/// against the first parent (empty tree for root commits). Merge commits
/// contribute no paths, matching a plain name-only log, which lists no
/// files for merges.
fn read_commit(repo: &Repository, oid: Oid) -> Result<(CommitRecord, i64), git2::Error> {
    let commit = repo.find_commit(oid)?;
    let time = commit.time().seconds();
    let message = commit.message().unwrap_or("").to_string();

    let mut paths = Vec::new();
    if commit.parent_count() <= 1 {
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };
        let current_tree = commit.tree()?;

        let mut diff_opts = DiffOptions::new();
        diff_opts.include_untracked(false);
        diff_opts.ignore_filemode(true);

        let diff =
            repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&current_tree), Some(&mut diff_opts))?;
        for delta in diff.deltas() {
            // Deletions carry their path on the old side.
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .and_then(|p| p.to_str());
            if let Some(path) = path {
                paths.push(path.to_string());
            }
        }
    }

    Ok((CommitRecord { id: oid, message, paths }, time))
}
