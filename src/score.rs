// src/score.rs

/// Cap on the bug-ratio bonus: bug churn flags a file but never dominates
/// the ranking for files with few commits.
const BUG_RATIO_CAP: u32 = 30;

/// Combine a smell score with the bug-touch ratio into the final risk score.
///
/// `commits` is clamped to at least 1, covering files with no recorded
/// history (newly added, uncommitted, or path-mismatched). The result is
/// clamped to [0, 100].
pub fn combine(smell_score: u32, commits: u32, bugs: u32) -> u32 {
    let commits = commits.max(1);
    let bug_ratio_score = ((bugs as f64 / commits as f64) * 50.0) as u32;
    (smell_score + bug_ratio_score.min(BUG_RATIO_CAP)).min(100)
}
