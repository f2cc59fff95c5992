// src/main.rs

mod cli;

use anyhow::{Context, Result};
use chrono::TimeZone;
use clap::Parser;
use cli::Args;
use git2::Repository;
use repo_risk::{history, report, walker};
use std::fs;
use std::time::Instant;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let start_time = Instant::now();

    let work_dir = args
        .work_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("repo-risk-clone"));
    if work_dir.exists() {
        fs::remove_dir_all(&work_dir)
            .with_context(|| format!("Failed to clear work dir {}", work_dir.display()))?;
    }

    println!("Cloning {} (full history)...", args.url);
    let repo = Repository::clone(&args.url, &work_dir)
        .with_context(|| format!("Failed to clone {}", args.url))?;

    println!("Analyzing codebase, git history, and bug-related commits...");
    let history = history::collect(&repo).context("Failed to aggregate commit history")?;
    if history.end_time > history.start_time {
        println!(
            "Repository history spans from {} to {}.",
            chrono::Utc.timestamp_opt(history.start_time, 0).unwrap().to_rfc2822(),
            chrono::Utc.timestamp_opt(history.end_time, 0).unwrap().to_rfc2822()
        );
    }

    let files = walker::discover(&work_dir);
    let records = report::build_records(&files, &history);
    let snapshot = report::assemble(&args.url, records);
    let out_path = report::persist(&snapshot, &args.output)?;

    let high_risk = snapshot.files.iter().filter(|f| f.smell_score > 50).count();
    println!(
        "Analysis complete in {:.2?}: {} files, {} LOC",
        start_time.elapsed(),
        snapshot.total_files,
        snapshot.total_loc
    );
    println!(
        "Found {} bug-related touches affecting {} files",
        snapshot.total_bugs, snapshot.files_with_bugs
    );
    println!("Found {} files with high risk scores (>50)", high_risk);
    println!("Data saved to {}", out_path.display());

    Ok(())
}
