// src/cli.rs

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Git URL of the repository to analyze (cloned with full history)
    pub url: String,

    /// Directory where snapshot JSON files and the index are written
    #[arg(short, long, default_value = "data")]
    pub output: PathBuf,

    /// Directory for the working clone; cleared before each run
    #[arg(long)]
    pub work_dir: Option<PathBuf>,
}
