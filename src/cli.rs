use std::path::PathBuf;

use clap::Parser;

/// Menu-driven personal to-do list manager.
/// Tasks live in ./tasks.csv or a path passed via --file.
#[derive(Parser)]
#[command(name = "todo", version, about = "Personal to-do list manager")]
pub struct Cli {
    /// Path to the task file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}
