//! # Personal To-Do List Manager
//!
//! A single-user, menu-driven to-do list for the terminal. Tasks are kept in
//! a plain-text file, so the list survives restarts and stays trivially
//! greppable.
//!
//! ## Key Features
//!
//! - **Numbered Menu**: Every operation is reachable with a single digit
//! - **Typed Tasks**: Priority (High/Medium/Low) and status (Pending/Completed)
//!   with creation and completion dates
//! - **Plain-Text Storage**: One comma-separated file, rewritten after every change
//! - **Stable IDs**: Sequential `T001`-style IDs that are never reused
//!
//! ## Quick Start
//!
//! ```bash
//! # Run against the default ./tasks.csv
//! todo
//!
//! # Or keep the list somewhere specific
//! todo --file ~/notes/tasks.csv
//! ```
//!
//! Exit with menu choice 0 or by closing input; the file is rewritten after
//! every change, so there is nothing left to save on the way out.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod fields;
pub mod menu;
pub mod store;
pub mod task;

use cli::Cli;
use menu::MenuApp;
use store::Store;

fn main() {
    let cli = Cli::parse();

    let path = cli.file.unwrap_or_else(|| PathBuf::from("tasks.csv"));
    let store = Store::load(path);

    let mut app = MenuApp::new(store);
    if let Err(e) = app.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
