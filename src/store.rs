//! Task storage and persistence.
//!
//! This module provides the `Store` struct owning the in-memory task
//! collection and the delimited text file it lives in between runs. The file
//! is a fixed-column layout (`task_id, description, priority, status,
//! date_created, date_completed`) with a header row; the whole collection is
//! rewritten after every mutating operation.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::fields::*;
use crate::task::Task;

/// Header row of the task file. Column order and names are fixed; a file
/// whose first line disagrees is treated as malformed.
const HEADER: &str = "task_id,description,priority,status,date_created,date_completed";

/// File-backed store for the task collection.
///
/// Tasks keep their insertion order. The id counter only moves forward within
/// a session, so deleted ids are never handed out again; across restarts it
/// is recomputed from the highest id on disk.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

impl Store {
    /// Open the store at `path`, reading the task file if one exists.
    ///
    /// Never fails: an unreadable file or a bad header is logged and the
    /// store starts empty, and malformed rows are skipped one by one with a
    /// warning naming the line.
    pub fn load(path: PathBuf) -> Self {
        let mut store = Store {
            path,
            tasks: Vec::new(),
            next_id: 1,
        };
        if !store.path.exists() {
            return store;
        }
        let mut buf = String::new();
        if let Err(e) = File::open(&store.path).and_then(|mut f| f.read_to_string(&mut buf)) {
            eprintln!("Error loading tasks: {e}");
            return store;
        }

        let mut lines = buf.lines().enumerate();
        match lines.next() {
            // A zero-byte file holds no tasks and is not an error.
            None => return store,
            Some((_, header)) if header != HEADER => {
                eprintln!("Error loading tasks: unrecognised header {header:?}, starting fresh");
                return store;
            }
            Some(_) => {}
        }
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            match parse_row(line) {
                Ok(task) => store.tasks.push(task),
                Err(reason) => eprintln!("Warning: line {}: {reason}. Skipping.", idx + 1),
            }
        }

        store.next_id = store
            .tasks
            .iter()
            .filter_map(|t| task_number(&t.id))
            .max()
            .map_or(1, |max| max + 1);
        store
    }

    /// Rewrite the task file with the full current collection, header first.
    ///
    /// Write errors are logged and swallowed; the in-memory state stays
    /// authoritative and the next successful save catches the file up.
    pub fn save(&self) {
        if let Err(e) = self.write_file() {
            eprintln!("Error saving tasks: {e}");
        }
    }

    fn write_file(&self) -> std::io::Result<()> {
        // Atomic-ish write via temp + rename.
        let tmp = self.path.with_extension("csv.tmp");
        let mut data = String::from(HEADER);
        data.push('\n');
        for t in &self.tasks {
            data.push_str(&format_row(t));
            data.push('\n');
        }
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }

    /// Add a new Pending task dated today and persist. Returns the new id.
    /// Line breaks in the description are flattened to keep the record on
    /// one line of the file.
    pub fn add(&mut self, description: &str, priority: Priority) -> String {
        let id = format!("T{:03}", self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id: id.clone(),
            description: flatten_line_breaks(description),
            priority,
            status: Status::Pending,
            date_created: Local::now().date_naive(),
            date_completed: None,
        });
        self.save();
        id
    }

    /// All tasks in insertion order.
    pub fn all(&self) -> Vec<&Task> {
        self.tasks.iter().collect()
    }

    /// Tasks still waiting to be done, in insertion order.
    pub fn pending(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == Status::Pending)
            .collect()
    }

    /// Completed tasks, in insertion order.
    pub fn completed(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == Status::Completed)
            .collect()
    }

    /// Tasks with exactly the given priority, in insertion order.
    pub fn by_priority(&self, priority: Priority) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.priority == priority)
            .collect()
    }

    /// Look a task up by exact id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Mark a task completed, stamping today as the completion date, and
    /// persist. Marking an already completed task succeeds and re-stamps.
    /// Returns false when no task has the id.
    pub fn mark_complete(&mut self, id: &str) -> bool {
        let Some(t) = self.get_mut(id) else {
            return false;
        };
        t.status = Status::Completed;
        t.date_completed = Some(Local::now().date_naive());
        self.save();
        true
    }

    /// Update the description and/or priority of a task and persist. `None`
    /// leaves a field unchanged. Returns false when no task has the id.
    pub fn update(&mut self, id: &str, description: Option<&str>, priority: Option<Priority>) -> bool {
        let Some(t) = self.get_mut(id) else {
            return false;
        };
        if let Some(d) = description {
            t.description = flatten_line_breaks(d);
        }
        if let Some(p) = priority {
            t.priority = p;
        }
        self.save();
        true
    }

    /// Remove the first task matching the id and persist. Returns false when
    /// none match.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        self.tasks.remove(idx);
        self.save();
        true
    }
}

/// Numeric suffix of a well-formed task id (`T042` -> 42). `None` when the id
/// does not match the `T<digits>` pattern.
fn task_number(id: &str) -> Option<u64> {
    let digits = id.strip_prefix('T')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse one data row in the fixed column order.
fn parse_row(line: &str) -> Result<Task, String> {
    let fields = split_row(line);
    if fields.len() != 6 {
        return Err(format!("expected 6 fields, found {}", fields.len()));
    }
    let id = fields[0].clone();
    if task_number(&id).is_none() {
        return Err(format!("malformed task id {id:?}"));
    }
    let priority =
        parse_priority(&fields[2]).ok_or_else(|| format!("unknown priority {:?}", fields[2]))?;
    let status =
        parse_status(&fields[3]).ok_or_else(|| format!("unknown status {:?}", fields[3]))?;
    let date_created =
        parse_date(&fields[4]).ok_or_else(|| format!("bad date_created {:?}", fields[4]))?;
    let date_completed = if fields[5].is_empty() {
        None
    } else {
        Some(parse_date(&fields[5]).ok_or_else(|| format!("bad date_completed {:?}", fields[5]))?)
    };
    Ok(Task {
        id,
        description: fields[1].clone(),
        priority,
        status,
        date_created,
        date_completed,
    })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Serialize one task as a data row in the fixed column order. Only the
/// description is free text; every other column is machine-generated and
/// never needs quoting.
fn format_row(t: &Task) -> String {
    format!(
        "{},{},{},{},{},{}",
        t.id,
        escape_field(&t.description),
        format_priority(t.priority),
        format_status(t.status),
        t.date_created,
        t.date_completed.map(|d| d.to_string()).unwrap_or_default(),
    )
}

/// The task file holds one record per line and the reader splits on line
/// endings, so descriptions have any embedded line breaks flattened to
/// spaces before they enter the store.
fn flatten_line_breaks(s: &str) -> String {
    if !s.contains(['\n', '\r']) {
        return s.to_string();
    }
    s.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Quote a field per standard delimited-text rules when it contains the
/// delimiter or a quote, doubling interior quotes. Line breaks never reach
/// this point: descriptions are flattened on the way into the store.
fn escape_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split one line into fields, honouring double-quote quoting with `""`
/// escapes.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
