//! Interactive menu shell.
//!
//! This module drives the whole user-facing loop: a numbered main menu, the
//! prompt/validation flows for each operation, and fixed-width table output.
//! All state lives in the `Store`; the shell is glue that collects validated
//! input and renders results.

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::fields::*;
use crate::store::Store;
use crate::task::Task;

/// Longest description shown untruncated in task tables.
const DESCRIPTION_WIDTH: usize = 22;

/// Menu application driving a task store through numbered choices.
pub struct MenuApp {
    store: Store,
}

impl MenuApp {
    pub fn new(store: Store) -> Self {
        MenuApp { store }
    }

    /// Run the menu loop until the user exits or stdin closes.
    ///
    /// I/O errors other than end-of-input are reported and the loop carries
    /// on; only a failure to write the prompt itself escapes to the caller.
    pub fn run(&mut self) -> io::Result<()> {
        println!("Welcome to Personal To-Do List Manager!");
        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
                Err(e) => println!("An error occurred: {e}"),
            }
        }
    }

    /// One menu round: show the menu, read a choice, dispatch, pause.
    /// Returns false once the user chooses to exit.
    fn step(&mut self) -> io::Result<bool> {
        print_menu();
        let choice = prompt("Enter your choice (0-9): ")?;
        match choice.as_str() {
            "1" => self.add_task()?,
            "2" => self.view_all(),
            "3" => self.view_pending(),
            "4" => self.view_completed(),
            "5" => self.mark_complete()?,
            "6" => self.update_task()?,
            "7" => self.delete_task()?,
            "8" => self.filter_by_priority()?,
            "9" => self.show_statistics(),
            "0" => {
                println!("\nThank you for using Personal To-Do List Manager!");
                println!("Your tasks have been saved automatically.");
                return Ok(false);
            }
            _ => println!("Invalid choice. Please enter a number between 0-9."),
        }
        prompt("\nPress Enter to continue...")?;
        Ok(true)
    }

    fn add_task(&mut self) -> io::Result<()> {
        println!("\n--- Add New Task ---");
        let description = prompt("Enter task description: ")?;
        if description.is_empty() {
            println!("Task description cannot be empty!");
            return Ok(());
        }
        let priority = prompt_priority()?;
        let id = self.store.add(&description, priority);
        println!("{} Task added successfully! ID: {id}", "✓".green());
        Ok(())
    }

    fn view_all(&self) {
        display_tasks(&self.store.all(), "All Tasks");
    }

    fn view_pending(&self) {
        display_tasks(&self.store.pending(), "Pending Tasks");
    }

    fn view_completed(&self) {
        display_tasks(&self.store.completed(), "Completed Tasks");
    }

    fn mark_complete(&mut self) -> io::Result<()> {
        println!("\n--- Mark Task as Complete ---");
        let pending = self.store.pending();
        if pending.is_empty() {
            println!("No pending tasks to complete.");
            return Ok(());
        }
        display_tasks(&pending, "Pending Tasks");

        let id = prompt("\nEnter task ID to mark as complete: ")?.to_uppercase();
        if self.store.mark_complete(&id) {
            println!("{} Task {id} marked as complete!", "✓".green());
        } else {
            println!("Task not found or already completed.");
        }
        Ok(())
    }

    fn update_task(&mut self) -> io::Result<()> {
        println!("\n--- Update Task ---");
        let tasks = self.store.all();
        if tasks.is_empty() {
            println!("No tasks available to update.");
            return Ok(());
        }
        display_tasks(&tasks, "Tasks");

        let id = prompt("\nEnter task ID to update: ")?.to_uppercase();
        let Some(task) = self.store.get(&id) else {
            println!("Task not found.");
            return Ok(());
        };
        println!("\nCurrent task: {}", task.description);
        println!("Current priority: {}", format_priority(task.priority));

        let new_description = prompt("Enter new description (press Enter to keep current): ")?;
        let raw_priority =
            prompt("Enter new priority (High/Medium/Low, press Enter to keep current): ")?;

        // Empty input means "keep current"; it reaches the store as None.
        let new_priority = if raw_priority.is_empty() {
            None
        } else {
            match parse_priority(&raw_priority) {
                Some(p) => Some(p),
                None => {
                    println!("Invalid priority. Update cancelled.");
                    return Ok(());
                }
            }
        };
        let description = (!new_description.is_empty()).then_some(new_description.as_str());

        if self.store.update(&id, description, new_priority) {
            println!("{} Task {id} updated successfully!", "✓".green());
        } else {
            println!("Failed to update task.");
        }
        Ok(())
    }

    fn delete_task(&mut self) -> io::Result<()> {
        println!("\n--- Delete Task ---");
        let tasks = self.store.all();
        if tasks.is_empty() {
            println!("No tasks available to delete.");
            return Ok(());
        }
        display_tasks(&tasks, "Tasks");

        let id = prompt("\nEnter task ID to delete: ")?.to_uppercase();
        let confirm = prompt(&format!("Are you sure you want to delete task {id}? (y/N): "))?;
        if confirm.eq_ignore_ascii_case("y") {
            if self.store.delete(&id) {
                println!("{} Task {id} deleted successfully!", "✓".green());
            } else {
                println!("Task not found.");
            }
        } else {
            println!("Delete cancelled.");
        }
        Ok(())
    }

    fn filter_by_priority(&self) -> io::Result<()> {
        println!("\n--- Filter by Priority ---");
        let priority = prompt_priority()?;
        let tasks = self.store.by_priority(priority);
        display_tasks(&tasks, &format!("{} Priority Tasks", format_priority(priority)));
        Ok(())
    }

    fn show_statistics(&self) {
        let total = self.store.all().len();
        let pending = self.store.pending().len();
        let completed = self.store.completed().len();

        println!("\n--- Task Statistics ---");
        println!("Total tasks: {total}");
        println!("Pending tasks: {pending}");
        println!("Completed tasks: {completed}");
        if total > 0 {
            let rate = completed as f64 / total as f64 * 100.0;
            println!("Completion rate: {rate:.1}%");
        }

        println!("\nPriority breakdown:");
        println!("High priority: {}", self.store.by_priority(Priority::High).len());
        println!("Medium priority: {}", self.store.by_priority(Priority::Medium).len());
        println!("Low priority: {}", self.store.by_priority(Priority::Low).len());
    }
}

/// Print the numbered main menu.
fn print_menu() {
    println!("\n{}", "=".repeat(50));
    println!("     {}", "PERSONAL TO-DO LIST MANAGER".bold());
    println!("{}", "=".repeat(50));
    println!("1. Add new task");
    println!("2. View all tasks");
    println!("3. View pending tasks");
    println!("4. View completed tasks");
    println!("5. Mark task as complete");
    println!("6. Update task");
    println!("7. Delete task");
    println!("8. Filter tasks by priority");
    println!("9. Task statistics");
    println!("0. Exit");
    println!("{}", "-".repeat(50));
}

/// Print tasks in a formatted table, or a placeholder line when empty.
fn display_tasks(tasks: &[&Task], title: &str) {
    if tasks.is_empty() {
        println!("\nNo {} found.", title.to_lowercase());
        return;
    }
    println!("\n{title}:");
    println!("{}", "-".repeat(80));
    println!(
        "{:<6} {:<25} {:<10} {:<12} {:<12}",
        "ID", "Description", "Priority", "Status", "Created"
    );
    println!("{}", "-".repeat(80));
    for t in tasks {
        println!(
            "{:<6} {:<25} {:<10} {:<12} {:<12}",
            t.id,
            truncate(&t.description, DESCRIPTION_WIDTH),
            format_priority(t.priority),
            format_status(t.status),
            t.date_created.to_string(),
        );
    }
    println!("{}", "-".repeat(80));
}

/// Truncate a string to `width` characters, appending an ellipsis when it
/// does not fit.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width).collect();
    out.push('…');
    out
}

/// Ask for a priority until the user enters a valid one or accepts the
/// Medium default with an empty line.
fn prompt_priority() -> io::Result<Priority> {
    loop {
        let input = prompt("Enter priority (High/Medium/Low) [default: Medium]: ")?;
        if input.is_empty() {
            return Ok(Priority::Medium);
        }
        match parse_priority(&input) {
            Some(p) => return Ok(p),
            None => println!("Invalid priority. Please enter High, Medium, or Low."),
        }
    }
}

/// Show `msg` and read one trimmed line from stdin.
///
/// Yields `UnexpectedEof` once stdin closes; the run loop treats that as a
/// normal exit request.
fn prompt(msg: &str) -> io::Result<String> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_appends_ellipsis_past_width() {
        assert_eq!(truncate("short", DESCRIPTION_WIDTH), "short");

        let exact = "x".repeat(DESCRIPTION_WIDTH);
        assert_eq!(truncate(&exact, DESCRIPTION_WIDTH), exact);

        let long = "abcdefghijklmnopqrstuvwxyz";
        assert_eq!(truncate(long, DESCRIPTION_WIDTH), "abcdefghijklmnopqrstuv…");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let accented = "é".repeat(DESCRIPTION_WIDTH + 1);
        let cut = truncate(&accented, DESCRIPTION_WIDTH);
        assert_eq!(cut, format!("{}…", "é".repeat(DESCRIPTION_WIDTH)));
    }
}
