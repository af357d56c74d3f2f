//! Terminal rendering for command output.

use indicatif::{ProgressBar, ProgressStyle};

use crate::cleanup::{CleanupOperation, CleanupProgress};
use crate::history::{HistoryPage, HistoryRecord};
use crate::memory::MemorySnapshot;

/// Progress bar over the steps of one cleanup session.
pub struct StepProgressBar {
    bar: ProgressBar,
}

impl StepProgressBar {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(style);
        bar.set_message(format!("0/{total} operations"));
        Self { bar }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}

impl CleanupProgress for StepProgressBar {
    fn step_started(&self, operation: CleanupOperation, index: usize, total: usize) {
        self.bar
            .set_message(format!("{}/{} {}", index + 1, total, operation.description()));
    }

    fn step_finished(&self, _operation: CleanupOperation, fraction: f64) {
        self.bar.set_position((fraction * 100.0).round() as u64);
    }
}

pub fn show_memory(label: &str, snapshot: &MemorySnapshot) {
    println!("{label}");
    println!("  Total: {:.2} GB", snapshot.total_gb());
    println!("  Free:  {:.2} GB", snapshot.free_gb());
    println!("  Used:  {:.2} GB", snapshot.used_gb());
    println!("  Usage: {:.1}%", snapshot.percent_used());
}

pub fn show_operations() {
    for op in CleanupOperation::all() {
        println!("  {:<28} {}", op.token(), op.description());
    }
}

pub fn show_history_page(page: &HistoryPage<'_>, paginated: bool) {
    println!(
        "{:<20} {:>20} {:>20} {:>14}",
        "Timestamp", "Free Memory Before", "Free Memory After", "Freed Memory"
    );
    for record in page.records {
        show_history_row(record);
    }
    if paginated {
        println!(
            "\nShowing records {}-{} of {} (page {} of {})",
            page.start + 1,
            page.end,
            page.total,
            page.page,
            page.page_count
        );
    }
}

fn show_history_row(record: &HistoryRecord) {
    println!(
        "{:<20} {:>17} GB {:>17} GB {:>11} GB",
        record.timestamp_text(),
        record.free_before.to_string(),
        record.free_after.to_string(),
        record.freed.to_string()
    );
}
