//! Clean command: run the selected operations and report freed memory.

use serde::Serialize;

use crate::app::AppContext;
use crate::cleanup::{
    CleanupOperation, CleanupReport, CleanupSessionResult, FreedSummary, HistoryOutcome,
};
use crate::cli::display::StepProgressBar;
use crate::error::{Error, Result};
use crate::memory::format_memory;

#[derive(Serialize)]
struct CleanOutput<'a> {
    session: &'a CleanupSessionResult,
    history: String,
}

fn describe_history(outcome: &HistoryOutcome) -> String {
    match outcome {
        HistoryOutcome::Saved(_) => "saved".to_string(),
        HistoryOutcome::Skipped(reason) => format!("skipped: {reason}"),
        HistoryOutcome::Failed(e) => format!("failed: {e}"),
    }
}

/// Execute the clean command
pub async fn run_clean_command(ctx: &AppContext, tokens: &[String], json: bool) -> Result<()> {
    let selected = if tokens.is_empty() {
        CleanupOperation::all().to_vec()
    } else {
        CleanupOperation::parse_selection(tokens)?
    };

    if CleanupOperation::is_full_set(&selected) && !json {
        println!("⚠️  Running every cleanup operation. The system may be briefly unresponsive.");
    }

    let progress = if json {
        StepProgressBar::hidden()
    } else {
        StepProgressBar::new(selected.len())
    };
    let report = ctx.cleanup.run_with_progress(&selected, &progress).await;

    if json {
        let output = CleanOutput {
            session: &report.session,
            history: describe_history(&report.history),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    match report.session.error() {
        Some(err) => {
            progress.abandon("cleanup failed");
            if !json {
                show_failure(&report);
            }
            Err(Error::Cleanup(err.clone()))
        }
        None => {
            progress.finish("cleanup complete");
            if !json {
                show_success(&report);
            }
            Ok(())
        }
    }
}

fn show_success(report: &CleanupReport) {
    let session = &report.session;
    println!("\n✅ Memory cleanup completed successfully!");

    if session.sampling_degraded() {
        println!("  Memory statistics were unavailable; freed memory is unknown.");
    } else if let (Some(before), Some(after)) = (session.memory_before(), session.memory_after()) {
        println!("  Free before: {}", format_memory(before.free_bytes));
        println!("  Free after:  {}", format_memory(after.free_bytes));
        match (report.freed_summary(), session.freed_gb()) {
            (Some(FreedSummary::Substantial), Some(gb)) => {
                println!("  🎉 Freed {gb:.2} GB of memory!")
            }
            (Some(FreedSummary::Some), Some(gb)) => println!("  Freed {gb:.2} GB of memory."),
            _ => println!("  No memory was freed."),
        }
    }

    match &report.history {
        HistoryOutcome::Saved(record) => {
            println!("  Recorded in history at {}", record.timestamp_text())
        }
        HistoryOutcome::Skipped(reason) => println!("  Not recorded in history: {reason}"),
        HistoryOutcome::Failed(e) => eprintln!("⚠️  Warning: failed to save history: {e}"),
    }
}

fn show_failure(report: &CleanupReport) {
    eprintln!("\n❌ Memory cleanup failed");
    if let Some(operation) = report.session.error().and_then(|e| e.operation()) {
        eprintln!("  Step: {} ({})", operation, operation.description());
    }
    if let Some(step) = report.session.failed_step() {
        if !step.output.is_empty() {
            eprintln!("  Tool output:\n{}", step.output);
        }
    }
}
