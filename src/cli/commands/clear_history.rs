use std::io::{self, BufRead, Write};

use crate::app::AppContext;
use crate::error::Result;
use crate::history::ClearOutcome;

/// Two-phase deletion: request, confirm on stdin unless `yes`, then clear.
pub fn run_clear_history_command(ctx: &AppContext, yes: bool) -> Result<()> {
    let token = ctx.history.request_clear();
    match token.record_count() {
        Some(count) => println!(
            "This will delete {} history record(s) from {}",
            count,
            ctx.history.path().display()
        ),
        None => println!(
            "This will delete the unreadable history file {}",
            ctx.history.path().display()
        ),
    }

    if !yes && !confirm("Delete all history?", &mut io::stdin().lock())? {
        println!("History left unchanged.");
        return Ok(());
    }

    match ctx.history.confirm_clear(token)? {
        ClearOutcome::Cleared => println!("✅ History cleared."),
        ClearOutcome::NothingToClear => println!("No history to clear."),
    }
    Ok(())
}

fn confirm(question: &str, input: &mut impl BufRead) -> Result<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
