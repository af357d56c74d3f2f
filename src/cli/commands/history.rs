use crate::app::AppContext;
use crate::cli::display::show_history_page;
use crate::error::Result;
use crate::history::{paginate, sorted_view, SortKey, DEFAULT_PAGE_SIZE};

/// Show history sorted by `sort`. Pagination only kicks in above the
/// default page size.
pub fn run_history_command(
    ctx: &AppContext,
    sort: SortKey,
    ascending: bool,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let records = ctx.history.load()?;
    if records.is_empty() {
        println!("No memory usage history recorded yet.");
        return Ok(());
    }

    let view = sorted_view(&records, sort, ascending);
    let paginated = view.len() > DEFAULT_PAGE_SIZE;
    let shown = if paginated {
        paginate(&view, page_size, page)
    } else {
        paginate(&view, view.len(), 1)
    };

    show_history_page(&shown, paginated);
    println!(
        "\nSorted by {} ({})",
        sort.column(),
        if ascending { "ascending" } else { "descending" }
    );
    Ok(())
}
