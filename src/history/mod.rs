//! Cleanup history: the durable record of what each successful session freed.
//!
//! Stored as a CSV file with the columns `Timestamp`, `Free Memory Before`,
//! `Free Memory After` and `Freed Memory`, amounts in gigabytes with two
//! decimals.

pub mod amount;
pub mod confirm;
pub mod error;
pub mod record;
pub mod store;
pub mod view;

pub use amount::{AmountParseError, GbAmount};
pub use confirm::{ClearOutcome, ClearToken};
pub use error::{HistoryError, HistoryResult};
pub use record::{HistoryRecord, TIMESTAMP_FORMAT};
pub use store::HistoryStore;
pub use view::{paginate, sorted_view, HistoryPage, SortKey, DEFAULT_PAGE_SIZE};
