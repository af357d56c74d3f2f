//! Read-only views over loaded history: sorting and pagination.

use std::cmp::Ordering;

use super::record::HistoryRecord;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Timestamp,
    #[value(name = "before")]
    FreeBefore,
    #[value(name = "after")]
    FreeAfter,
    Freed,
}

impl SortKey {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Timestamp => "Timestamp",
            Self::FreeBefore => "Free Memory Before",
            Self::FreeAfter => "Free Memory After",
            Self::Freed => "Freed Memory",
        }
    }

    fn compare(&self, a: &HistoryRecord, b: &HistoryRecord) -> Ordering {
        match self {
            Self::Timestamp => a.timestamp.cmp(&b.timestamp),
            Self::FreeBefore => a.free_before.cmp(&b.free_before),
            Self::FreeAfter => a.free_after.cmp(&b.free_after),
            Self::Freed => a.freed.cmp(&b.freed),
        }
    }
}

/// A reordered copy of `records`. Ties keep their stored order in both
/// directions.
pub fn sorted_view(records: &[HistoryRecord], key: SortKey, ascending: bool) -> Vec<HistoryRecord> {
    let mut view = records.to_vec();
    view.sort_by(|a, b| {
        let ord = key.compare(a, b);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    view
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage<'a> {
    pub records: &'a [HistoryRecord],
    /// 1-based page number actually shown.
    pub page: usize,
    pub page_count: usize,
    /// 0-based start index, inclusive.
    pub start: usize,
    /// 0-based end index, exclusive.
    pub end: usize,
    pub total: usize,
}

/// Slice out one page. Page numbers are 1-based and clamp into range; a
/// page size of zero is treated as one.
pub fn paginate(records: &[HistoryRecord], page_size: usize, page: usize) -> HistoryPage<'_> {
    let page_size = page_size.max(1);
    let total = records.len();
    let page_count = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, page_count);

    let start = ((page - 1) * page_size).min(total);
    let end = (start + page_size).min(total);

    HistoryPage {
        records: &records[start..end],
        page,
        page_count,
        start,
        end,
        total,
    }
}
