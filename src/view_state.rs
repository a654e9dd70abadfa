use crate::github::issues::{Issue, IssueQuery};
use crate::github::repository::RepositoryMetadata;
use anyhow::{Result, anyhow};
use serde::Serialize;
use std::str::FromStr;

/// Fixed page size for every issue request.
pub const ISSUES_PER_PAGE: u32 = 5;

/// Issue-state filter values understood by the issues endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterState {
    All,
    Open,
    Closed,
}

impl FilterState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterState::All => "all",
            FilterState::Open => "open",
            FilterState::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssueFilter {
    pub state: FilterState,
    pub label: &'static str,
}

/// The filter buttons, in display order. Index 0 is active on mount.
pub const DEFAULT_FILTERS: [IssueFilter; 3] = [
    IssueFilter {
        state: FilterState::All,
        label: "All",
    },
    IssueFilter {
        state: FilterState::Open,
        label: "Open",
    },
    IssueFilter {
        state: FilterState::Closed,
        label: "Closed",
    },
];

/// Used by `active_filter` when `filter_index` does not point into `filters`.
static FALLBACK_FILTER: IssueFilter = DEFAULT_FILTERS[0];

/// 1-based issue page number. Never goes below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageCursor(u32);

impl PageCursor {
    pub fn new() -> Self {
        PageCursor(1)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn can_go_back(&self) -> bool {
        self.0 >= 2
    }

    /// Returns the moved cursor. `Back` from page 1 stays on page 1.
    pub fn step(self, direction: PageDirection) -> Self {
        match direction {
            PageDirection::Back => PageCursor(self.0.saturating_sub(1).max(1)),
            PageDirection::Next => PageCursor(self.0.saturating_add(1)),
        }
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Back,
    Next,
}

/// Parses the pagination words typed in the terminal view, with their
/// one-letter shorthands.
impl FromStr for PageDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "b" | "back" => Ok(PageDirection::Back),
            "n" | "next" => Ok(PageDirection::Next),
            other => Err(anyhow!("Unknown pagination direction: {other}")),
        }
    }
}

/// Everything the repository page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub repository: RepositoryMetadata,
    pub issues: Vec<Issue>,
    pub loading: bool,
    pub filters: Vec<IssueFilter>,
    /// Index into `filters`. `select_filter` keeps it in range; a state built by
    /// hand with an out-of-range index falls back to the "All" filter.
    pub filter_index: usize,
    pub page: PageCursor,
    /// Message of the last failed request, cleared by the next successful commit.
    pub last_error: Option<String>,
}

impl ViewState {
    pub fn active_filter(&self) -> &IssueFilter {
        self.filters
            .get(self.filter_index)
            .unwrap_or(&FALLBACK_FILTER)
    }

    /// Makes `index` the single active filter. Out-of-range indices leave the
    /// state untouched.
    pub fn select_filter(&mut self, index: usize) -> Result<()> {
        if index >= self.filters.len() {
            return Err(anyhow!(
                "Filter index {index} is out of range (0..{})",
                self.filters.len()
            ));
        }
        self.filter_index = index;
        Ok(())
    }

    /// Moves the cursor and reports whether the page actually changed.
    pub fn paginate(&mut self, direction: PageDirection) -> bool {
        let moved = self.page.step(direction);
        let changed = moved != self.page;
        self.page = moved;
        changed
    }

    /// Parameters of the issue request matching the current selection.
    pub fn issue_query(&self) -> IssueQuery {
        IssueQuery {
            state: self.active_filter().state.as_str(),
            page: self.page.get(),
            per_page: ISSUES_PER_PAGE,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            repository: RepositoryMetadata::default(),
            issues: Vec::new(),
            loading: true,
            filters: DEFAULT_FILTERS.to_vec(),
            filter_index: 0,
            page: PageCursor::new(),
            last_error: None,
        }
    }
}
