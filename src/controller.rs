//! View-state controller for the repository page.
//!
//! Three triggers drive it: mount (`initialize`), a filter click
//! (`select_filter`) and a pagination click (`paginate`). Each one updates the
//! selection, issues a request through the [`DataFetcher`], and commits the
//! response into a `watch` channel that the presentation side subscribes to.
//!
//! Metadata and the issue list are independent request slots. Each slot has a
//! generation counter that is bumped when a request is issued; a response is
//! committed only while its generation is still the newest for the slot, so a
//! slow response never overwrites a newer one.

use crate::github::client::DataFetcher;
use crate::view_state::{PageCursor, PageDirection, ViewState};
use anyhow::Result;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// What happens to the page cursor when another filter is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterPagePolicy {
    /// Keep the current page.
    #[default]
    Keep,
    /// Go back to page 1.
    Reset,
}

/// Result of one controller operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response was written into the view state.
    Committed,
    /// A newer request for the same slot was issued before this one resolved.
    Discarded,
    /// Nothing changed, so no request was issued.
    Unchanged,
}

/// Owns the repository page state and turns mount, filter and page clicks
/// into issue requests.
#[derive(Debug)]
pub struct RepositoryController<F> {
    fetcher: F,
    repository: String,
    policy: FilterPagePolicy,
    state: watch::Sender<ViewState>,
    metadata_generation: AtomicU64,
    issues_generation: AtomicU64,
}

impl<F: DataFetcher> RepositoryController<F> {
    /// `repository` is the already decoded `<owner>/<repo>` identifier.
    pub fn new(fetcher: F, repository: impl Into<String>) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        RepositoryController {
            fetcher,
            repository: repository.into(),
            policy: FilterPagePolicy::default(),
            state,
            metadata_generation: AtomicU64::new(0),
            issues_generation: AtomicU64::new(0),
        }
    }

    pub fn with_policy(mut self, policy: FilterPagePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Snapshot of the current view state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every commit.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Loads metadata and the first issue page together.
    ///
    /// Both requests run concurrently and nothing is committed until both
    /// succeed. On failure the view stays in its loading state. If a click
    /// issued a newer issue request meanwhile, that request owns the issue
    /// list and only the metadata half of this load is committed.
    pub async fn initialize(&self) -> Result<Outcome> {
        let query = self.state.borrow().issue_query();
        let metadata_tag = next_generation(&self.metadata_generation);
        let issues_tag = next_generation(&self.issues_generation);
        tracing::debug!(
            repository = %self.repository,
            state = query.state,
            page = query.page,
            "loading repository view"
        );

        let joined = tokio::try_join!(
            self.fetcher.fetch_repository(&self.repository),
            self.fetcher.fetch_issues(&self.repository, &query),
        );

        let (repository, issues) = match joined {
            Ok(pair) => pair,
            Err(err) => {
                let err = err.context(format!("Failed to load repository {}", self.repository));
                if !is_current(&self.metadata_generation, metadata_tag) {
                    tracing::warn!(
                        repository = %self.repository,
                        error = %format!("{err:#}"),
                        "discarding stale repository failure"
                    );
                    return Ok(Outcome::Discarded);
                }
                self.record_failure(&err);
                return Err(err);
            }
        };

        if !is_current(&self.metadata_generation, metadata_tag) {
            tracing::warn!(repository = %self.repository, "discarding stale repository load");
            return Ok(Outcome::Discarded);
        }
        let issues_current = is_current(&self.issues_generation, issues_tag);
        let count = issues.len();

        self.state.send_modify(|state| {
            state.repository = repository;
            if issues_current {
                state.issues = issues;
            }
            state.loading = false;
            state.last_error = None;
        });
        tracing::info!(
            repository = %self.repository,
            issues = count,
            issues_current,
            "repository view loaded"
        );
        Ok(Outcome::Committed)
    }

    /// Activates filter `index` and reloads the issue list.
    pub async fn select_filter(&self, index: usize) -> Result<Outcome> {
        let policy = self.policy;
        let mut rejected = None;
        self.state.send_if_modified(|state| match state.select_filter(index) {
            Ok(()) => {
                if policy == FilterPagePolicy::Reset {
                    state.page = PageCursor::new();
                }
                true
            }
            Err(err) => {
                rejected = Some(err);
                false
            }
        });
        if let Some(err) = rejected {
            return Err(err);
        }
        self.load_issues().await
    }

    /// Moves the page cursor and reloads the issue list.
    ///
    /// `Back` on page 1 is a no-op and issues no request.
    pub async fn paginate(&self, direction: PageDirection) -> Result<Outcome> {
        let changed = self
            .state
            .send_if_modified(|state| state.paginate(direction));
        if !changed {
            tracing::debug!(?direction, "page cursor unchanged");
            return Ok(Outcome::Unchanged);
        }
        self.load_issues().await
    }

    /// Requests the issue page for the current selection. A response that
    /// resolves after a newer request was issued is dropped, whether it
    /// succeeded or failed, and reported as `Outcome::Discarded`.
    async fn load_issues(&self) -> Result<Outcome> {
        let query = self.state.borrow().issue_query();
        let generation = next_generation(&self.issues_generation);
        tracing::debug!(
            repository = %self.repository,
            state = query.state,
            page = query.page,
            generation,
            "requesting issues"
        );

        match self.fetcher.fetch_issues(&self.repository, &query).await {
            Ok(issues) => {
                if !is_current(&self.issues_generation, generation) {
                    tracing::warn!(
                        page = query.page,
                        state = query.state,
                        generation,
                        "discarding stale issue response"
                    );
                    return Ok(Outcome::Discarded);
                }
                let count = issues.len();
                self.state.send_modify(|state| {
                    state.issues = issues;
                    state.last_error = None;
                });
                tracing::info!(page = query.page, state = query.state, issues = count, "issues loaded");
                Ok(Outcome::Committed)
            }
            Err(err) => {
                let err = err.context(format!("Failed to load issues for {}", self.repository));
                if !is_current(&self.issues_generation, generation) {
                    tracing::warn!(
                        page = query.page,
                        state = query.state,
                        generation,
                        error = %format!("{err:#}"),
                        "discarding stale issue failure"
                    );
                    return Ok(Outcome::Discarded);
                }
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    fn record_failure(&self, err: &anyhow::Error) {
        let message = format!("{err:#}");
        tracing::warn!(repository = %self.repository, error = %message, "request failed");
        self.state.send_modify(|state| state.last_error = Some(message));
    }
}

fn next_generation(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

fn is_current(counter: &AtomicU64, generation: u64) -> bool {
    counter.load(Ordering::SeqCst) == generation
}
