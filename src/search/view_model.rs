use crate::api::CatalogSource;
use crate::error::Result;
use crate::models::{Host, Hotel};
use crate::search::filter::{apply_query, distinct_locations, Rankable};
use crate::search::types::SearchQuery;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, error, warn};

/// What a listing page should show
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Waiting for the collection or for a search to settle
    Loading,
    /// At least one match
    Results(Vec<T>),
    /// The collection loaded but nothing matched
    NoMatches,
    /// The collection itself could not be fetched
    FetchFailed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn results(&self) -> &[T] {
        match self {
            ViewState::Results(items) => items,
            _ => &[],
        }
    }
}

/// Handle for one search; only the most recently issued one may update the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Handle for one collection fetch; a fetch that was overtaken by a newer
/// one is dropped when it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug)]
enum Collection<T> {
    Pending,
    Loaded(Vec<T>),
    Failed(String),
}

#[derive(Debug)]
struct Inner<T> {
    collection: Collection<T>,
    view: ViewState<T>,
    latest: u64,
    loads: u64,
}

/// Filter/sort state of a listing page, computed locally over a collection
/// fetched once
#[derive(Debug)]
pub struct SearchViewModel<T> {
    inner: Mutex<Inner<T>>,
    delay: Duration,
}

impl<T: Rankable + Clone> Default for SearchViewModel<T> {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<T: Rankable + Clone> SearchViewModel<T> {
    /// `delay` is the pause before a search result is shown
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                collection: Collection::Pending,
                view: ViewState::Loading,
                latest: 0,
                loads: 0,
            }),
            delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Install the outcome of fetching the collection and show it unfiltered.
    /// Any fetch still in flight is superseded.
    pub fn set_collection(&self, fetched: Result<Vec<T>>) {
        let mut inner = self.lock();
        inner.loads += 1;
        install(&mut inner, fetched);
    }

    /// Start fetching the collection; only the newest load may install its
    /// result
    pub fn begin_load(&self) -> LoadTicket {
        let mut inner = self.lock();
        inner.loads += 1;
        LoadTicket(inner.loads)
    }

    /// Install the result of the fetch behind `ticket`. Returns `false`,
    /// dropping `fetched`, when a newer load has started since.
    pub fn finish_load(&self, ticket: LoadTicket, fetched: Result<Vec<T>>) -> bool {
        let mut inner = self.lock();
        if ticket.0 != inner.loads {
            debug!(ticket = ticket.0, latest = inner.loads, "Discarding stale collection");
            return false;
        }
        install(&mut inner, fetched);
        true
    }

    pub fn view(&self) -> ViewState<T> {
        self.lock().view.clone()
    }

    /// Choices for the location picker
    pub fn locations(&self) -> Vec<String> {
        match &self.lock().collection {
            Collection::Loaded(items) => distinct_locations(items),
            _ => Vec::new(),
        }
    }

    /// Start a search: the view goes to loading and any earlier ticket is
    /// superseded
    pub fn begin(&self) -> SearchTicket {
        let mut inner = self.lock();
        inner.latest += 1;
        inner.view = ViewState::Loading;
        SearchTicket(inner.latest)
    }

    /// Finish the search behind `ticket`. Returns `false`, leaving the view
    /// alone, when a newer search has started since.
    pub fn complete(&self, ticket: SearchTicket, query: &SearchQuery) -> bool {
        let mut inner = self.lock();
        if ticket.0 != inner.latest {
            debug!(ticket = ticket.0, latest = inner.latest, "Discarding stale search result");
            return false;
        }
        let view = view_for(&inner.collection, query);
        inner.view = view;
        true
    }

    /// Run a search, pausing for the configured delay before showing it.
    ///
    /// Returns whether this search's result is the one now shown.
    pub async fn search(&self, query: &SearchQuery) -> bool {
        let ticket = self.begin();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.complete(ticket, query)
    }
}

impl SearchViewModel<Hotel> {
    /// Fetch hotels from `source`. Returns whether they were installed.
    pub async fn load_hotels(&self, source: &dyn CatalogSource) -> bool {
        let ticket = self.begin_load();
        debug!(source = source.source_name(), "Loading hotels");
        let fetched = source.try_fetch_hotels().await;
        self.finish_load(ticket, fetched)
    }
}

impl SearchViewModel<Host> {
    /// Fetch hosts from `source`. Returns whether they were installed.
    pub async fn load_hosts(&self, source: &dyn CatalogSource) -> bool {
        let ticket = self.begin_load();
        debug!(source = source.source_name(), "Loading hosts");
        let fetched = source.try_fetch_hosts().await;
        self.finish_load(ticket, fetched)
    }
}

fn install<T: Rankable + Clone>(inner: &mut Inner<T>, fetched: Result<Vec<T>>) {
    inner.collection = match fetched {
        Ok(items) => {
            debug!("Search collection loaded with {} items", items.len());
            Collection::Loaded(items)
        }
        Err(e) if e.is_transport() => {
            warn!(error = %e, "Search collection could not be loaded");
            Collection::Failed(e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Search collection could not be loaded");
            Collection::Failed(e.to_string())
        }
    };
    // Invalidate searches started against the previous collection
    inner.latest += 1;
    let view = view_for(&inner.collection, &SearchQuery::default());
    inner.view = view;
}

fn view_for<T: Rankable + Clone>(collection: &Collection<T>, query: &SearchQuery) -> ViewState<T> {
    match collection {
        Collection::Pending => ViewState::Loading,
        Collection::Failed(message) => ViewState::FetchFailed(message.clone()),
        Collection::Loaded(items) => {
            let matched = apply_query(items, query);
            if matched.is_empty() {
                ViewState::NoMatches
            } else {
                ViewState::Results(matched)
            }
        }
    }
}
