//! Incremental loading of auction listings for one filter pair.
//!
//! The feed follows the usual infinite-list contract: an initial load, `load_more`
//! when the user nears the end of the list, and pull-to-refresh. Requests are split
//! into an issuing half (`begin_*`, which hands out a [`FetchTicket`]) and a resolving
//! half ([`AuctionFeed::resolve`]), so an event loop can keep dispatching user actions
//! while a request is outstanding. The `async` methods combine both halves against an
//! [`AuctionRepository`].

use eah_core::{
    models::{ApplicationError, AuctionFilter, AuctionPage, AuctionQuery, AuctionRecord},
    ports::AuctionRepository,
};
use std::fmt::Display;
use tracing::{Level, event};

/// The listing state owned by one feed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    /// The last page successfully merged into `items` (1-based)
    pub page: u32,
    /// The final page reported by the backend; 0 until the first response
    pub last_page: u32,
    /// Accumulated records, in server order
    pub items: Vec<AuctionRecord>,
    /// True from issuing a request until it resolves
    pub loading: bool,
    /// True while the outstanding request is a refresh
    pub refreshing: bool,
}

impl PaginationState {
    fn new() -> Self {
        Self {
            page: 1,
            last_page: 0,
            items: Vec::new(),
            loading: false,
            refreshing: false,
        }
    }
}

/// How a resolved page is merged into the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Replace the list (initial load, refresh)
    Replace,
    /// Append to the list (load more)
    Append,
}

/// A handle on one outstanding request.
///
/// Tickets are consumed by [`AuctionFeed::resolve`], so each request resolves at
/// most once.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    mode: FetchMode,
    query: AuctionQuery,
}

impl FetchTicket {
    /// The query to send.
    pub fn query(&self) -> &AuctionQuery {
        &self.query
    }

    /// The page this request is for.
    pub fn page(&self) -> u32 {
        self.query.page
    }

    /// How the result will be merged.
    pub fn mode(&self) -> FetchMode {
        self.mode
    }

    /// The feed generation the request was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What resolving a request did to the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The page was merged; `received` records arrived
    Applied {
        /// Number of records in the page
        received: usize,
    },
    /// The feed moved on (refresh or filter change) since the request was issued;
    /// the result was dropped and the state left untouched
    Stale,
    /// The backend answered with a non-success envelope
    Rejected(ApplicationError),
    /// The request failed before producing an envelope
    Failed(String),
}

/// A summary of the feed for presentation (spinners, end-of-list sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// A refresh or initial load is outstanding
    Refreshing,
    /// A next page is being fetched
    LoadingMore,
    /// Nothing is loading and there are no records
    Empty,
    /// Every page has been loaded
    Exhausted,
    /// Idle with more pages available
    Idle,
}

/// Paginated, filterable retrieval of auction records.
#[derive(Debug)]
pub struct AuctionFeed {
    filter: AuctionFilter,
    state: PaginationState,
    generation: u64,
}

impl AuctionFeed {
    /// A feed for `filter`. Nothing is fetched until [`Self::begin_initialize`] or
    /// [`Self::initialize`].
    pub fn new(filter: AuctionFilter) -> Self {
        Self {
            filter,
            state: PaginationState::new(),
            generation: 0,
        }
    }

    /// The active filter pair.
    pub fn filter(&self) -> &AuctionFilter {
        &self.filter
    }

    /// The full listing state.
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// The accumulated records.
    pub fn items(&self) -> &[AuctionRecord] {
        &self.state.items
    }

    /// The current generation. It advances on every reset and refresh.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Whether the outstanding request is a refresh.
    pub fn is_refreshing(&self) -> bool {
        self.state.refreshing
    }

    /// Whether the backend reported pages beyond the last one merged.
    pub fn has_more(&self) -> bool {
        self.state.page < self.state.last_page
    }

    /// A presentation summary of the current state.
    pub fn status(&self) -> FeedStatus {
        if self.state.refreshing {
            FeedStatus::Refreshing
        } else if self.state.loading {
            FeedStatus::LoadingMore
        } else if self.state.items.is_empty() {
            FeedStatus::Empty
        } else if self.has_more() {
            FeedStatus::Idle
        } else {
            FeedStatus::Exhausted
        }
    }

    /// Reset the feed and issue the first page as a refresh.
    ///
    /// Any outstanding request belongs to the previous generation and will be
    /// dropped when it resolves.
    pub fn begin_initialize(&mut self) -> FetchTicket {
        self.state = PaginationState::new();
        self.issue(1, FetchMode::Replace)
    }

    /// Switch to a different filter pair, with a full reset.
    ///
    /// Returns `None` if `filter` is the one already active.
    pub fn begin_filter_change(&mut self, filter: AuctionFilter) -> Option<FetchTicket> {
        if filter == self.filter {
            return None;
        }

        event!(
            Level::DEBUG,
            city_id = %filter.city_id,
            asset_type_id = %filter.asset_type_id,
            "auction filter changed"
        );
        self.filter = filter;
        Some(self.begin_initialize())
    }

    /// Issue the next page, unless a request is outstanding or the last page has
    /// already been merged.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if self.state.loading || !self.has_more() {
            return None;
        }
        Some(self.issue(self.state.page + 1, FetchMode::Append))
    }

    /// Issue the first page again; on success it replaces the list.
    ///
    /// A refresh supersedes whatever request is outstanding instead of waiting for
    /// it: the older request resolves as [`Resolution::Stale`], and `loading` follows
    /// the refresh alone, so it can clear while the superseded request is still out.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.issue(1, FetchMode::Replace)
    }

    fn issue(&mut self, page: u32, mode: FetchMode) -> FetchTicket {
        if mode == FetchMode::Replace {
            self.generation += 1;
        }
        self.state.loading = true;
        self.state.refreshing = mode == FetchMode::Replace;

        event!(
            Level::DEBUG,
            generation = self.generation,
            page,
            ?mode,
            "issuing auction search"
        );

        FetchTicket {
            generation: self.generation,
            mode,
            query: AuctionQuery::new(&self.filter, page),
        }
    }

    /// Apply the outcome of a request.
    ///
    /// Results from an earlier generation are dropped. Otherwise the loading flags
    /// clear; on success the page is merged and the boundary updated, on failure
    /// the list and page index stay as they were.
    pub fn resolve<E: Display>(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Result<AuctionPage, ApplicationError>, E>,
    ) -> Resolution {
        if ticket.generation != self.generation {
            event!(
                Level::DEBUG,
                issued = ticket.generation,
                current = self.generation,
                page = ticket.page(),
                "dropping stale auction page"
            );
            return Resolution::Stale;
        }

        self.state.loading = false;
        self.state.refreshing = false;

        match outcome {
            Ok(Ok(AuctionPage { items, last_page })) => {
                let received = items.len();
                match ticket.mode {
                    FetchMode::Replace => self.state.items = items,
                    FetchMode::Append => self.state.items.extend(items),
                }
                self.state.page = ticket.page();
                self.state.last_page = last_page;

                event!(
                    Level::DEBUG,
                    page = self.state.page,
                    last_page,
                    received,
                    total = self.state.items.len(),
                    "merged auction page"
                );
                Resolution::Applied { received }
            }
            Ok(Err(rejection)) => {
                event!(Level::WARN, page = ticket.page(), err = rejection.to_string());
                Resolution::Rejected(rejection)
            }
            Err(err) => {
                event!(Level::ERROR, page = ticket.page(), err = err.to_string());
                Resolution::Failed(err.to_string())
            }
        }
    }

    async fn run<R: AuctionRepository>(
        &mut self,
        repository: &R,
        ticket: FetchTicket,
    ) -> Resolution {
        let outcome = repository.search_auctions(ticket.query()).await;
        self.resolve(ticket, outcome)
    }

    /// Reset and load the first page.
    pub async fn initialize<R: AuctionRepository>(&mut self, repository: &R) -> Resolution {
        let ticket = self.begin_initialize();
        self.run(repository, ticket).await
    }

    /// Switch filters and load the first page of the new filter.
    ///
    /// Returns `None` without fetching if the filter did not change.
    pub async fn change_filter<R: AuctionRepository>(
        &mut self,
        repository: &R,
        filter: AuctionFilter,
    ) -> Option<Resolution> {
        let ticket = self.begin_filter_change(filter)?;
        Some(self.run(repository, ticket).await)
    }

    /// Load and append the next page.
    ///
    /// Returns `None` without fetching if a request is outstanding or there are no
    /// more pages.
    pub async fn load_more<R: AuctionRepository>(
        &mut self,
        repository: &R,
    ) -> Option<Resolution> {
        let ticket = self.begin_load_more()?;
        Some(self.run(repository, ticket).await)
    }

    /// Reload the first page, replacing the list on success.
    pub async fn refresh<R: AuctionRepository>(&mut self, repository: &R) -> Resolution {
        let ticket = self.begin_refresh();
        self.run(repository, ticket).await
    }
}
