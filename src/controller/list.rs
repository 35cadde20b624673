// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::catalog::{CatalogClient, PageEnvelope};
use crate::error::CatalogError;
use crate::favorites::{FavoritesStore, SharedFavorites};
use crate::progress::{ListEvent, NoopReporter, SharedListReporter};

use super::{ListAlert, PodcastListItem, ViewState};

/// How many items from the end of the list trigger loading the next page
pub const PREFETCH_WINDOW: usize = 5;

/// Drives incremental loading of the directory listing
///
/// Owns the accumulated list and the page cursor, decides when to prefetch,
/// folds the favorites store into the published items, and turns fetch
/// failures into display states. All operations take `&self`; state lives
/// behind a mutex that is never held across the page fetch, so appear events
/// arriving while a page is in flight are handled (and ignored) immediately.
pub struct ListController<C> {
    catalog: C,
    favorites: SharedFavorites,
    reporter: SharedListReporter,
    page_load_in_flight: AtomicBool,
    inner: Mutex<ListState>,
}

struct ListState {
    accumulated: Vec<PodcastListItem>,
    last_loaded_page: u32,
    has_more_pages: bool,
    largest_observed_index: usize,
    view: ViewState,
    pending_alert: Option<ListAlert>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            accumulated: Vec::new(),
            last_loaded_page: 0,
            has_more_pages: true,
            largest_observed_index: 0,
            view: ViewState::InitialLoading,
            pending_alert: None,
        }
    }
}

/// Marks a page load as in flight until dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<C: CatalogClient> ListController<C> {
    pub fn new(catalog: C, favorites: SharedFavorites) -> Self {
        Self {
            catalog,
            favorites,
            reporter: NoopReporter::shared(),
            page_load_in_flight: AtomicBool::new(false),
            inner: Mutex::new(ListState::default()),
        }
    }

    /// Attach a reporter that observes page loads and reconciliations
    pub fn with_reporter(mut self, reporter: SharedListReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// The current view state
    pub fn state(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Whether a page request is outstanding
    pub fn is_page_loading(&self) -> bool {
        self.page_load_in_flight.load(Ordering::Acquire)
    }

    /// The alert waiting to be shown, if any
    pub fn pending_alert(&self) -> Option<ListAlert> {
        self.lock().pending_alert
    }

    /// Clear the pending alert, returning it
    pub fn dismiss_alert(&self) -> Option<ListAlert> {
        self.lock().pending_alert.take()
    }

    /// Number of the last page that was loaded successfully (0 = none)
    pub fn last_loaded_page(&self) -> u32 {
        self.lock().last_loaded_page
    }

    /// Whether the server reported further pages
    pub fn has_more_pages(&self) -> bool {
        self.lock().has_more_pages
    }

    /// Called when the list becomes visible
    ///
    /// Loads the first page if nothing was loaded yet, then re-derives the
    /// favorite flags of everything already loaded.
    pub async fn on_appear(&self) {
        let first_visit = self.lock().last_loaded_page == 0;
        if first_visit {
            self.load_next_page().await;
        }

        self.reconcile_favorites();
    }

    /// Called once for every item that scrolls into view
    pub async fn on_item_appear(&self, index: usize) {
        if self.is_page_loading() {
            return;
        }

        let should_load = {
            let mut state = self.lock();
            if !state.has_more_pages {
                return;
            }

            state.largest_observed_index = state.largest_observed_index.max(index);
            state.largest_observed_index
                >= state.accumulated.len().saturating_sub(PREFETCH_WINDOW)
        };

        if should_load {
            self.load_next_page().await;
        }
    }

    /// Request the page after the last loaded one and merge it into the list
    ///
    /// Does nothing if a page request is already outstanding.
    pub async fn load_next_page(&self) {
        let Some(_in_flight) = InFlightGuard::acquire(&self.page_load_in_flight) else {
            debug!("page load already in flight, ignoring request");
            return;
        };

        let page = {
            let mut state = self.lock();
            match state.last_loaded_page.checked_add(1) {
                Some(page) => page,
                None => {
                    debug!("page cursor exhausted, no further pages to request");
                    state.has_more_pages = false;
                    return;
                }
            }
        };
        self.reporter.report(ListEvent::PageLoadStarted { page });

        match self.catalog.fetch_page(page).await {
            Ok(envelope) => self.apply_page(envelope),
            Err(e) => self.apply_failure(page, e),
        }
    }

    /// Acknowledge the pending alert and try the failed page again
    pub async fn retry(&self) {
        self.dismiss_alert();
        self.load_next_page().await;
    }

    /// Recompute the favorite flag of every loaded item from the store
    ///
    /// Republishes the list only when something has been loaded.
    pub fn reconcile_favorites(&self) {
        let event = {
            let mut guard = self.lock();
            let state = &mut *guard;
            if state.accumulated.is_empty() {
                return;
            }

            for item in &mut state.accumulated {
                item.is_favorite = self.favorites.is_favorited(&item.podcast.id);
            }
            state.view = ViewState::Loaded(state.accumulated.clone());

            ListEvent::FavoritesReconciled {
                items: state.accumulated.len(),
                favorites: state.accumulated.iter().filter(|i| i.is_favorite).count(),
            }
        };

        self.reporter.report(event);
    }

    fn apply_page(&self, envelope: PageEnvelope) {
        let store: &dyn FavoritesStore = self.favorites.as_ref();
        let new_items: Vec<_> = envelope
            .podcasts
            .into_iter()
            .map(|podcast| PodcastListItem::project(podcast, store))
            .collect();

        let event = {
            let mut guard = self.lock();
            let state = &mut *guard;

            state.last_loaded_page = envelope.page_number;
            state.has_more_pages = envelope.has_next;

            let new_count = new_items.len();
            state.accumulated.extend(new_items);
            state.view = ViewState::Loaded(state.accumulated.clone());

            ListEvent::PageLoaded {
                page: envelope.page_number,
                new_items: new_count,
                total_loaded: state.accumulated.len(),
                has_more_pages: envelope.has_next,
            }
        };

        debug!(?event, "page merged");
        self.reporter.report(event);
    }

    fn apply_failure(&self, page: u32, error: CatalogError) {
        let kind = error.kind();
        warn!(page, %kind, error = %error, "failed to load directory page");

        let alert = {
            let mut state = self.lock();
            let alert = if state.accumulated.is_empty() {
                state.view = ViewState::Error(ListAlert::NoPodcastsLoaded);
                ListAlert::NoPodcastsLoaded
            } else {
                ListAlert::IssueLoadingNewPage
            };
            state.pending_alert = Some(alert);
            alert
        };

        self.reporter.report(ListEvent::PageLoadFailed {
            page,
            kind,
            error: error.to_string(),
            alert,
        });
    }

    fn lock(&self) -> MutexGuard<'_, ListState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
