use std::sync::Arc;

use crate::controller::ListAlert;
use crate::error::FailureKind;

/// Events emitted by the list controller while pages load
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// A page request has been issued
    PageLoadStarted { page: u32 },

    /// A page arrived and was appended to the list
    PageLoaded {
        page: u32,
        /// Number of podcasts on this page
        new_items: usize,
        /// Length of the accumulated list after appending
        total_loaded: usize,
        has_more_pages: bool,
    },

    /// A page request failed
    PageLoadFailed {
        page: u32,
        kind: FailureKind,
        error: String,
        /// The alert that was raised for the presentation layer
        alert: ListAlert,
    },

    /// Favorite flags were recomputed for the whole list
    FavoritesReconciled {
        items: usize,
        favorites: usize,
    },
}

/// Trait for observing list controller activity.
///
/// Implementations can use this to drive loading indicators, log messages,
/// or collect statistics.
pub trait ListReporter: Send + Sync {
    /// Report a list event
    fn report(&self, event: ListEvent);
}

/// A shared reference to a list reporter
pub type SharedListReporter = Arc<dyn ListReporter>;

/// A no-op reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ListReporter for NoopReporter {
    fn report(&self, _event: ListEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedListReporter {
        Arc::new(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_reporter_handles_all_events() {
        let reporter = NoopReporter;

        reporter.report(ListEvent::PageLoadStarted { page: 1 });

        reporter.report(ListEvent::PageLoaded {
            page: 1,
            new_items: 20,
            total_loaded: 20,
            has_more_pages: true,
        });

        reporter.report(ListEvent::PageLoadFailed {
            page: 2,
            kind: FailureKind::Transport,
            error: "Connection timeout".to_string(),
            alert: ListAlert::IssueLoadingNewPage,
        });

        reporter.report(ListEvent::FavoritesReconciled {
            items: 20,
            favorites: 3,
        });
    }
}
