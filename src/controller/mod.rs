mod detail;
mod list;

pub use detail::DetailController;
pub use list::{ListController, PREFETCH_WINDOW};

use crate::catalog::PodcastSummary;
use crate::favorites::FavoritesStore;

/// A podcast as shown in the list, with its favorite flag
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastListItem {
    pub podcast: PodcastSummary,
    /// Derived from the favorites store when the item was last projected
    pub is_favorite: bool,
}

impl PodcastListItem {
    /// Pair a podcast with its current favorite status
    pub fn project(podcast: PodcastSummary, favorites: &dyn FavoritesStore) -> Self {
        let is_favorite = favorites.is_favorited(&podcast.id);
        Self {
            podcast,
            is_favorite,
        }
    }

    pub fn id(&self) -> &str {
        &self.podcast.id
    }
}

/// Problems surfaced to the user while browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListAlert {
    /// Nothing could be loaded, the list is empty
    NoPodcastsLoaded,
    /// More podcasts could not be loaded, the list is still shown
    IssueLoadingNewPage,
}

impl ListAlert {
    pub fn title(&self) -> &'static str {
        match self {
            ListAlert::NoPodcastsLoaded => "No podcasts loaded",
            ListAlert::IssueLoadingNewPage => "Could not load more podcasts",
        }
    }

    /// Prompt copy shown with the retry action
    pub fn message(&self) -> &'static str {
        match self {
            ListAlert::NoPodcastsLoaded => {
                "We couldn't load any podcasts. Check your connection and try again."
            }
            ListAlert::IssueLoadingNewPage => {
                "There was a problem loading the next page of podcasts. Try again?"
            }
        }
    }
}

impl std::fmt::Display for ListAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// What the list screen should currently display
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// Nothing has been loaded or failed yet
    #[default]
    InitialLoading,
    /// The accumulated podcasts, in page order
    Loaded(Vec<PodcastListItem>),
    /// Nothing to show
    Error(ListAlert),
}

impl ViewState {
    /// Loaded items, empty for the other states
    pub fn items(&self) -> &[PodcastListItem] {
        match self {
            ViewState::Loaded(items) => items,
            ViewState::InitialLoading | ViewState::Error(_) => &[],
        }
    }
}
