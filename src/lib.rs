pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod http;
pub mod markup;
pub mod progress;

// Re-export main types for convenience
pub use catalog::{CatalogClient, DirectoryClient, PageEnvelope, PodcastSummary, decode_page};
pub use config::Config;
pub use controller::{
    DetailController, ListAlert, ListController, PREFETCH_WINDOW, PodcastListItem, ViewState,
};
pub use error::{CatalogError, ConfigError, FailureKind, FavoritesError};
pub use favorites::{FavoritesStore, FileFavorites, MemoryFavorites, SharedFavorites};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use markup::strip_html_tags;
pub use progress::{ListEvent, ListReporter, NoopReporter, SharedListReporter};
