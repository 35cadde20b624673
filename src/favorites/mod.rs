mod file;
mod memory;

use std::sync::Arc;

pub use file::FileFavorites;
pub use memory::MemoryFavorites;

/// Set of favorited podcast ids
///
/// Implementations serialize their own access; callers never lock. Writes
/// do not report failure to the caller.
pub trait FavoritesStore: Send + Sync {
    /// Whether the podcast with this id is currently a favorite
    fn is_favorited(&self, podcast_id: &str) -> bool;

    /// Mark a podcast as favorite
    fn add_favorite(&self, podcast_id: &str);

    /// Remove a podcast from the favorites
    fn remove_favorite(&self, podcast_id: &str);
}

/// A shared reference to a favorites store
pub type SharedFavorites = Arc<dyn FavoritesStore>;
