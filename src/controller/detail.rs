// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tracing::debug;

use crate::favorites::SharedFavorites;

use super::PodcastListItem;

/// Backs the detail view of a single podcast
pub struct DetailController {
    podcast: PodcastListItem,
    favorites: SharedFavorites,
}

impl DetailController {
    pub fn new(podcast: PodcastListItem, favorites: SharedFavorites) -> Self {
        Self { podcast, favorites }
    }

    pub fn podcast(&self) -> &PodcastListItem {
        &self.podcast
    }

    /// Flip the favorite status, writing it through to the store
    ///
    /// The local flag follows the requested state even if the store failed
    /// to persist it.
    pub fn toggle_favorite(&mut self) -> bool {
        let id = self.podcast.id();
        if self.podcast.is_favorite {
            self.favorites.remove_favorite(id);
        } else {
            self.favorites.add_favorite(id);
        }

        self.podcast.is_favorite = !self.podcast.is_favorite;
        debug!(podcast = %self.podcast.id(), favorite = self.podcast.is_favorite, "favorite toggled");
        self.podcast.is_favorite
    }
}
