// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use super::{FavoritesStore, SharedFavorites};

/// Favorites held in process memory only
#[derive(Debug, Default)]
pub struct MemoryFavorites {
    ids: Mutex<HashSet<String>>,
}

impl MemoryFavorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given ids
    pub fn with_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a new empty store wrapped in an Arc
    pub fn shared() -> SharedFavorites {
        Arc::new(Self::new())
    }
}

impl FavoritesStore for MemoryFavorites {
    fn is_favorited(&self, podcast_id: &str) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(podcast_id)
    }

    fn add_favorite(&self, podcast_id: &str) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(podcast_id.to_string());
    }

    fn remove_favorite(&self, podcast_id: &str) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(podcast_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = MemoryFavorites::new();
        assert!(!store.is_favorited("abc"));
    }

    #[test]
    fn add_and_remove_are_single_key() {
        let store = MemoryFavorites::new();

        store.add_favorite("abc");
        store.add_favorite("def");
        assert!(store.is_favorited("abc"));
        assert!(store.is_favorited("def"));

        store.remove_favorite("abc");
        assert!(!store.is_favorited("abc"));
        assert!(store.is_favorited("def"));
    }

    #[test]
    fn repeated_add_and_missing_remove_are_harmless() {
        let store = MemoryFavorites::with_ids(["abc"]);

        store.add_favorite("abc");
        store.remove_favorite("never-added");
        assert!(store.is_favorited("abc"));

        store.remove_favorite("abc");
        assert!(!store.is_favorited("abc"));
    }
}
