// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FavoritesError;

use super::FavoritesStore;

/// On-disk layout of the favorites file
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesFile {
    favorites: BTreeSet<String>,
}

/// Favorites persisted as a JSON file
///
/// The whole set is loaded on open and rewritten after every change. Writes
/// go to a `.partial` sibling first and are renamed into place.
#[derive(Debug)]
pub struct FileFavorites {
    path: PathBuf,
    ids: Mutex<BTreeSet<String>>,
}

impl FileFavorites {
    /// Open the favorites file at `path`, treating a missing file as empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FavoritesError> {
        let path = path.into();
        let ids = if path.exists() {
            read_favorites_file(&path)?.favorites
        } else {
            BTreeSet::new()
        };

        Ok(Self {
            path,
            ids: Mutex::new(ids),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All favorited ids, sorted
    pub fn ids(&self) -> Vec<String> {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    fn update(&self, change: impl FnOnce(&mut BTreeSet<String>) -> bool) {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        let mut updated = ids.clone();
        if !change(&mut updated) {
            return;
        }

        // Held across the write so that concurrent changes hit the disk in order.
        // The in-memory set only moves once the file agrees with it.
        match write_favorites_file(&self.path, &updated) {
            Ok(()) => *ids = updated,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to persist favorites");
            }
        }
    }
}

impl FavoritesStore for FileFavorites {
    fn is_favorited(&self, podcast_id: &str) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(podcast_id)
    }

    fn add_favorite(&self, podcast_id: &str) {
        self.update(|ids| ids.insert(podcast_id.to_string()));
    }

    fn remove_favorite(&self, podcast_id: &str) {
        self.update(|ids| ids.remove(podcast_id));
    }
}

fn read_favorites_file(path: &Path) -> Result<FavoritesFile, FavoritesError> {
    let content = std::fs::read_to_string(path).map_err(|e| FavoritesError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| FavoritesError::JsonParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_favorites_file(path: &Path, ids: &BTreeSet<String>) -> Result<(), FavoritesError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| FavoritesError::CreateDirectoryFailed {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let file = FavoritesFile {
        favorites: ids.clone(),
    };
    let json = serde_json::to_string_pretty(&file)?;

    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    std::fs::write(&partial, json).map_err(|e| FavoritesError::WriteFailed {
        path: partial.clone(),
        source: e,
    })?;
    std::fs::rename(&partial, path).map_err(|e| FavoritesError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
