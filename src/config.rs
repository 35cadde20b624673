// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use url::Url;

use crate::catalog::DEFAULT_ENDPOINT;
use crate::error::ConfigError;

const APP_DIR: &str = "podbrowse";
const FAVORITES_FILENAME: &str = "favorites.json";

/// Runtime settings for talking to the directory and storing favorites
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Best-podcasts endpoint, without query parameters
    pub endpoint: Url,
    /// Value of the API key header (may be empty for test endpoints)
    pub api_key: String,
    /// Location of the favorites file
    pub favorites_path: PathBuf,
}

impl Config {
    /// Fill in defaults for every setting that was not given explicitly
    pub fn resolve(
        endpoint: Option<&str>,
        api_key: Option<String>,
        favorites_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let endpoint = endpoint.unwrap_or(DEFAULT_ENDPOINT);
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            value: endpoint.to_string(),
            source: e,
        })?;

        let favorites_path = match favorites_path {
            Some(path) => path,
            None => default_favorites_path().ok_or(ConfigError::NoDataDirectory)?,
        };

        Ok(Self {
            endpoint,
            api_key: api_key.unwrap_or_default(),
            favorites_path,
        })
    }
}

/// `<data dir>/podbrowse/favorites.json`, if the platform has a data directory
pub fn default_favorites_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(FAVORITES_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config = Config::resolve(
            Some("http://localhost:8080/best_podcasts"),
            Some("key".to_string()),
            Some(PathBuf::from("/tmp/favs.json")),
        )
        .unwrap();

        assert_eq!(config.endpoint.as_str(), "http://localhost:8080/best_podcasts");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.favorites_path, PathBuf::from("/tmp/favs.json"));
    }

    #[test]
    fn endpoint_defaults_to_listen_notes() {
        let config =
            Config::resolve(None, None, Some(PathBuf::from("/tmp/favs.json"))).unwrap();

        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.api_key, "");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = Config::resolve(Some("not a url"), None, Some(PathBuf::from("f.json")))
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn default_favorites_path_ends_in_app_dir() {
        if let Some(path) = default_favorites_path() {
            assert!(path.ends_with("podbrowse/favorites.json"));
        }
    }
}
