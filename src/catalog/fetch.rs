// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::CatalogError;
use crate::http::HttpClient;

use super::parse::{PageEnvelope, decode_page};

/// Default Listen Notes endpoint for the best-podcasts listing
pub const DEFAULT_ENDPOINT: &str = "https://listen-api.listennotes.com/api/v2/best_podcasts";

/// Region sent with every page request
pub const REGION: &str = "us";

/// Content-safety flag sent with every page request ("0" = off)
pub const SAFE_MODE: &str = "0";

const API_KEY_HEADER: &str = "X-ListenAPI-Key";

/// Source of directory pages
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch one page of the listing (1-based)
    async fn fetch_page(&self, page: u32) -> Result<PageEnvelope, CatalogError>;
}

/// Catalog client talking to the Listen Notes directory over HTTP
#[derive(Clone)]
pub struct DirectoryClient<C> {
    http: C,
    endpoint: Url,
    api_key: String,
}

impl<C: HttpClient> DirectoryClient<C> {
    pub fn new(http: C, endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint,
            api_key: api_key.into(),
        }
    }

    /// Build the request URL for a page, including the fixed query parameters
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("region", REGION)
            .append_pair("safe_mode", SAFE_MODE);
        url
    }
}

#[async_trait]
impl<C: HttpClient> CatalogClient for DirectoryClient<C> {
    async fn fetch_page(&self, page: u32) -> Result<PageEnvelope, CatalogError> {
        let url = self.page_url(page);
        debug!(%url, page, "fetching directory page");

        let headers = [
            (API_KEY_HEADER, self.api_key.as_str()),
            ("Accept", "application/json"),
        ];

        let response =
            self.http
                .get(&url, &headers)
                .await
                .map_err(|e| CatalogError::RequestFailed {
                    url: url.to_string(),
                    page,
                    source: e,
                })?;

        if !response.is_success() {
            return Err(CatalogError::HttpStatus {
                url: url.to_string(),
                page,
                status: response.status,
            });
        }

        decode_page(&response.body, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use bytes::Bytes;

    use crate::error::FailureKind;
    use crate::http::HttpResponse;

    const SAMPLE_PAGE: &str = include_str!("../../tests/fixtures/best_podcasts_page1.json");

    #[derive(Clone, Default)]
    struct MockHttpClient {
        status: u16,
        body: &'static str,
        requests: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
    }

    impl MockHttpClient {
        fn responding(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(
            &self,
            url: &Url,
            headers: &[(&str, &str)],
        ) -> Result<HttpResponse, reqwest::Error> {
            let headers = headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.requests.lock().unwrap().push((url.to_string(), headers));

            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    fn endpoint() -> Url {
        Url::parse("https://example.com/api/v2/best_podcasts").unwrap()
    }

    #[test]
    fn page_url_carries_fixed_parameters() {
        let client = DirectoryClient::new(MockHttpClient::default(), endpoint(), "key");

        assert_eq!(
            client.page_url(3).as_str(),
            "https://example.com/api/v2/best_podcasts?page=3&region=us&safe_mode=0"
        );
    }

    #[tokio::test]
    async fn fetch_page_sends_key_and_decodes() {
        let http = MockHttpClient::responding(200, SAMPLE_PAGE);
        let client = DirectoryClient::new(http.clone(), endpoint(), "secret");

        let page = client.fetch_page(1).await.unwrap();
        assert_eq!(page.page_number, 1);
        assert_eq!(page.podcasts.len(), 2);

        let requests = http.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].0.contains("page=1"));
        assert!(
            requests[0]
                .1
                .contains(&("X-ListenAPI-Key".to_string(), "secret".to_string()))
        );
        assert!(
            requests[0]
                .1
                .contains(&("Accept".to_string(), "application/json".to_string()))
        );
    }

    #[tokio::test]
    async fn non_success_status_is_transport_failure() {
        let client = DirectoryClient::new(
            MockHttpClient::responding(401, r#"{"error": "bad key"}"#),
            endpoint(),
            "",
        );

        let err = client.fetch_page(1).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(matches!(
            err,
            CatalogError::HttpStatus {
                status: 401,
                page: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn malformed_body_is_decode_failure() {
        let client = DirectoryClient::new(
            MockHttpClient::responding(200, r#"{"podcasts": []}"#),
            endpoint(),
            "",
        );

        let err = client.fetch_page(2).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }
}
