// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::CatalogError;
use crate::markup::strip_html_tags;

/// One page of the best-podcasts directory listing
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope {
    /// 1-based page number as reported by the server
    pub page_number: u32,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<u32>,
    pub previous_page_number: Option<u32>,
    /// Total number of podcasts across all pages
    pub total: u64,
    /// Name of the genre the listing belongs to
    pub category_name: String,
    /// Podcasts on this page, in server order
    pub podcasts: Vec<PodcastSummary>,
}

/// A podcast as listed by the directory
#[derive(Debug, Clone, PartialEq)]
pub struct PodcastSummary {
    /// Directory identifier, stable across pages
    pub id: String,
    pub title: String,
    pub publisher: String,
    /// Raw description, may contain HTML markup
    pub description: String,
    pub thumbnail: Option<Url>,
    pub image: Option<Url>,
    pub total_episodes: u32,
    pub language: String,
    pub country: String,
    pub website: Option<Url>,
    pub listennotes_url: Option<Url>,
    pub explicit_content: bool,
    pub genre_ids: Vec<u32>,
    pub listen_score: Option<u32>,
    pub latest_published: Option<DateTime<Utc>>,
}

impl PodcastSummary {
    /// Description with markup removed, ready for display
    pub fn plain_description(&self) -> String {
        strip_html_tags(&self.description).trim().to_string()
    }
}

// Wire format of the directory response. Decoded in full so that schema
// mismatches surface as decode errors; not every field is surfaced.
#[allow(dead_code)]
mod wire {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub(super) struct PageResponse {
        pub(super) id: u64,
        pub(super) has_next: bool,
        pub(super) previous_page_number: Option<u32>,
        pub(super) has_previous: bool,
        pub(super) name: String,
        pub(super) next_page_number: Option<u32>,
        pub(super) page_number: u32,
        pub(super) total: u64,
        pub(super) listennotes_url: String,
        pub(super) podcasts: Vec<PodcastData>,
        pub(super) parent_id: Option<u64>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct PodcastData {
        pub(super) id: String,
        pub(super) title: String,
        pub(super) publisher: String,
        pub(super) description: String,
        pub(super) thumbnail: String,
        pub(super) image: String,
        pub(super) total_episodes: u32,
        pub(super) language: String,
        pub(super) country: String,
        #[serde(rename = "type")]
        pub(super) kind: String,
        pub(super) genre_ids: Vec<u32>,
        pub(super) listennotes_url: String,
        pub(super) explicit_content: bool,
        pub(super) is_claimed: bool,
        pub(super) has_sponsors: bool,
        pub(super) has_guest_interviews: bool,
        pub(super) extra: ExtraLinks,
        pub(super) looking_for: LookingFor,
        pub(super) email: Option<String>,
        pub(super) rss: Option<String>,
        pub(super) website: Option<String>,
        pub(super) itunes_id: Option<u64>,
        pub(super) listen_score: Option<u32>,
        pub(super) listen_score_global_rank: Option<String>,
        pub(super) update_frequency_hours: Option<u32>,
        pub(super) earliest_pub_date_ms: Option<i64>,
        pub(super) latest_pub_date_ms: Option<i64>,
        pub(super) latest_episode_id: Option<String>,
        pub(super) audio_length_sec: Option<u32>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct ExtraLinks {
        pub(super) spotify_url: Option<String>,
        pub(super) amazon_music_url: Option<String>,
        pub(super) linkedin_url: Option<String>,
        pub(super) youtube_url: Option<String>,
        pub(super) twitter_handle: Option<String>,
        pub(super) wechat_handle: Option<String>,
        pub(super) instagram_handle: Option<String>,
        pub(super) patreon_handle: Option<String>,
        pub(super) facebook_handle: Option<String>,
        pub(super) url1: Option<String>,
        pub(super) url2: Option<String>,
        pub(super) url3: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub(super) struct LookingFor {
        pub(super) cohosts: bool,
        pub(super) sponsors: bool,
        pub(super) cross_promotion: bool,
        pub(super) guests: bool,
    }
}

impl From<wire::PodcastData> for PodcastSummary {
    fn from(data: wire::PodcastData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            publisher: data.publisher,
            description: data.description,
            thumbnail: Url::parse(&data.thumbnail).ok(),
            image: Url::parse(&data.image).ok(),
            total_episodes: data.total_episodes,
            language: data.language,
            country: data.country,
            website: data.website.as_deref().and_then(|w| Url::parse(w).ok()),
            listennotes_url: Url::parse(&data.listennotes_url).ok(),
            explicit_content: data.explicit_content,
            genre_ids: data.genre_ids,
            listen_score: data.listen_score,
            latest_published: data
                .latest_pub_date_ms
                .and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}

/// Decode a directory response body into a [`PageEnvelope`]
///
/// `requested_page` is only used to give decode errors some context.
pub fn decode_page(body: &[u8], requested_page: u32) -> Result<PageEnvelope, CatalogError> {
    let response: wire::PageResponse =
        serde_json::from_slice(body).map_err(|e| CatalogError::DecodeFailed {
            page: requested_page,
            source: e,
        })?;

    Ok(PageEnvelope {
        page_number: response.page_number,
        has_next: response.has_next,
        has_previous: response.has_previous,
        next_page_number: response.next_page_number,
        previous_page_number: response.previous_page_number,
        total: response.total,
        category_name: response.name,
        podcasts: response.podcasts.into_iter().map(Into::into).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::FailureKind;

    const SAMPLE_PAGE: &str = include_str!("../../tests/fixtures/best_podcasts_page1.json");

    #[test]
    fn decode_page_extracts_cursor_fields() {
        let page = decode_page(SAMPLE_PAGE.as_bytes(), 1).unwrap();

        assert_eq!(page.page_number, 1);
        assert!(page.has_next);
        assert!(!page.has_previous);
        assert_eq!(page.next_page_number, Some(2));
        assert_eq!(page.previous_page_number, None);
        assert_eq!(page.total, 807);
        assert_eq!(page.category_name, "Business");
    }

    #[test]
    fn decode_page_keeps_server_order() {
        let page = decode_page(SAMPLE_PAGE.as_bytes(), 1).unwrap();

        let ids: Vec<_> = page.podcasts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "adbeec8ec43e4957bb63b9f0b7489991",
                "28ba59be5b8346589e910e24d4b3eed7"
            ]
        );
    }

    #[test]
    fn decode_page_maps_podcast_fields() {
        let page = decode_page(SAMPLE_PAGE.as_bytes(), 1).unwrap();
        let podcast = &page.podcasts[0];

        assert_eq!(podcast.title, "The Diary Of A CEO with Steven Bartlett");
        assert_eq!(podcast.publisher, "DOAC");
        assert_eq!(podcast.total_episodes, 551);
        assert_eq!(podcast.language, "English");
        assert_eq!(podcast.country, "United Kingdom");
        assert_eq!(podcast.listen_score, Some(74));
        assert_eq!(podcast.genre_ids, [111, 122, 67, 93, 90]);
        assert_eq!(
            podcast.thumbnail.as_ref().map(Url::as_str),
            Some("https://cdn-images-3.listennotes.com/podcasts/the-diary-of-a-ceo-thumb.300x300.jpg")
        );
        assert_eq!(
            podcast.latest_published.map(|d| d.timestamp_millis()),
            Some(1723784880000)
        );
    }

    #[test]
    fn decode_page_accepts_missing_optional_fields() {
        let page = decode_page(SAMPLE_PAGE.as_bytes(), 1).unwrap();
        let podcast = &page.podcasts[1];

        assert!(podcast.website.is_none());
        assert!(podcast.listen_score.is_none());
        assert!(podcast.latest_published.is_none());
    }

    #[test]
    fn plain_description_strips_markup() {
        let page = decode_page(SAMPLE_PAGE.as_bytes(), 1).unwrap();

        assert_eq!(
            page.podcasts[1].plain_description(),
            "I'm giving away money, rent, food & knowledge to people in need."
        );
    }

    #[test]
    fn decode_page_rejects_missing_required_field() {
        let body = SAMPLE_PAGE.replace("\"page_number\": 1,", "");
        let err = decode_page(body.as_bytes(), 1).unwrap_err();

        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn decode_page_rejects_type_mismatch() {
        let body = SAMPLE_PAGE.replace("\"has_next\": true", "\"has_next\": \"yes\"");
        let err = decode_page(body.as_bytes(), 3).unwrap_err();

        assert!(matches!(err, CatalogError::DecodeFailed { page: 3, .. }));
    }

    #[test]
    fn decode_page_rejects_non_json() {
        let err = decode_page(b"<html>rate limited</html>", 1).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Decode);
    }
}
