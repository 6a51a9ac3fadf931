use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{Result, VidsieveError};
use crate::domain::{ResultItem, SearchPage};
use crate::fetcher::{SearchEndpoint, SearchRequest};

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/search";

/// reqwest-backed client for the YouTube Data API `search` resource.
pub struct YouTubeEndpoint {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl YouTubeEndpoint {
    pub fn new(endpoint: Url, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("vidsieve/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Full request URL including the API key.
    pub fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("part", "snippet")
                .append_pair("q", &request.query)
                .append_pair("type", "video")
                .append_pair("maxResults", &request.page_size.to_string())
                .append_pair("order", request.order.as_param())
                .append_pair("key", &self.api_key);

            if let Some(region) = &request.region_code {
                pairs.append_pair("regionCode", region);
            }
            if let Some(language) = &request.relevance_language {
                pairs.append_pair("relevanceLanguage", language);
            }
            if let Some(token) = &request.page_token {
                pairs.append_pair("pageToken", token);
            }
            if let Some(after) = request.published_after {
                pairs.append_pair(
                    "publishedAfter",
                    &after.to_rfc3339_opts(SecondsFormat::Secs, true),
                );
            }
        }
        url
    }
}

#[async_trait]
impl SearchEndpoint for YouTubeEndpoint {
    async fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let url = self.request_url(request);
        tracing::debug!(query = %request.query, page_token = ?request.page_token, "searching");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VidsieveError::FetchFailed(format!(
                "endpoint responded with {}",
                status
            )));
        }

        let body = response.bytes().await?;
        parse_response(&body)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    items: Vec<ApiItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiItem {
    id: ApiId,
    snippet: Option<ApiSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSnippet {
    published_at: DateTime<Utc>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    thumbnails: ApiThumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct ApiThumbnails {
    default: Option<ApiThumbnail>,
    medium: Option<ApiThumbnail>,
    high: Option<ApiThumbnail>,
}

#[derive(Debug, Deserialize)]
struct ApiThumbnail {
    url: String,
}

/// Decodes a search response body. Entries without a video id or snippet
/// are skipped.
pub fn parse_response(body: &[u8]) -> Result<SearchPage> {
    let response: ApiResponse = serde_json::from_slice(body)
        .map_err(|e| VidsieveError::FetchFailed(format!("invalid response body: {}", e)))?;

    let items = response
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id?;
            let snippet = item.snippet?;
            let thumbnails = snippet.thumbnails;
            let thumbnail_url = thumbnails
                .medium
                .or(thumbnails.high)
                .or(thumbnails.default)
                .map(|t| t.url)
                .unwrap_or_default();

            Some(ResultItem {
                id,
                title: html_escape::decode_html_entities(&snippet.title).into_owned(),
                description: html_escape::decode_html_entities(&snippet.description)
                    .into_owned(),
                channel_title: html_escape::decode_html_entities(&snippet.channel_title)
                    .into_owned(),
                published_at: snippet.published_at,
                thumbnail_url,
            })
        })
        .collect();

    Ok(SearchPage::new(items, response.next_page_token))
}
