use crate::retry::{RetryConfig, RetryExecutor};
use moltdigest_core::{CoreError, MoltbookApiError, Post};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const USER_AGENT: &str = "moltdigest/0.1";

/// Largest page size the posts endpoint accepts.
pub const PAGE_LIMIT: usize = 50;

/// Hard bound on pagination iterations per ordering. The cursor-stall guard
/// below handles a repeating cursor; this bounds everything else.
const MAX_PAGES: usize = 64;

// The Moltbook API can be slow at times; use a long timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Hot,
    New,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Hot => "hot",
            SortOrder::New => "new",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsPage {
    #[serde(default)]
    pub posts: Vec<PostData>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_offset: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostData {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub submolt: Option<SubmoltData>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmoltData {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug)]
pub struct MoltbookApiClient {
    http_client: Client,
    api_base: String,
    api_key: String,
    retry: RetryExecutor,
}

impl MoltbookApiClient {
    pub fn new(api_base: &str, api_key: String) -> Self {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            retry: RetryExecutor::new(RetryConfig::moltbook()),
        }
    }

    /// One page of `GET /posts`, with transient failures retried.
    pub async fn get_posts_page(
        &self,
        sort: SortOrder,
        limit: usize,
        offset: u64,
    ) -> Result<PostsPage, CoreError> {
        self.retry
            .execute("get_posts_page", || self.request_page(sort, limit, offset))
            .await
    }

    async fn request_page(
        &self,
        sort: SortOrder,
        limit: usize,
        offset: u64,
    ) -> Result<PostsPage, CoreError> {
        let url = format!("{}/posts", self.api_base);
        let limit_s = limit.to_string();
        let offset_s = offset.to_string();

        debug!(
            "Requesting Moltbook posts: sort={} limit={} offset={}",
            sort, limit, offset
        );
        let response = match self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[
                ("sort", sort.as_str()),
                ("limit", limit_s.as_str()),
                ("offset", offset_s.as_str()),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for GET {}: {}", url, e);
                if e.is_timeout() {
                    return Err(CoreError::MoltbookApi(MoltbookApiError::RequestTimeout));
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!("Request failed with status {} for GET {}", status, url);

            if status.as_u16() == 429 {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                warn!("Rate limited, retry after {} seconds", retry_after);
                return Err(CoreError::MoltbookApi(MoltbookApiError::RateLimitExceeded {
                    retry_after,
                }));
            } else if status.as_u16() == 401 {
                return Err(CoreError::MoltbookApi(MoltbookApiError::InvalidToken));
            } else if status.as_u16() == 403 {
                return Err(CoreError::MoltbookApi(MoltbookApiError::Forbidden {
                    resource: "/posts".to_string(),
                }));
            } else if status.is_server_error() {
                return Err(CoreError::MoltbookApi(MoltbookApiError::ServerError {
                    status_code: status.as_u16(),
                }));
            }
            return Err(CoreError::MoltbookApi(MoltbookApiError::InvalidResponse {
                details: format!("unexpected status {status}"),
            }));
        }

        let page: PostsPage = response.json().await.map_err(|e| {
            error!("Failed to parse posts page: {}", e);
            CoreError::MoltbookApi(MoltbookApiError::InvalidResponse {
                details: format!("failed to parse posts page for sort={sort}"),
            })
        })?;
        Ok(page)
    }

    /// Fetch up to `want` posts for one ordering, following the server's
    /// next-offset cursor. Stops when the count is reached, the server
    /// signals no more results, the cursor stalls, or the page bound hits.
    pub async fn fetch_posts(
        &self,
        sort: SortOrder,
        want: usize,
    ) -> Result<Vec<PostData>, CoreError> {
        let mut posts: Vec<PostData> = Vec::new();
        let mut offset: u64 = 0;

        for _ in 0..MAX_PAGES {
            if posts.len() >= want {
                break;
            }
            let limit = PAGE_LIMIT.min(want - posts.len());
            let page = self.get_posts_page(sort, limit, offset).await?;
            posts.extend(page.posts);

            if !page.has_more {
                break;
            }
            match page.next_offset {
                Some(next) if next != offset => offset = next,
                _ => {
                    warn!(
                        "Pagination cursor stalled at offset {} for sort={}, stopping",
                        offset, sort
                    );
                    break;
                }
            }
        }

        info!("Fetched {} posts for sort={} (wanted {})", posts.len(), sort, want);
        Ok(posts)
    }

    /// Fetch both orderings and merge them, deduplicating by post id.
    /// First occurrence wins, hot before new.
    pub async fn fetch_candidates(
        &self,
        hot_want: usize,
        new_want: usize,
    ) -> Result<Vec<Post>, CoreError> {
        let hot = self.fetch_posts(SortOrder::Hot, hot_want).await?;
        let new = self.fetch_posts(SortOrder::New, new_want).await?;

        let merged = merge_dedup(hot.into_iter().chain(new));
        info!("Merged candidates: {} unique posts", merged.len());
        Ok(merged)
    }
}

pub(crate) fn merge_dedup(posts: impl IntoIterator<Item = PostData>) -> Vec<Post> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for data in posts {
        if data.id.is_empty() || !seen.insert(data.id.clone()) {
            continue;
        }
        merged.push(Post::from(data));
    }
    merged
}

impl From<PostData> for Post {
    fn from(data: PostData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            content: data.content,
            url: data.url,
            submolt: data.submolt.and_then(|s| s.name),
            created_at: data.created_at,
        }
    }
}
