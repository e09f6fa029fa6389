//! HTTP client for the TimeOne program catalog and action feeds.
//!
//! Both endpoints authenticate with query parameters and answer with an XML
//! document, returned here as raw text for [`crate::parser`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::TimeOneConfig;
use crate::error::FeedError;
use crate::retry::{with_retry, RetryConfig};

// ---------------------------------------------------------------------------
// Action query
// ---------------------------------------------------------------------------

/// Status filter understood by the action feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatusFilter {
    Rejected,
    Pending,
    #[default]
    Approved,
    All,
}

impl ActionStatusFilter {
    /// Code sent in the `s` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Self::Rejected => "0",
            Self::Pending => "1",
            Self::Approved => "2",
            Self::All => "3",
        }
    }

    /// Human-readable label echoed in dry-run reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Rejected => "Rejected",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::All => "All",
        }
    }

    /// Parse a feed status code (`"0"`..`"3"`) or a lowercase name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "0" | "rejected" => Some(Self::Rejected),
            "1" | "pending" => Some(Self::Pending),
            "2" | "approved" => Some(Self::Approved),
            "3" | "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Parameters for one action-feed request. Both dates are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: ActionStatusFilter,
}

impl ActionQuery {
    fn params(&self, config: &TimeOneConfig) -> Vec<(&'static str, String)> {
        vec![
            ("k", config.api_key.clone()),
            ("p", config.partner_id.clone()),
            ("dd", self.start.format("%Y-%m-%d").to_string()),
            ("df", self.end.format("%Y-%m-%d").to_string()),
            ("s", self.status.code().to_string()),
            ("td", "a".to_string()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client bound to one set of vendor credentials.
pub struct TimeOneClient {
    http: reqwest::Client,
    config: TimeOneConfig,
    retry: RetryConfig,
}

impl TimeOneClient {
    /// Build a client with the configured request timeout.
    pub fn new(config: TimeOneConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: TimeOneConfig) -> Self {
        let retry = config.retry();
        Self {
            http,
            config,
            retry,
        }
    }

    pub fn config(&self) -> &TimeOneConfig {
        &self.config
    }

    /// Fetch the affiliated program catalog.
    pub async fn fetch_programs_xml(&self) -> Result<String, FeedError> {
        let params = vec![
            ("partid", self.config.partner_id.clone()),
            ("key", self.config.api_key.clone()),
        ];
        let (url, params) = (self.config.programs_url.as_str(), params.as_slice());
        with_retry("programs", &self.retry, move || self.get_text(url, params)).await
    }

    /// Fetch the actions recorded in `query`'s period.
    pub async fn fetch_actions_xml(&self, query: &ActionQuery) -> Result<String, FeedError> {
        let params = query.params(&self.config);
        let (url, params) = (self.config.actions_url.as_str(), params.as_slice());
        with_retry("actions", &self.retry, move || self.get_text(url, params)).await
    }

    // ---- private helpers ----

    /// Execute a single GET request and return the body text.
    async fn get_text(
        &self,
        url: &str,
        params: &[(&'static str, String)],
    ) -> Result<String, FeedError> {
        let request = self.http.get(url).query(params).build()?;
        tracing::debug!(url = %self.config.redact(request.url().as_str()), "Fetching feed");

        let response = self.http.execute(request).await?;
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "Feed fetched");
        Ok(body)
    }

    /// Map a non-2xx response to [`FeedError::HttpStatus`] carrying the body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, FeedError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FeedError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
