//! Where the synchronizer reads vendor documents from.

use async_trait::async_trait;
use rdvtrack_timeone::{ActionQuery, FeedError, TimeOneClient};

/// Supplier of raw feed documents.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn programs_xml(&self) -> Result<String, FeedError>;

    async fn actions_xml(&self, query: &ActionQuery) -> Result<String, FeedError>;
}

#[async_trait]
impl FeedSource for TimeOneClient {
    async fn programs_xml(&self) -> Result<String, FeedError> {
        self.fetch_programs_xml().await
    }

    async fn actions_xml(&self, query: &ActionQuery) -> Result<String, FeedError> {
        self.fetch_actions_xml(query).await
    }
}
