use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use super::normalize::{first_present, YOUTUBE_API_SNIPPET};
use super::{trim_base, MetadataTier, TierResult};
use crate::error::TierError;
use crate::model::{Classification, Metadata, ProviderCredentials};

/// Official YouTube Data API, gated on the user's API key
pub struct YouTubeApiTier {
    client: Client,
    base_url: String,
}

impl YouTubeApiTier {
    pub fn new(client: Client, base_url: &str) -> Self {
        YouTubeApiTier {
            client,
            base_url: trim_base(base_url),
        }
    }

    async fn fetch(
        &self,
        target: &Classification,
        credentials: &ProviderCredentials,
    ) -> Result<Metadata, TierError> {
        let key = credentials
            .youtube_api_key()
            .ok_or(TierError::MissingCredential("youtube_api_key"))?;

        debug!("Querying YouTube Data API for {}", target.media_id);

        let body: Value = self
            .client
            .get(format!("{}/youtube/v3/videos", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("id", target.media_id.as_str()),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let item = body["items"]
            .as_array()
            .and_then(|items| items.first())
            .ok_or_else(|| TierError::MalformedResponse("no items for video id".to_string()))?;

        let title = first_present(item, YOUTUBE_API_SNIPPET.title)
            .ok_or_else(|| TierError::MalformedResponse("snippet without title".to_string()))?;

        Ok(Metadata {
            title: Some(title.to_string()),
            description: first_present(item, YOUTUBE_API_SNIPPET.description)
                .unwrap_or_default()
                .to_string(),
            author_name: first_present(item, YOUTUBE_API_SNIPPET.author)
                .unwrap_or_default()
                .to_string(),
            thumbnail_url: first_present(item, YOUTUBE_API_SNIPPET.thumbnail)
                .unwrap_or_default()
                .to_string(),
            provider_used: self.tier_name().to_string(),
            canonical_media_id: None,
            canonical_url: None,
        })
    }
}

#[async_trait]
impl MetadataTier for YouTubeApiTier {
    fn tier_name(&self) -> &str {
        "youtube-api"
    }

    fn requires_credential(&self) -> bool {
        true
    }

    async fn lookup(
        &self,
        target: &Classification,
        credentials: &ProviderCredentials,
    ) -> TierResult {
        self.fetch(target, credentials).await.into()
    }
}
