use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use super::{trim_base, youtube_watch_url, MetadataTier, TierResult};
use crate::error::TierError;
use crate::model::{Classification, Metadata, ProviderCredentials};

/// YouTube's public embed-info endpoint.
///
/// Always available but only knows title, author and thumbnail.
pub struct OembedTier {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OembedResponse {
    title: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    thumbnail_url: Option<String>,
}

impl OembedTier {
    pub fn new(client: Client, base_url: &str) -> Self {
        OembedTier {
            client,
            base_url: trim_base(base_url),
        }
    }

    async fn fetch(&self, target: &Classification) -> Result<Metadata, TierError> {
        let watch_url = youtube_watch_url(&target.media_id);
        debug!("Fetching oEmbed info for {}", watch_url);

        let oembed: OembedResponse = self
            .client
            .get(format!("{}/oembed", self.base_url))
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if oembed.title.trim().is_empty() {
            return Err(TierError::MalformedResponse("empty title".to_string()));
        }

        Ok(Metadata {
            title: Some(oembed.title),
            description: String::new(),
            author_name: oembed.author_name,
            thumbnail_url: oembed.thumbnail_url.unwrap_or_default(),
            provider_used: self.tier_name().to_string(),
            canonical_media_id: None,
            canonical_url: None,
        })
    }
}

#[async_trait]
impl MetadataTier for OembedTier {
    fn tier_name(&self) -> &str {
        "oembed"
    }

    async fn lookup(
        &self,
        target: &Classification,
        _credentials: &ProviderCredentials,
    ) -> TierResult {
        self.fetch(target).await.into()
    }
}
