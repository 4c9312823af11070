use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use super::normalize::{
    normalize_item, FieldCandidates, INSTAGRAM_DATASET, TIKTOK_DATASET, YOUTUBE_DATASET,
};
use super::{trim_base, youtube_watch_url, MetadataTier, TierResult};
use crate::classifier::identify;
use crate::error::TierError;
use crate::model::{Classification, Metadata, ProviderCredentials};
use crate::platforms::Platform;

/// Credential-gated scraping service.
///
/// Runs one actor synchronously and reads the first dataset item:
/// `POST {base}/v2/acts/{actor}/run-sync-get-dataset-items?token={token}`
pub struct ApifyTier {
    client: Client,
    base_url: String,
    actor_id: String,
    platform: Platform,
    title_max_chars: usize,
}

impl ApifyTier {
    pub fn new(
        client: Client,
        base_url: &str,
        actor_id: impl Into<String>,
        platform: Platform,
        title_max_chars: usize,
    ) -> Self {
        ApifyTier {
            client,
            base_url: trim_base(base_url),
            actor_id: actor_id.into(),
            platform,
            title_max_chars,
        }
    }

    fn fields(&self) -> &'static FieldCandidates {
        match self.platform {
            Platform::Instagram => &INSTAGRAM_DATASET,
            Platform::TikTok => &TIKTOK_DATASET,
            Platform::YouTube | Platform::Naver => &YOUTUBE_DATASET,
        }
    }

    /// Actor input; each actor expects a differently shaped URL list
    fn payload(&self, target: &Classification) -> Value {
        match self.platform {
            Platform::Instagram => json!({
                "directUrls": [target.source_url],
                "resultsType": "posts",
                "resultsLimit": 1
            }),
            Platform::TikTok => json!({
                "postURLs": [target.source_url],
                "resultsPerPage": 1
            }),
            Platform::YouTube | Platform::Naver => json!({
                "startUrls": [{ "url": youtube_watch_url(&target.media_id) }],
                "maxResults": 1
            }),
        }
    }

    async fn fetch(
        &self,
        target: &Classification,
        credentials: &ProviderCredentials,
    ) -> Result<Metadata, TierError> {
        let token = credentials
            .scraper_token()
            .ok_or(TierError::MissingCredential("scraper_token"))?;

        debug!("Running scraper actor {} for {}", self.actor_id, target.source_url);

        let items: Value = self
            .client
            .post(format!(
                "{}/v2/acts/{}/run-sync-get-dataset-items",
                self.base_url, self.actor_id
            ))
            .query(&[("token", token)])
            .json(&self.payload(target))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let item = items
            .as_array()
            .and_then(|items| items.first())
            .ok_or_else(|| TierError::MalformedResponse("empty dataset".to_string()))?;

        let mut metadata = normalize_item(item, self.fields(), self.title_max_chars, self.tier_name())
            .ok_or_else(|| TierError::MalformedResponse("no known fields in dataset item".to_string()))?;

        // Short links only reveal their numeric id through the canonical URL
        if metadata.canonical_media_id.is_none() {
            metadata.canonical_media_id = metadata
                .canonical_url
                .as_deref()
                .and_then(identify)
                .filter(|link| link.platform == self.platform)
                .map(|link| link.media_id);
        }

        Ok(metadata)
    }
}

#[async_trait]
impl MetadataTier for ApifyTier {
    fn tier_name(&self) -> &str {
        "apify"
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
