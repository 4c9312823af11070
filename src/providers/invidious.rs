use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;

use super::{trim_base, MetadataTier, TierResult};
use crate::error::TierError;
use crate::model::{Classification, Metadata, ProviderCredentials};

/// Free federated provider backed by Invidious mirrors.
///
/// Mirrors are tried in order, each under its own time bound. A timed-out
/// request is dropped, not awaited.
pub struct InvidiousTier {
    client: Client,
    mirrors: Vec<String>,
    per_mirror_timeout: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoResponse {
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    video_thumbnails: Vec<VideoThumbnail>,
}

#[derive(Debug, Deserialize)]
struct VideoThumbnail {
    #[serde(default)]
    quality: String,
    url: String,
}

// Preferred thumbnail qualities, best first
const THUMBNAIL_QUALITIES: &[&str] = &["high", "medium", "default"];

impl InvidiousTier {
    pub fn new(client: Client, mirrors: &[String], per_mirror_timeout: Duration) -> Self {
        InvidiousTier {
            client,
            mirrors: mirrors.iter().map(|m| trim_base(m)).collect(),
            per_mirror_timeout,
        }
    }

    async fn fetch_from(&self, mirror: &str, video_id: &str) -> Result<Metadata, TierError> {
        let request = async {
            let video: VideoResponse = self
                .client
                .get(format!("{}/api/v1/videos/{}", mirror, video_id))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            Ok::<_, TierError>(video)
        };

        let video = timeout(self.per_mirror_timeout, request)
            .await
            .map_err(|_| TierError::Timeout(self.per_mirror_timeout))??;

        if video.title.trim().is_empty() {
            return Err(TierError::MalformedResponse("empty title".to_string()));
        }

        Ok(Metadata {
            thumbnail_url: pick_thumbnail(mirror, &video.video_thumbnails),
            title: Some(video.title),
            description: video.description,
            author_name: video.author,
            provider_used: self.tier_name().to_string(),
            canonical_media_id: None,
            canonical_url: None,
        })
    }

    async fn fetch(&self, target: &Classification) -> Result<Metadata, TierError> {
        for (index, mirror) in self.mirrors.iter().enumerate() {
            debug!(
                "Querying invidious mirror {} ({}/{})",
                mirror,
                index + 1,
                self.mirrors.len()
            );

            match self.fetch_from(mirror, &target.media_id).await {
                Ok(metadata) => return Ok(metadata),
                Err(e) => warn!("Invidious mirror {} failed: {}", mirror, e),
            }
        }

        Err(TierError::MirrorsExhausted(self.mirrors.len()))
    }
}

/// Best available thumbnail; mirrors sometimes return host-relative paths
fn pick_thumbnail(mirror: &str, thumbnails: &[VideoThumbnail]) -> String {
    let chosen = THUMBNAIL_QUALITIES
        .iter()
        .find_map(|q| thumbnails.iter().find(|t| t.quality == *q))
        .or_else(|| thumbnails.first());

    match chosen {
        Some(t) if t.url.starts_with('/') => format!("{}{}", mirror, t.url),
        Some(t) => t.url.clone(),
        None => String::new(),
    }
}

#[async_trait]
impl MetadataTier for InvidiousTier {
    fn tier_name(&self) -> &str {
        "invidious"
    }

    async fn lookup(
        &self,
        target: &Classification,
        _credentials: &ProviderCredentials,
    ) -> TierResult {
        self.fetch(target).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(quality: &str, url: &str) -> VideoThumbnail {
        VideoThumbnail {
            quality: quality.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_pick_thumbnail_prefers_high() {
        let thumbs = vec![
            thumb("default", "https://i.ytimg.com/vi/x/default.jpg"),
            thumb("high", "https://i.ytimg.com/vi/x/hqdefault.jpg"),
        ];
        assert_eq!(
            pick_thumbnail("https://yewtu.be", &thumbs),
            "https://i.ytimg.com/vi/x/hqdefault.jpg"
        );
    }

    #[test]
    fn test_pick_thumbnail_joins_relative_paths() {
        let thumbs = vec![thumb("maxres", "/vi/x/maxres.jpg")];
        assert_eq!(
            pick_thumbnail("https://yewtu.be", &thumbs),
            "https://yewtu.be/vi/x/maxres.jpg"
        );
    }

    #[test]
    fn test_pick_thumbnail_empty() {
        assert_eq!(pick_thumbnail("https://yewtu.be", &[]), "");
    }

    #[test]
    fn test_mirror_bases_are_trimmed() {
        let tier = InvidiousTier::new(
            Client::new(),
            &["https://yewtu.be/".to_string()],
            Duration::from_secs(2),
        );
        assert_eq!(tier.mirrors, vec!["https://yewtu.be"]);
    }
}
