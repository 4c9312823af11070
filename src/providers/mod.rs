mod apify;
mod factory;
mod fallback;
mod instagram_embed;
mod invidious;
mod normalize;
mod oembed;
mod youtube_api;

pub use apify::ApifyTier;
pub use factory::ChainFactory;
pub use fallback::{url_derived, ProviderChain, FALLBACK_PROVIDER};
pub use instagram_embed::InstagramEmbedTier;
pub use invidious::InvidiousTier;
pub use normalize::{first_present, truncate_title, FieldCandidates};
pub use oembed::OembedTier;
pub use youtube_api::YouTubeApiTier;

use async_trait::async_trait;

use crate::error::TierError;
use crate::model::{Classification, Metadata, ProviderCredentials};

/// Outcome of asking one tier for metadata
#[derive(Debug)]
pub enum TierResult {
    Success(Metadata),
    /// The chain moves on to the next tier
    Unusable(TierError),
}

impl From<Result<Metadata, TierError>> for TierResult {
    fn from(result: Result<Metadata, TierError>) -> Self {
        match result {
            Ok(metadata) => TierResult::Success(metadata),
            Err(e) => TierResult::Unusable(e),
        }
    }
}

/// One data source in a platform's provider chain
#[async_trait]
pub trait MetadataTier: Send + Sync {
    /// Tag recorded in `Metadata::provider_used`
    fn tier_name(&self) -> &str;

    /// Whether this tier only runs when the user supplied a credential
    fn requires_credential(&self) -> bool {
        false
    }

    /// Ask this tier for metadata. Failures come back as `Unusable`.
    async fn lookup(
        &self,
        target: &Classification,
        credentials: &ProviderCredentials,
    ) -> TierResult;
}

/// Canonical watch URL, used wherever a tier needs a full YouTube link
pub(crate) fn youtube_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Strip trailing slashes so `format!("{}/path", base)` stays well-formed
pub(crate) fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
