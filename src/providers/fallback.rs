use log::{debug, info, warn};

use crate::model::{Classification, Metadata, ProviderCredentials};
use crate::platforms::Platform;
use crate::providers::{MetadataTier, TierResult};

/// Tag of the URL-derived last resort
pub const FALLBACK_PROVIDER: &str = "fallback";

/// Ordered tiers for one platform, folded until one answers.
///
/// Tiers run strictly one after another. When all of them are unusable the
/// chain builds metadata from the classification alone, so it never fails.
pub struct ProviderChain {
    platform: Platform,
    tiers: Vec<Box<dyn MetadataTier>>,
}

impl ProviderChain {
    pub fn new(platform: Platform, tiers: Vec<Box<dyn MetadataTier>>) -> Self {
        ProviderChain { platform, tiers }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Tier tags in evaluation order, ending with the fallback
    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers
            .iter()
            .map(|t| t.tier_name())
            .chain(std::iter::once(FALLBACK_PROVIDER))
            .collect()
    }

    /// True when some tier can answer without user credentials
    pub fn has_credential_free_tier(&self) -> bool {
        self.tiers.iter().any(|t| !t.requires_credential())
    }

    pub async fn resolve(
        &self,
        target: &Classification,
        credentials: &ProviderCredentials,
    ) -> Metadata {
        for tier in &self.tiers {
            debug!(
                "Attempting {} metadata with {}",
                self.platform,
                tier.tier_name()
            );

            match tier.lookup(target, credentials).await {
                TierResult::Success(metadata) => {
                    info!(
                        "Resolved {} metadata using {}",
                        target.media_id,
                        tier.tier_name()
                    );
                    return metadata;
                }
                TierResult::Unusable(e) if e.is_skip() => {
                    debug!("Skipping {}: {}", tier.tier_name(), e);
                }
                TierResult::Unusable(e) => {
                    warn!("Tier {} failed for {}: {}", tier.tier_name(), target.media_id, e);
                }
            }
        }

        info!(
            "All tiers exhausted for {}, using link-derived metadata",
            target.media_id
        );
        url_derived(target)
    }
}

/// Metadata built only from the classification
pub fn url_derived(target: &Classification) -> Metadata {
    Metadata {
        title: Some(target.suggested_title.clone()),
        description: String::new(),
        author_name: target.creator_handle.clone(),
        thumbnail_url: String::new(),
        provider_used: FALLBACK_PROVIDER.to_string(),
        canonical_media_id: None,
        canonical_url: None,
    }
}
