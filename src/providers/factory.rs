use reqwest::Client;
use std::time::Duration;

use crate::config::ResolverConfig;
use crate::platforms::Platform;
use crate::providers::{
    ApifyTier, InstagramEmbedTier, InvidiousTier, MetadataTier, OembedTier, ProviderChain,
    YouTubeApiTier, FALLBACK_PROVIDER,
};

pub struct ChainFactory;

impl ChainFactory {
    /// Build the provider chain for a platform from configuration
    pub fn create(platform: Platform, config: &ResolverConfig, client: &Client) -> ProviderChain {
        let endpoints = &config.endpoints;
        let title_max = config.title_max_chars;

        let tiers: Vec<Box<dyn MetadataTier>> = match platform {
            Platform::Instagram => vec![
                Box::new(ApifyTier::new(
                    client.clone(),
                    &endpoints.scraper_base,
                    &config.scraper.instagram_actor,
                    platform,
                    title_max,
                )),
                Box::new(InstagramEmbedTier::new(
                    client.clone(),
                    &endpoints.instagram_base,
                    title_max,
                )),
            ],
            Platform::YouTube => vec![
                Box::new(ApifyTier::new(
                    client.clone(),
                    &endpoints.scraper_base,
                    &config.scraper.youtube_actor,
                    platform,
                    title_max,
                )),
                Box::new(InvidiousTier::new(
                    client.clone(),
                    &endpoints.invidious_mirrors,
                    Duration::from_millis(config.mirror_timeout_ms),
                )),
                Box::new(YouTubeApiTier::new(
                    client.clone(),
                    &endpoints.youtube_api_base,
                )),
                Box::new(OembedTier::new(client.clone(), &endpoints.oembed_base)),
            ],
            Platform::TikTok => vec![Box::new(ApifyTier::new(
                client.clone(),
                &endpoints.scraper_base,
                &config.scraper.tiktok_actor,
                platform,
                title_max,
            ))],
            Platform::Naver => Vec::new(),
        };

        ProviderChain::new(platform, tiers)
    }

    /// Tier order for a platform, for diagnostics
    pub fn tier_names(platform: Platform) -> Vec<String> {
        let tiers: &[&str] = match platform {
            Platform::Instagram => &["apify", "instagram-embed"],
            Platform::YouTube => &["apify", "invidious", "youtube-api", "oembed"],
            Platform::TikTok => &["apify"],
            Platform::Naver => &[],
        };

        tiers
            .iter()
            .copied()
            .chain(std::iter::once(FALLBACK_PROVIDER))
            .map(String::from)
            .collect()
    }
}
