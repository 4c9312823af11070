use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::builder::ResolverBuilder;
use crate::classifier::{classify, identify};
use crate::error::ResolveError;
use crate::model::{Classification, Metadata, ProviderCredentials};
use crate::platforms::Platform;
use crate::providers::{url_derived, ProviderChain, FALLBACK_PROVIDER};

/// Source of "today" for placeholder titles
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Entry point tying classification, thumbnails and provider chains together.
///
/// Holds no per-call state; every `resolve` is independent.
pub struct Resolver {
    chains: HashMap<Platform, ProviderChain>,
    clock: Clock,
}

impl Resolver {
    /// Creates a new builder for configuring a resolver
    ///
    /// # Example
    /// ```
    /// use recipe_scrapbook::Resolver;
    ///
    /// let resolver = Resolver::builder().build().unwrap();
    /// assert!(resolver.classify("https://example.com/foo").is_err());
    /// ```
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    pub(crate) fn from_parts(chains: HashMap<Platform, ProviderChain>, clock: Clock) -> Self {
        Resolver { chains, clock }
    }

    /// Recognize a pasted link, synchronously
    ///
    /// # Errors
    /// `ResolveError::UnsupportedSource` when no platform recognizes the link.
    pub fn classify(&self, raw_url: &str) -> Result<Classification, ResolveError> {
        classify(raw_url, (self.clock)())
            .ok_or_else(|| ResolveError::UnsupportedSource(raw_url.trim().to_string()))
    }

    /// Run the platform's provider chain.
    ///
    /// Never fails: exhausted chains degrade to link-derived metadata.
    pub async fn resolve_metadata(
        &self,
        classification: &Classification,
        credentials: &ProviderCredentials,
    ) -> Metadata {
        match self.chains.get(&classification.platform) {
            Some(chain) => chain.resolve(classification, credentials).await,
            None => {
                debug!("No chain registered for {}", classification.platform);
                url_derived(classification)
            }
        }
    }

    /// Classify a link and resolve its metadata
    ///
    /// # Errors
    /// `ResolveError::UnsupportedSource` is the only error returned.
    pub async fn resolve(
        &self,
        raw_url: &str,
        credentials: &ProviderCredentials,
    ) -> Result<Resolution, ResolveError> {
        let classification = self.classify(raw_url)?;
        let metadata = self.resolve_metadata(&classification, credentials).await;

        info!(
            "Resolved {} {} via {}",
            classification.platform, classification.media_id, metadata.provider_used
        );

        Ok(Resolution {
            classification,
            metadata,
        })
    }
}

/// Classification plus the metadata resolved for it
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub classification: Classification,
    pub metadata: Metadata,
}

/// Record ready to be saved, metadata merged over the placeholder fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub source_url: String,
    pub platform: Platform,
    pub media_id: String,
    pub creator_handle: String,
    pub title: String,
    pub title_is_placeholder: bool,
    pub description: String,
    pub author_name: String,
    pub thumbnail_url: Option<String>,
    pub provider_used: String,
}

impl Resolution {
    /// Merge metadata over the classification.
    ///
    /// Fetched fields replace placeholders; empty fetched fields never erase
    /// classification data. A canonical id or URL reported by a provider
    /// replaces the parsed one.
    pub fn into_draft(self) -> RecipeDraft {
        let Resolution {
            classification: c,
            metadata: m,
        } = self;

        let canonical = m.canonical_url.as_deref().and_then(identify);

        let creator_handle = match canonical {
            Some(link) if c.creator_handle.is_empty() && link.platform == c.platform => {
                link.creator_handle
            }
            _ => c.creator_handle,
        };

        let fetched_title = m.title.filter(|t| !t.trim().is_empty());
        let title_is_placeholder = fetched_title.is_none() || m.provider_used == FALLBACK_PROVIDER;

        RecipeDraft {
            source_url: m.canonical_url.unwrap_or(c.source_url),
            platform: c.platform,
            media_id: m
                .canonical_media_id
                .filter(|id| !id.is_empty())
                .unwrap_or(c.media_id),
            author_name: if m.author_name.is_empty() {
                creator_handle.clone()
            } else {
                m.author_name
            },
            creator_handle,
            title: fetched_title.unwrap_or(c.suggested_title),
            title_is_placeholder,
            description: m.description,
            thumbnail_url: Some(m.thumbnail_url)
                .filter(|t| !t.is_empty())
                .or(c.thumbnail_url),
            provider_used: m.provider_used,
        }
    }
}
