use serde::{Deserialize, Serialize};

use crate::platforms::Platform;

/// Result of recognizing a pasted link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub source_url: String,
    pub platform: Platform,
    pub platform_label: String,
    /// Never empty
    pub media_id: String,
    /// `@handle`, or empty when the link carries none
    pub creator_handle: String,
    pub suggested_title: String,
    /// Whether the platform's chain needs credentials to produce a real title
    pub is_placeholder_title: bool,
    pub thumbnail_url: Option<String>,
}

/// Rich metadata produced by a provider chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: Option<String>,
    pub description: String,
    pub author_name: String,
    pub thumbnail_url: String,
    /// Tier that answered
    pub provider_used: String,
    pub canonical_media_id: Option<String>,
    pub canonical_url: Option<String>,
}

/// Optional user secrets, injected per call
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderCredentials {
    pub youtube_api_key: Option<String>,
    pub scraper_token: Option<String>,
}

impl ProviderCredentials {
    pub fn youtube_api_key(&self) -> Option<&str> {
        non_blank(self.youtube_api_key.as_deref())
    }

    pub fn scraper_token(&self) -> Option<&str> {
        non_blank(self.scraper_token.as_deref())
    }
}

// Settings screens store cleared inputs as empty strings
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
