use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::model::ProviderCredentials;

/// Main resolver configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    /// Request timeout for every outbound call, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Independent bound for each federated mirror, in milliseconds
    #[serde(default = "default_mirror_timeout_ms")]
    pub mirror_timeout_ms: u64,
    /// Hard character cut applied to scraped titles
    #[serde(default = "default_title_max_chars")]
    pub title_max_chars: usize,
    /// Base URLs of the outbound services
    #[serde(default)]
    pub endpoints: EndpointsConfig,
    /// Scraping service actors
    #[serde(default)]
    pub scraper: ScraperConfig,
    /// Credentials read by the CLI and passed per call.
    ///
    /// The resolver itself never reads this field.
    #[serde(default)]
    pub credentials: ProviderCredentials,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            mirror_timeout_ms: default_mirror_timeout_ms(),
            title_max_chars: default_title_max_chars(),
            endpoints: EndpointsConfig::default(),
            scraper: ScraperConfig::default(),
            credentials: ProviderCredentials::default(),
        }
    }
}

/// Base URLs for every outbound service
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointsConfig {
    /// Premium scraping service
    #[serde(default = "default_scraper_base")]
    pub scraper_base: String,
    /// YouTube Data API
    #[serde(default = "default_youtube_api_base")]
    pub youtube_api_base: String,
    /// YouTube oEmbed host
    #[serde(default = "default_oembed_base")]
    pub oembed_base: String,
    /// Instagram host serving public embed pages
    #[serde(default = "default_instagram_base")]
    pub instagram_base: String,
    /// Invidious mirrors, tried first to last
    #[serde(default = "default_invidious_mirrors")]
    pub invidious_mirrors: Vec<String>,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            scraper_base: default_scraper_base(),
            youtube_api_base: default_youtube_api_base(),
            oembed_base: default_oembed_base(),
            instagram_base: default_instagram_base(),
            invidious_mirrors: default_invidious_mirrors(),
        }
    }
}

/// Actor identifiers on the scraping service, one per platform
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    #[serde(default = "default_instagram_actor")]
    pub instagram_actor: String,
    #[serde(default = "default_tiktok_actor")]
    pub tiktok_actor: String,
    #[serde(default = "default_youtube_actor")]
    pub youtube_actor: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            instagram_actor: default_instagram_actor(),
            tiktok_actor: default_tiktok_actor(),
            youtube_actor: default_youtube_actor(),
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 {
    10_000
}

fn default_mirror_timeout_ms() -> u64 {
    2000
}

fn default_title_max_chars() -> usize {
    100
}

fn default_scraper_base() -> String {
    "https://api.apify.com".to_string()
}

fn default_youtube_api_base() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_oembed_base() -> String {
    "https://www.youtube.com".to_string()
}

fn default_instagram_base() -> String {
    "https://www.instagram.com".to_string()
}

fn default_invidious_mirrors() -> Vec<String> {
    vec![
        "https://inv.nadeko.net".to_string(),
        "https://invidious.nerdvpn.de".to_string(),
        "https://yewtu.be".to_string(),
        "https://invidious.privacyredirect.com".to_string(),
        "https://iv.ggtyler.dev".to_string(),
    ]
}

fn default_instagram_actor() -> String {
    "apify~instagram-scraper".to_string()
}

fn default_tiktok_actor() -> String {
    "clockworks~tiktok-scraper".to_string()
}

fn default_youtube_actor() -> String {
    "streamers~youtube-scraper".to_string()
}

impl ResolverConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with SCRAPBOOK__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: SCRAPBOOK__CREDENTIALS__YOUTUBE_API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`ResolverConfig::load`] for the source priority.
pub fn load_config() -> Result<ResolverConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        .add_source(environment())
        .build()?;

    settings.try_deserialize()
}

/// Environment source: double underscore for nesting
/// (SCRAPBOOK__ENDPOINTS__SCRAPER_BASE), commas between mirror bases
fn environment() -> Environment {
    Environment::with_prefix("SCRAPBOOK")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("endpoints.invidious_mirrors")
}
