//! Recognize social-media recipe links and resolve their metadata.
//!
//! A pasted link is classified synchronously (platform, media id, creator
//! handle, placeholder title). Rich metadata then comes from the platform's
//! provider chain, which degrades to link-derived data instead of failing.

pub mod builder;
pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod platforms;
pub mod providers;
pub mod resolver;
pub mod thumbnail;

pub use builder::ResolverBuilder;
pub use config::{load_config, ResolverConfig};
pub use error::{ResolveError, TierError};
pub use model::{Classification, Metadata, ProviderCredentials};
pub use platforms::{list_supported_platforms, lookup, Platform, PlatformSummary};
pub use resolver::{RecipeDraft, Resolution, Resolver};
pub use thumbnail::resolve_thumbnail;

use chrono::Local;

/// Classify a link against today's local date
///
/// # Example
/// ```
/// use recipe_scrapbook::{classify, Platform};
///
/// let c = classify("https://youtu.be/dQw4w9WgXcQ").unwrap();
/// assert_eq!(c.platform, Platform::YouTube);
/// assert_eq!(c.media_id, "dQw4w9WgXcQ");
/// ```
pub fn classify(url: &str) -> Option<Classification> {
    classifier::classify(url, Local::now().date_naive())
}

/// Resolve a link with default configuration
///
/// # Example
/// ```no_run
/// # use recipe_scrapbook::{resolve, ProviderCredentials};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let resolution = resolve(
///     "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
///     &ProviderCredentials::default(),
/// )
/// .await?;
/// println!("{:?}", resolution.metadata.title);
/// # Ok(())
/// # }
/// ```
pub async fn resolve(
    url: &str,
    credentials: &ProviderCredentials,
) -> Result<Resolution, ResolveError> {
    Resolver::builder().build()?.resolve(url, credentials).await
}
