use chrono::{Local, NaiveDate};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::platforms::REGISTRY;
use crate::providers::ChainFactory;
use crate::resolver::{Clock, Resolver};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeScrapbook/0.3)";

/// Builder for configuring a [`Resolver`]
#[derive(Default)]
pub struct ResolverBuilder {
    config: Option<ResolverConfig>,
    clock: Option<Clock>,
    timeout: Option<Duration>,
    mirror_timeout: Option<Duration>,
}

impl ResolverBuilder {
    /// Use a loaded configuration instead of the defaults
    ///
    /// # Example
    /// ```
    /// use recipe_scrapbook::{Resolver, ResolverConfig};
    ///
    /// let mut config = ResolverConfig::default();
    /// config.title_max_chars = 80;
    /// let builder = Resolver::builder().config(config);
    /// ```
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Pin the date used for placeholder titles
    ///
    /// # Example
    /// ```
    /// use chrono::NaiveDate;
    /// use recipe_scrapbook::Resolver;
    ///
    /// let resolver = Resolver::builder()
    ///     .today(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
    ///     .build()
    ///     .unwrap();
    /// let c = resolver.classify("https://youtu.be/dQw4w9WgXcQ").unwrap();
    /// assert_eq!(c.suggested_title, "YouTube recipe (3/7)");
    /// ```
    pub fn today(self, date: NaiveDate) -> Self {
        self.clock(move || date)
    }

    /// Supply the clock used for placeholder titles
    pub fn clock(mut self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Set a timeout for every outbound request
    ///
    /// # Example
    /// ```
    /// use recipe_scrapbook::Resolver;
    /// use std::time::Duration;
    ///
    /// let builder = Resolver::builder().timeout(Duration::from_secs(5));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the per-mirror bound of the federated tier
    pub fn mirror_timeout(mut self, duration: Duration) -> Self {
        self.mirror_timeout = Some(duration);
        self
    }

    /// Build the resolver and its provider chains
    ///
    /// # Errors
    /// Returns `ResolveError::HttpClient` if the HTTP client cannot be created.
    pub fn build(self) -> Result<Resolver, ResolveError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(timeout) = self.timeout {
            config.timeout_ms = millis(timeout);
        }
        if let Some(mirror_timeout) = self.mirror_timeout {
            config.mirror_timeout_ms = millis(mirror_timeout);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .build()?;

        let chains: HashMap<_, _> = REGISTRY
            .iter()
            .map(|def| {
                (
                    def.platform,
                    ChainFactory::create(def.platform, &config, &client),
                )
            })
            .collect();

        let clock: Clock = match self.clock {
            Some(clock) => clock,
            None => Arc::new(|| Local::now().date_naive()),
        };

        Ok(Resolver::from_parts(chains, clock))
    }
}

/// Whole milliseconds, saturating for durations beyond `u64::MAX` ms
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
