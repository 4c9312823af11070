use async_trait::async_trait;
use log::debug;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use super::normalize::truncate_title;
use super::{trim_base, MetadataTier, TierResult};
use crate::error::TierError;
use crate::model::{Classification, Metadata, ProviderCredentials};

static CAPTION: Lazy<Selector> = Lazy::new(|| selector(".Caption"));
static USERNAME: Lazy<Selector> = Lazy::new(|| selector(".UsernameText, .CaptionUsername"));
static MEDIA_IMAGE: Lazy<Selector> = Lazy::new(|| selector("img.EmbeddedMediaImage"));

// Parts of the caption block that are not caption text
const CAPTION_NOISE: &[&str] = &["CaptionUsername", "CaptionComments"];

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Failed to parse embed selector")
}

/// Public post embed page, readable without credentials
pub struct InstagramEmbedTier {
    client: Client,
    base_url: String,
    title_max_chars: usize,
}

impl InstagramEmbedTier {
    pub fn new(client: Client, base_url: &str, title_max_chars: usize) -> Self {
        InstagramEmbedTier {
            client,
            base_url: trim_base(base_url),
            title_max_chars,
        }
    }

    async fn fetch(&self, target: &Classification) -> Result<Metadata, TierError> {
        let url = format!("{}/p/{}/embed/captioned/", self.base_url, target.media_id);
        debug!("Fetching Instagram embed page {}", url);

        let html = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        self.parse(&html)
    }

    fn parse(&self, html: &str) -> Result<Metadata, TierError> {
        let document = Html::parse_document(html);

        let caption = document
            .select(&CAPTION)
            .next()
            .map(caption_text)
            .filter(|c| !c.is_empty());

        let author_name = document
            .select(&USERNAME)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let thumbnail_url = document
            .select(&MEDIA_IMAGE)
            .next()
            .and_then(|img| img.value().attr("src"))
            .unwrap_or_default()
            .to_string();

        if caption.is_none() && thumbnail_url.is_empty() {
            return Err(TierError::MalformedResponse(
                "embed page has no caption or media".to_string(),
            ));
        }

        Ok(Metadata {
            title: caption
                .as_deref()
                .map(|c| truncate_title(c, self.title_max_chars)),
            description: caption.unwrap_or_default(),
            author_name,
            thumbnail_url,
            provider_used: self.tier_name().to_string(),
            canonical_media_id: None,
            canonical_url: None,
        })
    }
}

/// Caption text without the leading username and trailing comment link
fn caption_text(caption: ElementRef) -> String {
    let mut text = String::new();

    for node in caption.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let is_noise = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take_while(|el| el.id() != caption.id())
            .any(|el| el.value().classes().any(|c| CAPTION_NOISE.contains(&c)));

        if !is_noise {
            text.push_str(fragment);
            text.push(' ');
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl MetadataTier for InstagramEmbedTier {
    fn tier_name(&self) -> &str {
        "instagram-embed"
    }

    async fn lookup(
        &self,
        target: &Classification,
        _credentials: &ProviderCredentials,
    ) -> TierResult {
        self.fetch(target).await.into()
    }
}
