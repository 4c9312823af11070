//! Registry of supported platforms.
//!
//! The table is built once and never mutated. Primary patterns are written so
//! that no URL matches two of them; registry order breaks ties if they ever do.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// One supported social-media source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    YouTube,
    TikTok,
    Naver,
}

impl Platform {
    /// Canonical lowercase id
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
            Platform::TikTok => "tiktok",
            Platform::Naver => "naver",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of a platform's link shapes
#[derive(Debug)]
pub struct PlatformDefinition {
    pub platform: Platform,
    pub label: &'static str,
    pub primary: Regex,
    /// Extra pattern used for creator extraction
    pub secondary: Option<Regex>,
    /// True when no credential-free tier can produce a real title
    pub placeholder_title: bool,
}

impl PlatformDefinition {
    pub fn name(&self) -> &'static str {
        self.platform.as_str()
    }
}

/// `{name, label}` pair exposed to settings and paste screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlatformSummary {
    pub name: &'static str,
    pub label: &'static str,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Failed to compile platform regex")
}

pub static REGISTRY: Lazy<Vec<PlatformDefinition>> = Lazy::new(|| {
    vec![
        PlatformDefinition {
            platform: Platform::Instagram,
            label: "Instagram",
            primary: compile(
                r"(?i)^(?:https?://)?(?:www\.|m\.)?instagram\.com/(?:[A-Za-z0-9_.]+/)?(reel|p)/([A-Za-z0-9_-]+)",
            ),
            secondary: Some(compile(
                r"(?i)^(?:https?://)?(?:www\.|m\.)?instagram\.com/([A-Za-z0-9_.]+)",
            )),
            placeholder_title: false,
        },
        PlatformDefinition {
            platform: Platform::YouTube,
            label: "YouTube",
            primary: compile(
                r"(?i)^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#\s]*&)?v=|shorts/)|youtu\.be/)([A-Za-z0-9_-]+)",
            ),
            secondary: None,
            placeholder_title: false,
        },
        PlatformDefinition {
            platform: Platform::TikTok,
            label: "TikTok",
            primary: compile(
                r"(?i)^(?:https?://)?(?:(?:www\.|m\.)?tiktok\.com/@([A-Za-z0-9_.]+)/video/(\d+)|(?:vt|vm)\.tiktok\.com/([A-Za-z0-9]+))",
            ),
            secondary: None,
            placeholder_title: true,
        },
        PlatformDefinition {
            platform: Platform::Naver,
            label: "Naver",
            primary: compile(
                r"(?i)^(?:https?://)?(?:m\.tv\.|tv\.|m\.)naver\.com/(?:v|h|clip|shorts)/(\d+)",
            ),
            secondary: None,
            placeholder_title: true,
        },
    ]
});

/// Supported platforms in registry order
pub fn list_supported_platforms() -> Vec<PlatformSummary> {
    REGISTRY
        .iter()
        .map(|def| PlatformSummary {
            name: def.name(),
            label: def.label,
        })
        .collect()
}

/// Find a definition by its canonical name
pub fn lookup(name: &str) -> Option<&'static PlatformDefinition> {
    REGISTRY.iter().find(|def| def.name() == name)
}
