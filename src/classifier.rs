use chrono::{Datelike, NaiveDate};
use log::debug;
use regex::Captures;

use crate::model::Classification;
use crate::platforms::{Platform, PlatformDefinition, REGISTRY};
use crate::thumbnail::resolve_thumbnail;

/// Identifiers pulled out of a matched link
struct Extracted {
    media_id: String,
    creator_handle: String,
}

/// Platform and identifiers of a recognized link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkIdentity {
    pub platform: Platform,
    pub media_id: String,
    pub creator_handle: String,
}

/// Recognize a pasted link.
///
/// The first registry entry whose primary pattern matches wins. `today` feeds
/// the placeholder title so the result does not depend on the wall clock.
/// Returns `None` for blank input and for links no platform recognizes.
pub fn classify(raw_url: &str, today: NaiveDate) -> Option<Classification> {
    let url = raw_url.trim();
    let Some((def, extracted)) = recognize(url) else {
        debug!("No platform recognizes {}", url);
        return None;
    };

    debug!(
        "Classified {} as {} (id: {})",
        url,
        def.name(),
        extracted.media_id
    );

    Some(Classification {
        source_url: url.to_string(),
        platform: def.platform,
        platform_label: def.label.to_string(),
        thumbnail_url: resolve_thumbnail(def.platform, &extracted.media_id),
        media_id: extracted.media_id,
        creator_handle: extracted.creator_handle,
        suggested_title: suggested_title(def.label, today),
        is_placeholder_title: def.placeholder_title,
    })
}

/// Identifiers of a link, without building a full classification
pub fn identify(raw_url: &str) -> Option<LinkIdentity> {
    recognize(raw_url.trim()).map(|(def, extracted)| LinkIdentity {
        platform: def.platform,
        media_id: extracted.media_id,
        creator_handle: extracted.creator_handle,
    })
}

fn recognize(url: &str) -> Option<(&'static PlatformDefinition, Extracted)> {
    if url.is_empty() {
        return None;
    }

    REGISTRY.iter().find_map(|def| {
        let caps = def.primary.captures(url)?;
        extract(def, url, &caps).map(|extracted| (def, extracted))
    })
}

/// Placeholder title shown until real metadata arrives
pub fn suggested_title(label: &str, today: NaiveDate) -> String {
    format!("{} recipe ({}/{})", label, today.month(), today.day())
}

fn extract(def: &PlatformDefinition, url: &str, caps: &Captures) -> Option<Extracted> {
    let group = |i: usize| caps.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty());

    let extracted = match def.platform {
        Platform::Instagram => Extracted {
            media_id: group(2)?.to_string(),
            creator_handle: instagram_handle(def, url),
        },
        Platform::YouTube | Platform::Naver => Extracted {
            media_id: group(1)?.to_string(),
            creator_handle: String::new(),
        },
        // Canonical form captures handle + numeric id, short links an opaque code
        Platform::TikTok => match (group(1), group(2), group(3)) {
            (Some(handle), Some(id), _) => Extracted {
                media_id: id.to_string(),
                creator_handle: format!("@{}", handle),
            },
            (_, _, Some(code)) => Extracted {
                media_id: code.to_string(),
                creator_handle: String::new(),
            },
            _ => return None,
        },
    };

    Some(extracted)
}

fn instagram_handle(def: &PlatformDefinition, url: &str) -> String {
    let segment = def
        .secondary
        .as_ref()
        .and_then(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    match segment {
        Some(s) if !s.eq_ignore_ascii_case("reel") && !s.eq_ignore_ascii_case("p") => {
            format!("@{}", s)
        }
        _ => String::new(),
    }
}
