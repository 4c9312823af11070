//! Response-shape normalization.
//!
//! Structured sources disagree on field names, so each target attribute has an
//! ordered list of candidate paths and the first present, non-empty string
//! wins. Paths are dotted: `authorMeta.name`, `covers.0`.

use serde_json::Value;

use crate::model::Metadata;

/// Candidate paths per metadata attribute, highest priority first
#[derive(Debug, Clone, Copy)]
pub struct FieldCandidates {
    pub title: &'static [&'static str],
    pub description: &'static [&'static str],
    pub author: &'static [&'static str],
    pub thumbnail: &'static [&'static str],
    pub media_id: &'static [&'static str],
    pub canonical_url: &'static [&'static str],
}

pub const INSTAGRAM_DATASET: FieldCandidates = FieldCandidates {
    title: &["title", "caption"],
    description: &["caption", "description", "alt"],
    author: &["ownerUsername", "ownerFullName", "owner.username"],
    thumbnail: &["displayUrl", "thumbnailUrl", "images.0"],
    media_id: &["shortCode", "code"],
    canonical_url: &["url", "inputUrl"],
};

pub const TIKTOK_DATASET: FieldCandidates = FieldCandidates {
    title: &["title", "text", "desc"],
    description: &["text", "desc", "description"],
    author: &["authorMeta.name", "author.uniqueId", "authorMeta.nickName"],
    thumbnail: &["videoMeta.coverUrl", "covers.0", "video.cover"],
    media_id: &["id", "aweme_id"],
    canonical_url: &["webVideoUrl", "url"],
};

pub const YOUTUBE_DATASET: FieldCandidates = FieldCandidates {
    title: &["title"],
    description: &["text", "description"],
    author: &["channelName", "channel.name", "author"],
    thumbnail: &["thumbnailUrl", "thumbnails.0.url"],
    media_id: &["id"],
    canonical_url: &["url"],
};

pub const YOUTUBE_API_SNIPPET: FieldCandidates = FieldCandidates {
    title: &["snippet.title"],
    description: &["snippet.description"],
    author: &["snippet.channelTitle"],
    thumbnail: &[
        "snippet.thumbnails.maxres.url",
        "snippet.thumbnails.high.url",
        "snippet.thumbnails.medium.url",
        "snippet.thumbnails.default.url",
    ],
    media_id: &["id"],
    canonical_url: &[],
};

/// First candidate path resolving to a non-empty string
pub fn first_present<'a>(item: &'a Value, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|path| lookup_path(item, path))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn lookup_path<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    let pointer = format!("/{}", path.replace('.', "/"));
    item.pointer(&pointer)
}

/// Hard cut at `max_chars` characters, no word-boundary adjustment
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    title.chars().take(max_chars).collect()
}

/// Map one structured item onto `Metadata`.
///
/// Returns `None` when not a single attribute could be found.
pub(crate) fn normalize_item(
    item: &Value,
    fields: &FieldCandidates,
    title_max_chars: usize,
    provider: &str,
) -> Option<Metadata> {
    let title = first_present(item, fields.title).map(|t| truncate_title(t, title_max_chars));
    let description = first_present(item, fields.description).unwrap_or_default();
    let author_name = first_present(item, fields.author).unwrap_or_default();
    let thumbnail_url = first_present(item, fields.thumbnail).unwrap_or_default();

    if title.is_none() && description.is_empty() && author_name.is_empty() && thumbnail_url.is_empty()
    {
        return None;
    }

    Some(Metadata {
        title,
        description: description.to_string(),
        author_name: author_name.to_string(),
        thumbnail_url: thumbnail_url.to_string(),
        provider_used: provider.to_string(),
        canonical_media_id: first_present(item, fields.media_id).map(String::from),
        canonical_url: first_present(item, fields.canonical_url).map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_present_respects_priority() {
        let item = json!({ "caption": "from caption", "title": "from title" });
        assert_eq!(first_present(&item, &["title", "caption"]), Some("from title"));
        assert_eq!(first_present(&item, &["caption", "title"]), Some("from caption"));
    }

    #[test]
    fn test_first_present_skips_empty_and_non_strings() {
        let item = json!({ "title": "", "text": 42, "desc": "  real  " });
        assert_eq!(first_present(&item, &["title", "text", "desc"]), Some("real"));
        assert_eq!(first_present(&item, &["missing"]), None);
    }

    #[test]
    fn test_nested_paths() {
        let item = json!({
            "authorMeta": { "name": "chef.kim" },
            "covers": ["https://cdn/cover.jpg"]
        });
        assert_eq!(first_present(&item, &["authorMeta.name"]), Some("chef.kim"));
        assert_eq!(first_present(&item, &["covers.0"]), Some("https://cdn/cover.jpg"));
    }

    #[test]
    fn test_truncate_is_hard_character_cut() {
        let long = "word ".repeat(30);
        let cut = truncate_title(&long, 100);
        assert_eq!(cut.chars().count(), 100);
        assert_eq!(cut, long[..100]);

        assert_eq!(truncate_title("short", 100), "short");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let korean = "김치찌개".repeat(40);
        let cut = truncate_title(&korean, 100);
        assert_eq!(cut.chars().count(), 100);
    }

    #[test]
    fn test_normalize_tiktok_item() {
        let item = json!({
            "id": "7123456789012345678",
            "text": "Easy kimchi stew #recipe",
            "authorMeta": { "name": "chef.kim" },
            "videoMeta": { "coverUrl": "https://cdn/cover.jpg" },
            "webVideoUrl": "https://www.tiktok.com/@chef.kim/video/7123456789012345678"
        });

        let m = normalize_item(&item, &TIKTOK_DATASET, 100, "apify").unwrap();
        assert_eq!(m.title.as_deref(), Some("Easy kimchi stew #recipe"));
        assert_eq!(m.description, "Easy kimchi stew #recipe");
        assert_eq!(m.author_name, "chef.kim");
        assert_eq!(m.thumbnail_url, "https://cdn/cover.jpg");
        assert_eq!(m.provider_used, "apify");
        assert_eq!(m.canonical_media_id.as_deref(), Some("7123456789012345678"));
    }

    #[test]
    fn test_normalize_empty_item() {
        assert!(normalize_item(&json!({ "unrelated": 1 }), &INSTAGRAM_DATASET, 100, "apify").is_none());
    }

    #[test]
    fn test_youtube_api_thumbnail_fallback_order() {
        let item = json!({
            "snippet": {
                "title": "Pasta",
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/default.jpg" },
                    "high": { "url": "https://i.ytimg.com/high.jpg" }
                }
            }
        });
        let m = normalize_item(&item, &YOUTUBE_API_SNIPPET, 100, "youtube-api").unwrap();
        assert_eq!(m.thumbnail_url, "https://i.ytimg.com/high.jpg");
    }
}
