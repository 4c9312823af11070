use crate::platforms::Platform;

/// Direct image URL for platforms that derive one from the media id alone.
///
/// Only YouTube has a fixed CDN template; every other platform returns `None`
/// and relies on its provider chain for a thumbnail.
pub fn resolve_thumbnail(platform: Platform, media_id: &str) -> Option<String> {
    if media_id.is_empty() {
        return None;
    }

    match platform {
        Platform::YouTube => Some(format!(
            "https://img.youtube.com/vi/{}/hqdefault.jpg",
            media_id
        )),
        Platform::Instagram | Platform::TikTok | Platform::Naver => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_thumbnail() {
        assert_eq!(
            resolve_thumbnail(Platform::YouTube, "dQw4w9WgXcQ").as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
    }

    #[test]
    fn test_other_platforms_have_no_formula() {
        assert!(resolve_thumbnail(Platform::Instagram, "C1a2B3").is_none());
        assert!(resolve_thumbnail(Platform::TikTok, "7123456789").is_none());
        assert!(resolve_thumbnail(Platform::Naver, "12345678").is_none());
    }

    #[test]
    fn test_empty_id() {
        assert!(resolve_thumbnail(Platform::YouTube, "").is_none());
    }
}
