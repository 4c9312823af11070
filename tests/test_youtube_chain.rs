use chrono::NaiveDate;
use mockito::{Matcher, Server};
use recipe_scrapbook::{ProviderCredentials, Resolver, ResolverConfig};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// Accepts connections and never answers, so every request times out
async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// Address with nothing listening, so every request is refused
fn closed_port() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn unreachable_config() -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.endpoints.scraper_base = closed_port();
    config.endpoints.youtube_api_base = closed_port();
    config.endpoints.oembed_base = closed_port();
    config.endpoints.instagram_base = closed_port();
    config.endpoints.invidious_mirrors = (0..5).map(|_| closed_port()).collect();
    config
}

fn resolver(config: ResolverConfig) -> Resolver {
    Resolver::builder()
        .config(config)
        .today(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
        .mirror_timeout(Duration::from_millis(150))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

fn all_credentials() -> ProviderCredentials {
    ProviderCredentials {
        youtube_api_key: Some("AIza-test".to_string()),
        scraper_token: Some("apify-test".to_string()),
    }
}

#[tokio::test]
async fn test_mirror_failover_stops_at_first_success() {
    let mut config = unreachable_config();

    let mut answering = Server::new_async().await;
    let answer = answering
        .mock("GET", "/api/v1/videos/dQw4w9WgXcQ")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "title": "Rice cooker bibimbap",
                "author": "Seoul Kitchen",
                "description": "One pot, no fuss.",
                "videoThumbnails": [
                    { "quality": "high", "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg" }
                ]
            }"#,
        )
        .expect(1)
        .create_async()
        .await;

    let mut after = Server::new_async().await;
    let never_asked = after
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut oembed = Server::new_async().await;
    let oembed_unused = oembed
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    config.endpoints.invidious_mirrors = vec![
        silent_server().await,
        silent_server().await,
        silent_server().await,
        answering.url(),
        after.url(),
    ];
    config.endpoints.oembed_base = oembed.url();

    let started = Instant::now();
    let resolution = resolver(config)
        .resolve(VIDEO_URL, &ProviderCredentials::default())
        .await
        .unwrap();

    let metadata = resolution.metadata;
    assert_eq!(metadata.provider_used, "invidious");
    assert_eq!(metadata.title.as_deref(), Some("Rice cooker bibimbap"));
    assert_eq!(metadata.author_name, "Seoul Kitchen");
    assert_eq!(metadata.description, "One pot, no fuss.");
    assert_eq!(
        metadata.thumbnail_url,
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    );

    // Three mirrors timed out independently before the fourth answered
    assert!(started.elapsed() >= Duration::from_millis(450));

    answer.assert_async().await;
    never_asked.assert_async().await;
    oembed_unused.assert_async().await;
}

#[tokio::test]
async fn test_exhausted_mirrors_fall_through_to_oembed() {
    let mut config = unreachable_config();

    let mut oembed = Server::new_async().await;
    let mock = oembed
        .mock("GET", "/oembed")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("url".into(), VIDEO_URL.into()),
            Matcher::UrlEncoded("format".into(), "json".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"title": "Perfect carbonara", "author_name": "Pasta Lab"}"#)
        .expect(2)
        .create_async()
        .await;
    config.endpoints.oembed_base = oembed.url();

    let resolver = resolver(config);

    let first = resolver
        .resolve(VIDEO_URL, &ProviderCredentials::default())
        .await
        .unwrap()
        .metadata;
    let second = resolver
        .resolve(VIDEO_URL, &ProviderCredentials::default())
        .await
        .unwrap()
        .metadata;

    assert_eq!(first.provider_used, "oembed");
    assert_eq!(first.description, "");
    assert_eq!(first.title, second.title);
    assert_eq!(first.author_name, second.author_name);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_official_api_answers_before_oembed() {
    let mut config = unreachable_config();

    let mut api = Server::new_async().await;
    let api_mock = api
        .mock("GET", "/youtube/v3/videos")
        .match_query(Matcher::UrlEncoded("key".into(), "AIza-test".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"items": [{"snippet": {"title": "Tteokbokki", "channelTitle": "Maangchi", "description": "Spicy rice cakes"}}]}"#,
        )
        .create_async()
        .await;
    config.endpoints.youtube_api_base = api.url();

    let credentials = ProviderCredentials {
        youtube_api_key: Some("AIza-test".to_string()),
        scraper_token: None,
    };

    let metadata = resolver(config)
        .resolve("https://youtu.be/dQw4w9WgXcQ", &credentials)
        .await
        .unwrap()
        .metadata;

    assert_eq!(metadata.provider_used, "youtube-api");
    assert_eq!(metadata.title.as_deref(), Some("Tteokbokki"));
    assert_eq!(metadata.description, "Spicy rice cakes");
    api_mock.assert_async().await;
}

#[tokio::test]
async fn test_every_tier_unreachable_yields_fallback() {
    let resolver = resolver(unreachable_config());

    let resolution = resolver
        .resolve("https://youtube.com/shorts/dQw4w9WgXcQ", &all_credentials())
        .await
        .unwrap();

    let metadata = resolution.metadata;
    assert_eq!(metadata.provider_used, "fallback");
    assert_eq!(
        metadata.title.as_deref(),
        Some(resolution.classification.suggested_title.as_str())
    );
    assert_eq!(metadata.title.as_deref(), Some("YouTube recipe (2/14)"));
    assert_eq!(metadata.description, "");
}

#[tokio::test]
async fn test_every_tier_unreachable_for_other_platforms() {
    let resolver = resolver(unreachable_config());

    for url in [
        "https://www.instagram.com/reel/C1a2B3c4D5e/",
        "https://www.tiktok.com/@chef.kim/video/7123456789012345678",
        "https://tv.naver.com/v/12345678",
    ] {
        let resolution = resolver.resolve(url, &all_credentials()).await.unwrap();
        assert_eq!(resolution.metadata.provider_used, "fallback", "{url}");
        assert_eq!(
            resolution.metadata.title,
            Some(resolution.classification.suggested_title.clone())
        );
        assert_eq!(
            resolution.metadata.author_name,
            resolution.classification.creator_handle
        );
    }
}

#[tokio::test]
#[ignore] // This test requires network access
async fn test_live_oembed_is_stable() {
    let _ = env_logger::try_init();

    let resolver = Resolver::builder().build().unwrap();
    let first = resolver
        .resolve(VIDEO_URL, &ProviderCredentials::default())
        .await
        .unwrap()
        .metadata;
    let second = resolver
        .resolve(VIDEO_URL, &ProviderCredentials::default())
        .await
        .unwrap()
        .metadata;

    assert!(first.title.is_some());
    assert_eq!(first.title, second.title);
    assert_eq!(first.author_name, second.author_name);
}

#[tokio::test]
async fn test_sub_second_request_timeout_is_honored() {
    let silent = silent_server().await;
    let mut config = unreachable_config();
    config.endpoints.invidious_mirrors = vec![silent.clone()];
    config.endpoints.oembed_base = silent;

    let resolver = Resolver::builder()
        .config(config)
        .today(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap())
        .mirror_timeout(Duration::from_secs(30))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let classification = resolver.classify(VIDEO_URL).unwrap();
    let started = Instant::now();
    let metadata = resolver
        .resolve_metadata(&classification, &ProviderCredentials::default())
        .await;

    assert_eq!(metadata.provider_used, "fallback");
    assert!(
        started.elapsed() < Duration::from_millis(1500),
        "two silent tiers took {:?}",
        started.elapsed()
    );
}
