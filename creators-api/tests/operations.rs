mod common;

use common::{TEST_KEY, api_for};
use creators_api::{LinkedinAdSearch, RedditListing};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Query pairs of the only request the stub saw.
async fn single_request_query(server: &MockServer) -> Vec<(String, String)> {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one outbound request");
    requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn keys(pairs: &[(String, String)]) -> Vec<&str> {
    pairs.iter().map(|(k, _)| k.as_str()).collect()
}

#[tokio::test]
async fn user_tweets_returns_body_unmodified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/twitter/user-tweets"))
        .and(query_param("handle", "BillGates"))
        .and(header("x-api-key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tweets": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let body = api.twitter().user_tweets("BillGates").await.unwrap();

    assert_eq!(body, json!({"tweets": []}));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.as_str().contains("handle=BillGates"));
}

#[tokio::test]
async fn nested_vendor_payload_passes_through() {
    let payload = json!({
        "success": true,
        "legacy": {"screen_name": "BillGates", "followers_count": 65000000},
        "unknown_future_field": [1, "two", null, {"deep": true}]
    });
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/twitter/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let body = api_for(&server).twitter().profile("BillGates").await.unwrap();
    assert_eq!(body, payload);
}

#[tokio::test]
async fn tweet_url_is_encoded_as_a_single_value() {
    let url = "https://x.com/adrian_horning_/status/1911900126529958135?s=20&t=abc";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/twitter/tweet"))
        .and(query_param("url", url))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1911900126529958135"})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).twitter().tweet(url).await.unwrap();
    let pairs = single_request_query(&server).await;
    assert_eq!(pairs, vec![("url".to_string(), url.to_string())]);
}

#[tokio::test]
async fn youtube_search_omits_absent_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/youtube/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": []})))
        .mount(&server)
        .await;

    api_for(&server)
        .youtube()
        .search("rust async", None, None)
        .await
        .unwrap();

    let pairs = single_request_query(&server).await;
    assert_eq!(pairs, vec![("query".to_string(), "rust async".to_string())]);
}

#[tokio::test]
async fn youtube_search_sends_provided_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/youtube/search"))
        .and(query_param("query", "rust"))
        .and(query_param("sortBy", "popular"))
        .and(query_param("continuationToken", "tok/+=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .youtube()
        .search("rust", Some("popular"), Some("tok/+=="))
        .await
        .unwrap();
}

#[tokio::test]
async fn youtube_channel_videos_and_video() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/youtube/channel-videos"))
        .and(query_param("handle", "ThePrimeTimeagen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": [1]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/youtube/video"))
        .and(query_param("get_transcript", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"transcript": "hi"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let videos = api
        .youtube()
        .channel_videos("ThePrimeTimeagen", None)
        .await
        .unwrap();
    assert_eq!(videos, json!({"videos": [1]}));

    let video = api
        .youtube()
        .video("https://www.youtube.com/watch?v=abc", Some(true))
        .await
        .unwrap();
    assert_eq!(video, json!({"transcript": "hi"}));

    let requests = server.received_requests().await.unwrap();
    let listing = requests
        .iter()
        .find(|r| r.url.path() == "/v1/youtube/channel-videos")
        .unwrap();
    assert!(!listing.url.as_str().contains("continuationToken"));
}

#[tokio::test]
async fn reddit_subreddit_listing_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reddit/subreddit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": []})))
        .mount(&server)
        .await;

    let listing = RedditListing {
        sort: Some("top".into()),
        timeframe: Some("week".into()),
        after: None,
    };
    api_for(&server)
        .reddit()
        .subreddit_posts("rust", &listing)
        .await
        .unwrap();

    let pairs = single_request_query(&server).await;
    assert_eq!(keys(&pairs), vec!["subreddit", "sort", "timeframe"]);
}

#[tokio::test]
async fn reddit_comments_amount_only_when_given() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reddit/post/comments/simple"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"comments": []})))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let post = "https://www.reddit.com/r/rust/comments/abc/title/";
    api.reddit().post_comments(post, None).await.unwrap();
    api.reddit().post_comments(post, Some(50)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let first: Vec<_> = requests[0].url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    assert_eq!(first, vec!["url"]);
    assert!(requests[1].url.query_pairs().any(|(k, v)| k == "amount" && v == "50"));
}

#[tokio::test]
async fn reddit_search_with_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reddit/search"))
        .and(query_param("query", "tokio"))
        .and(query_param("after", "t3_xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"posts": []})))
        .expect(1)
        .mount(&server)
        .await;

    let listing = RedditListing {
        after: Some("t3_xyz".into()),
        ..Default::default()
    };
    api_for(&server).reddit().search("tokio", &listing).await.unwrap();
}

#[tokio::test]
async fn linkedin_search_without_filters_has_no_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/linkedin/ads/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ads": []})))
        .mount(&server)
        .await;

    api_for(&server)
        .linkedin()
        .search_ads(&LinkedinAdSearch::default())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn linkedin_search_encodes_every_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/linkedin/ads/search"))
        .and(query_param("company", "Procter & Gamble"))
        .and(query_param("countries", "US,CA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ads": []})))
        .expect(1)
        .mount(&server)
        .await;

    let search = LinkedinAdSearch {
        company: Some("Procter & Gamble".into()),
        countries: Some("US,CA".into()),
        ..Default::default()
    };
    api_for(&server).linkedin().search_ads(&search).await.unwrap();

    let pairs = single_request_query(&server).await;
    assert_eq!(keys(&pairs), vec!["company", "countries"]);
}

#[tokio::test]
async fn remaining_endpoints_hit_their_paths() {
    let server = MockServer::start().await;
    for p in [
        "/v1/youtube/channel",
        "/v1/facebook/adLibrary/search/companies",
        "/v1/facebook/adLibrary/company/ads",
        "/v1/linkedin/ad",
        "/v1/instagram/profile",
        "/v2/instagram/posts",
        "/v1/truthsocial/user/posts",
    ] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "path": p })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let api = api_for(&server);
    let bodies: Vec<Value> = vec![
        api.youtube().channel("MrBeast").await.unwrap(),
        api.facebook().search_ad_library_companies("Nike").await.unwrap(),
        api.facebook().company_ads("123456", None).await.unwrap(),
        api.linkedin().ad("https://www.linkedin.com/ad-library/detail/1").await.unwrap(),
        api.instagram().profile("natgeo").await.unwrap(),
        api.instagram().posts("natgeo").await.unwrap(),
        api.truthsocial().user_posts("realDonaldTrump").await.unwrap(),
    ];

    assert_eq!(bodies[1], json!({"path": "/v1/facebook/adLibrary/search/companies"}));
    assert_eq!(bodies[5], json!({"path": "/v2/instagram/posts"}));

    let requests = server.received_requests().await.unwrap();
    let company_ads = requests
        .iter()
        .find(|r| r.url.path() == "/v1/facebook/adLibrary/company/ads")
        .unwrap();
    assert_eq!(company_ads.url.query(), Some("pageId=123456"));
}

#[tokio::test]
async fn facebook_company_ads_forwards_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/facebook/adLibrary/company/ads"))
        .and(query_param("pageId", "123456"))
        .and(query_param("cursor", "AQHR/next+page=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .facebook()
        .company_ads("123456", Some("AQHR/next+page=="))
        .await
        .unwrap();

    let pairs = single_request_query(&server).await;
    assert_eq!(keys(&pairs), vec!["pageId", "cursor"]);
}

#[tokio::test]
async fn youtube_channel_videos_forwards_continuation_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/youtube/channel-videos"))
        .and(query_param("handle", "ThePrimeTimeagen"))
        .and(query_param("continuationToken", "4qmFsgKr/AhIY=="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"videos": [2]})))
        .expect(1)
        .mount(&server)
        .await;

    let body = api_for(&server)
        .youtube()
        .channel_videos("ThePrimeTimeagen", Some("4qmFsgKr/AhIY=="))
        .await
        .unwrap();
    assert_eq!(body, json!({"videos": [2]}));

    let pairs = single_request_query(&server).await;
    assert_eq!(keys(&pairs), vec!["handle", "continuationToken"]);
}

#[tokio::test]
async fn youtube_video_transcript_flag_only_when_given() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/youtube/video"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc"})))
        .expect(2)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let url = "https://www.youtube.com/watch?v=abc";
    api.youtube().video(url, None).await.unwrap();
    api.youtube().video(url, Some(false)).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let queries: Vec<Vec<(String, String)>> = requests
        .iter()
        .map(|r| {
            r.url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .collect();
    assert_eq!(queries[0], vec![("url".to_string(), url.to_string())]);
    assert_eq!(
        queries[1],
        vec![
            ("url".to_string(), url.to_string()),
            ("get_transcript".to_string(), "false".to_string()),
        ]
    );
}

#[tokio::test]
async fn linkedin_search_sends_all_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/linkedin/ads/search"))
        .and(query_param("company", "Microsoft"))
        .and(query_param("keyword", "cloud & AI"))
        .and(query_param("countries", "US"))
        .and(query_param("startDate", "2025-01-01"))
        .and(query_param("endDate", "2025-03-31"))
        .and(query_param("paginationToken", "page/2+x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ads": [1]})))
        .expect(1)
        .mount(&server)
        .await;

    let search = LinkedinAdSearch {
        company: Some("Microsoft".into()),
        keyword: Some("cloud & AI".into()),
        countries: Some("US".into()),
        start_date: Some("2025-01-01".into()),
        end_date: Some("2025-03-31".into()),
        pagination_token: Some("page/2+x".into()),
    };
    let body = api_for(&server).linkedin().search_ads(&search).await.unwrap();
    assert_eq!(body, json!({"ads": [1]}));

    let pairs = single_request_query(&server).await;
    assert_eq!(
        keys(&pairs),
        vec!["company", "keyword", "countries", "startDate", "endDate", "paginationToken"]
    );
}
