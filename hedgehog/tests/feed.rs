use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use ugd_hedgehog::*;

const ADDR: &str = "unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43hlvy4jatsg";

const PAYLOAD: &str = r#"{
    "timeStamp": "2023-06-16T19:03:33.104Z",
    "previousTimeStamp": "2023-06-16T19:03:01.836Z",
    "flags": 0,
    "type": "MINT_STORAGE",
    "data": {"mints": {
        "unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43hlvy4jatsg/80": 100,
        "unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43tlvy4jatsg/90": 1000,
        "unigrid1pk2sxhrywmxsqtnas3p7gu0t8x43ulvy4jatsg/1x0": 1275,
        "pk2sxhrywmxsqtnas3p7gu0t8x43rlvy4jatsg/147621207": 1236
    }},
    "previousData": {"mints": {"yyy/1337": 1337}},
    "signature": "MIGIAkIBoUwt"
}"#;

type Reply = Arc<Mutex<(StatusCode, String)>>;

/// Serves whatever `reply` currently holds on the mint-storage path.
async fn serve_fixture(reply: Reply) -> SocketAddr {
    let app = Router::new().route(
        "/gridspork/mint-storage",
        get(move || {
            let reply = reply.clone();
            async move { reply.lock().clone() }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> HedgehogClient {
    HedgehogClient::new(&FeedConfig {
        url: format!("http://{}", addr),
        request_timeout_secs: 2,
        ..FeedConfig::default()
    })
    .unwrap()
}

fn fixture(status: StatusCode, body: &str) -> Reply {
    Arc::new(Mutex::new((status, body.to_string())))
}

#[tokio::test]
async fn test_refresh_populates_cache() {
    let addr = serve_fixture(fixture(StatusCode::OK, PAYLOAD)).await;
    let cache = MintCache::new("unigrid");

    let stats = refresh_once(&client_for(addr), &cache).await.unwrap();
    assert_eq!(stats.inserted, 2);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.foreign, 1);

    let mint = cache.lookup(80).unwrap();
    assert_eq!(mint.address, ADDR);
    assert_eq!(mint.amount, 100);
    assert!(cache.lookup(81).is_none());
    assert_eq!(cache.heights(), vec![80, 90]);
}

#[tokio::test]
async fn test_failed_refresh_keeps_cache() {
    let reply = fixture(StatusCode::OK, PAYLOAD);
    let addr = serve_fixture(reply.clone()).await;
    let client = client_for(addr);
    let cache = MintCache::new("unigrid");
    refresh_once(&client, &cache).await.unwrap();

    *reply.lock() = (StatusCode::OK, "{not json".to_string());
    let result = refresh_once(&client, &cache).await;
    assert!(matches!(result, Err(FeedError::Decode(_))));
    assert_eq!(cache.heights(), vec![80, 90]);

    *reply.lock() = (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    let result = refresh_once(&client, &cache).await;
    assert_eq!(result, Err(FeedError::Status(500)));
    assert_eq!(cache.heights(), vec![80, 90]);
}

#[tokio::test]
async fn test_unreachable_feed_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cache = MintCache::new("unigrid");
    let result = refresh_once(&client_for(addr), &cache).await;
    assert!(matches!(result, Err(FeedError::Http(_))));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_processed_heights_pruned_on_refresh() {
    let addr = serve_fixture(fixture(StatusCode::OK, PAYLOAD)).await;
    let client = client_for(addr);
    let cache = MintCache::new("unigrid");
    refresh_once(&client, &cache).await.unwrap();

    cache.mark_processed(80);
    assert!(cache.lookup(80).is_none());

    let stats = refresh_once(&client, &cache).await.unwrap();
    assert_eq!(stats.stale, 1);
    assert_eq!(stats.pruned, 1);
    assert_eq!(cache.heights(), vec![90]);
    assert!(cache.lookup(80).is_none());
}

#[tokio::test]
async fn test_refresher_runs_until_stopped() {
    let addr = serve_fixture(fixture(StatusCode::OK, PAYLOAD)).await;
    let cache = Arc::new(MintCache::new("unigrid"));

    let refresher = FeedRefresher::start(
        client_for(addr),
        cache.clone(),
        Duration::from_secs(3600),
    );
    assert!(refresher.is_running());

    // the first tick fires immediately
    for _ in 0..100 {
        if !cache.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(cache.lookup(90).unwrap().amount, 1000);

    tokio::time::timeout(Duration::from_secs(5), refresher.stop())
        .await
        .unwrap();
}
