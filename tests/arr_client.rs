//! Sonarr/Radarr clients against an in-process stub of the `/api/v3` REST API.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zuliantv_bot::config::BackendSettings;
use zuliantv_bot::media::{
    Availability, MediaBackend, MediaKind, RadarrClient, SearchOutcome, SonarrClient,
};

const API_KEY: &str = "test-api-key";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    api_key: Option<String>,
    body: Option<Value>,
}

#[derive(Default)]
struct Stub {
    responses: HashMap<(Method, String), (StatusCode, Value)>,
    requests: Mutex<Vec<Recorded>>,
}

impl Stub {
    fn route(mut self, method: Method, path: &str, body: Value) -> Self {
        self.responses
            .insert((method, path.to_string()), (StatusCode::OK, body));
        self
    }

    fn fail(mut self, method: Method, path: &str, status: StatusCode, body: Value) -> Self {
        self.responses.insert((method, path.to_string()), (status, body));
        self
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn calls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    async fn serve(self) -> anyhow::Result<(BackendSettings, Arc<Self>)> {
        let stub = Arc::new(self);
        let app = Router::new().fallback(record).with_state(stub.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        let settings = BackendSettings {
            url: format!("http://{addr}/"),
            api_key: API_KEY.to_string(),
        };
        Ok((settings, stub))
    }
}

async fn record(
    State(stub): State<Arc<Stub>>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query,
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    if let Ok(mut requests) = stub.requests.lock() {
        requests.push(recorded);
    }

    match stub.responses.get(&(method, uri.path().to_string())) {
        Some((status, body)) => (*status, Json(body.clone())).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

fn sonarr(settings: &BackendSettings) -> SonarrClient {
    SonarrClient::new(settings, Duration::from_secs(10))
}

fn radarr(settings: &BackendSettings) -> RadarrClient {
    RadarrClient::new(settings, Duration::from_secs(10))
}

fn breaking_bad() -> Value {
    json!({
        "title": "Breaking Bad",
        "year": 2008,
        "tvdbId": 81189,
        "titleSlug": "breaking-bad",
        "images": [{"coverType": "poster", "url": "/bb.jpg"}],
        "seasons": [{"seasonNumber": 0, "monitored": false}, {"seasonNumber": 1, "monitored": true}]
    })
}

fn the_matrix() -> Value {
    json!({
        "title": "The Matrix",
        "year": 1999,
        "tmdbId": 603,
        "titleSlug": "the-matrix-603",
        "images": []
    })
}

#[tokio::test]
async fn search_sends_term_and_api_key() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(
            Method::GET,
            "/api/v3/series/lookup",
            json!([breaking_bad(), {"title": "Breaking Bad: Original Minisodes", "tvdbId": 300000}]),
        )
        .serve()
        .await?;

    let outcome = sonarr(&settings).search_by_title("Breaking Bad").await?;

    let SearchOutcome::Found(results) = outcome else {
        panic!("expected results, got {outcome:?}");
    };
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].external_id, Some(81189));
    assert_eq!(results[0].year, Some(2008));
    assert_eq!(results[1].external_id, Some(300_000));

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query.get("term").map(String::as_str), Some("Breaking Bad"));
    assert_eq!(requests[0].api_key.as_deref(), Some(API_KEY));
    Ok(())
}

#[tokio::test]
async fn empty_search_is_not_a_failure() -> anyhow::Result<()> {
    let (settings, _stub) = Stub::default()
        .route(Method::GET, "/api/v3/movie/lookup", json!([]))
        .serve()
        .await?;

    let outcome = radarr(&settings).search_by_title("zzzz").await?;
    assert_eq!(outcome, SearchOutcome::Empty);
    Ok(())
}

#[tokio::test]
async fn add_show_uses_first_folder_and_profile() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(Method::GET, "/api/v3/series/lookup", json!([breaking_bad()]))
        .route(
            Method::GET,
            "/api/v3/rootfolder",
            json!([{"id": 1, "path": "/tv"}, {"id": 2, "path": "/tv-4k"}]),
        )
        .route(
            Method::GET,
            "/api/v3/qualityprofile",
            json!([{"id": 6, "name": "HD-1080p"}, {"id": 7, "name": "Ultra-HD"}]),
        )
        .route(
            Method::POST,
            "/api/v3/series",
            json!({"id": 12, "title": "Breaking Bad", "status": "ended"}),
        )
        .serve()
        .await?;

    let entry = sonarr(&settings).add_by_external_id(81189).await?;

    assert_eq!(entry.title, "Breaking Bad");
    assert_eq!(entry.id, Some(12));
    assert_eq!(
        stub.calls(),
        vec![
            "GET /api/v3/series/lookup",
            "GET /api/v3/rootfolder",
            "GET /api/v3/qualityprofile",
            "POST /api/v3/series",
        ]
    );

    let requests = stub.requests();
    assert_eq!(requests[0].query.get("term").map(String::as_str), Some("tvdb:81189"));
    assert!(requests.iter().all(|r| r.api_key.as_deref() == Some(API_KEY)));

    let Some(payload) = requests[3].body.clone() else {
        panic!("add request without body");
    };
    assert_eq!(payload["tvdbId"], 81189);
    assert_eq!(payload["rootFolderPath"], "/tv");
    assert_eq!(payload["qualityProfileId"], 6);
    assert_eq!(payload["titleSlug"], "breaking-bad");
    assert_eq!(payload["seasons"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["addOptions"]["monitor"], "all");
    assert_eq!(payload["addOptions"]["searchForMissingEpisodes"], true);
    Ok(())
}

#[tokio::test]
async fn add_movie_uses_tmdb_lookup() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(Method::GET, "/api/v3/movie/lookup/tmdb", the_matrix())
        .route(Method::GET, "/api/v3/rootfolder", json!([{"path": "/movies"}]))
        .route(Method::GET, "/api/v3/qualityprofile", json!([{"id": 1, "name": "Any"}]))
        .route(
            Method::POST,
            "/api/v3/movie",
            json!({"id": 5, "title": "The Matrix", "year": 1999, "hasFile": false}),
        )
        .serve()
        .await?;

    let entry = radarr(&settings).add_by_external_id(603).await?;

    assert_eq!(entry.title, "The Matrix");
    assert_eq!(entry.availability, Availability::Searching);

    let requests = stub.requests();
    assert_eq!(requests[0].query.get("tmdbId").map(String::as_str), Some("603"));
    let Some(payload) = requests.last().and_then(|r| r.body.clone()) else {
        panic!("add request without body");
    };
    assert_eq!(payload["tmdbId"], 603);
    assert_eq!(payload["year"], 1999);
    assert_eq!(payload["rootFolderPath"], "/movies");
    assert_eq!(payload["addOptions"]["searchForMovie"], true);
    Ok(())
}

#[tokio::test]
async fn add_without_root_folder_never_posts() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(Method::GET, "/api/v3/movie/lookup/tmdb", the_matrix())
        .route(Method::GET, "/api/v3/rootfolder", json!([]))
        .route(Method::GET, "/api/v3/qualityprofile", json!([{"id": 1, "name": "Any"}]))
        .route(Method::POST, "/api/v3/movie", json!({"title": "The Matrix"}))
        .serve()
        .await?;

    let Err(err) = radarr(&settings).add_by_external_id(603).await else {
        panic!("add should fail without a root folder");
    };

    assert_eq!(err.backend, MediaKind::Movie);
    assert!(err.reason.contains("No root folders or quality profiles configured in Radarr"));
    assert!(!stub.calls().iter().any(|c| c.starts_with("POST")));
    Ok(())
}

#[tokio::test]
async fn add_without_quality_profile_never_posts() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(Method::GET, "/api/v3/series/lookup", json!([breaking_bad()]))
        .route(Method::GET, "/api/v3/rootfolder", json!([{"id": 1, "path": "/tv"}]))
        .route(Method::GET, "/api/v3/qualityprofile", json!([]))
        .route(Method::POST, "/api/v3/series", json!({"title": "Breaking Bad"}))
        .serve()
        .await?;

    let Err(err) = sonarr(&settings).add_by_external_id(81189).await else {
        panic!("add should fail without a quality profile");
    };

    assert_eq!(err.backend, MediaKind::Show);
    assert!(err.reason.contains("No root folders or quality profiles configured in Sonarr"));
    assert!(!stub.calls().iter().any(|c| c.starts_with("POST")));
    Ok(())
}

#[tokio::test]
async fn unreleased_movie_is_added_with_year_zero() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(
            Method::GET,
            "/api/v3/movie/lookup/tmdb",
            json!({"tmdbId": 999, "title": "Untitled Sequel", "year": 0, "titleSlug": "untitled-sequel-999"}),
        )
        .route(Method::GET, "/api/v3/rootfolder", json!([{"path": "/movies"}]))
        .route(Method::GET, "/api/v3/qualityprofile", json!([{"id": 1, "name": "Any"}]))
        .route(
            Method::POST,
            "/api/v3/movie",
            json!({"id": 8, "title": "Untitled Sequel", "year": 0, "hasFile": false}),
        )
        .serve()
        .await?;

    let entry = radarr(&settings).add_by_external_id(999).await?;
    assert_eq!(entry.title, "Untitled Sequel");

    let Some(payload) = stub.requests().last().and_then(|r| r.body.clone()) else {
        panic!("add request without body");
    };
    assert_eq!(payload["year"], json!(0));
    Ok(())
}

#[tokio::test]
async fn unknown_external_id_stops_after_lookup() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(Method::GET, "/api/v3/series/lookup", json!([]))
        .serve()
        .await?;

    let Err(err) = sonarr(&settings).add_by_external_id(1).await else {
        panic!("unknown id should fail");
    };

    assert_eq!(err.to_string(), "Sonarr API error: Series with TVDB ID 1 not found");
    assert_eq!(stub.calls(), vec!["GET /api/v3/series/lookup"]);
    Ok(())
}

#[tokio::test]
async fn error_status_becomes_backend_error() -> anyhow::Result<()> {
    let (settings, _stub) = Stub::default()
        .fail(
            Method::GET,
            "/api/v3/series",
            StatusCode::UNAUTHORIZED,
            json!({"message": "Unauthorized"}),
        )
        .serve()
        .await?;

    let Err(err) = sonarr(&settings).list_library().await else {
        panic!("401 should fail");
    };

    assert_eq!(err.backend, MediaKind::Show);
    assert!(err.reason.starts_with("HTTP 401 Unauthorized"));
    assert!(err.reason.contains("Unauthorized\"}"));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_fails_immediately() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let settings = BackendSettings {
        url: format!("http://{addr}"),
        api_key: API_KEY.to_string(),
    };
    let result = radarr(&settings).search_by_title("Alien").await;

    assert!(matches!(result, Err(ref e) if e.backend == MediaKind::Movie));
    Ok(())
}

#[tokio::test]
async fn library_listing_keeps_backend_order() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(
            Method::GET,
            "/api/v3/movie",
            json!([
                {"id": 2, "title": "Zodiac", "year": 2007, "hasFile": true},
                {"id": 1, "title": "Alien", "year": 1979, "hasFile": false}
            ]),
        )
        .serve()
        .await?;

    let entries = radarr(&settings).list_library().await?;

    let titles: Vec<_> = entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Zodiac", "Alien"]);
    assert_eq!(entries[0].availability, Availability::Downloaded);
    assert_eq!(entries[1].availability, Availability::Searching);
    assert!(stub.requests()[0].query.is_empty());
    Ok(())
}

#[tokio::test]
async fn get_by_id_and_trigger_search() -> anyhow::Result<()> {
    let (settings, stub) = Stub::default()
        .route(
            Method::GET,
            "/api/v3/series/7",
            json!({"id": 7, "title": "Severance", "status": "continuing"}),
        )
        .route(
            Method::POST,
            "/api/v3/command",
            json!({"id": 99, "name": "EpisodeSearch", "status": "queued"}),
        )
        .serve()
        .await?;
    let client = sonarr(&settings);

    let entry = client.get_by_id(7).await?;
    assert_eq!(entry.availability, Availability::Status("continuing".to_string()));

    let ack = client.trigger_search(&[11, 12]).await?;
    assert_eq!(ack.id, Some(99));
    assert_eq!(ack.status.as_deref(), Some("queued"));

    let requests = stub.requests();
    assert_eq!(
        requests[1].body,
        Some(json!({"name": "EpisodeSearch", "episodeIds": [11, 12]}))
    );
    Ok(())
}
