//! GBIF client against a local stand-in for the occurrence search endpoint.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use occurra_common::OccurraError;
use occurra_config::GbifConfig;
use occurra_ingestion::sources::gbif::GbifClient;
use occurra_ingestion::sources::OccurrenceSource;
use occurra_ingestion::{BoundingBox, OccurrenceQuery};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn fake_search(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<serde_json::Value> {
    seen.lock().unwrap().push(params);
    Json(serde_json::json!({
        "offset": 0,
        "limit": 2,
        "endOfRecords": true,
        "count": 2,
        "results": [
            {
                "key": 1,
                "scientificName": "Danaus plexippus (Linnaeus, 1758)",
                "decimalLatitude": 19.59,
                "decimalLongitude": -100.24,
                "country": "Mexico",
                "eventDate": "2019-01-12T10:00:00",
                "basisOfRecord": "HUMAN_OBSERVATION"
            },
            {
                "key": 2,
                "scientificName": "Danaus plexippus (Linnaeus, 1758)",
                "decimalLatitude": 43.65
            }
        ]
    }))
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/v1/occurrence/search", addr)
}

fn client_for(endpoint: String) -> GbifClient {
    GbifClient::from_config(&GbifConfig { endpoint, timeout_secs: 5 }).unwrap()
}

#[tokio::test]
async fn test_search_sends_filters_and_flattens() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/v1/occurrence/search", get(fake_search))
        .with_state(seen.clone());
    let client = client_for(spawn(router).await);

    let query = OccurrenceQuery::new("Danaus plexippus", 500)
        .with_year_range(2000, 2020)
        .with_bbox(BoundingBox::new(20.0, 50.0, -130.0, -60.0));
    let table = client.search(&query).await.unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].country.as_deref(), Some("Mexico"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let params = &seen[0];
    assert_eq!(params["scientificName"], "Danaus plexippus");
    assert_eq!(params["limit"], "500");
    assert_eq!(params["hasCoordinate"], "true");
    assert_eq!(params["year"], "2000,2020");
    assert_eq!(params["decimalLatitude"], "20,50");
    assert_eq!(params["decimalLongitude"], "-130,-60");
}

#[tokio::test]
async fn test_search_without_bbox_omits_coordinate_filters() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/v1/occurrence/search", get(fake_search))
        .with_state(seen.clone());
    let client = client_for(spawn(router).await);

    client
        .search(&OccurrenceQuery::new("Danaus plexippus", 100))
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert!(!seen[0].contains_key("decimalLatitude"));
    assert!(!seen[0].contains_key("decimalLongitude"));
    assert!(!seen[0].contains_key("year"));
}

#[tokio::test]
async fn test_upstream_error_status_propagates() {
    let router = Router::new().route(
        "/v1/occurrence/search",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let client = client_for(spawn(router).await);

    let err = client
        .search(&OccurrenceQuery::new("Danaus plexippus", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, OccurraError::Http(_)));
}

#[tokio::test]
async fn test_malformed_body_propagates() {
    let router = Router::new().route("/v1/occurrence/search", get(|| async { "<html>oops</html>" }));
    let client = client_for(spawn(router).await);

    let err = client
        .search(&OccurrenceQuery::new("Danaus plexippus", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, OccurraError::Http(_)));
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_gbif_bbox_search() {
    let client = GbifClient::new().unwrap();
    let bbox = BoundingBox::new(20.0, 50.0, -130.0, -60.0);
    let query = OccurrenceQuery::new("Danaus plexippus", 100)
        .with_year_range(2000, 2020)
        .with_bbox(bbox);

    let table = client.search(&query).await.expect("GBIF search failed");

    println!("Found {} records", table.len());
    assert!(!table.is_empty(), "Should find at least one record");
    assert!(table.records().iter().all(|r| {
        (bbox.lat_min..=bbox.lat_max).contains(&r.latitude)
            && (bbox.lon_min..=bbox.lon_max).contains(&r.longitude)
    }));
}
