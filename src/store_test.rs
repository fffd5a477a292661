use std::time::Duration;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use super::*;
use crate::feature::RedlineFeature;
use crate::geom::{Coordinate, Geometry};
use crate::wire::CollectionType;

// =============================================================
// Helpers
// =============================================================

fn draft_point_wire() -> WireFeature {
    let draft = RedlineFeature::draft(Geometry::Point(Coordinate::new(39.07, -108.56)));
    WireFeature::from_feature(&draft)
}

fn store_at(url: &str) -> HttpFeatureStore {
    let config = StoreConfig {
        point_url: url.to_owned(),
        line_url: url.to_owned(),
        timeout: Duration::from_secs(5),
    };
    HttpFeatureStore::new(config).unwrap()
}

/// Serve exactly one request with a canned response; returns the base url.
async fn one_shot_service(status_line: &'static str, body: String) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 16 * 1024];
        let mut filled = 0;
        // Drain the request (headers plus any declared body) before
        // answering, so the client never sees an early close.
        loop {
            let n = socket.read(&mut buf[filled..]).await.unwrap();
            if n == 0 {
                break;
            }
            filled += n;
            let head = String::from_utf8_lossy(&buf[..filled]).into_owned();
            if let Some(end) = head.find("\r\n\r\n") {
                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                if filled >= end + 4 + content_length {
                    break;
                }
            }
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
    });
    format!("http://{addr}")
}

// =============================================================
// CreateResponse
// =============================================================

#[test]
fn create_response_with_id() {
    let resp: CreateResponse = serde_json::from_value(json!({"id": 42})).unwrap();
    assert_eq!(resp.id, Some(42));
}

#[test]
fn create_response_without_id() {
    let resp: CreateResponse = serde_json::from_value(json!({})).unwrap();
    assert_eq!(resp.id, None);
}

#[test]
fn create_response_default_has_no_id() {
    assert_eq!(CreateResponse::default().id, None);
}

// =============================================================
// TransportError
// =============================================================

#[test]
fn status_error_displays_code() {
    let err = TransportError::Status(reqwest::StatusCode::BAD_GATEWAY);
    assert!(err.to_string().contains("502"));
}

#[test]
fn malformed_error_wraps_wire_error() {
    let err = TransportError::from(WireError::ShortLine(1));
    assert!(err.to_string().contains("at least 2"));
}

// =============================================================
// HttpFeatureStore
// =============================================================

#[test]
fn http_store_builds_from_default_config() {
    assert!(HttpFeatureStore::new(crate::config::StoreConfig::default()).is_ok());
}

#[tokio::test]
async fn create_tolerates_empty_response_body() {
    let url = one_shot_service("200 OK", String::new()).await;
    let store = store_at(&url);

    let resp = store.create(FeatureKind::Point, &draft_point_wire()).await.unwrap();
    assert_eq!(resp.id, None);
}

#[tokio::test]
async fn create_reads_synchronous_id() {
    let url = one_shot_service("200 OK", json!({"id": 7}).to_string()).await;
    let store = store_at(&url);

    let resp = store.create(FeatureKind::Point, &draft_point_wire()).await.unwrap();
    assert_eq!(resp.id, Some(7));
}

#[tokio::test]
async fn create_surfaces_error_status() {
    let url = one_shot_service("500 Internal Server Error", String::new()).await;
    let store = store_at(&url);

    let err = store.create(FeatureKind::Point, &draft_point_wire()).await.unwrap_err();
    assert!(matches!(err, TransportError::Status(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn query_unwraps_feature_collection() {
    let mut persisted = draft_point_wire();
    persisted.id = Some(12);
    let collection = WireCollection {
        collection_type: CollectionType::FeatureCollection,
        features: vec![persisted],
    };
    let url = one_shot_service("200 OK", serde_json::to_string(&collection).unwrap()).await;
    let store = store_at(&url);

    let features = store.query(FeatureKind::Point).await.unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].id, Some(12));
}

#[tokio::test]
async fn update_without_id_is_refused() {
    // The refusal happens before any request; the address is never contacted.
    let store = store_at("http://127.0.0.1:9");

    let err = store.update(FeatureKind::Point, &draft_point_wire()).await.unwrap_err();
    assert!(matches!(err, TransportError::MissingId));
}

#[tokio::test]
async fn update_with_id_succeeds() {
    let url = one_shot_service("200 OK", String::new()).await;
    let store = store_at(&url);

    let mut persisted = draft_point_wire();
    persisted.id = Some(3);
    store.update(FeatureKind::Line, &persisted).await.unwrap();
}
