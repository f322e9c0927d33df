//! Tests for the response decoder.

use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

use super::*;
use crate::error::{Error, ErrorCode};
use crate::pagination::PageMeta;

fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    map
}

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: u64,
}

#[test]
fn test_page_meta_from_headers() {
    let headers = headers(&[
        ("X-Pagination-Limit", "10"),
        ("X-Pagination-Page", "2"),
        ("X-Pagination-Page-Count", "5"),
        ("X-Pagination-Item-Count", "50"),
    ]);

    assert_eq!(
        page_meta(&headers),
        PageMeta {
            limit: 10,
            page: 2,
            page_count: 5,
            item_count: 50,
        }
    );
}

#[test]
fn test_page_meta_missing_headers_decode_to_zero() {
    assert_eq!(page_meta(&HeaderMap::new()), PageMeta::default());

    let partial = headers(&[("X-Pagination-Page", "3")]);
    let meta = page_meta(&partial);
    assert_eq!(meta.page, 3);
    assert_eq!(meta.limit, 0);
    assert_eq!(meta.page_count, 0);
    assert_eq!(meta.item_count, 0);
}

#[test]
fn test_page_meta_unparseable_header_decodes_to_zero() {
    let bad = headers(&[("X-Pagination-Limit", "lots")]);
    assert_eq!(page_meta(&bad).limit, 0);
}

#[test]
fn test_decode_body_success() {
    let item: Item = decode_body("/movies/28", 200, &HeaderMap::new(), br#"{"id": 28}"#).unwrap();
    assert_eq!(item, Item { id: 28 });
}

#[test]
fn test_decode_failure_classifies_encoding_error() {
    let headers = headers(&[("X-Request-Id", "req-9")]);
    let err = decode_body::<Item>("/movies/28", 200, &headers, b"not json").unwrap_err();

    match err {
        Error::Api(api) => {
            assert_eq!(api.code, ErrorCode::EncodingError);
            assert_eq!(api.status, 200);
            assert_eq!(api.request_id.as_deref(), Some("req-9"));
            assert_eq!(api.resource, "/movies/28");
            assert_eq!(api.body, "not json");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn test_body_sample_truncates_and_escapes() {
    let long = "x".repeat(700);
    assert_eq!(body_sample(&long).len(), 500);

    assert_eq!(body_sample("line one\nline two\r\n"), "line one\\nline two\\r\\n");
}

#[test]
fn test_decode_page_reads_body_and_headers() {
    let headers = headers(&[
        ("X-Pagination-Limit", "2"),
        ("X-Pagination-Page", "1"),
        ("X-Pagination-Page-Count", "2"),
        ("X-Pagination-Item-Count", "4"),
    ]);
    let page =
        decode_page::<Item>("/movies/trending", 200, &headers, br#"[{"id": 1}, {"id": 2}]"#)
            .unwrap();

    assert_eq!(page.items, vec![Item { id: 1 }, Item { id: 2 }]);
    assert_eq!(page.meta.page_count, 2);
    assert_eq!(page.meta.item_count, 4);
}

#[test]
fn test_decode_page_null_body_is_empty_frame() {
    let err = decode_page::<Item>("/movies/trending", 200, &HeaderMap::new(), b"null").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::EmptyFrameData));

    let err = decode_page::<Item>("/movies/trending", 200, &HeaderMap::new(), b"").unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::EmptyFrameData));
}

#[test]
fn test_request_id_extraction() {
    let with = headers(&[("X-Request-Id", "abc-123")]);
    assert_eq!(request_id(&with), Some("abc-123".to_string()));
    assert_eq!(request_id(&HeaderMap::new()), None);
}
