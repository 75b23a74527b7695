//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected outcomes. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use serde_json::Value;
use styles_core::{HttpMethod, HttpRequest, HttpResponse, StyleClient, StyleError, StyleRef};

const BASE_URL: &str = "http://localhost:8080/geoserver/";

fn client() -> StyleClient {
    StyleClient::new(BASE_URL).unwrap()
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

/// Check method, absolute URL and headers of a built request.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    let method = parse_method(expected["method"].as_str().unwrap());
    assert_eq!(req.method, method, "{name}: method");
    let url = format!("{BASE_URL}{}", expected["path"].as_str().unwrap());
    assert_eq!(req.url, url, "{name}: url");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

/// Check a parse outcome against `expected_error`, or require success.
fn assert_outcome<T: std::fmt::Debug>(
    name: &str,
    case: &Value,
    result: Result<T, StyleError>,
) -> Option<T> {
    let Some(expected_error) = case.get("expected_error") else {
        return Some(result.unwrap_or_else(|e| panic!("{name}: expected success, got {e}")));
    };
    let err = result.unwrap_err();
    if let Some(status) = expected_error.get("status") {
        assert_eq!(err.status(), Some(status.as_u64().unwrap() as u16), "{name}: status");
    }
    match expected_error.get("kind").and_then(Value::as_str) {
        Some("Deserialization") => {
            let matched = matches!(err, StyleError::Deserialization(_));
            assert!(matched, "{name}: expected Deserialization")
        }
        Some(other) => panic!("{name}: unknown expected_error kind: {other}"),
        None => {}
    }
    None
}

/// Check a build outcome against `expected_build_error`, or require a request.
fn assert_build(
    name: &str,
    case: &Value,
    result: Result<HttpRequest, StyleError>,
) -> Option<HttpRequest> {
    let Some(kind) = case.get("expected_build_error").and_then(Value::as_str) else {
        return Some(result.unwrap_or_else(|e| panic!("{name}: expected a request, got {e}")));
    };
    let err = result.unwrap_err();
    match kind {
        "InvalidStyleName" => {
            let matched = matches!(err, StyleError::InvalidStyleName(_));
            assert!(matched, "{name}: expected InvalidStyleName")
        }
        other => panic!("{name}: unknown expected_build_error: {other}"),
    }
    None
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_styles();
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_list_styles(simulated_response(&case));
        if let Some(styles) = assert_outcome(name, &case, result) {
            let expected: Vec<StyleRef> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(styles, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let style_name = case["input"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        let req = c.build_create_style(style_name).unwrap();
        assert_request(name, &req, expected_req);
        let req_body: Value = serde_json::from_slice(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        assert_outcome(name, &case, c.parse_create_style(simulated_response(&case)));
    }
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

#[test]
fn upload_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/upload.json")) {
        let name = case["name"].as_str().unwrap();
        let style_name = case["input"]["name"].as_str().unwrap();
        let content = case["input"]["content"].as_str().unwrap();

        let result = c.build_upload_style(content, style_name);
        let Some(req) = assert_build(name, &case, result) else {
            continue;
        };
        assert_request(name, &req, &case["expected_request"]);
        assert_eq!(req.body.as_deref(), Some(content.as_bytes()), "{name}: body");

        assert_outcome(name, &case, c.parse_upload_style(simulated_response(&case)));
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let style_name = case["input"]["name"].as_str().unwrap();
        let purge = case["input"]["purge"].as_bool().unwrap();

        let result = c.build_delete_style(style_name, purge);
        let Some(req) = assert_build(name, &case, result) else {
            continue;
        };
        assert_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        assert_outcome(name, &case, c.parse_delete_style(simulated_response(&case)));
    }
}
