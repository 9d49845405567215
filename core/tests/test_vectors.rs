//! Verify build/parse behavior against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector names an operation, its input, the expected request, a
//! simulated response, and either the expected result or the expected server
//! error. Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use std::sync::Arc;

use myflix_core::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, MyflixClient, StaticCredentials,
    FAILURE_MESSAGE,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> MyflixClient {
    MyflixClient::new(BASE_URL, Arc::new(StaticCredentials::new("alice", "tok")))
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

/// Build the request for `operation` and return whether its result is unwrapped.
fn build(c: &MyflixClient, operation: &str, input: &Value) -> (HttpRequest, bool) {
    let text = || input.as_str().expect("string input");
    match operation {
        "register_user" => (c.build_register_user(input).unwrap(), false),
        "login_user" => (c.build_login_user(input).unwrap(), false),
        "list_movies" => (c.build_list_movies(), true),
        "get_movie" => (c.build_get_movie(text()), true),
        "get_director" => (c.build_get_director(text()), true),
        "get_genre" => (c.build_get_genre(text()), true),
        "get_user" => (c.build_get_user(), true),
        "get_favorite_movies" => (c.build_get_favorite_movies(text()), true),
        "add_favorite_movie" => (c.build_add_favorite_movie(text()).unwrap(), true),
        "edit_user" => (c.build_edit_user(input).unwrap(), true),
        "delete_user" => (c.build_delete_user(), true),
        "delete_favorite_movie" => (c.build_delete_favorite_movie(text()), true),
        other => panic!("unknown operation: {other}"),
    }
}

fn run_vectors(raw: &str) {
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let operation = case["operation"].as_str().unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let (req, unwrapped) = build(&c, operation, &case["input"]);
        assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        match expected_req.get("body") {
            Some(expected_body) => {
                let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&req_body, expected_body, "{name}: body");
            }
            None => assert!(req.body.is_none(), "{name}: body should be None"),
        }

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = if unwrapped {
            c.parse_unwrapped(response)
        } else {
            c.parse_raw(response)
        };

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.to_string(), FAILURE_MESSAGE, "{name}: message");
            match err {
                ApiError::Server { status, body } => {
                    assert_eq!(u64::from(status), expected_error["status"].as_u64().unwrap(), "{name}: status");
                    assert_eq!(body, expected_error["body"].as_str().unwrap(), "{name}: error body");
                }
                other => panic!("{name}: expected server error, got {other:?}"),
            }
        } else {
            assert_eq!(result.unwrap(), case["expected_result"], "{name}: parsed result");
        }
    }
}

#[test]
fn onboarding_test_vectors() {
    run_vectors(include_str!("../../test-vectors/onboarding.json"));
}

#[test]
fn catalog_test_vectors() {
    run_vectors(include_str!("../../test-vectors/catalog.json"));
}

#[test]
fn account_test_vectors() {
    run_vectors(include_str!("../../test-vectors/account.json"));
}
