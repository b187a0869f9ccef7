use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::database::models::NewBook;
use crate::state::AppState;

/// A complete create payload with placeholder metadata
pub fn sample_book(isbn: &str, title: &str) -> NewBook {
    NewBook {
        isbn: isbn.to_string(),
        amazon_url: format!("http://a.co/{}", isbn),
        author: "Test Author".to_string(),
        language: "english".to_string(),
        pages: 100,
        publisher: "Test House".to_string(),
        title: title.to_string(),
        year: 2020,
    }
}

/// Three books whose isbn order differs from their title order
pub fn sample_books() -> Vec<NewBook> {
    vec![
        NewBook {
            isbn: "987654321".to_string(),
            amazon_url: "http://a.co/bigbook".to_string(),
            author: "Jackson Apollo".to_string(),
            language: "english".to_string(),
            pages: 146,
            publisher: "Random House".to_string(),
            title: "How to fight and win".to_string(),
            year: 2023,
        },
        NewBook {
            isbn: "123456789".to_string(),
            amazon_url: "http://a.co/xyz".to_string(),
            author: "David Hume".to_string(),
            language: "english".to_string(),
            pages: 350,
            publisher: "None".to_string(),
            title: "A Treatise on Human Nature".to_string(),
            year: 1748,
        },
        NewBook {
            isbn: "999999999".to_string(),
            amazon_url: "http://a.co/myNewBook".to_string(),
            author: "Brett Green".to_string(),
            language: "english".to_string(),
            pages: 99,
            publisher: "Independent".to_string(),
            title: "Brett's first big book".to_string(),
            year: 2022,
        },
    ]
}

/// Router over a fresh in-memory store, plus the state so tests can seed it
pub fn test_app() -> (Router, AppState) {
    let state = AppState::in_memory().expect("in-memory state");
    let config = AppConfig::from_env();
    (crate::server::app(state.clone(), &config), state)
}

/// Drive one request through the router and decode the JSON body (Null when empty)
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("infallible router");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };

    (status, json)
}
