mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn book_lifecycle() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let book = common::book_json("999999999", "Brett's first big book");

    // create
    let res = client.post(server.url("/books")).json(&book).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await?, json!({ "book": book }));

    // read back
    let res = client.get(server.url("/books/999999999")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "book": book }));

    // partial update
    let res = client
        .put(server.url("/books/999999999"))
        .json(&json!({ "isbn": "999999999", "year": 1739 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["book"]["year"], 1739);
    assert_eq!(updated["book"]["title"], book["title"]);
    assert_eq!(updated["book"]["pages"], book["pages"]);

    // delete, then gone
    let res = client.delete(server.url("/books/999999999")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({ "message": "Book deleted" }));

    let res = client.get(server.url("/books/999999999")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn create_with_missing_properties_is_rejected() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/books"))
        .json(&json!({ "isbn": 9, "title": "my first book", "genre": "pornography" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    let first = body["message"][0].as_str().unwrap_or_default();
    assert!(first.contains("instance requires property"), "unexpected body: {}", body);

    // nothing was stored
    let res = client.get(server.url("/books")).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({ "books": [] }));
    Ok(())
}

#[tokio::test]
async fn list_is_ordered_by_title() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    for (isbn, title) in [
        ("987654321", "How to fight and win"),
        ("123456789", "A Treatise on Human Nature"),
        ("999999999", "Brett's first big book"),
    ] {
        let res = client
            .post(server.url("/books"))
            .json(&common::book_json(isbn, title))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let body = client.get(server.url("/books")).send().await?.json::<Value>().await?;
    let titles: Vec<&str> = body["books"]
        .as_array()
        .map(|books| books.iter().filter_map(|b| b["title"].as_str()).collect())
        .unwrap_or_default();

    assert_eq!(
        titles,
        vec!["A Treatise on Human Nature", "Brett's first big book", "How to fight and win"]
    );
    Ok(())
}

#[tokio::test]
async fn duplicate_isbn_conflicts() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let book = common::book_json("111", "Once");

    let res = client.post(server.url("/books")).json(&book).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client.post(server.url("/books")).json(&book).send().await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    Ok(())
}
