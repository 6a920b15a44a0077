//! End-to-end tests against a live server.

use serde_json::json;
use std::fs;

mod common;

async fn seed_db(server: &common::TestServer) {
    let res = server
        .client
        .create_config("db", &json!({"conn": {"host": "localhost", "port": "5432"}}))
        .await
        .unwrap();
    assert_eq!(res.status, 201);

    let res = server
        .client
        .create_validator("db", &json!({"port": "^[0-9]+$"}))
        .await
        .unwrap();
    assert_eq!(res.status, 201);
}

#[tokio::test]
async fn test_read_existing_and_missing_fields() {
    let server = common::start_server().await;
    seed_db(&server).await;

    let res = server.client.read("db/conn/host").await.unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], json!("true"));
    assert_eq!(res.body["value"], json!("localhost"));

    let res = server.client.read("db/conn/missing").await.unwrap();
    assert_eq!(res.status, 404);
    assert!(res.error().is_some());
}

#[tokio::test]
async fn test_rejected_update_leaves_document_unchanged() {
    let server = common::start_server().await;
    seed_db(&server).await;
    let doc_path = server.data_dir().join("configures").join("db.json");
    let before = fs::read(&doc_path).unwrap();

    let res = server
        .client
        .update("db/conn/port", json!("notanumber"))
        .await
        .unwrap();

    assert_eq!(res.status, 400);
    assert_eq!(res.body["details"]["pattern"], json!("^[0-9]+$"));
    assert_eq!(fs::read(&doc_path).unwrap(), before);
}

#[tokio::test]
async fn test_accepted_update_is_persisted() {
    let server = common::start_server().await;
    seed_db(&server).await;

    let res = server.client.update("db/conn/port", json!("5433")).await.unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body["validation"], json!("performed"));
    assert_eq!(res.body["parameter"], json!("conn/port"));

    let res = server.client.read("db/conn").await.unwrap();
    assert_eq!(res.body["value"], json!({"host": "localhost", "port": "5433"}));

    let on_disk: serde_json::Value = serde_json::from_slice(
        &fs::read(server.data_dir().join("configures").join("db.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk["conn"]["port"], json!("5433"));
}

#[tokio::test]
async fn test_update_without_validator_is_skipped() {
    let server = common::start_server().await;
    server
        .client
        .create_config("cache", &json!({"ttl": 60}))
        .await
        .unwrap();

    let res = server.client.update("cache/ttl", json!(120)).await.unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body["validation"], json!("skipped"));

    let res = server.client.read("cache/ttl").await.unwrap();
    assert_eq!(res.body["value"], json!(120));
}

#[tokio::test]
async fn test_invalid_validator_is_not_persisted() {
    let server = common::start_server().await;

    let res = server
        .client
        .create_validator("db", &json!({"port": "^[0-9]+$", "host": "[unclosed"}))
        .await
        .unwrap();

    assert_eq!(res.status, 400);
    assert!(!server.data_dir().join("validators").join("db.json").exists());
}

#[tokio::test]
async fn test_malformed_requests() {
    let server = common::start_server().await;
    seed_db(&server).await;

    let res = server.client.read("db").await.unwrap();
    assert_eq!(res.status, 400);

    let res = server.client.update("db", json!("1")).await.unwrap();
    assert_eq!(res.status, 400);

    let res = server.client.update("db/conn/port", json!(null)).await.unwrap();
    assert_eq!(res.status, 400);

    let res = server.client.create_config("db", &json!({})).await.unwrap();
    assert_eq!(res.status, 400);

    let res = server.client.update("missing/key", json!("1")).await.unwrap();
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn test_broken_document_is_server_error() {
    let server = common::start_server().await;
    seed_db(&server).await;
    fs::write(server.data_dir().join("configures").join("db.json"), b"{broken").unwrap();

    let res = server.client.read("db/conn/host").await.unwrap();
    assert_eq!(res.status, 500);
}

#[tokio::test]
async fn test_unbalanced_pattern_cannot_open_validation() {
    let server = common::start_server().await;
    seed_db(&server).await;

    let res = server
        .client
        .create_validator("db", &json!({"port": "[0-9]+)|(?:.*"}))
        .await
        .unwrap();
    assert_eq!(res.status, 400);

    // The earlier validator is still the one in force.
    let res = server.client.update("db/conn/port", json!("not-a-port!")).await.unwrap();
    assert_eq!(res.status, 400);

    let res = server.client.read("db/conn/port").await.unwrap();
    assert_eq!(res.body["value"], json!("5432"));
}
