// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use otka_verify::domain::models::row_id::RowId;
use otka_verify::domain::repositories::table_repository::{RepositoryError, TableRepository};
use otka_verify::infrastructure::repositories::table_repo_impl::PostgrestTableRepository;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "service-role-key";

fn repo_for(server: &MockServer) -> PostgrestTableRepository {
    PostgrestTableRepository::new(&server.uri(), KEY, None).unwrap()
}

#[tokio::test]
async fn test_insert_sends_credentials_and_returns_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/products"))
        .and(header("apikey", KEY))
        .and(header("authorization", "Bearer service-role-key"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!({"sku": "TEST-1", "stock_qty": 10})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": 17, "sku": "TEST-1", "stock_qty": 10}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let row = repo_for(&server)
        .insert("products", &json!({"sku": "TEST-1", "stock_qty": 10}))
        .await
        .unwrap();

    assert_eq!(row["id"], 17);
}

#[tokio::test]
async fn test_update_then_read_back_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.17"))
        .and(body_json(json!({"stock_qty": 15})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 17, "sku": "TEST-1", "stock_qty": 15}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "eq.17"))
        .and(query_param("select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 17, "sku": "TEST-1", "stock_qty": 15}
        ])))
        .mount(&server)
        .await;
    let repo = repo_for(&server);
    let id = RowId::from(17_i64);

    let updated = repo
        .update_by_id("products", &id, &json!({"stock_qty": 15}))
        .await
        .unwrap();
    let read = repo.find_by_id("products", &id).await.unwrap().unwrap();

    assert_eq!(updated["stock_qty"], 15);
    assert_eq!(read["stock_qty"], 15);
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let result = repo_for(&server)
        .update_by_id("articles", &RowId::from(99_i64), &json!({"title": "x"}))
        .await;

    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_delete_then_find_returns_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/articles"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 5}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/articles"))
        .and(query_param("id", "eq.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let repo = repo_for(&server);
    let id = RowId::from(5_i64);

    assert_eq!(repo.delete_by_id("articles", &id).await.unwrap(), 1);
    assert!(repo.find_by_id("articles", &id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_exact_count_reads_content_range() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/articles"))
        .and(header("prefer", "count=exact"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-24/42"))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/products"))
        .and(query_param("embedding", "not.is.null"))
        .respond_with(ResponseTemplate::new(206).insert_header("Content-Range", "*/3"))
        .mount(&server)
        .await;
    let repo = repo_for(&server);

    assert_eq!(repo.count("articles").await.unwrap(), 42);
    assert_eq!(repo.count_not_null("products", "embedding").await.unwrap(), 3);
}

#[tokio::test]
async fn test_count_without_content_range_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/articles"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = repo_for(&server).count("articles").await;

    assert!(matches!(result, Err(RepositoryError::InvalidContentRange(None))));
}

#[tokio::test]
async fn test_column_probe_distinguishes_missing_column_from_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "embedding"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "42703",
            "message": "column products.embedding does not exist",
            "details": null,
            "hint": null
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("select", "sku"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/articles"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid API key",
            "hint": "Double check your Supabase `anon` or `service_role` API key."
        })))
        .mount(&server)
        .await;
    let repo = repo_for(&server);

    assert!(!repo.column_exists("products", "embedding").await.unwrap());
    assert!(repo.column_exists("products", "sku").await.unwrap());

    match repo.column_exists("articles", "embedding").await {
        Err(RepositoryError::Api { status, code, message }) => {
            assert_eq!(status, 401);
            assert!(code.is_none());
            assert!(message.starts_with("Invalid API key"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_probe_table_reports_missing_relation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/partner_orders"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "message": "relation \"public.partner_orders\" does not exist"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/partner_resources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&server)
        .await;
    let repo = repo_for(&server);

    match repo.probe_table("partner_orders").await {
        Err(RepositoryError::Api { status, code, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("42P01"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert_eq!(repo.probe_table("partner_resources").await.unwrap(), 1);
}
