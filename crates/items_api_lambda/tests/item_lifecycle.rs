use std::sync::Arc;

use items_api_lambda::adapters::item_store::ItemStore;
use items_api_lambda::adapters::memory::InMemoryItemStore;
use items_api_lambda::handlers::envelope::ApiGatewayResponse;
use items_api_lambda::runtime::handle_invocation;
use serde_json::{json, Value};

fn proxy_event(method: &str, resource: &str, id: Option<&str>, body: Option<Value>) -> Value {
    let path = match id {
        Some(id) => resource.replace("{id}", id),
        None => resource.to_string(),
    };
    json!({
        "httpMethod": method,
        "resource": resource,
        "path": path,
        "pathParameters": id.map(|id| json!({ "id": id })),
        "queryStringParameters": null,
        "headers": {"Content-Type": "application/json"},
        "isBase64Encoded": false,
        "body": body.map(|value| value.to_string()),
        "requestContext": {"stage": "dev", "resourcePath": resource}
    })
}

async fn call(
    store: &Arc<InMemoryItemStore>,
    method: &str,
    resource: &str,
    id: Option<&str>,
    body: Option<Value>,
) -> (u16, Value) {
    let response: ApiGatewayResponse = handle_invocation(
        None,
        proxy_event(method, resource, id, body),
        Arc::clone(store),
    )
    .await;
    let payload = serde_json::from_str(&response.body).expect("response body should be JSON");
    (response.status_code, payload)
}

#[tokio::test]
async fn item_lifecycle_round_trip() {
    let store = Arc::new(InMemoryItemStore::new());

    let (status, created) = call(&store, "POST", "/items", None, Some(json!({"title": "A"}))).await;
    assert_eq!(status, 201);
    let id = created["item"]["id"]
        .as_str()
        .expect("created item should carry an id")
        .to_string();

    let (status, fetched) = call(&store, "GET", "/items/{id}", Some(&id), None).await;
    assert_eq!(status, 200);
    assert_eq!(fetched["item"]["title"], "A");
    assert_eq!(fetched["item"], created["item"]);

    let (status, updated) = call(
        &store,
        "PUT",
        "/items/{id}",
        Some(&id),
        Some(json!({"title": "B"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["item"]["title"], "B");
    assert_eq!(updated["item"]["createdAt"], created["item"]["createdAt"]);
    let created_at = created["item"]["createdAt"].as_str().unwrap_or_default();
    let updated_at = updated["item"]["updatedAt"]
        .as_str()
        .expect("updatedAt should be stamped");
    assert!(updated_at >= created_at);

    let (status, deleted) = call(&store, "DELETE", "/items/{id}", Some(&id), None).await;
    assert_eq!(status, 200);
    assert_eq!(deleted["id"], id.as_str());

    let (status, missing) = call(&store, "GET", "/items/{id}", Some(&id), None).await;
    assert_eq!(status, 404);
    assert_eq!(missing, json!({"message": "Item not found"}));

    let (status, _) = call(&store, "DELETE", "/items/{id}", Some(&id), None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn list_returns_every_created_item_once() {
    let store = Arc::new(InMemoryItemStore::new());

    let (status, empty) = call(&store, "GET", "/items", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(empty["count"], 0);
    assert_eq!(empty["items"], json!([]));

    let mut created_ids = Vec::new();
    for title in ["first", "second", "third"] {
        let (_, created) = call(&store, "POST", "/items", None, Some(json!({ "title": title }))).await;
        created_ids.push(created["item"]["id"].as_str().unwrap_or_default().to_string());
    }

    let (status, listed) = call(&store, "GET", "/items", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(listed["message"], "Items retrieved successfully");
    assert_eq!(listed["count"], 3);

    let mut listed_ids: Vec<String> = listed["items"]
        .as_array()
        .expect("items should be an array")
        .iter()
        .filter_map(|item| item["id"].as_str().map(str::to_string))
        .collect();
    listed_ids.sort();
    created_ids.sort();
    created_ids.dedup();
    assert_eq!(created_ids.len(), 3);
    assert_eq!(listed_ids, created_ids);
}

#[tokio::test]
async fn malformed_bodies_are_client_errors() {
    let store = Arc::new(InMemoryItemStore::new());
    let event = json!({
        "httpMethod": "POST",
        "resource": "/items",
        "path": "/items",
        "body": "{\"title\": "
    });

    let response = handle_invocation(None, event, Arc::clone(&store)).await;

    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Missing \\\"title\\\" in request body"));
    assert!(store.scan().await.expect("scan should not fail").is_empty());
}

#[tokio::test]
async fn raw_path_events_resolve_item_routes() {
    let store = Arc::new(InMemoryItemStore::new());
    let (_, created) = call(&store, "POST", "/items", None, Some(json!({"title": "A"}))).await;
    let id = created["item"]["id"].as_str().unwrap_or_default().to_string();

    let response = handle_invocation(
        None,
        json!({"httpMethod": "GET", "path": format!("/items/{id}")}),
        Arc::clone(&store),
    )
    .await;

    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn liveness_and_unsupported_methods() {
    let store = Arc::new(InMemoryItemStore::new());

    let (status, hello) = call(&store, "GET", "/", None, None).await;
    assert_eq!(status, 200);
    assert_eq!(hello["message"], "Hello from Lambda!");

    let (status, rejected) = call(&store, "PATCH", "/items/{id}", Some("x"), None).await;
    assert_eq!(status, 405);
    assert_eq!(rejected["message"], "Method not allowed");
}

#[tokio::test]
async fn whitespace_values_are_ordinary_titles_and_ids() {
    let store = Arc::new(InMemoryItemStore::new());

    let (status, created) = call(&store, "POST", "/items", None, Some(json!({"title": "   "}))).await;
    assert_eq!(status, 201);
    assert_eq!(created["item"]["title"], "   ");

    let (status, missing) = call(&store, "GET", "/items/{id}", Some(" "), None).await;
    assert_eq!(status, 404);
    assert_eq!(missing["message"], "Item not found");
}
