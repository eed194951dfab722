use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

// Test client wrapper for making API calls against a running server
struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn from_env() -> Self {
        // Point at a server started with `cargo run` against a real database
        let base_url = std::env::var("TEST_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(&format!("{}{}", self.base_url, path))
            .send()
            .await
    }
}

#[tokio::test]
#[ignore = "requires a running server backed by PostgreSQL"]
async fn test_storefront_workflow_against_live_server() {
    let client = TestClient::from_env();

    let response = client.get("/").await.expect("server not reachable");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "API is running!");

    // Category round trip
    let response = client
        .post("/api/categories", json!({ "name": "Drinks" }))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let category: Value = response.json().await.unwrap();
    assert_eq!(category["name"], "Drinks");
    assert!(!category["created_at"].is_null());
    let category_id = category["id"].as_i64().unwrap();

    let fetched: Value = client
        .get(&format!("/api/categories/{}", category_id))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, category);

    // Branch
    let response = client
        .post(
            "/api/branches",
            json!({
                "name": "Live Branch",
                "email": "live@example.com",
                "phone": "555-0100",
                "logo": "https://example.com/live.png"
            }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["message"], "Branch created");
    let branch_id = created["id"].as_i64().unwrap();

    // Product referencing both
    let response = client
        .post(
            "/api/products",
            json!({
                "name": "Live Lemonade",
                "cost": 1.25,
                "price": 3.5,
                "category_id": category_id,
                "branch_id": branch_id
            }),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let products: Vec<Value> = client.get("/api/products").await.unwrap().json().await.unwrap();
    let product = products
        .iter()
        .find(|p| p["name"] == "Live Lemonade")
        .expect("created product missing from listing");
    assert_eq!(product["category_name"], "Drinks");
    assert_eq!(product["branch_name"], "Live Branch");

    // Clean up in dependency order
    let product_id = product["id"].as_i64().unwrap();
    for path in [
        format!("/api/products/{}", product_id),
        format!("/api/categories/{}", category_id),
        format!("/api/branches/{}", branch_id),
    ] {
        let response = client.delete(&path).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "DELETE {}", path);
    }

    let response = client
        .get(&format!("/api/categories/{}", category_id))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
