use serde_json::{json, Value};
use shop_hex::application::order_service::OrderService;
use shop_hex::application::product_service::ProductService;
use shop_hex::inbound::http::{HttpServer, HttpServerConfig};
use shop_repo::memory::InMemoryRepo;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

async fn spawn_server() -> (String, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let config = HttpServerConfig {
        port: port.to_string(),
    };

    // Fresh in-memory store per test; ids start at 1.
    let repo = InMemoryRepo::new();
    let products = ProductService::new(repo.clone());
    let orders = OrderService::new(repo);
    let server = HttpServer::new(products, orders, config).await.unwrap();

    let addr = format!("http://127.0.0.1:{}", port);
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });

    // Give the server a moment to start.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    (addr, handle)
}

#[tokio::test]
async fn product_lifecycle_over_http() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products/", addr))
        .json(&json!({ "name": "pen", "price": 2.3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let created: Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "pen");
    assert_eq!(created["price"], 2.3);

    let list: Value = client
        .get(format!("{}/products/", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.as_array().unwrap().len(), 1);

    // PUT echoes the updated product back.
    let res = client
        .put(format!("{}/products/{}", addr, id))
        .json(&json!({ "name": "pen", "price": 2.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let updated: Value = res.json().await.unwrap();
    assert_eq!(updated["price"], 2.5);

    let fetched: Value = client
        .get(format!("{}/products/{}", addr, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["price"], 2.5);

    let res = client
        .delete(format!("{}/products/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    let res = client
        .get(format!("{}/products/{}", addr, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    handle.abort();
}

#[tokio::test]
async fn negative_price_is_rejected() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/products/", addr))
        .json(&json!({ "name": "pen", "price": -1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    handle.abort();
}

#[tokio::test]
async fn order_total_is_snapshotted_at_creation() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/products/", addr))
        .json(&json!({ "name": "pen", "price": 2.3 }))
        .send()
        .await
        .unwrap();

    let order_body = json!({
        "email": "abc@def.com",
        "paymentSuccessFul": true,
        "shoppingCartItemsList": [ { "quantity": 5, "product": { "id": 1 } } ]
    });
    let res = client
        .post(format!("{}/orders/", addr))
        .json(&order_body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let order: Value = res.json().await.unwrap();
    let order_id = order["id"].as_i64().unwrap();
    let total = order["orderTotalPrice"].as_f64().unwrap();
    assert!((total - 11.5).abs() < 1e-9);

    // Raise and lower the catalog price; the order must not move.
    let res = client
        .put(format!("{}/products/1", addr))
        .json(&json!({ "name": "pen", "price": 2.1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);

    let refetched: Value = client
        .get(format!("{}/orders/{}", addr, order_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let total = refetched["orderTotalPrice"].as_f64().unwrap();
    assert!((total - 11.5).abs() < 1e-9);
    assert_eq!(
        refetched["shoppingCartItemsList"][0]["unitPrice"].as_f64(),
        Some(2.3)
    );

    handle.abort();
}

#[tokio::test]
async fn bad_request_and_not_found_paths() {
    let (addr, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    // Order referencing a product that does not exist.
    let res = client
        .post(format!("{}/orders/", addr))
        .json(&json!({
            "email": "abc@def.com",
            "paymentSuccessFul": true,
            "shoppingCartItemsList": [ { "quantity": 1, "product": { "id": 999 } } ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    // Empty cart.
    let res = client
        .post(format!("{}/orders/", addr))
        .json(&json!({
            "email": "abc@def.com",
            "paymentSuccessFul": true,
            "shoppingCartItemsList": []
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/orders/999", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/products/999", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    handle.abort();
}
