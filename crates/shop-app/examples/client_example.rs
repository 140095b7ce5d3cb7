///  To run :
///  cargo r --example client_example
use shop_client::{CartItemRequest, CreateOrderRequest, ProductIdRef, ProductRequest, ShopClient};
use shop_hex::application::order_service::OrderService;
use shop_hex::application::product_service::ProductService;
use shop_hex::inbound::http::{HttpServer, HttpServerConfig};
use shop_repo::build_repo;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start server on an ephemeral port.
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // Use a temp file-backed SQLite DB so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("shop.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let repo = build_repo(Some(&db_url)).await?;
    let products = ProductService::new(repo.clone());
    let orders = OrderService::new(repo);
    let server = HttpServer::new(
        products,
        orders,
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    // Use the client against the running server.
    let client = ShopClient::new(&addr)?;
    let pen = client
        .create_product(ProductRequest {
            name: "pen".into(),
            price: 2.3,
        })
        .await?;
    println!("Created product id={} price={}", pen.id, pen.price);

    let order = client
        .create_order(CreateOrderRequest {
            email: "abc@def.com".into(),
            payment_successful: true,
            items: vec![CartItemRequest {
                quantity: 5,
                product: ProductIdRef { id: pen.id },
            }],
        })
        .await?;
    println!("Created order id={} total={}", order.id, order.total_price);
    assert!((order.total_price - 11.5).abs() < 1e-9);

    // Change the catalog price; the placed order keeps its captured total.
    let updated = client
        .update_product(
            pen.id,
            ProductRequest {
                name: "pen".into(),
                price: 2.1,
            },
        )
        .await?;
    println!("Updated product price={}", updated.price);

    let fetched = client.get_order(order.id).await?;
    println!("Refetched order total={}", fetched.total_price);
    assert!((fetched.total_price - 11.5).abs() < 1e-9);

    client.delete_product(pen.id).await?;
    println!("Deleted product");

    handle.abort();
    Ok(())
}
