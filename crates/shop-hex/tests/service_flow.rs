use shop_hex::application::order_service::OrderService;
use shop_hex::application::product_service::ProductService;
use shop_repo::memory::InMemoryRepo;
use shop_types::domain::order::CartItem;

// End-to-end service flow against the in-memory adapter.
#[tokio::test]
async fn catalog_and_order_flow() {
    let repo = InMemoryRepo::new();
    let products = ProductService::new(repo.clone());
    let orders = OrderService::new(repo);

    let pen = products.create_product("pen".into(), 2.3).await.unwrap();
    let pad = products.create_product("pad".into(), 1.2).await.unwrap();

    let listed = products.list_products().await.unwrap();
    assert_eq!(listed.len(), 2);

    let order = orders
        .create_order(
            "abc@def.com".into(),
            true,
            vec![
                CartItem {
                    product_id: pen.id,
                    quantity: 5,
                },
                CartItem {
                    product_id: pad.id,
                    quantity: 2,
                },
            ],
        )
        .await
        .unwrap();
    assert!((order.total_price - (5.0 * 2.3 + 2.0 * 1.2)).abs() < 1e-9);

    let all_orders = orders.list_orders().await.unwrap();
    assert_eq!(all_orders.len(), 1);
    assert_eq!(all_orders[0].id, order.id);

    // Deleting a referenced product leaves the order intact; line items hold
    // copies, not references.
    products.delete_product(pen.id).await.unwrap();
    let fetched = orders.get_order(order.id).await.unwrap();
    assert_eq!(fetched.items.len(), 2);
    assert_eq!(fetched.items[0].unit_price, 2.3);
}
