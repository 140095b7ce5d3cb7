#![cfg(feature = "sqlite")]

use std::path::PathBuf;

use shop_repo::sqlite::SqliteRepo;
use shop_types::domain::order::{NewOrder, OrderLineItem, ProductRef};
use shop_types::domain::product::NewProduct;
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;

fn temp_db_url(name: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut path = PathBuf::from(dir.path());
    path.push(format!("{name}.db"));
    let url = format!("sqlite://{}", path.display());
    (dir, url)
}

#[tokio::test]
async fn product_crud_flow() {
    let (_dir, url) = temp_db_url("products");
    let repo = SqliteRepo::new(&url).await.unwrap();

    let created = repo
        .create_product(NewProduct::new("pen".into(), 2.3).unwrap())
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    let fetched = repo.get_product(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "pen");
    assert_eq!(fetched.price, 2.3);

    let listed = repo.list_products().await.unwrap();
    assert_eq!(listed.len(), 1);

    let updated = repo
        .update_product(created.id, "pen".into(), 2.5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.price, 2.5);

    assert!(repo.delete_product(created.id).await.unwrap());
    assert!(repo.get_product(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn order_round_trip_preserves_total_and_items() {
    let (_dir, url) = temp_db_url("orders");
    let repo = SqliteRepo::new(&url).await.unwrap();

    let product = repo
        .create_product(NewProduct::new("pen".into(), 2.3).unwrap())
        .await
        .unwrap();
    let order = repo
        .create_order(
            NewOrder::new(
                "abc@def.com".into(),
                true,
                vec![OrderLineItem {
                    product: ProductRef { id: product.id },
                    quantity: 5,
                    unit_price: product.price,
                }],
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let fetched = repo.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "abc@def.com");
    assert!(fetched.payment_successful);
    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].quantity, 5);
    assert_eq!(fetched.items[0].unit_price, 2.3);
    assert!((fetched.total_price - 11.5).abs() < 1e-9);

    // Price update after the fact leaves the stored order untouched.
    repo.update_product(product.id, "pen".into(), 9.9)
        .await
        .unwrap();
    let again = repo.get_order(order.id).await.unwrap().unwrap();
    assert!((again.total_price - 11.5).abs() < 1e-9);
}

#[tokio::test]
async fn handles_missing_rows() {
    let (_dir, url) = temp_db_url("missing");
    let repo = SqliteRepo::new(&url).await.unwrap();

    assert!(repo.get_product(7).await.unwrap().is_none());
    assert!(repo
        .update_product(7, "x".into(), 1.0)
        .await
        .unwrap()
        .is_none());
    assert!(!repo.delete_product(7).await.unwrap());
    assert!(repo.get_order(7).await.unwrap().is_none());
    assert!(repo.list_orders().await.unwrap().is_empty());
}
