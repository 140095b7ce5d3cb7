use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use shop_types::domain::order::{NewOrder, Order};
use shop_types::domain::product::{NewProduct, Product};
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;
use shop_types::ports::RepoError;

/// Dashmap-backed store. Ids count up from 1, matching what the SQLite
/// adapter's AUTOINCREMENT hands out.
#[derive(Clone)]
pub struct InMemoryRepo {
    products: Arc<DashMap<i64, Product>>,
    orders: Arc<DashMap<i64, Order>>,
    next_product_id: Arc<AtomicI64>,
    next_order_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            products: Arc::new(DashMap::new()),
            orders: Arc::new(DashMap::new()),
            next_product_id: Arc::new(AtomicI64::new(1)),
            next_order_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepo {
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepoError> {
        let id = self.next_product_id.fetch_add(1, Ordering::SeqCst);
        let product = Product {
            id,
            name: product.name,
            price: product.price,
        };
        self.products.insert(id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, RepoError> {
        Ok(self.products.get(&id).map(|r| r.clone()))
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        let mut all: Vec<Product> = self.products.iter().map(|kv| kv.value().clone()).collect();
        all.sort_by_key(|p| p.id);
        Ok(all)
    }

    async fn update_product(
        &self,
        id: i64,
        name: String,
        price: f64,
    ) -> Result<Option<Product>, RepoError> {
        if let Some(mut v) = self.products.get_mut(&id) {
            v.name = name;
            v.price = price;
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn delete_product(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.products.remove(&id).is_some())
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepoError> {
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        let order = Order::from_new(id, order);
        self.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, RepoError> {
        Ok(self.orders.get(&id).map(|r| r.clone()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError> {
        let mut all: Vec<Order> = self.orders.iter().map(|kv| kv.value().clone()).collect();
        all.sort_by_key(|o| o.id);
        Ok(all)
    }
}
