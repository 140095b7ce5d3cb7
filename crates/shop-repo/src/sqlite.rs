use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shop_types::domain::order::{NewOrder, Order, OrderLineItem};
use shop_types::domain::product::{NewProduct, Product};
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;
use shop_types::ports::RepoError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};

#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbProduct {
    id: i64,
    name: String,
    price: f64,
}

impl DbProduct {
    fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            price: self.price,
        }
    }
}

#[derive(FromRow)]
struct DbOrder {
    id: i64,
    email: String,
    payment_successful: i64,
    total_price: f64,
    items_json: String,
    created_at: String,
}

impl DbOrder {
    fn into_order(self) -> Result<Order, RepoError> {
        let items: Vec<OrderLineItem> = serde_json::from_str(&self.items_json)
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| RepoError::DbError(e.to_string()))?
            .with_timezone(&Utc);
        Ok(Order {
            id: self.id,
            email: self.email,
            payment_successful: self.payment_successful != 0,
            items,
            total_price: self.total_price,
            created_at,
        })
    }
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file, one statement at a time.
        let ddl = include_str!("../migrations/0001_create_shop.sql");
        for stmt in ddl.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(stmt).execute(&pool).await?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl ProductRepository for SqliteRepo {
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepoError> {
        let res = sqlx::query("INSERT INTO products (name, price) VALUES (?, ?)")
            .bind(&product.name)
            .bind(product.price)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(Product {
            id: res.last_insert_rowid(),
            name: product.name,
            price: product.price,
        })
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, RepoError> {
        let row: Option<DbProduct> =
            sqlx::query_as("SELECT id, name, price FROM products WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(row.map(DbProduct::into_product))
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        let rows: Vec<DbProduct> =
            sqlx::query_as("SELECT id, name, price FROM products ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(rows.into_iter().map(DbProduct::into_product).collect())
    }

    async fn update_product(
        &self,
        id: i64,
        name: String,
        price: f64,
    ) -> Result<Option<Product>, RepoError> {
        let updated = sqlx::query("UPDATE products SET name = ?, price = ? WHERE id = ?")
            .bind(&name)
            .bind(price)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Product { id, name, price }))
    }

    async fn delete_product(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepoError> {
        let items_json =
            serde_json::to_string(&order.items).map_err(|e| RepoError::DbError(e.to_string()))?;
        let res = sqlx::query(
            "INSERT INTO orders (email, payment_successful, total_price, items_json, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&order.email)
        .bind(order.payment_successful as i64)
        .bind(order.total_price)
        .bind(items_json)
        .bind(order.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        Ok(Order::from_new(res.last_insert_rowid(), order))
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(
            "SELECT id, email, payment_successful, total_price, items_json, created_at
             FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        row.map(DbOrder::into_order).transpose()
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<DbOrder> = sqlx::query_as(
            "SELECT id, email, payment_successful, total_price, items_json, created_at
             FROM orders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::DbError(e.to_string()))?;
        rows.into_iter().map(DbOrder::into_order).collect()
    }
}
