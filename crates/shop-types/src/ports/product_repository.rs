use async_trait::async_trait;

use crate::domain::product::{NewProduct, Product};
use crate::ports::RepoError;

#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepoError>;
    async fn get_product(&self, id: i64) -> Result<Option<Product>, RepoError>;
    async fn list_products(&self) -> Result<Vec<Product>, RepoError>;
    async fn update_product(
        &self,
        id: i64,
        name: String,
        price: f64,
    ) -> Result<Option<Product>, RepoError>;
    async fn delete_product(&self, id: i64) -> Result<bool, RepoError>;
}
