use crate::errors::AppError;
use shop_types::domain::product::{NewProduct, Product};
use shop_types::ports::product_repository::ProductRepository;

/// The product store: catalog CRUD over whatever repository is plugged in.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_product(&self, name: String, price: f64) -> Result<Product, AppError> {
        let draft = NewProduct::new(name, price)?;
        Ok(self.repo.create_product(draft).await?)
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, AppError> {
        match self.repo.get_product(id).await? {
            Some(p) => Ok(p),
            None => Err(AppError::NotFound(format!("product {}", id))),
        }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.repo.list_products().await?)
    }

    /// In-place catalog update. Existing orders are untouched; they carry
    /// their own captured prices.
    pub async fn update_product(
        &self,
        id: i64,
        name: String,
        price: f64,
    ) -> Result<Product, AppError> {
        shop_types::domain::product::check_price(price)?;
        match self.repo.update_product(id, name, price).await? {
            Some(p) => Ok(p),
            None => Err(AppError::NotFound(format!("product {}", id))),
        }
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repo.delete_product(id).await?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("product {}", id)))
        }
    }
}
