#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use shop_types::domain::order::{NewOrder, Order};
use shop_types::domain::product::{NewProduct, Product};
use shop_types::ports::order_repository::OrderRepository;
use shop_types::ports::product_repository::ProductRepository;
use shop_types::ports::RepoError;

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Backend selected at compile time. With both features enabled, SQLite is
/// the store that counts.
#[derive(Clone)]
pub struct Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    memory: memory::InMemoryRepo,
    #[cfg(feature = "sqlite")]
    sqlite: sqlite::SqliteRepo,
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            memory: memory::InMemoryRepo::new(),
        })
    }

    #[cfg(feature = "sqlite")]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        // Defaulting is the caller's concern (see shop-hex Config).
        let url = database_url
            .ok_or_else(|| anyhow::anyhow!("sqlite backend needs a database url"))?;
        let sqlite = sqlite::SqliteRepo::new(url).await?;
        Ok(Self { sqlite })
    }

    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    fn backend(&self) -> &memory::InMemoryRepo {
        &self.memory
    }

    #[cfg(feature = "sqlite")]
    fn backend(&self) -> &sqlite::SqliteRepo {
        &self.sqlite
    }
}

#[async_trait::async_trait]
impl ProductRepository for Repo {
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepoError> {
        self.backend().create_product(product).await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>, RepoError> {
        self.backend().get_product(id).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        self.backend().list_products().await
    }

    async fn update_product(
        &self,
        id: i64,
        name: String,
        price: f64,
    ) -> Result<Option<Product>, RepoError> {
        self.backend().update_product(id, name, price).await
    }

    async fn delete_product(&self, id: i64) -> Result<bool, RepoError> {
        self.backend().delete_product(id).await
    }
}

#[async_trait::async_trait]
impl OrderRepository for Repo {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepoError> {
        self.backend().create_order(order).await
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, RepoError> {
        self.backend().get_order(id).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError> {
        self.backend().list_orders().await
    }
}
