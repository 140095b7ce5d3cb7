use async_trait::async_trait;

use crate::domain::order::{NewOrder, Order};
use crate::ports::RepoError;

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepoError>;
    async fn get_order(&self, id: i64) -> Result<Option<Order>, RepoError>;
    async fn list_orders(&self) -> Result<Vec<Order>, RepoError>;
}
