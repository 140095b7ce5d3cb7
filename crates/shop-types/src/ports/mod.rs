pub mod order_repository;
pub mod product_repository;

/// Storage adapter failure, opaque to the domain.
#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}
