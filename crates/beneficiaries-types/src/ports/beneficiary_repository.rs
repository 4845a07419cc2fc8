use async_trait::async_trait;

use crate::domain::beneficiary::{Beneficiary, BeneficiaryFields};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// The target row does not exist, as reported by the procedure.
    #[error("{0}")]
    NotFound(String),

    /// The procedure completed but did not return the row its contract promises.
    #[error("unexpected result: {0}")]
    UnexpectedResult(String),

    #[error("db error: {0}")]
    DbError(String),
}

/// Gateway over the beneficiary stored procedures. Each call is one procedure invocation.
#[async_trait]
pub trait BeneficiaryRepository: Send + Sync + 'static {
    async fn list_all(&self) -> Result<Vec<Beneficiary>, RepoError>;
    async fn list_active(&self) -> Result<Vec<Beneficiary>, RepoError>;
    async fn list_inactive(&self) -> Result<Vec<Beneficiary>, RepoError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Beneficiary>, RepoError>;
    async fn create(&self, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError>;
    async fn update(&self, id: i32, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError>;
    /// Soft delete. `true` iff the procedure reports exactly one affected row.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
    async fn restore(&self, id: i32) -> Result<bool, RepoError>;
}
