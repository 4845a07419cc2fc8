#[cfg(not(any(feature = "memory", feature = "postgres")))]
compile_error!("Enable a repo feature: `memory` or `postgres`.");

use beneficiaries_types::domain::beneficiary::{Beneficiary, BeneficiaryFields};
use beneficiaries_types::domain::document_type::DocumentType;
use beneficiaries_types::ports::{BeneficiaryRepository, DocumentTypeRepository, RepoError};

#[cfg(feature = "postgres")]
pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

/// The gateway selected at build time. With both features on, Postgres serves every call.
#[derive(Clone)]
pub struct Repo {
    #[cfg(all(feature = "memory", not(feature = "postgres")))]
    inner: memory::InMemoryRepo,
    #[cfg(feature = "postgres")]
    inner: postgres::PostgresRepo,
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "postgres")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            inner: crate::memory::InMemoryRepo::new(),
        })
    }

    /// Fails when the connection string is absent or malformed; nothing is connected yet.
    #[cfg(feature = "postgres")]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("connection string DATABASE_URL is not configured"))?;
        let inner = postgres::PostgresRepo::new(url)?;
        Ok(Self { inner })
    }
}

#[async_trait::async_trait]
impl BeneficiaryRepository for Repo {
    async fn list_all(&self) -> Result<Vec<Beneficiary>, RepoError> {
        BeneficiaryRepository::list_all(&self.inner).await
    }

    async fn list_active(&self) -> Result<Vec<Beneficiary>, RepoError> {
        self.inner.list_active().await
    }

    async fn list_inactive(&self) -> Result<Vec<Beneficiary>, RepoError> {
        self.inner.list_inactive().await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Beneficiary>, RepoError> {
        BeneficiaryRepository::get_by_id(&self.inner, id).await
    }

    async fn create(&self, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError> {
        self.inner.create(fields).await
    }

    async fn update(&self, id: i32, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError> {
        self.inner.update(id, fields).await
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        self.inner.delete(id).await
    }

    async fn restore(&self, id: i32) -> Result<bool, RepoError> {
        self.inner.restore(id).await
    }
}

#[async_trait::async_trait]
impl DocumentTypeRepository for Repo {
    async fn list_all(&self) -> Result<Vec<DocumentType>, RepoError> {
        DocumentTypeRepository::list_all(&self.inner).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<DocumentType>, RepoError> {
        DocumentTypeRepository::get_by_id(&self.inner, id).await
    }
}
