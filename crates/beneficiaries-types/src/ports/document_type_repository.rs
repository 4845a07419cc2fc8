use async_trait::async_trait;

use crate::domain::document_type::DocumentType;
use crate::ports::RepoError;

#[async_trait]
pub trait DocumentTypeRepository: Send + Sync + 'static {
    /// Active document types only; the procedure does the filtering.
    async fn list_all(&self) -> Result<Vec<DocumentType>, RepoError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<DocumentType>, RepoError>;
}
