use crate::errors::{AppError, Operation};
use beneficiaries_types::domain::document_type::DocumentType;
use beneficiaries_types::ports::DocumentTypeRepository;

const LIST: Operation = Operation {
    name: "list_document_types",
    failure: "Error retrieving document types",
};
const GET: Operation = Operation {
    name: "get_document_type",
    failure: "Error retrieving document type",
};

pub const NOT_FOUND_MESSAGE: &str = "Document type not found";

pub struct DocumentTypeService<R: DocumentTypeRepository> {
    repo: R,
}

impl<R: DocumentTypeRepository> DocumentTypeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn list_document_types(&self) -> Result<Vec<DocumentType>, AppError> {
        self.repo
            .list_all()
            .await
            .map_err(|e| AppError::from_repo(LIST, None, e))
    }

    pub async fn get_document_type(&self, id: i32) -> Result<DocumentType, AppError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| AppError::from_repo(GET, Some(id), e))?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_and_gets_document_types() {
        let repo = beneficiaries_repo::memory::InMemoryRepo::new();
        let svc = DocumentTypeService::new(repo.clone());
        let all = svc.list_document_types().await.unwrap();
        assert!(!all.is_empty());

        let first = svc.get_document_type(all[0].id).await.unwrap();
        assert_eq!(first, all[0]);

        let missing = svc.get_document_type(404).await;
        assert!(matches!(missing, Err(AppError::NotFound(ref m)) if m == NOT_FOUND_MESSAGE));
    }
}
