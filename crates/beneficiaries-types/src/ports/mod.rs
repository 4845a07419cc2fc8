pub mod beneficiary_repository;
pub mod document_type_repository;

pub use beneficiary_repository::{BeneficiaryRepository, RepoError};
pub use document_type_repository::DocumentTypeRepository;
