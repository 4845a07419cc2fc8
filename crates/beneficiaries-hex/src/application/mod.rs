pub mod beneficiary_service;
pub mod document_type_service;
pub mod payload;
