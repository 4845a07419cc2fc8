pub mod beneficiary;
pub mod document_type;
