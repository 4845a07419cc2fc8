use axum::Json;
use utoipa::OpenApi;

use crate::application::payload::BeneficiaryPayload;
use crate::errors::ErrorBody;
use crate::inbound::http::beneficiaries::{self, MessageBody};
use crate::inbound::http::document_types;
use beneficiaries_types::domain::beneficiary::{Beneficiary, Sex};
use beneficiaries_types::domain::document_type::DocumentType;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beneficiaries API",
        version = "1.0.0",
        description = "Manages beneficiaries of multi-country social programs"
    ),
    paths(
        beneficiaries::list_beneficiaries,
        beneficiaries::list_active,
        beneficiaries::list_inactive,
        beneficiaries::get_beneficiary,
        beneficiaries::create_beneficiary,
        beneficiaries::update_beneficiary,
        beneficiaries::delete_beneficiary,
        beneficiaries::restore_beneficiary,
        document_types::list_document_types,
        document_types::get_document_type,
    ),
    components(schemas(
        Beneficiary,
        Sex,
        DocumentType,
        BeneficiaryPayload,
        ErrorBody,
        MessageBody
    )),
    tags(
        (name = "beneficiaries", description = "Beneficiary records with soft delete"),
        (name = "document-types", description = "Identity document lookup table")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/beneficiaries",
            "/beneficiaries/active",
            "/beneficiaries/inactive",
            "/beneficiaries/{id}",
            "/beneficiaries/{id}/restore",
            "/document-types",
            "/document-types/{id}",
        ] {
            assert!(
                doc.paths.paths.contains_key(expected),
                "{expected} missing from {paths:?}"
            );
        }
    }
}
