use axum::extract::{Path, State};
use axum::Json;

use crate::errors::{AppError, ErrorBody};
use crate::inbound::http::beneficiaries::parse_id;
use crate::inbound::http::server::AppState;
use beneficiaries_types::domain::document_type::DocumentType;
use beneficiaries_types::ports::{BeneficiaryRepository, DocumentTypeRepository};

#[utoipa::path(
    get,
    path = "/document-types",
    tag = "document-types",
    responses(
        (status = 200, description = "Active document types", body = [DocumentType]),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn list_document_types<B, D>(
    State(state): State<AppState<B, D>>,
) -> Result<Json<Vec<DocumentType>>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    Ok(Json(state.document_types.list_document_types().await?))
}

#[utoipa::path(
    get,
    path = "/document-types/{id}",
    tag = "document-types",
    params(("id" = i32, Path, description = "Document type id")),
    responses(
        (status = 200, description = "Document type", body = DocumentType),
        (status = 404, description = "No such document type", body = ErrorBody),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn get_document_type<B, D>(
    State(state): State<AppState<B, D>>,
    Path(id): Path<String>,
) -> Result<Json<DocumentType>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    let id = parse_id(&id)?;
    Ok(Json(state.document_types.get_document_type(id).await?))
}
