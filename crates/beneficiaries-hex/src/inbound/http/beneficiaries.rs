use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::beneficiary_service::{DELETED_MESSAGE, RESTORED_MESSAGE};
use crate::application::payload::BeneficiaryPayload;
use crate::errors::{AppError, ErrorBody};
use crate::inbound::http::server::AppState;
use beneficiaries_types::domain::beneficiary::Beneficiary;
use beneficiaries_types::ports::{BeneficiaryRepository, DocumentTypeRepository};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(rename = "onlyActive")]
    pub only_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

pub(crate) fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("invalid id {raw:?}")))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(p)| p)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

#[utoipa::path(
    get,
    path = "/beneficiaries",
    tag = "beneficiaries",
    params(("onlyActive" = Option<bool>, Query, description = "Omit for all rows, true for active, false for inactive")),
    responses(
        (status = 200, description = "Beneficiaries", body = [Beneficiary]),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn list_beneficiaries<B, D>(
    State(state): State<AppState<B, D>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Beneficiary>>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let list = state
        .beneficiaries
        .list_beneficiaries(params.only_active)
        .await?;
    Ok(Json(list))
}

#[utoipa::path(
    get,
    path = "/beneficiaries/active",
    tag = "beneficiaries",
    responses(
        (status = 200, description = "Active beneficiaries", body = [Beneficiary]),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn list_active<B, D>(
    State(state): State<AppState<B, D>>,
) -> Result<Json<Vec<Beneficiary>>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    Ok(Json(state.beneficiaries.list_active().await?))
}

#[utoipa::path(
    get,
    path = "/beneficiaries/inactive",
    tag = "beneficiaries",
    responses(
        (status = 200, description = "Inactive beneficiaries", body = [Beneficiary]),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn list_inactive<B, D>(
    State(state): State<AppState<B, D>>,
) -> Result<Json<Vec<Beneficiary>>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    Ok(Json(state.beneficiaries.list_inactive().await?))
}

#[utoipa::path(
    get,
    path = "/beneficiaries/{id}",
    tag = "beneficiaries",
    params(("id" = i32, Path, description = "Beneficiary id")),
    responses(
        (status = 200, description = "Beneficiary", body = Beneficiary),
        (status = 404, description = "No such beneficiary", body = ErrorBody),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn get_beneficiary<B, D>(
    State(state): State<AppState<B, D>>,
    Path(id): Path<String>,
) -> Result<Json<Beneficiary>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    let id = parse_id(&id)?;
    Ok(Json(state.beneficiaries.get_beneficiary(id).await?))
}

#[utoipa::path(
    post,
    path = "/beneficiaries",
    tag = "beneficiaries",
    request_body = BeneficiaryPayload,
    responses(
        (status = 201, description = "Created; Location points at the new record", body = Beneficiary),
        (status = 400, description = "Validation errors", body = ErrorBody),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn create_beneficiary<B, D>(
    State(state): State<AppState<B, D>>,
    payload: Result<Json<BeneficiaryPayload>, JsonRejection>,
) -> Result<impl IntoResponse, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    let created = state
        .beneficiaries
        .create_beneficiary(body(payload)?)
        .await?;
    let location = format!("/beneficiaries/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

#[utoipa::path(
    put,
    path = "/beneficiaries/{id}",
    tag = "beneficiaries",
    params(("id" = i32, Path, description = "Beneficiary id")),
    request_body = BeneficiaryPayload,
    responses(
        (status = 200, description = "Updated beneficiary", body = Beneficiary),
        (status = 400, description = "Validation errors", body = ErrorBody),
        (status = 404, description = "No such beneficiary", body = ErrorBody),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn update_beneficiary<B, D>(
    State(state): State<AppState<B, D>>,
    Path(id): Path<String>,
    payload: Result<Json<BeneficiaryPayload>, JsonRejection>,
) -> Result<Json<Beneficiary>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    let id = parse_id(&id)?;
    let updated = state
        .beneficiaries
        .update_beneficiary(id, body(payload)?)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/beneficiaries/{id}",
    tag = "beneficiaries",
    params(("id" = i32, Path, description = "Beneficiary id")),
    responses(
        (status = 200, description = "Soft-deleted", body = MessageBody),
        (status = 404, description = "No such beneficiary", body = ErrorBody),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn delete_beneficiary<B, D>(
    State(state): State<AppState<B, D>>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    let id = parse_id(&id)?;
    state.beneficiaries.delete_beneficiary(id).await?;
    Ok(Json(MessageBody {
        message: DELETED_MESSAGE.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/beneficiaries/{id}/restore",
    tag = "beneficiaries",
    params(("id" = i32, Path, description = "Beneficiary id")),
    responses(
        (status = 200, description = "Reactivated", body = MessageBody),
        (status = 404, description = "No such beneficiary", body = ErrorBody),
        (status = 500, description = "Gateway failure", body = ErrorBody)
    )
)]
pub async fn restore_beneficiary<B, D>(
    State(state): State<AppState<B, D>>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    let id = parse_id(&id)?;
    state.beneficiaries.restore_beneficiary(id).await?;
    Ok(Json(MessageBody {
        message: RESTORED_MESSAGE.into(),
    }))
}
