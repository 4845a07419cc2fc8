use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use beneficiaries_types::ports::RepoError;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

pub const VALIDATION_MESSAGE: &str = "One or more validation errors occurred.";

/// Per-field validation messages keyed by the JSON field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        Self(errors)
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errs: validator::ValidationErrors) -> Self {
        let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (field, errors) in errs.field_errors() {
            let messages = errors.iter().map(|e| match &e.message {
                Some(m) => m.to_string(),
                None => e.code.to_string(),
            });
            out.entry(camel_case(&field.to_string()))
                .or_default()
                .extend(messages);
        }
        Self(out)
    }
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Names an operation for logs and carries its generic failure message.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub failure: &'static str,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation failed: {0:?}")]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Maps a gateway failure for `op`. Anything but not-found is logged and becomes a 500.
    pub fn from_repo(op: Operation, id: Option<i32>, err: RepoError) -> Self {
        match err {
            RepoError::NotFound(message) => {
                tracing::warn!(operation = op.name, id, %message, "target not found");
                AppError::NotFound(message)
            }
            other => {
                tracing::error!(operation = op.name, id, error = %other, "{}", op.failure);
                AppError::Internal {
                    message: op.failure.to_string(),
                    source: anyhow::Error::new(other),
                }
            }
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn message(message: String) -> Self {
        Self {
            message,
            error: None,
            errors: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    message: VALIDATION_MESSAGE.into(),
                    error: None,
                    errors: Some(fields.0),
                },
            ),
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, ErrorBody::message(m)),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, ErrorBody::message(m)),
            AppError::Internal { message, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    message,
                    error: Some(source.to_string()),
                    errors: None,
                },
            ),
        };

        let body = serde_json::to_string(&body)
            .unwrap_or_else(|_| "{\"message\":\"internal serialization\"}".into());
        (code, [("content-type", "application/json")], body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OP: Operation = Operation {
        name: "update_beneficiary",
        failure: "Error updating beneficiary",
    };

    #[test]
    fn camel_cases_field_names() {
        assert_eq!(camel_case("document_type_id"), "documentTypeId");
        assert_eq!(camel_case("names"), "names");
    }

    #[test]
    fn repo_not_found_keeps_message() {
        let err = AppError::from_repo(OP, Some(9999), RepoError::NotFound("no existe".into()));
        assert!(matches!(err, AppError::NotFound(ref m) if m == "no existe"));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_repo_failures_become_internal() {
        let err = AppError::from_repo(OP, Some(1), RepoError::DbError("timeout".into()));
        match &err {
            AppError::Internal { message, source } => {
                assert_eq!(message, "Error updating beneficiary");
                assert_eq!(source.to_string(), "db error: timeout");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let err = AppError::from_repo(OP, None, RepoError::UnexpectedResult("no row".into()));
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
