use axum::{
    http::HeaderValue,
    routing::{get, patch},
    serve, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::beneficiary_service::BeneficiaryService;
use crate::application::document_type_service::DocumentTypeService;
use crate::inbound::http::{beneficiaries, docs, document_types};
use beneficiaries_types::ports::{BeneficiaryRepository, DocumentTypeRepository};

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
    pub cors_origins: Vec<String>,
    pub expose_docs: bool,
}

impl HttpServerConfig {
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            cors_origins: crate::config::DEFAULT_CORS_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            expose_docs: false,
        }
    }
}

/// Shared, read-only handler state. Cloning only bumps the `Arc`s.
pub struct AppState<B: BeneficiaryRepository, D: DocumentTypeRepository> {
    pub beneficiaries: Arc<BeneficiaryService<B>>,
    pub document_types: Arc<DocumentTypeService<D>>,
}

impl<B: BeneficiaryRepository, D: DocumentTypeRepository> Clone for AppState<B, D> {
    fn clone(&self) -> Self {
        Self {
            beneficiaries: self.beneficiaries.clone(),
            document_types: self.document_types.clone(),
        }
    }
}

pub struct HttpServer<B, D>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    pub state: AppState<B, D>,
    pub config: HttpServerConfig,
}

impl<B, D> HttpServer<B, D>
where
    B: BeneficiaryRepository,
    D: DocumentTypeRepository,
{
    pub async fn new(
        beneficiaries: BeneficiaryService<B>,
        document_types: DocumentTypeService<D>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            state: AppState {
                beneficiaries: Arc::new(beneficiaries),
                document_types: Arc::new(document_types),
            },
            config,
        })
    }

    pub fn router(&self) -> anyhow::Result<Router> {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let mut app = Router::new()
            .route("/health", get(health))
            .route(
                "/beneficiaries",
                get(beneficiaries::list_beneficiaries::<B, D>)
                    .post(beneficiaries::create_beneficiary::<B, D>),
            )
            .route(
                "/beneficiaries/active",
                get(beneficiaries::list_active::<B, D>),
            )
            .route(
                "/beneficiaries/inactive",
                get(beneficiaries::list_inactive::<B, D>),
            )
            .route(
                "/beneficiaries/{id}",
                get(beneficiaries::get_beneficiary::<B, D>)
                    .put(beneficiaries::update_beneficiary::<B, D>)
                    .delete(beneficiaries::delete_beneficiary::<B, D>),
            )
            .route(
                "/beneficiaries/{id}/restore",
                patch(beneficiaries::restore_beneficiary::<B, D>),
            )
            .route(
                "/document-types",
                get(document_types::list_document_types::<B, D>),
            )
            .route(
                "/document-types/{id}",
                get(document_types::get_document_type::<B, D>),
            );

        if self.config.expose_docs {
            app = app.route("/api-docs/openapi.json", get(docs::openapi_json));
        }

        Ok(app
            .layer(cors_layer(&self.config.cors_origins)?)
            .layer(trace_layer)
            .with_state(self.state.clone()))
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router()?;
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!(docs = self.config.expose_docs, "starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| anyhow::anyhow!("invalid CORS origin {o:?}: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn health() -> (axum::http::StatusCode, Json<serde_json::Value>) {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}
