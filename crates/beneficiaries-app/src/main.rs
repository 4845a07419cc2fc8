use beneficiaries_hex::application::beneficiary_service::BeneficiaryService;
use beneficiaries_hex::application::document_type_service::DocumentTypeService;
use beneficiaries_hex::config::Config;
use beneficiaries_hex::inbound::http::{HttpServer, HttpServerConfig};
use beneficiaries_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        environment = %config.environment,
        origins = ?config.cors_allowed_origins,
        "configuration loaded"
    );

    // A missing connection string stops the process here, before any request is served.
    let repo: Repo = build_repo(config.database_url.as_deref()).await?;
    let beneficiaries = BeneficiaryService::new(repo.clone());
    let document_types = DocumentTypeService::new(repo);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
        cors_origins: config.cors_allowed_origins.clone(),
        expose_docs: config.api_docs_enabled,
    };

    let http = HttpServer::new(beneficiaries, document_types, server_cfg).await?;
    http.run().await
}
