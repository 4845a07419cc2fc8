///  To run :
///  cargo r --example client_example
use beneficiaries_client::{ApiError, BeneficiariesClient, BeneficiaryRequest};
use beneficiaries_hex::application::beneficiary_service::BeneficiaryService;
use beneficiaries_hex::application::document_type_service::DocumentTypeService;
use beneficiaries_hex::inbound::http::{HttpServer, HttpServerConfig};
use beneficiaries_repo::memory::InMemoryRepo;
use beneficiaries_types::domain::beneficiary::Sex;
use chrono::NaiveDate;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Start server on ephemeral port with in-memory repo.
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    let repo = InMemoryRepo::new();
    let server = HttpServer::new(
        BeneficiaryService::new(repo.clone()),
        DocumentTypeService::new(repo),
        HttpServerConfig::new(port.to_string()),
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = BeneficiariesClient::new(&addr)?;

    let types = client.list_document_types().await?;
    println!("Document types: {}", types.len());
    let dni = &types[0];

    let mut request = BeneficiaryRequest {
        names: "Ana".into(),
        surnames: "Lopez".into(),
        document_type_id: dni.id,
        document_number: "12345678".into(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
        sex: Sex::Female,
    };
    let created = client.create_beneficiary(&request).await?;
    println!("Created beneficiary id={} ({})", created.id, created.full_name());
    assert!(created.active);

    request.surnames = "Lopez Diaz".into();
    let updated = client.update_beneficiary(created.id, &request).await?;
    println!("Updated surnames={}", updated.surnames);

    println!("{}", client.delete_beneficiary(created.id).await?);
    assert_eq!(client.list_inactive().await?.len(), 1);

    println!("{}", client.restore_beneficiary(created.id).await?);
    assert_eq!(client.list_beneficiaries(Some(true)).await?.len(), 1);

    match client.get_beneficiary(9999).await {
        Ok(_) => println!("Unexpected beneficiary 9999"),
        Err(err) => match err.downcast_ref::<ApiError>() {
            Some(api) => println!("Lookup of 9999 returned {}: {}", api.status, api.message),
            None => return Err(err),
        },
    }

    handle.abort();
    Ok(())
}
