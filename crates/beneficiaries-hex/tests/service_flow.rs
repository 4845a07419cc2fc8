use beneficiaries_hex::application::beneficiary_service::BeneficiaryService;
use beneficiaries_hex::application::payload::BeneficiaryPayload;
use beneficiaries_repo::memory::InMemoryRepo;
use chrono::NaiveDate;

// End-to-end service flow against the in-memory adapter.
#[tokio::test]
async fn create_list_update_delete_restore_flow() {
    let repo = InMemoryRepo::new();
    let svc = BeneficiaryService::new(repo.clone());

    let payload = BeneficiaryPayload {
        names: Some("Eva".into()),
        surnames: Some("Quispe".into()),
        document_type_id: Some(3),
        document_number: Some("PA123456".into()),
        birth_date: NaiveDate::from_ymd_opt(1985, 6, 30),
        sex: Some("F".into()),
    };
    let created = svc.create_beneficiary(payload.clone()).await.unwrap();
    assert_eq!(created.document_type_abbreviation.as_deref(), Some("PAS"));

    let list = svc.list_beneficiaries(None).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, created.id);

    let mut changed = payload;
    changed.document_type_id = Some(1);
    changed.document_number = Some("87654321".into());
    let updated = svc
        .update_beneficiary(created.id, changed)
        .await
        .unwrap();
    assert_eq!(updated.document_type_abbreviation.as_deref(), Some("DNI"));
    assert_eq!(updated.document_number, "87654321");

    svc.delete_beneficiary(created.id).await.unwrap();
    assert!(svc.list_active().await.unwrap().is_empty());
    let still_there = svc.get_beneficiary(created.id).await.unwrap();
    assert!(!still_there.active);

    svc.restore_beneficiary(created.id).await.unwrap();
    assert!(svc.get_beneficiary(created.id).await.unwrap().active);
}
