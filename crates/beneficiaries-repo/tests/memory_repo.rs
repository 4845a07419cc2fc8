#![cfg(feature = "memory")]

use beneficiaries_repo::memory::InMemoryRepo;
use beneficiaries_types::domain::beneficiary::{BeneficiaryFields, Sex};
use beneficiaries_types::ports::{BeneficiaryRepository, DocumentTypeRepository, RepoError};
use chrono::NaiveDate;

fn fields(names: &str, document_type_id: i32) -> BeneficiaryFields {
    BeneficiaryFields {
        names: names.into(),
        surnames: "Lopez".into(),
        document_type_id,
        document_number: "12345678".into(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        sex: Sex::Female,
    }
}

#[tokio::test]
async fn memory_repo_crud_flow() {
    let repo = InMemoryRepo::new();

    let created = repo.create(fields("Ana", 1)).await.unwrap();
    assert!(created.id > 0);
    assert!(created.active);
    assert_eq!(created.document_type_abbreviation.as_deref(), Some("DNI"));
    assert!(created.modified_at.is_none());

    let second = repo.create(fields("Luis", 3)).await.unwrap();
    assert!(second.id > created.id);

    let fetched = BeneficiaryRepository::get_by_id(&repo, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.names, "Ana");

    let listed = BeneficiaryRepository::list_all(&repo).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, created.id);

    let mut changed = fields("Ana Maria", 4);
    changed.sex = Sex::Female;
    let updated = repo.update(created.id, changed.clone()).await.unwrap();
    assert_eq!(updated.names, changed.names);
    assert_eq!(updated.document_type_id, changed.document_type_id);
    assert_eq!(updated.sex, changed.sex);
    assert_eq!(updated.country.as_deref(), Some("Colombia"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.modified_at.is_some());

    assert!(repo.delete(created.id).await.unwrap());
    let active = repo.list_active().await.unwrap();
    let inactive = repo.list_inactive().await.unwrap();
    assert_eq!(active.iter().map(|b| b.id).collect::<Vec<_>>(), vec![second.id]);
    assert_eq!(inactive.iter().map(|b| b.id).collect::<Vec<_>>(), vec![created.id]);

    assert!(repo.restore(created.id).await.unwrap());
    assert_eq!(repo.list_active().await.unwrap().len(), 2);
    assert!(repo.list_inactive().await.unwrap().is_empty());
}

#[tokio::test]
async fn memory_repo_handles_missing_rows() {
    let repo = InMemoryRepo::new();
    let missing = BeneficiaryRepository::get_by_id(&repo, 9999).await.unwrap();
    assert!(missing.is_none());

    let updated = repo.update(9999, fields("Ana", 1)).await;
    assert!(matches!(updated, Err(RepoError::NotFound(_))));

    // a missing row wins over an unknown document type
    let updated = repo.update(9999, fields("Ana", 42)).await;
    assert!(matches!(updated, Err(RepoError::NotFound(_))));

    assert!(!repo.delete(9999).await.unwrap());
    assert!(!repo.restore(9999).await.unwrap());
}

#[tokio::test]
async fn memory_repo_rejects_unknown_document_type() {
    let repo = InMemoryRepo::new();
    let res = repo.create(fields("Ana", 42)).await;
    assert!(matches!(res, Err(RepoError::DbError(_))));
    assert!(BeneficiaryRepository::list_all(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn document_types_list_only_active() {
    let repo = InMemoryRepo::new();
    let all = DocumentTypeRepository::list_all(&repo).await.unwrap();
    assert_eq!(all.len(), 4);

    assert!(repo.deactivate_document_type(2));
    let listed = DocumentTypeRepository::list_all(&repo).await.unwrap();
    assert_eq!(listed.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 3, 4]);

    let hidden = DocumentTypeRepository::get_by_id(&repo, 2).await.unwrap();
    assert_eq!(hidden.unwrap().abbreviation, "CE");
    assert!(DocumentTypeRepository::get_by_id(&repo, 99)
        .await
        .unwrap()
        .is_none());
}
