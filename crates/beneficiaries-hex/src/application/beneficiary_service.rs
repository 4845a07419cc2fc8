use crate::application::payload::BeneficiaryPayload;
use crate::errors::{AppError, Operation};
use beneficiaries_types::domain::beneficiary::Beneficiary;
use beneficiaries_types::ports::BeneficiaryRepository;

const LIST_ALL: Operation = Operation {
    name: "list_beneficiaries",
    failure: "Error retrieving beneficiaries",
};
const LIST_ACTIVE: Operation = Operation {
    name: "list_active_beneficiaries",
    failure: "Error retrieving active beneficiaries",
};
const LIST_INACTIVE: Operation = Operation {
    name: "list_inactive_beneficiaries",
    failure: "Error retrieving inactive beneficiaries",
};
const GET: Operation = Operation {
    name: "get_beneficiary",
    failure: "Error retrieving beneficiary",
};
const CREATE: Operation = Operation {
    name: "create_beneficiary",
    failure: "Error creating beneficiary",
};
const UPDATE: Operation = Operation {
    name: "update_beneficiary",
    failure: "Error updating beneficiary",
};
const DELETE: Operation = Operation {
    name: "delete_beneficiary",
    failure: "Error deleting beneficiary",
};
const RESTORE: Operation = Operation {
    name: "restore_beneficiary",
    failure: "Error restoring beneficiary",
};

pub const NOT_FOUND_MESSAGE: &str = "Beneficiary not found";
pub const DELETED_MESSAGE: &str = "Beneficiary deleted successfully";
pub const RESTORED_MESSAGE: &str = "Beneficiary restored successfully";

pub struct BeneficiaryService<R: BeneficiaryRepository> {
    repo: R,
}

impl<R: BeneficiaryRepository> BeneficiaryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// `None` lists every row, `Some(true)` only active rows, `Some(false)` only inactive.
    pub async fn list_beneficiaries(
        &self,
        only_active: Option<bool>,
    ) -> Result<Vec<Beneficiary>, AppError> {
        match only_active {
            None => self
                .repo
                .list_all()
                .await
                .map_err(|e| AppError::from_repo(LIST_ALL, None, e)),
            Some(true) => self.list_active().await,
            Some(false) => self.list_inactive().await,
        }
    }

    pub async fn list_active(&self) -> Result<Vec<Beneficiary>, AppError> {
        self.repo
            .list_active()
            .await
            .map_err(|e| AppError::from_repo(LIST_ACTIVE, None, e))
    }

    pub async fn list_inactive(&self) -> Result<Vec<Beneficiary>, AppError> {
        self.repo
            .list_inactive()
            .await
            .map_err(|e| AppError::from_repo(LIST_INACTIVE, None, e))
    }

    pub async fn get_beneficiary(&self, id: i32) -> Result<Beneficiary, AppError> {
        match self
            .repo
            .get_by_id(id)
            .await
            .map_err(|e| AppError::from_repo(GET, Some(id), e))?
        {
            Some(b) => Ok(b),
            None => Err(AppError::NotFound(NOT_FOUND_MESSAGE.into())),
        }
    }

    pub async fn create_beneficiary(
        &self,
        payload: BeneficiaryPayload,
    ) -> Result<Beneficiary, AppError> {
        let fields = payload.into_fields().map_err(AppError::Validation)?;
        let created = self
            .repo
            .create(fields)
            .await
            .map_err(|e| AppError::from_repo(CREATE, None, e))?;
        tracing::info!(id = created.id, "beneficiary created");
        Ok(created)
    }

    pub async fn update_beneficiary(
        &self,
        id: i32,
        payload: BeneficiaryPayload,
    ) -> Result<Beneficiary, AppError> {
        let fields = payload.into_fields().map_err(AppError::Validation)?;
        self.repo
            .update(id, fields)
            .await
            .map_err(|e| AppError::from_repo(UPDATE, Some(id), e))
    }

    pub async fn delete_beneficiary(&self, id: i32) -> Result<(), AppError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| AppError::from_repo(DELETE, Some(id), e))?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound(NOT_FOUND_MESSAGE.into()))
        }
    }

    pub async fn restore_beneficiary(&self, id: i32) -> Result<(), AppError> {
        let restored = self
            .repo
            .restore(id)
            .await
            .map_err(|e| AppError::from_repo(RESTORE, Some(id), e))?;
        if restored {
            Ok(())
        } else {
            Err(AppError::NotFound(NOT_FOUND_MESSAGE.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn payload(names: &str) -> BeneficiaryPayload {
        BeneficiaryPayload {
            names: Some(names.into()),
            surnames: Some("Lopez".into()),
            document_type_id: Some(1),
            document_number: Some("12345678".into()),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
            sex: Some("F".into()),
        }
    }

    #[tokio::test]
    async fn create_and_get_beneficiary_in_memory() {
        let repo = beneficiaries_repo::memory::InMemoryRepo::new();
        let svc = BeneficiaryService::new(repo.clone());
        let before = chrono::Utc::now();
        let created = svc.create_beneficiary(payload("Ana")).await.unwrap();
        assert!(created.id > 0);
        assert!(created.active);
        assert!(created.created_at >= before);

        let got = svc.get_beneficiary(created.id).await.unwrap();
        assert_eq!(got.names, "Ana");
        assert_eq!(got.document_number, "12345678");
    }

    #[tokio::test]
    async fn update_delete_and_restore() {
        let repo = beneficiaries_repo::memory::InMemoryRepo::new();
        let svc = BeneficiaryService::new(repo.clone());
        let created = svc.create_beneficiary(payload("Luis")).await.unwrap();

        let updated = svc
            .update_beneficiary(created.id, payload("Luis Alberto"))
            .await
            .unwrap();
        assert_eq!(updated.names, "Luis Alberto");
        assert!(updated.modified_at.is_some());

        svc.delete_beneficiary(created.id).await.unwrap();
        assert!(svc.list_beneficiaries(Some(true)).await.unwrap().is_empty());
        assert_eq!(svc.list_beneficiaries(Some(false)).await.unwrap().len(), 1);
        assert_eq!(svc.list_beneficiaries(None).await.unwrap().len(), 1);

        svc.restore_beneficiary(created.id).await.unwrap();
        assert_eq!(svc.list_active().await.unwrap().len(), 1);
        assert!(svc.list_inactive().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_errors_propagate() {
        let repo = beneficiaries_repo::memory::InMemoryRepo::new();
        let svc = BeneficiaryService::new(repo.clone());
        let res = svc
            .create_beneficiary(BeneficiaryPayload::default())
            .await;
        assert!(matches!(res, Err(AppError::Validation(ref f)) if f.0.len() == 6));

        let mut bad = payload("Ana");
        bad.sex = Some("X".into());
        let res = svc.update_beneficiary(1, bad).await;
        assert!(matches!(res, Err(AppError::Validation(ref f)) if f.0.contains_key("sex")));
        assert!(svc.list_beneficiaries(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_paths() {
        let repo = beneficiaries_repo::memory::InMemoryRepo::new();
        let svc = BeneficiaryService::new(repo.clone());
        let missing = svc.get_beneficiary(9999).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let updated = svc.update_beneficiary(9999, payload("Ana")).await;
        assert!(matches!(updated, Err(AppError::NotFound(_))));

        let deleted = svc.delete_beneficiary(9999).await;
        assert!(matches!(deleted, Err(AppError::NotFound(_))));

        let restored = svc.restore_beneficiary(9999).await;
        assert!(matches!(restored, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn gateway_failure_is_internal() {
        let repo = beneficiaries_repo::memory::InMemoryRepo::new();
        let svc = BeneficiaryService::new(repo.clone());
        let mut unknown_type = payload("Ana");
        unknown_type.document_type_id = Some(77);
        let res = svc.create_beneficiary(unknown_type).await;
        match res {
            Err(AppError::Internal { message, .. }) => {
                assert_eq!(message, "Error creating beneficiary")
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
