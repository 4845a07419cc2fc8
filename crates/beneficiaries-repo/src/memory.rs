use async_trait::async_trait;
use beneficiaries_types::domain::beneficiary::{Beneficiary, BeneficiaryFields};
use beneficiaries_types::domain::document_type::DocumentType;
use beneficiaries_types::ports::{BeneficiaryRepository, DocumentTypeRepository, RepoError};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// In-process stand-in for the stored procedures. It follows the same contracts:
/// ids come from a sequence, creation joins the document type, deletes are soft.
#[derive(Clone)]
pub struct InMemoryRepo {
    pub beneficiaries: Arc<DashMap<i32, Beneficiary>>,
    document_types: Arc<DashMap<i32, StoredDocumentType>>,
    next_id: Arc<AtomicI32>,
}

#[derive(Clone)]
struct StoredDocumentType {
    document_type: DocumentType,
    active: bool,
}

fn default_document_types() -> Vec<DocumentType> {
    let rows = [
        (1, "Documento Nacional de Identidad", "DNI", "Peru"),
        (2, "Carnet de Extranjeria", "CE", "Peru"),
        (3, "Pasaporte", "PAS", "Peru"),
        (4, "Cedula de Ciudadania", "CC", "Colombia"),
    ];
    rows.into_iter()
        .map(|(id, name, abbreviation, country)| DocumentType {
            id,
            name: name.into(),
            abbreviation: abbreviation.into(),
            country: country.into(),
        })
        .collect()
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::with_document_types(default_document_types())
    }

    pub fn with_document_types(document_types: Vec<DocumentType>) -> Self {
        let map = DashMap::new();
        for dt in document_types {
            map.insert(
                dt.id,
                StoredDocumentType {
                    document_type: dt,
                    active: true,
                },
            );
        }
        Self {
            beneficiaries: Arc::new(DashMap::new()),
            document_types: Arc::new(map),
            next_id: Arc::new(AtomicI32::new(1)),
        }
    }

    /// Hides a document type from `list_all` while keeping it resolvable by id.
    pub fn deactivate_document_type(&self, id: i32) -> bool {
        match self.document_types.get_mut(&id) {
            Some(mut dt) => {
                dt.active = false;
                true
            }
            None => false,
        }
    }

    fn lookup_document_type(&self, id: i32) -> Result<DocumentType, RepoError> {
        self.document_types
            .get(&id)
            .map(|dt| dt.document_type.clone())
            .ok_or_else(|| RepoError::DbError(format!("document type {id} is not registered")))
    }

    fn sorted(&self, filter: impl Fn(&Beneficiary) -> bool) -> Vec<Beneficiary> {
        let mut rows: Vec<Beneficiary> = self
            .beneficiaries
            .iter()
            .filter(|kv| filter(kv.value()))
            .map(|kv| kv.value().clone())
            .collect();
        rows.sort_by_key(|b| b.id);
        rows
    }

    fn set_active(&self, id: i32, active: bool) -> bool {
        if let Some(mut row) = self.beneficiaries.get_mut(&id) {
            row.active = active;
            row.modified_at = Some(Utc::now());
            return true;
        }
        false
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BeneficiaryRepository for InMemoryRepo {
    async fn list_all(&self) -> Result<Vec<Beneficiary>, RepoError> {
        Ok(self.sorted(|_| true))
    }

    async fn list_active(&self) -> Result<Vec<Beneficiary>, RepoError> {
        Ok(self.sorted(|b| b.active))
    }

    async fn list_inactive(&self) -> Result<Vec<Beneficiary>, RepoError> {
        Ok(self.sorted(|b| !b.active))
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Beneficiary>, RepoError> {
        Ok(self.beneficiaries.get(&id).map(|r| r.clone()))
    }

    async fn create(&self, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError> {
        let dt = self.lookup_document_type(fields.document_type_id)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = Beneficiary {
            id,
            names: fields.names,
            surnames: fields.surnames,
            document_type_id: dt.id,
            document_type_name: Some(dt.name),
            document_type_abbreviation: Some(dt.abbreviation),
            country: Some(dt.country),
            document_number: fields.document_number,
            birth_date: fields.birth_date,
            sex: fields.sex,
            active: true,
            created_at: Utc::now(),
            modified_at: None,
        };
        self.beneficiaries.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError> {
        let mut row = self
            .beneficiaries
            .get_mut(&id)
            .ok_or_else(|| RepoError::NotFound(format!("beneficiary {id} does not exist")))?;
        let dt = self.lookup_document_type(fields.document_type_id)?;
        row.names = fields.names;
        row.surnames = fields.surnames;
        row.document_type_id = dt.id;
        row.document_type_name = Some(dt.name);
        row.document_type_abbreviation = Some(dt.abbreviation);
        row.country = Some(dt.country);
        row.document_number = fields.document_number;
        row.birth_date = fields.birth_date;
        row.sex = fields.sex;
        row.modified_at = Some(Utc::now());
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.set_active(id, false))
    }

    async fn restore(&self, id: i32) -> Result<bool, RepoError> {
        Ok(self.set_active(id, true))
    }
}

#[async_trait]
impl DocumentTypeRepository for InMemoryRepo {
    async fn list_all(&self) -> Result<Vec<DocumentType>, RepoError> {
        let mut rows: Vec<DocumentType> = self
            .document_types
            .iter()
            .filter(|kv| kv.value().active)
            .map(|kv| kv.value().document_type.clone())
            .collect();
        rows.sort_by_key(|dt| dt.id);
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<DocumentType>, RepoError> {
        Ok(self.document_types.get(&id).map(|r| r.document_type.clone()))
    }
}
