use async_trait::async_trait;
use beneficiaries_types::domain::beneficiary::{
    Beneficiary, BeneficiaryFields, ParseSexError, Sex,
};
use beneficiaries_types::domain::document_type::DocumentType;
use beneficiaries_types::ports::{BeneficiaryRepository, DocumentTypeRepository, RepoError};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use crate::connection::ConnectionProvider;

// Stored procedures are owned by the database team; only their call signatures live here.
const LIST_ALL_BENEFICIARIES: &str = "SELECT * FROM sp_listar_todos_beneficiarios()";
const LIST_ACTIVE_BENEFICIARIES: &str = "SELECT * FROM sp_listar_beneficiarios_activos()";
const LIST_INACTIVE_BENEFICIARIES: &str = "SELECT * FROM sp_listar_beneficiarios_inactivos()";
const GET_BENEFICIARY: &str = "SELECT * FROM sp_obtener_beneficiario(id => $1)";
const CREATE_BENEFICIARY: &str = "SELECT * FROM sp_crear_beneficiario(\
     nombres => $1, apellidos => $2, documento_identidad_id => $3, \
     numero_documento => $4, fecha_nacimiento => $5, sexo => $6)";
const UPDATE_BENEFICIARY: &str = "SELECT * FROM sp_actualizar_beneficiario(\
     id => $1, nombres => $2, apellidos => $3, documento_identidad_id => $4, \
     numero_documento => $5, fecha_nacimiento => $6, sexo => $7)";
const DELETE_BENEFICIARY: &str = "SELECT sp_eliminar_beneficiario(id => $1)";
const RESTORE_BENEFICIARY: &str = "SELECT sp_restaurar_beneficiario(id => $1)";
const LIST_DOCUMENT_TYPES: &str = "SELECT * FROM sp_listar_documentos_identidad()";
const GET_DOCUMENT_TYPE: &str = "SELECT * FROM sp_obtener_documento_identidad(id => $1)";

/// SQLSTATE `no_data_found`.
const NO_DATA_FOUND: &str = "P0002";
/// SQLSTATE class `P0`: PL/pgSQL errors, including `raise_exception` and custom codes.
const PLPGSQL_CLASS: &str = "P0";
const NOT_FOUND_MARKERS: [&str; 2] = ["no existe", "does not exist"];

#[derive(Clone)]
pub struct PostgresRepo {
    connections: ConnectionProvider,
}

#[derive(FromRow)]
struct DbBeneficiary {
    id: i32,
    nombres: String,
    apellidos: String,
    documento_identidad_id: i32,
    tipo_documento: Option<String>,
    abreviatura_documento: Option<String>,
    pais: Option<String>,
    numero_documento: String,
    fecha_nacimiento: NaiveDate,
    sexo: String,
    activo: bool,
    fecha_creacion: DateTime<Utc>,
    fecha_modificacion: Option<DateTime<Utc>>,
}

impl DbBeneficiary {
    fn into_beneficiary(self) -> Result<Beneficiary, RepoError> {
        let sex: Sex = self
            .sexo
            .trim()
            .parse()
            .map_err(|e: ParseSexError| RepoError::DbError(e.to_string()))?;
        Ok(Beneficiary {
            id: self.id,
            names: self.nombres,
            surnames: self.apellidos,
            document_type_id: self.documento_identidad_id,
            document_type_name: self.tipo_documento,
            document_type_abbreviation: self.abreviatura_documento,
            country: self.pais,
            document_number: self.numero_documento,
            birth_date: self.fecha_nacimiento,
            sex,
            active: self.activo,
            created_at: self.fecha_creacion,
            modified_at: self.fecha_modificacion,
        })
    }
}

#[derive(FromRow)]
struct DbDocumentType {
    id: i32,
    nombre: String,
    abreviatura: String,
    pais: String,
}

impl From<DbDocumentType> for DocumentType {
    fn from(row: DbDocumentType) -> Self {
        Self {
            id: row.id,
            name: row.nombre,
            abbreviation: row.abreviatura,
            country: row.pais,
        }
    }
}

/// Sorts a procedure failure into not-found or an opaque database error.
///
/// Procedures signal a missing target either with `no_data_found` or by raising an
/// exception (any `P0xxx` code) whose text carries one of the markers. Other SQLSTATEs stay opaque, so a
/// missing function or relation is never mistaken for a missing row.
pub(crate) fn classify_db_error(code: Option<&str>, message: &str) -> RepoError {
    let lowered = message.to_lowercase();
    let has_marker = NOT_FOUND_MARKERS.iter().any(|m| lowered.contains(m));
    match code {
        Some(NO_DATA_FOUND) => RepoError::NotFound(message.to_string()),
        Some(c) if c.starts_with(PLPGSQL_CLASS) && has_marker => {
            RepoError::NotFound(message.to_string())
        }
        None if has_marker => RepoError::NotFound(message.to_string()),
        _ => RepoError::DbError(message.to_string()),
    }
}

fn map_sqlx_err(e: sqlx::Error) -> RepoError {
    match &e {
        sqlx::Error::Database(db) => classify_db_error(db.code().as_deref(), db.message()),
        _ => RepoError::DbError(e.to_string()),
    }
}

fn rows_into_beneficiaries(rows: Vec<DbBeneficiary>) -> Result<Vec<Beneficiary>, RepoError> {
    rows.into_iter()
        .map(|r| r.into_beneficiary())
        .collect::<Result<Vec<_>, _>>()
}

impl PostgresRepo {
    pub fn new(database_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            connections: ConnectionProvider::new(database_url)?,
        })
    }

    async fn list(&self, procedure: &'static str) -> Result<Vec<Beneficiary>, RepoError> {
        tracing::debug!(procedure, "invoking stored procedure");
        let mut conn = self.connections.acquire().await?;
        let rows: Vec<DbBeneficiary> = sqlx::query_as(procedure)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;
        rows_into_beneficiaries(rows)
    }

    async fn toggle(&self, procedure: &'static str, id: i32) -> Result<bool, RepoError> {
        tracing::debug!(procedure, id, "invoking stored procedure");
        let mut conn = self.connections.acquire().await?;
        let result: Option<Option<i32>> = sqlx::query_scalar(procedure)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;
        Ok(result.flatten() == Some(1))
    }
}

#[async_trait]
impl BeneficiaryRepository for PostgresRepo {
    async fn list_all(&self) -> Result<Vec<Beneficiary>, RepoError> {
        self.list(LIST_ALL_BENEFICIARIES).await
    }

    async fn list_active(&self) -> Result<Vec<Beneficiary>, RepoError> {
        self.list(LIST_ACTIVE_BENEFICIARIES).await
    }

    async fn list_inactive(&self) -> Result<Vec<Beneficiary>, RepoError> {
        self.list(LIST_INACTIVE_BENEFICIARIES).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Beneficiary>, RepoError> {
        tracing::debug!(procedure = GET_BENEFICIARY, id, "invoking stored procedure");
        let mut conn = self.connections.acquire().await?;
        let row: Option<DbBeneficiary> = sqlx::query_as(GET_BENEFICIARY)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;
        row.map(|r| r.into_beneficiary()).transpose()
    }

    async fn create(&self, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError> {
        tracing::debug!(procedure = CREATE_BENEFICIARY, "invoking stored procedure");
        let mut conn = self.connections.acquire().await?;
        let row: Option<DbBeneficiary> = sqlx::query_as(CREATE_BENEFICIARY)
            .bind(&fields.names)
            .bind(&fields.surnames)
            .bind(fields.document_type_id)
            .bind(&fields.document_number)
            .bind(fields.birth_date)
            .bind(fields.sex.code())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;
        match row {
            Some(r) => r.into_beneficiary(),
            None => Err(RepoError::UnexpectedResult(
                "create procedure returned no row".into(),
            )),
        }
    }

    async fn update(&self, id: i32, fields: BeneficiaryFields) -> Result<Beneficiary, RepoError> {
        tracing::debug!(procedure = UPDATE_BENEFICIARY, id, "invoking stored procedure");
        let mut conn = self.connections.acquire().await?;
        let row: Option<DbBeneficiary> = sqlx::query_as(UPDATE_BENEFICIARY)
            .bind(id)
            .bind(&fields.names)
            .bind(&fields.surnames)
            .bind(fields.document_type_id)
            .bind(&fields.document_number)
            .bind(fields.birth_date)
            .bind(fields.sex.code())
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;
        match row {
            Some(r) => r.into_beneficiary(),
            None => Err(RepoError::NotFound(format!("beneficiary {id} does not exist"))),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        self.toggle(DELETE_BENEFICIARY, id).await
    }

    async fn restore(&self, id: i32) -> Result<bool, RepoError> {
        self.toggle(RESTORE_BENEFICIARY, id).await
    }
}

#[async_trait]
impl DocumentTypeRepository for PostgresRepo {
    async fn list_all(&self) -> Result<Vec<DocumentType>, RepoError> {
        tracing::debug!(procedure = LIST_DOCUMENT_TYPES, "invoking stored procedure");
        let mut conn = self.connections.acquire().await?;
        let rows: Vec<DbDocumentType> = sqlx::query_as(LIST_DOCUMENT_TYPES)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;
        Ok(rows.into_iter().map(DocumentType::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<DocumentType>, RepoError> {
        tracing::debug!(procedure = GET_DOCUMENT_TYPE, id, "invoking stored procedure");
        let mut conn = self.connections.acquire().await?;
        let row: Option<DbDocumentType> = sqlx::query_as(GET_DOCUMENT_TYPE)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(map_sqlx_err)?;
        Ok(row.map(DocumentType::from))
    }
}
