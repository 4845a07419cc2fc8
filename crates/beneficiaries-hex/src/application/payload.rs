use beneficiaries_types::domain::beneficiary::{BeneficiaryFields, Sex};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::errors::FieldErrors;

/// Body of both `POST /beneficiaries` and `PUT /beneficiaries/{id}`.
///
/// Every field is optional on the wire so that a missing field is reported as a
/// validation message instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryPayload {
    #[validate(
        required(message = "names are required"),
        custom(function = "not_blank", message = "names are required"),
        length(max = 100, message = "names cannot exceed 100 characters")
    )]
    pub names: Option<String>,

    #[validate(
        required(message = "surnames are required"),
        custom(function = "not_blank", message = "surnames are required"),
        length(max = 100, message = "surnames cannot exceed 100 characters")
    )]
    pub surnames: Option<String>,

    #[validate(required(message = "document type is required"))]
    pub document_type_id: Option<i32>,

    #[validate(
        required(message = "document number is required"),
        custom(function = "not_blank", message = "document number is required"),
        length(max = 20, message = "document number cannot exceed 20 characters")
    )]
    pub document_number: Option<String>,

    #[validate(required(message = "birth date is required"))]
    pub birth_date: Option<NaiveDate>,

    #[validate(
        required(message = "sex is required"),
        custom(function = "sex_code", message = "sex must be M or F")
    )]
    #[schema(example = "F")]
    pub sex: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn sex_code(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Sex>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("sex"))
}

impl BeneficiaryPayload {
    /// Validates and converts to the typed write set. No gateway is touched here.
    pub fn into_fields(self) -> Result<BeneficiaryFields, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;
        match (
            self.names,
            self.surnames,
            self.document_type_id,
            self.document_number,
            self.birth_date,
            self.sex,
        ) {
            (
                Some(names),
                Some(surnames),
                Some(document_type_id),
                Some(document_number),
                Some(birth_date),
                Some(sex),
            ) => {
                let sex = sex
                    .parse::<Sex>()
                    .map_err(|_| FieldErrors::single("sex", "sex must be M or F"))?;
                Ok(BeneficiaryFields {
                    names,
                    surnames,
                    document_type_id,
                    document_number,
                    birth_date,
                    sex,
                })
            }
            _ => Err(FieldErrors::single("body", "incomplete beneficiary payload")),
        }
    }
}
