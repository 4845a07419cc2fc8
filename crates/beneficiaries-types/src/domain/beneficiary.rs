use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub const NAMES_MAX_LEN: usize = 100;
pub const SURNAMES_MAX_LEN: usize = 100;
pub const DOCUMENT_NUMBER_MAX_LEN: usize = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid sex code {0:?}, expected M or F")]
pub struct ParseSexError(pub String);

impl Sex {
    pub fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = ParseSexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(ParseSexError(other.to_string())),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A person enrolled in a social program, as returned by the stored procedures.
///
/// `document_type_name`, `document_type_abbreviation` and `country` come from the
/// procedure's join with the document-type table and are never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: i32,
    pub names: String,
    pub surnames: String,
    pub document_type_id: i32,
    pub document_type_name: Option<String>,
    pub document_type_abbreviation: Option<String>,
    pub country: Option<String>,
    pub document_number: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// The writable field set shared by create and update calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryFields {
    pub names: String,
    pub surnames: String,
    pub document_type_id: i32,
    pub document_number: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
}

impl Beneficiary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names, self.surnames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Beneficiary {
        Beneficiary {
            id: 7,
            names: "Ana".into(),
            surnames: "Lopez".into(),
            document_type_id: 1,
            document_type_name: Some("Documento Nacional de Identidad".into()),
            document_type_abbreviation: Some("DNI".into()),
            country: Some("Peru".into()),
            document_number: "12345678".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            sex: Sex::Female,
            active: true,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    #[test]
    fn sex_parses_only_single_upper_codes() {
        assert_eq!("M".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
        assert!("f".parse::<Sex>().is_err());
        assert!("MF".parse::<Sex>().is_err());
        assert!("".parse::<Sex>().is_err());
        assert_eq!(Sex::Female.to_string(), "F");
    }

    #[test]
    fn serializes_with_camel_case_keys_and_sex_code() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["documentTypeId"], 1);
        assert_eq!(json["documentNumber"], "12345678");
        assert_eq!(json["birthDate"], "1990-01-01");
        assert_eq!(json["sex"], "F");
        assert_eq!(json["active"], true);
        assert!(json["modifiedAt"].is_null());
    }

    #[test]
    fn full_name_joins_names_and_surnames() {
        assert_eq!(sample().full_name(), "Ana Lopez");
    }
}
