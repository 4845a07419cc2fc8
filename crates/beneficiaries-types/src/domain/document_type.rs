use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of identity document and the country that issues it. Read-only lookup data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentType {
    pub id: i32,
    pub name: String,
    pub abbreviation: String,
    pub country: String,
}
