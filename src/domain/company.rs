use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Company {
    pub id: i32,
    pub url: String,
}

// Field order doubles as the spreadsheet column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetailsRow {
    pub id: i32,
    pub description: String,
    pub products_services: String,
    pub use_cases: String,
    pub customers: String,
    pub partners: String,
}
