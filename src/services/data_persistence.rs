use std::path::Path;

use anyhow::Context;
use sqlx::PgPool;

use crate::dal::company_db;
use crate::domain::company::CompanyDetailsRow;

// The two sinks are independent, a failure in one is logged and does not
// touch the other
pub async fn persist_company_details(
    pool: &PgPool,
    spreadsheet_path: &str,
    row: &CompanyDetailsRow,
) {
    match append_spreadsheet_row(spreadsheet_path, row) {
        Ok(()) => log::info!("Data saved to {}", spreadsheet_path),
        Err(e) => log::error!("Spreadsheet write error: {:?}", e),
    }

    match company_db::update_company_details(pool, row).await {
        Ok(result) => match result.rows_affected() {
            0 => log::info!("No company_info row found for id {}, nothing updated", row.id),
            _ => log::info!("Updated company ID {} in the database.", row.id),
        },
        Err(e) => log::error!("Database update error: {:?}", e),
    }
}

// Reads the whole file back and rewrites it with the new row appended. A
// missing file just means a fresh spreadsheet. Re-running a company appends
// a duplicate row, there is no uniqueness guarantee.
pub fn append_spreadsheet_row(path: &str, row: &CompanyDetailsRow) -> anyhow::Result<()> {
    let mut rows: Vec<CompanyDetailsRow> = match Path::new(path).exists() {
        true => {
            let mut reader = csv::Reader::from_path(path)
                .with_context(|| format!("Failed to open the spreadsheet at {}", path))?;
            reader
                .deserialize()
                .collect::<Result<Vec<CompanyDetailsRow>, csv::Error>>()
                .with_context(|| format!("Failed to read existing rows from {}", path))?
        }
        false => Vec::new(),
    };

    rows.push(row.clone());

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to rewrite the spreadsheet at {}", path))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::append_spreadsheet_row;
    use crate::domain::company::CompanyDetailsRow;

    fn sample_row(id: i32) -> CompanyDetailsRow {
        CompanyDetailsRow {
            id,
            description: "Builds rockets.".to_string(),
            products_services: "engines, launches".to_string(),
            use_cases: "space freight".to_string(),
            customers: "NASA".to_string(),
            partners: "ESA".to_string(),
        }
    }

    #[test]
    fn creates_the_spreadsheet_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_data.csv");
        let path = path.to_str().unwrap();

        append_spreadsheet_row(path, &sample_row(1)).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents
            .starts_with("id,description,products_services,use_cases,customers,partners"));
        assert!(contents.contains("Builds rockets."));
    }

    #[test]
    fn appends_duplicate_rows_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_data.csv");
        let path = path.to_str().unwrap();

        append_spreadsheet_row(path, &sample_row(3)).unwrap();
        append_spreadsheet_row(path, &sample_row(3)).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let rows: Vec<CompanyDetailsRow> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);
        assert_eq!(rows[0].id, 3);
    }

    #[test]
    fn quoted_fields_survive_a_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extracted_data.csv");
        let path = path.to_str().unwrap();

        append_spreadsheet_row(path, &sample_row(5)).unwrap();

        let mut reader = csv::Reader::from_path(path).unwrap();
        let rows: Vec<CompanyDetailsRow> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(rows[0].products_services, "engines, launches");
    }
}
