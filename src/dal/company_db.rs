use sqlx::postgres::PgQueryResult;
use sqlx::PgPool;

use crate::domain::company::{Company, CompanyDetailsRow};

pub async fn get_companies(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        r"
        select
            id,
            url
        from
            company_info
        ",
    )
    .fetch_all(pool)
    .await
}

// Overwrites all five columns; an id with no row simply affects zero rows
pub async fn update_company_details(
    pool: &PgPool,
    row: &CompanyDetailsRow,
) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        r"
        update company_info
        set
            description = $1,
            products_services = $2,
            use_cases = $3,
            customers = $4,
            partners = $5
        where
            id = $6
        ",
    )
    .bind(&row.description)
    .bind(&row.products_services)
    .bind(&row.use_cases)
    .bind(&row.customers)
    .bind(&row.partners)
    .bind(row.id)
    .execute(pool)
    .await
}
