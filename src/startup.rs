use sqlx::PgPool;

use crate::{
    configuration::Settings,
    dal::company_db,
    domain::company::Company,
    services::{
        aggregate_site_content, extract_company_fields, persist_company_details, Droid,
        OpenaiClient, PageFetcher,
    },
};

pub async fn run(
    pool: &PgPool,
    droid: &Droid,
    openai_client: &OpenaiClient,
    configuration: &Settings,
) {
    let companies = match company_db::get_companies(pool).await {
        Ok(companies) => companies,
        Err(e) => {
            log::error!("Error fetching companies: {:?}", e);
            Vec::new()
        }
    };

    if companies.is_empty() {
        log::info!("No companies found in the database.");
        return;
    }

    log::info!("Processing {} companies", companies.len());

    let fetcher = PageFetcher::new();
    for company in &companies {
        process_company(pool, droid, &fetcher, openai_client, configuration, company).await;
    }
}

// Failures upstream degrade to empty content or empty fields, a company never
// aborts the batch
async fn process_company(
    pool: &PgPool,
    droid: &Droid,
    fetcher: &PageFetcher,
    openai_client: &OpenaiClient,
    configuration: &Settings,
    company: &Company,
) {
    log::info!(
        "Processing company ID {} with URL {}",
        company.id,
        company.url
    );

    /*
        1. Discover links on the company site and aggregate sub-page text
        2. Ask the model for the five structured fields
        3. Flatten the fields into a spreadsheet row
        4. Write the row to the spreadsheet and the database
    */

    let site_content =
        aggregate_site_content(droid, fetcher, &company.url, &configuration.scraper).await;

    if site_content.is_empty() {
        log::info!("No content available for company ID {}.", company.id);
        return;
    }

    let fields = extract_company_fields(
        openai_client,
        &site_content,
        &configuration.sinks.response_log_path,
    )
    .await;

    let row = fields.into_row(company.id);
    persist_company_details(pool, &configuration.sinks.spreadsheet_path, &row).await;
}
