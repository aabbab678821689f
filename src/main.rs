use std::time::Duration;

use dossier::{
    configuration::get_configuration,
    services::{Droid, OpenaiClient},
    startup::run,
};
use env_logger::Env;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let connection_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy_with(configuration.database.with_db());

    let openai_client = OpenaiClient::new(configuration.openai.clone());

    // The browser session is acquired once at startup and released at the end
    // of the batch, whatever happened in between
    let droid = Droid::new(&configuration.scraper.webdriver_url).await;

    run(&connection_pool, &droid, &openai_client, &configuration).await;

    if let Err(e) = droid.quit().await {
        log::error!("Error closing the webdriver session: {:?}", e);
    }
}
