use std::collections::BTreeSet;
use std::time::Duration;

use crate::configuration::ScraperSettings;
use crate::services::{discover_site_links, Droid, PageFetcher};

pub async fn aggregate_site_content(
    droid: &Droid,
    fetcher: &PageFetcher,
    start_url: &str,
    settings: &ScraperSettings,
) -> String {
    let links = discover_site_links(droid, start_url, settings).await;
    log::info!("Discovered {} links on {}", links.len(), start_url);

    let delay = Duration::from_secs(settings.fetch_delay_secs);
    fetch_pages_text(fetcher, &links, delay).await
}

// One failed link contributes nothing, the rest of the site still aggregates
pub async fn fetch_pages_text(
    fetcher: &PageFetcher,
    links: &BTreeSet<String>,
    delay: Duration,
) -> String {
    let mut sections: Vec<String> = Vec::new();

    for (position, link) in links.iter().enumerate() {
        match fetcher.fetch_page_text(link).await {
            Ok(text) => {
                if !text.is_empty() {
                    sections.push(text);
                }
            }
            Err(e) => log::error!("Failed to fetch {}: {:?}", link, e),
        }

        // Pacing applies between consecutive fetches only
        if position + 1 < links.len() {
            tokio::time::sleep(delay).await;
        }
    }

    // TODO: Cap aggregated content length before prompting, large sites blow the model context
    sections.join("\n\n")
}
