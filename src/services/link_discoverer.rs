use std::collections::BTreeSet;
use std::time::Duration;

use scraper::{Html, Selector};
use url::Url;

use crate::configuration::ScraperSettings;
use crate::services::Droid;

// A failed page load yields an empty set, the company simply produces no content
pub async fn discover_site_links(
    droid: &Droid,
    start_url: &str,
    settings: &ScraperSettings,
) -> BTreeSet<String> {
    let settle = Duration::from_secs(settings.page_settle_secs);
    let page_source = match droid.render_page(start_url, settle).await {
        Ok(page_source) => page_source,
        Err(e) => {
            log::error!("Failed to render {} in the browser: {:?}", start_url, e);
            return BTreeSet::new();
        }
    };

    extract_site_links(start_url, &page_source, &settings.excluded_domains)
}

pub fn extract_site_links(
    start_url: &str,
    page_source: &str,
    excluded_domains: &[String],
) -> BTreeSet<String> {
    let a_tag_selector = Selector::parse("a").unwrap();
    let document = Html::parse_document(page_source);

    let hrefs: Vec<String> = document
        .select(&a_tag_selector)
        .filter_map(|tag| tag.value().attr("href").map(|href| href.to_string()))
        .collect();

    // BTreeSet gives set semantics plus a reproducible fetch order
    hrefs
        .iter()
        .filter_map(|href| resolve_href(start_url, href))
        .filter(|link| !is_excluded_domain(link, excluded_domains))
        .collect()
}

// Keep absolute and root-relative hrefs only; the latter are resolved by
// prefixing the start url
fn resolve_href(start_url: &str, href: &str) -> Option<String> {
    if href.starts_with("http") {
        Some(href.to_string())
    } else if href.starts_with('/') {
        Some(format!("{}{}", start_url, href))
    } else {
        None
    }
}

fn is_excluded_domain(link: &str, excluded_domains: &[String]) -> bool {
    match Url::parse(link) {
        Ok(parsed_url) => match parsed_url.host_str() {
            Some(host) => excluded_domains
                .iter()
                .any(|excluded| host_is_or_under(host, excluded)),
            None => true,
        },
        Err(_) => true,
    }
}

// Whole-label match, an entry like "x.com" must not catch hosts such as
// "linux.com"
fn host_is_or_under(host: &str, excluded: &str) -> bool {
    host == excluded || host.ends_with(&format!(".{}", excluded))
}

#[cfg(test)]
mod tests {
    use super::extract_site_links;

    fn excluded() -> Vec<String> {
        ["linkedin.com", "facebook.com", "twitter.com"]
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn extract_site_links_keeps_absolute_and_root_relative() {
        let page_source = r##"<html><body>
            <a href="https://ex.com/products">Products</a>
            <a href="/about">About</a>
            <a href="#">Top</a>
            <a href="mailto:team@ex.com">Mail</a>
            <a href="javascript:void(0)">Open</a>
            <a href="contact.html">Contact</a>
        </body></html>"##;

        let links = extract_site_links("http://ex.com", page_source, &excluded());
        let links: Vec<String> = links.into_iter().collect();

        assert_eq!(links, vec!["http://ex.com/about", "https://ex.com/products"]);
    }

    #[test]
    fn extract_site_links_drops_excluded_domains() {
        let page_source = r#"<html><body>
            <a href="https://www.linkedin.com/company/ex">LinkedIn</a>
            <a href="https://twitter.com/ex">Twitter</a>
            <a href="https://ex.com/team">Team</a>
        </body></html>"#;

        let links = extract_site_links("http://ex.com", page_source, &excluded());
        let links: Vec<String> = links.into_iter().collect();

        assert_eq!(links, vec!["https://ex.com/team"]);
    }

    #[test]
    fn extract_site_links_keeps_hosts_that_merely_contain_an_excluded_entry() {
        let page_source = r#"<html><body>
            <a href="https://linux.com/blog">Linux</a>
            <a href="https://x.com/acme">X</a>
            <a href="https://www.x.com/acme">X www</a>
        </body></html>"#;

        let links = extract_site_links("http://ex.com", page_source, &["x.com".to_string()]);
        let links: Vec<String> = links.into_iter().collect();

        assert_eq!(links, vec!["https://linux.com/blog"]);
    }

    #[test]
    fn extract_site_links_dedups_and_sorts() {
        let page_source = r#"<html><body>
            <a href="/c">C</a>
            <a href="/a">A</a>
            <a href="/b">B</a>
            <a href="/a">A again</a>
        </body></html>"#;

        let links = extract_site_links("http://ex.com", page_source, &excluded());
        let links: Vec<String> = links.into_iter().collect();

        assert_eq!(
            links,
            vec!["http://ex.com/a", "http://ex.com/b", "http://ex.com/c"]
        );
    }

    #[test]
    fn extract_site_links_empty_page_yields_empty_set() {
        let links = extract_site_links("http://ex.com", "<html><body></body></html>", &excluded());

        assert!(links.is_empty());
    }
}
