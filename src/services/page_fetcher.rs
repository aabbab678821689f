use fake_user_agent::get_rua;
use reqwest::header::USER_AGENT;
use scraper::Html;

pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::new();

        PageFetcher { client }
    }

    pub async fn fetch_page_text(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, get_rua())
            .send()
            .await?
            .error_for_status()?;
        let html = response.text().await?;

        Ok(html_to_text(&html))
    }
}

pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let text: Vec<&str> = document.root_element().text().collect();

    // Collapse runs of whitespace left behind by the removed markup
    text.join(" ")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{html_to_text, PageFetcher};

    #[test]
    fn html_to_text_strips_markup_and_collapses_whitespace() {
        let html = "<html><body><h1>Acme</h1>\n   <p>We make   widgets.</p></body></html>";
        let text = html_to_text(html);

        assert_eq!(text, "Acme We make widgets.");
    }

    #[tokio::test]
    async fn fetch_page_text_returns_cleaned_text() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/about"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><p>About   us</p></body></html>"),
            )
            .mount(&mock_server)
            .await;

        let fetcher = PageFetcher::new();
        let text = fetcher
            .fetch_page_text(&format!("{}/about", mock_server.uri()))
            .await
            .unwrap();

        assert_eq!(text, "About us");
    }

    #[tokio::test]
    async fn fetch_page_text_fails_on_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let fetcher = PageFetcher::new();
        let result = fetcher
            .fetch_page_text(&format!("{}/broken", mock_server.uri()))
            .await;

        assert!(result.is_err());
    }
}
