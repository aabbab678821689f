use std::time::Duration;

use thirtyfour::error::WebDriverResult;
use thirtyfour::{DesiredCapabilities, WebDriver};

// One browser session per run, acquired at process start and released in main
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(webdriver_url: &str) -> Self {
        let caps = DesiredCapabilities::chrome();

        let driver = WebDriver::new(webdriver_url, caps).await.unwrap();
        driver.maximize_window().await.unwrap();

        Droid { driver }
    }

    // The settle sleep lets script-generated pages finish building the DOM
    // before the source is read
    pub async fn render_page(&self, url: &str, settle: Duration) -> WebDriverResult<String> {
        self.driver.goto(url).await?;
        tokio::time::sleep(settle).await;
        self.driver.source().await
    }

    pub async fn quit(self) -> WebDriverResult<()> {
        self.driver.quit().await
    }
}
