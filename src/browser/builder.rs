use super::Browser;
use crate::error::{BrowserError, Result};
use thirtyfour::prelude::*;
use url::Url;

#[derive(Default)]
pub struct BrowserBuilder {
    webdriver_url: Option<String>,
    headless: bool,
    window_size: Option<(u32, u32)>,
}

impl BrowserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = Some(url.into());
        self
    }

    pub fn headless(mut self, enabled: bool) -> Self {
        self.headless = enabled;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    pub async fn build(self) -> Result<Browser> {
        let webdriver_url = self
            .webdriver_url
            .ok_or_else(|| BrowserError::BuildError("WebDriver URL is required".to_string()))?;

        Url::parse(&webdriver_url)
            .map_err(|e| BrowserError::BuildError(format!("Invalid WebDriver URL: {}", e)))?;

        let mut caps = DesiredCapabilities::chrome();

        if let Some((width, height)) = self.window_size {
            caps.add_arg(&format!("--window-size={},{}", width, height))
                .map_err(|e| {
                    BrowserError::BuildError(format!("Failed to set window size: {}", e))
                })?;
        }

        if self.headless {
            caps.add_arg("--headless")
                .map_err(|e| BrowserError::BuildError(format!("Failed to set headless: {}", e)))?;
        }

        let driver = WebDriver::new(&webdriver_url, caps)
            .await
            .map_err(|e| BrowserError::BuildError(format!("Failed to start session: {}", e)))?;

        Ok(Browser::new(driver))
    }
}
