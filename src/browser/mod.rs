mod builder;

use crate::error::{BrowserError, Result};
pub use builder::BrowserBuilder;
use std::time::{Duration, Instant};
use thirtyfour::{By, WebDriver, WebElement};
use tokio::time::sleep;

// Live view over the rendering browser session. Components borrow it per
// call; nothing retains it past the run.
pub struct Browser {
    driver: WebDriver,
}

impl Browser {
    pub fn builder() -> BrowserBuilder {
        BrowserBuilder::new()
    }

    pub(crate) fn new(driver: WebDriver) -> Self {
        Self { driver }
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed(format!("{}: {}", url, e)))?;
        Ok(())
    }

    pub async fn current_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.to_string())
    }

    pub async fn source(&self) -> Result<String> {
        Ok(self.driver.source().await?)
    }

    pub async fn find_all(&self, by: By) -> Result<Vec<WebElement>> {
        Ok(self.driver.find_all(by).await?)
    }

    pub async fn scroll_to_bottom(&self) -> Result<()> {
        self.execute_script("window.scrollTo(0, document.body.scrollHeight);")
            .await
    }

    pub async fn scroll_to_top(&self) -> Result<()> {
        self.execute_script("window.scrollTo(0, 0);").await
    }

    async fn execute_script(&self, script: &str) -> Result<()> {
        self.driver
            .execute(script, Vec::new())
            .await
            .map_err(|e| BrowserError::ScriptError(e.to_string()))?;
        Ok(())
    }

    // Waits until the element is present, displayed and enabled.
    pub async fn wait_for_clickable(
        &self,
        by: By,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<WebElement> {
        self.wait_for(by, timeout, poll_interval, true).await
    }

    // Waits until the element exists in the DOM, visible or not.
    pub async fn wait_for_present(
        &self,
        by: By,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<WebElement> {
        self.wait_for(by, timeout, poll_interval, false).await
    }

    async fn wait_for(
        &self,
        by: By,
        timeout: Duration,
        poll_interval: Duration,
        require_clickable: bool,
    ) -> Result<WebElement> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Ok(element) = self.driver.find(by.clone()).await {
                if !require_clickable || element.is_clickable().await.unwrap_or(false) {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::WaitTimeout {
                    selector: format!("{:?}", by),
                    timeout_secs: timeout.as_secs(),
                }
                .into());
            }
            sleep(poll_interval).await;
        }
    }

    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}
