use crate::browser::Browser;
use crate::config::BrowserConfig;
use crate::error::Result;
pub use crate::{log_info, log_warn};
use std::time::Duration;
use thirtyfour::{By, WebElement};
use tokio::time::sleep;

// Result of one navigation strategy attempt. The traversal only ever sees
// the chain's aggregate boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Success,
    NotFound,
    InteractionFailed,
}

// Drives the browser to a target page number via an ordered chain of
// interaction strategies. Faults inside a strategy fall through to the next
// one; only full exhaustion surfaces, as false.
pub struct PageNavigator<'a> {
    browser: &'a Browser,
    click_wait: Duration,
    presence_wait: Duration,
    poll_interval: Duration,
    scroll_pause: Duration,
    reflow_pause: Duration,
}

impl<'a> PageNavigator<'a> {
    pub fn new(browser: &'a Browser, config: &BrowserConfig) -> Self {
        Self {
            browser,
            click_wait: Duration::from_secs(config.click_wait_timeout_secs),
            presence_wait: Duration::from_secs(config.presence_wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_millis),
            scroll_pause: Duration::from_secs(config.scroll_pause_secs),
            reflow_pause: Duration::from_secs(config.reflow_pause_secs),
        }
    }

    pub async fn go_to(&self, page: usize) -> bool {
        log_info!("[navigation] Attempting to navigate to page {}", page);

        let outcome = self.by_qa_attribute(page).await;
        if record(page, "data-qa attribute", outcome) {
            return true;
        }

        let outcome = self.by_container_text(page).await;
        if record(page, "pagination container text", outcome) {
            return true;
        }

        let outcome = self.by_global_text(page).await;
        if record(page, "global button text", outcome) {
            return true;
        }

        log_warn!("[navigation] Failed to navigate to page {}", page);
        false
    }

    // Strategy 1: structured page-index attribute.
    async fn by_qa_attribute(&self, page: usize) -> NavigationOutcome {
        let selector = format!("button[data-qa='button-{}']", page);
        let button = match self
            .browser
            .wait_for_clickable(By::Css(selector), self.click_wait, self.poll_interval)
            .await
        {
            Ok(button) => button,
            Err(e) => {
                log_info!("[navigation] No data-qa button for page {}: {}", page, e);
                return NavigationOutcome::NotFound;
            }
        };

        self.engage(&button).await
    }

    // Strategy 2: numbered button inside the pagination container.
    async fn by_container_text(&self, page: usize) -> NavigationOutcome {
        let pagination = match self
            .browser
            .wait_for_present(By::Css(".pagination"), self.presence_wait, self.poll_interval)
            .await
        {
            Ok(container) => container,
            Err(e) => {
                log_info!("[navigation] No pagination container: {}", e);
                return NavigationOutcome::NotFound;
            }
        };

        let xpath = format!(".//button[normalize-space(text())='{}']", page);
        let button = match pagination.find(By::XPath(xpath)).await {
            Ok(button) => button,
            Err(e) => {
                log_info!(
                    "[navigation] No button labelled {} inside pagination: {}",
                    page,
                    e
                );
                return NavigationOutcome::NotFound;
            }
        };

        self.engage(&button).await
    }

    // Strategy 3: page-wide numbered button with a pagination class.
    async fn by_global_text(&self, page: usize) -> NavigationOutcome {
        let xpath = format!(
            "//button[normalize-space(text())='{}' and contains(@class, 'pagination')]",
            page
        );
        let button = match self
            .browser
            .wait_for_clickable(By::XPath(xpath), self.presence_wait, self.poll_interval)
            .await
        {
            Ok(button) => button,
            Err(e) => {
                log_info!(
                    "[navigation] No page-wide button labelled {}: {}",
                    page,
                    e
                );
                return NavigationOutcome::NotFound;
            }
        };

        self.engage(&button).await
    }

    async fn engage(&self, button: &WebElement) -> NavigationOutcome {
        if let Err(e) = self.scroll_and_click(button).await {
            log_warn!("[navigation] Click sequence failed: {}", e);
            return NavigationOutcome::InteractionFailed;
        }

        match self.browser.current_url().await {
            Ok(url) => log_info!("[navigation] Current URL: {}", url),
            Err(e) => log_warn!("[navigation] Could not read current URL: {}", e),
        }

        NavigationOutcome::Success
    }

    async fn scroll_and_click(&self, button: &WebElement) -> Result<()> {
        button.scroll_into_view().await?;
        sleep(self.scroll_pause).await;
        button.click().await?;
        sleep(self.reflow_pause).await;
        Ok(())
    }
}

fn record(page: usize, strategy: &str, outcome: NavigationOutcome) -> bool {
    match outcome {
        NavigationOutcome::Success => {
            log_info!(
                "[navigation] Successfully navigated to page {} using {}",
                page,
                strategy
            );
            true
        }
        NavigationOutcome::NotFound => false,
        NavigationOutcome::InteractionFailed => {
            log_warn!(
                "[navigation] Strategy '{}' found a control for page {} but could not click it",
                strategy,
                page
            );
            false
        }
    }
}
