use crate::browser::Browser;
use crate::config::BrowserConfig;
use crate::error::Result;
pub use crate::{log_info, log_warn};
use std::time::Duration;
use thirtyfour::By;
use tokio::time::sleep;

// Infers the total page count from the pagination controls. A strategy
// result of exactly 1 is inconclusive and the next strategy is tried; only
// a maximum above 1 is accepted. Every fault degrades to 1 page.
pub struct PaginationDetector<'a> {
    browser: &'a Browser,
    scroll_pause: Duration,
}

impl<'a> PaginationDetector<'a> {
    pub fn new(browser: &'a Browser, config: &BrowserConfig) -> Self {
        Self {
            browser,
            scroll_pause: Duration::from_secs(config.scroll_pause_secs),
        }
    }

    pub async fn detect_total_pages(&self) -> usize {
        // The controls may not exist in the DOM until scrolled into view.
        if let Err(e) = self.reveal_pagination().await {
            log_warn!("[pagination] Could not scroll pagination into view: {}", e);
        }

        match self.qa_attribute_max().await {
            Ok(max) if max > 1 => {
                log_info!("[pagination] Detected {} pages using data-qa attributes", max);
                return max;
            }
            Ok(_) => {}
            Err(e) => log_warn!("[pagination] data-qa detection failed: {}", e),
        }

        match self.container_button_max().await {
            Ok(max) if max > 1 => {
                log_info!("[pagination] Detected {} pages using button text", max);
                return max;
            }
            Ok(_) => {}
            Err(e) => log_warn!("[pagination] Button-text detection failed: {}", e),
        }

        match self.numeric_button_max().await {
            Ok(max) if max > 1 => {
                log_info!("[pagination] Detected {} pages scanning all buttons", max);
                return max;
            }
            Ok(_) => {}
            Err(e) => log_warn!("[pagination] Button-scan detection failed: {}", e),
        }

        log_info!("[pagination] Could not detect pagination, defaulting to 1 page");
        1
    }

    async fn reveal_pagination(&self) -> Result<()> {
        self.browser.scroll_to_bottom().await?;
        sleep(self.scroll_pause).await;
        Ok(())
    }

    async fn qa_attribute_max(&self) -> Result<usize> {
        let buttons = self
            .browser
            .find_all(By::Css("button[data-qa^='button-']"))
            .await?;

        let mut max_page = 1;
        for button in buttons {
            if let Some(value) = button.attr("data-qa").await? {
                if let Some(page) = page_index_from_qa(&value) {
                    max_page = max_page.max(page);
                }
            }
        }
        Ok(max_page)
    }

    async fn container_button_max(&self) -> Result<usize> {
        let buttons = self.browser.find_all(By::Css(".pagination__button")).await?;

        let mut max_page = 1;
        for button in buttons {
            let text = button.text().await?;
            if let Some(page) = page_from_label(&text, None) {
                max_page = max_page.max(page);
            }
        }
        Ok(max_page)
    }

    async fn numeric_button_max(&self) -> Result<usize> {
        let buttons = self.browser.find_all(By::Tag("button")).await?;

        let mut max_page = 1;
        for button in buttons {
            let text = button.text().await?;
            // Reasonable page numbers only
            if let Some(page) = page_from_label(&text, Some(2)) {
                max_page = max_page.max(page);
            }
        }
        Ok(max_page)
    }
}

fn page_index_from_qa(value: &str) -> Option<usize> {
    value.strip_prefix("button-")?.parse().ok()
}

fn page_from_label(text: &str, max_digits: Option<usize>) -> Option<usize> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if max_digits.is_some_and(|limit| trimmed.len() > limit) {
        return None;
    }
    trimmed.parse().ok()
}
