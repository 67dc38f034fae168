use crate::browser::Browser;
use crate::config::Config;
use crate::error::{Result, ScraperError};
use crate::pagination::{PageNavigator, PaginationDetector};
use crate::scraper::{ProductRecord, Scraper};
pub use crate::{log_info, log_warn};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::sleep;

// Page-oriented view of a scraping session. The state machine runs against
// this seam; the live implementation drives a browser, tests script it.
#[async_trait]
pub trait PageSession {
    async fn detect_total_pages(&self) -> usize;

    // Forces lazily-rendered content to mount before the page is read.
    async fn prepare_page(&self) -> Result<()>;

    async fn scrape_current(&self) -> Result<Vec<ProductRecord>>;

    async fn go_to(&self, page: usize) -> bool;
}

pub struct LiveSession<'a> {
    browser: &'a Browser,
    config: &'a Config,
}

impl<'a> LiveSession<'a> {
    pub fn new(browser: &'a Browser, config: &'a Config) -> Self {
        Self { browser, config }
    }
}

#[async_trait]
impl PageSession for LiveSession<'_> {
    async fn detect_total_pages(&self) -> usize {
        PaginationDetector::new(self.browser, &self.config.browser)
            .detect_total_pages()
            .await
    }

    async fn prepare_page(&self) -> Result<()> {
        self.browser.scroll_to_bottom().await?;
        sleep(Duration::from_secs(self.config.browser.pre_scrape_pause_secs)).await;
        self.browser.scroll_to_top().await?;
        sleep(Duration::from_secs(self.config.browser.scroll_pause_secs)).await;
        Ok(())
    }

    async fn scrape_current(&self) -> Result<Vec<ProductRecord>> {
        let html = self.browser.source().await?;
        if html.trim().is_empty() {
            return Err(ScraperError::EmptySnapshot("page source was empty".to_string()).into());
        }
        Ok(Scraper::new(&html).content().extract_products())
    }

    async fn go_to(&self, page: usize) -> bool {
        PageNavigator::new(self.browser, &self.config.browser)
            .go_to(page)
            .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraversalState {
    Init,
    DetectingPages,
    ScrapingPage(usize),
    Navigating(usize),
    Done,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOutcome {
    Completed,
    Aborted,
}

#[derive(Debug)]
pub struct TraversalReport {
    pub records: Vec<ProductRecord>,
    pub pages_scraped: usize,
    pub total_pages: usize,
    pub outcome: TraversalOutcome,
}

// Bounded loop over the detected page range: detect once, then scrape and
// navigate until the last page, an unreachable page, or an empty page past
// the first. Aborting keeps every record gathered so far.
pub struct Traversal<S> {
    session: S,
}

impl<S: PageSession> Traversal<S> {
    pub fn new(session: S) -> Self {
        Self { session }
    }

    pub async fn run(&self) -> TraversalReport {
        let mut state = TraversalState::Init;
        let mut records: Vec<ProductRecord> = Vec::new();
        let mut pages_scraped = 0;
        let mut total_pages = 1;

        loop {
            state = match state {
                TraversalState::Init => TraversalState::DetectingPages,

                TraversalState::DetectingPages => {
                    total_pages = self.session.detect_total_pages().await;
                    log_info!("[traversal] Will attempt to scrape {} pages", total_pages);
                    TraversalState::ScrapingPage(1)
                }

                TraversalState::ScrapingPage(page) => {
                    if let Err(e) = self.session.prepare_page().await {
                        log_warn!("[traversal] Could not force-render page {}: {}", page, e);
                    }

                    match self.session.scrape_current().await {
                        Ok(page_records) if page_records.is_empty() && page > 1 => {
                            log_warn!(
                                "[traversal] No products on page {}, might have reached the end",
                                page
                            );
                            TraversalState::Aborted
                        }
                        Ok(page_records) => {
                            if page_records.is_empty() {
                                log_warn!("[traversal] No products found on page {}", page);
                            } else {
                                pages_scraped += 1;
                                log_info!(
                                    "[traversal] Found {} products on page {} ({} total so far)",
                                    page_records.len(),
                                    page,
                                    records.len() + page_records.len()
                                );
                            }
                            records.extend(page_records);

                            if page < total_pages {
                                TraversalState::Navigating(page + 1)
                            } else {
                                TraversalState::Done
                            }
                        }
                        Err(e) => {
                            log_warn!("[traversal] Failed to scrape page {}: {}", page, e);
                            TraversalState::Aborted
                        }
                    }
                }

                TraversalState::Navigating(page) => {
                    if self.session.go_to(page).await {
                        TraversalState::ScrapingPage(page)
                    } else {
                        log_warn!(
                            "[traversal] Could not navigate to page {}, stopping here",
                            page
                        );
                        TraversalState::Aborted
                    }
                }

                TraversalState::Done => {
                    return TraversalReport {
                        records,
                        pages_scraped,
                        total_pages,
                        outcome: TraversalOutcome::Completed,
                    };
                }

                TraversalState::Aborted => {
                    return TraversalReport {
                        records,
                        pages_scraped,
                        total_pages,
                        outcome: TraversalOutcome::Aborted,
                    };
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn product(name: &str) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            price: "$1".to_string(),
            description: String::new(),
            image_url: String::new(),
        }
    }

    struct ScriptedSession {
        pages: Vec<Vec<ProductRecord>>,
        total: usize,
        unreachable_page: Option<usize>,
        current: Mutex<usize>,
        visited: Mutex<Vec<usize>>,
    }

    impl ScriptedSession {
        fn new(pages: Vec<Vec<ProductRecord>>, total: usize) -> Self {
            Self {
                pages,
                total,
                unreachable_page: None,
                current: Mutex::new(1),
                visited: Mutex::new(Vec::new()),
            }
        }

        fn with_unreachable_page(mut self, page: usize) -> Self {
            self.unreachable_page = Some(page);
            self
        }

        fn visited(&self) -> Vec<usize> {
            self.visited.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSession for ScriptedSession {
        async fn detect_total_pages(&self) -> usize {
            self.total
        }

        async fn prepare_page(&self) -> Result<()> {
            Ok(())
        }

        async fn scrape_current(&self) -> Result<Vec<ProductRecord>> {
            let page = *self.current.lock().unwrap();
            Ok(self.pages[page - 1].clone())
        }

        async fn go_to(&self, page: usize) -> bool {
            if self.unreachable_page == Some(page) {
                return false;
            }
            *self.current.lock().unwrap() = page;
            self.visited.lock().unwrap().push(page);
            true
        }
    }

    #[tokio::test]
    async fn collects_records_across_all_pages() {
        let session = ScriptedSession::new(
            vec![
                vec![product("a"), product("b")],
                vec![product("c")],
                vec![product("d")],
            ],
            3,
        );
        let report = Traversal::new(session).run().await;

        assert_eq!(report.outcome, TraversalOutcome::Completed);
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.pages_scraped, 3);
        assert_eq!(report.total_pages, 3);
    }

    #[tokio::test]
    async fn empty_middle_page_stops_traversal_keeping_earlier_records() {
        let session = ScriptedSession::new(
            vec![
                vec![product("a"), product("b")],
                vec![],
                vec![product("never-reached")],
            ],
            3,
        );
        let traversal = Traversal::new(session);
        let report = traversal.run().await;

        assert_eq!(report.outcome, TraversalOutcome::Aborted);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].name, "a");
        assert_eq!(report.pages_scraped, 1);
        // Page 2 was visited; page 3 never attempted.
        assert_eq!(traversal.session.visited(), vec![2]);
    }

    #[tokio::test]
    async fn navigation_failure_aborts_but_keeps_records() {
        let session = ScriptedSession::new(
            vec![vec![product("a")], vec![product("b")], vec![product("c")]],
            3,
        )
        .with_unreachable_page(3);
        let report = Traversal::new(session).run().await;

        assert_eq!(report.outcome, TraversalOutcome::Aborted);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.pages_scraped, 2);
    }

    #[tokio::test]
    async fn single_page_site_never_navigates() {
        let session = ScriptedSession::new(vec![vec![product("only")]], 1);
        let traversal = Traversal::new(session);
        let report = traversal.run().await;

        assert_eq!(report.outcome, TraversalOutcome::Completed);
        assert_eq!(report.records.len(), 1);
        assert!(traversal.session.visited().is_empty());
    }

    #[tokio::test]
    async fn empty_first_page_is_not_an_abort() {
        let session = ScriptedSession::new(vec![vec![], vec![product("late")]], 2);
        let report = Traversal::new(session).run().await;

        assert_eq!(report.outcome, TraversalOutcome::Completed);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.pages_scraped, 1);
    }
}
