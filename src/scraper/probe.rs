use super::content::CONTAINER_SELECTORS;
pub use crate::{log_debug, log_info};
use scraper::{Html, Selector};
use serde::Serialize;

const EXTRA_PROBE_SELECTORS: &[&str] = &["[data-product]"];

// Diagnostic view of an unknown page: which candidate container patterns
// match, and what the product-like markup actually looks like.
pub struct StructureProbe<'a> {
    document: &'a Html,
}

#[derive(Debug, Serialize)]
pub struct StructureReport {
    pub title: Option<String>,
    pub matches: Vec<SelectorMatchCount>,
    pub product_class_samples: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SelectorMatchCount {
    pub selector: String,
    pub count: usize,
}

impl<'a> StructureProbe<'a> {
    pub(crate) fn new(document: &'a Html) -> Self {
        Self { document }
    }

    pub fn report(&self) -> StructureReport {
        let title = self.page_title();
        log_info!(
            "[probe] Page title: {}",
            title.as_deref().unwrap_or("No title found")
        );

        let mut matches = Vec::new();
        for pattern in CONTAINER_SELECTORS.iter().chain(EXTRA_PROBE_SELECTORS) {
            let selector = Selector::parse(pattern).unwrap();
            let count = self.document.select(&selector).count();
            if count > 0 {
                log_info!(
                    "[probe] Found {} elements with selector: {}",
                    count,
                    pattern
                );
                matches.push(SelectorMatchCount {
                    selector: pattern.to_string(),
                    count,
                });
            }
        }
        if matches.is_empty() {
            log_info!("[probe] No candidate container selector matched");
        }

        let product_class_samples = self.product_class_samples();
        for (index, classes) in product_class_samples.iter().enumerate() {
            log_debug!("[probe] Product div {} classes: {}", index + 1, classes);
        }

        StructureReport {
            title,
            matches,
            product_class_samples,
        }
    }

    fn page_title(&self) -> Option<String> {
        let selector = Selector::parse("title").unwrap();
        self.document
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    fn product_class_samples(&self) -> Vec<String> {
        let selector = Selector::parse("div[class*=\"product\"]").unwrap();
        self.document
            .select(&selector)
            .take(3)
            .map(|el| el.value().classes().collect::<Vec<_>>().join(" "))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::scraper::Scraper;

    #[test]
    fn reports_matching_selectors_and_samples() {
        let scraper = Scraper::new(
            r#"<html><head><title>Shop</title></head><body>
                <div class="product-item special"><h3>A</h3></div>
                <div class="product-item"><h3>B</h3></div>
            </body></html>"#,
        );
        let report = scraper.probe().report();

        assert_eq!(report.title.as_deref(), Some("Shop"));
        assert!(report
            .matches
            .iter()
            .any(|m| m.selector == "div.product-item" && m.count == 2));
        assert_eq!(report.product_class_samples.len(), 2);
        assert_eq!(report.product_class_samples[0], "product-item special");
    }

    #[test]
    fn empty_page_reports_nothing() {
        let scraper = Scraper::new("<html><body></body></html>");
        let report = scraper.probe().report();

        assert!(report.title.is_none());
        assert!(report.matches.is_empty());
        assert!(report.product_class_samples.is_empty());
    }
}
