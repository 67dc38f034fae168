use super::fields::{FieldExtractor, ProductRecord};
use super::selectors::SelectorChain;
pub use crate::{log_info, log_warn};
use scraper::Html;

// Candidate container patterns, most specific first. The chain stops at the
// first pattern yielding any elements, even if that set contains non-product
// noise; the name-or-price gate downstream is the only filter after that.
pub(crate) const CONTAINER_SELECTORS: &[&str] = &[
    "div.product-list-item",
    "div.product-item",
    "div.product",
    "div[class*=\"product\"]",
    "article.product",
    "li.product",
    ".product-card",
    ".product-tile",
];

pub struct ContentScraper<'a> {
    document: &'a Html,
}

impl<'a> ContentScraper<'a> {
    pub(crate) fn new(document: &'a Html) -> Self {
        Self { document }
    }

    pub fn extract_products(&self) -> Vec<ProductRecord> {
        let chain = SelectorChain::new(CONTAINER_SELECTORS);

        let Some(found) = chain.all_matches(self.document.root_element()) else {
            log_warn!("[scraper] No product elements found with any selector");
            return Vec::new();
        };

        log_info!(
            "[scraper] Using selector: {} (found {} containers)",
            found.pattern,
            found.elements.len()
        );

        let extractor = FieldExtractor::new();
        let mut products = Vec::new();

        for (index, container) in found.elements.into_iter().enumerate() {
            match extractor.extract(container, index) {
                Some(record) => {
                    log_info!("[scraper] Successfully scraped: {}", record.name);
                    products.push(record);
                }
                None => {
                    log_warn!(
                        "[scraper] Skipped container {} - no name or price found",
                        index + 1
                    );
                }
            }
        }

        log_info!("[scraper] Extracted {} products", products.len());
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::Scraper;

    #[test]
    fn extracts_products_from_specific_containers() {
        let scraper = Scraper::new(
            r#"<html><body>
                <div class="product-list-item">
                    <h3 class="product-list-item__title">Candle</h3>
                    <span class="product-list-item__price">$12</span>
                </div>
                <div class="product-list-item">
                    <h3 class="product-list-item__title">Vase</h3>
                    <span class="product-list-item__price">$30</span>
                </div>
            </body></html>"#,
        );
        let products = scraper.content().extract_products();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Candle");
        assert_eq!(products[1].price, "$30");
    }

    #[test]
    fn broad_pattern_engages_only_after_specific_ones_miss() {
        let scraper = Scraper::new(
            r#"<html><body>
                <div class="featured-products-grid">
                    <h2>Grid Title</h2>
                </div>
            </body></html>"#,
        );
        // Only div[class*="product"] matches, and it sweeps in the grid
        // wrapper; the wrapper carries an h2, which the name chain accepts.
        let products = scraper.content().extract_products();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Grid Title");
        assert_eq!(products[0].price, "Price not found");
    }

    #[test]
    fn gated_out_containers_are_skipped_without_aborting_the_page() {
        let scraper = Scraper::new(
            r#"<html><body>
                <li class="product"><h3>Good</h3></li>
                <li class="product"><img src="only-an-image.jpg"></li>
                <li class="product"><span class="price">$9</span></li>
            </body></html>"#,
        );
        let products = scraper.content().extract_products();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Good");
        assert_eq!(products[1].name, "Product 3");
        assert_eq!(products[1].price, "$9");
    }

    #[test]
    fn page_without_product_markup_yields_empty() {
        let scraper = Scraper::new("<html><body><p>Coming soon.</p></body></html>");
        assert!(scraper.content().extract_products().is_empty());
    }
}
