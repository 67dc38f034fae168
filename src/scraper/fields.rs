use super::selectors::SelectorChain;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

const NAME_SELECTORS: &[&str] = &[
    ".product-list-item__title",
    ".product-title",
    ".product-name",
    "h2",
    "h3",
    "h4",
    "[class*=\"title\"]",
    "[class*=\"name\"]",
];

const PRICE_SELECTORS: &[&str] = &[
    ".product-list-item__price",
    ".product-price",
    ".price",
    "[class*=\"price\"]",
    "[data-price]",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    ".product-list-item__description",
    ".product-description",
    ".description",
    ".product-summary",
    "p",
];

const IMAGE_SELECTORS: &[&str] = &["img"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Image_URL")]
    pub image_url: String,
}

pub struct FieldExtractor {
    name: SelectorChain,
    price: SelectorChain,
    description: SelectorChain,
    image: SelectorChain,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self {
            name: SelectorChain::new(NAME_SELECTORS),
            price: SelectorChain::new(PRICE_SELECTORS),
            description: SelectorChain::new(DESCRIPTION_SELECTORS),
            image: SelectorChain::new(IMAGE_SELECTORS),
        }
    }

    // `index` is the 0-based container position, used for the fallback name.
    pub fn extract(&self, container: ElementRef, index: usize) -> Option<ProductRecord> {
        let name = text_field(&self.name, container);
        let price = text_field(&self.price, container);

        // A record exists only if at least one of these came from the DOM;
        // defaults never count toward the gate.
        if name.is_none() && price.is_none() {
            return None;
        }

        Some(ProductRecord {
            name: name.unwrap_or_else(|| format!("Product {}", index + 1)),
            price: price.unwrap_or_else(|| "Price not found".to_string()),
            description: text_field(&self.description, container).unwrap_or_default(),
            image_url: self.image_url(container).unwrap_or_default(),
        })
    }

    // Prefers src; lazy-loaded images only carry data-src.
    fn image_url(&self, container: ElementRef) -> Option<String> {
        let img = self.image.first_match(container)?;
        img.value()
            .attr("src")
            .filter(|s| !s.trim().is_empty())
            .or_else(|| img.value().attr("data-src").filter(|s| !s.trim().is_empty()))
            .map(str::to_string)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn text_field(chain: &SelectorChain, container: ElementRef) -> Option<String> {
    chain
        .first_match(container)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first_div(html: &Html) -> ElementRef {
        html.select(&scraper::Selector::parse("div").unwrap())
            .next()
            .unwrap()
    }

    #[test]
    fn extracts_all_fields() {
        let html = Html::parse_document(
            r#"<div class="product">
                <h3 class="product-title">  Silk Scarf  </h3>
                <span class="product-price">$29.99</span>
                <p class="product-description">Hand-rolled hem.</p>
                <img src="scarf.jpg">
            </div>"#,
        );
        let record = FieldExtractor::new().extract(first_div(&html), 0).unwrap();

        assert_eq!(record.name, "Silk Scarf");
        assert_eq!(record.price, "$29.99");
        assert_eq!(record.description, "Hand-rolled hem.");
        assert_eq!(record.image_url, "scarf.jpg");
    }

    #[test]
    fn name_only_passes_gate_with_default_price() {
        let html = Html::parse_document(
            r#"<div><h2>Bare Listing</h2></div>"#,
        );
        let record = FieldExtractor::new().extract(first_div(&html), 0).unwrap();

        assert_eq!(record.name, "Bare Listing");
        assert_eq!(record.price, "Price not found");
        assert_eq!(record.description, "");
        assert_eq!(record.image_url, "");
    }

    #[test]
    fn price_only_passes_gate_with_positional_name() {
        let html = Html::parse_document(
            r#"<div><span class="price">$5</span></div>"#,
        );
        let record = FieldExtractor::new().extract(first_div(&html), 4).unwrap();

        assert_eq!(record.name, "Product 5");
        assert_eq!(record.price, "$5");
    }

    #[test]
    fn neither_name_nor_price_is_rejected() {
        let html = Html::parse_document(
            r#"<div><img src="decorative.png"><span class="badge">New</span></div>"#,
        );
        assert!(FieldExtractor::new().extract(first_div(&html), 0).is_none());
    }

    #[test]
    fn whitespace_only_name_does_not_pass_gate() {
        let html = Html::parse_document(
            r#"<div><h3 class="product-title">   </h3></div>"#,
        );
        assert!(FieldExtractor::new().extract(first_div(&html), 0).is_none());
    }

    #[test]
    fn lazy_loaded_image_falls_back_to_data_src() {
        let html = Html::parse_document(
            r#"<div><h2>Lamp</h2><img data-src="x.jpg"></div>"#,
        );
        let record = FieldExtractor::new().extract(first_div(&html), 0).unwrap();
        assert_eq!(record.image_url, "x.jpg");
    }

    #[test]
    fn empty_src_falls_back_to_data_src() {
        let html = Html::parse_document(
            r#"<div><h2>Lamp</h2><img src="" data-src="lazy.jpg"></div>"#,
        );
        let record = FieldExtractor::new().extract(first_div(&html), 0).unwrap();
        assert_eq!(record.image_url, "lazy.jpg");
    }

    #[test]
    fn specific_name_selector_beats_generic_heading() {
        let html = Html::parse_document(
            r#"<div>
                <h2>Category Heading</h2>
                <span class="product-name">Actual Name</span>
            </div>"#,
        );
        let record = FieldExtractor::new().extract(first_div(&html), 0).unwrap();
        assert_eq!(record.name, "Actual Name");
    }
}
