mod content;
mod fields;
mod probe;
mod selectors;

pub use content::ContentScraper;
pub use fields::{FieldExtractor, ProductRecord};
pub use probe::{StructureProbe, StructureReport};
pub use selectors::SelectorChain;

use scraper::Html;

pub struct Scraper {
    document: Html,
}

impl Scraper {
    pub fn new(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn content(&self) -> ContentScraper {
        ContentScraper::new(&self.document)
    }

    pub fn probe(&self) -> StructureProbe {
        StructureProbe::new(&self.document)
    }
}
