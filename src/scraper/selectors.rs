use scraper::{ElementRef, Selector};

// Ordered list of structural query patterns, evaluated first-match-wins:
// the first pattern producing a non-empty result decides the outcome and
// later patterns are never consulted. An exhausted chain is an empty
// result, not an error.
pub struct SelectorChain {
    patterns: Vec<(&'static str, Selector)>,
}

pub struct ChainMatch<'a> {
    pub pattern: &'static str,
    pub elements: Vec<ElementRef<'a>>,
}

impl SelectorChain {
    pub fn new(patterns: &[&'static str]) -> Self {
        Self {
            patterns: patterns
                .iter()
                .map(|p| (*p, Selector::parse(p).unwrap()))
                .collect(),
        }
    }

    pub fn first_match<'a>(&self, root: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.patterns
            .iter()
            .find_map(|(_, selector)| root.select(selector).next())
    }

    pub fn all_matches<'a>(&self, root: ElementRef<'a>) -> Option<ChainMatch<'a>> {
        for (pattern, selector) in &self.patterns {
            let elements: Vec<ElementRef<'a>> = root.select(selector).collect();
            if !elements.is_empty() {
                return Some(ChainMatch { pattern, elements });
            }
        }
        None
    }
}
