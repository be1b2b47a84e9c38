//! HTML section extraction
//!
//! Locates the watched section of a page with a CSS selector and returns its
//! text, trimmed.

use scraper::{Html, Selector};

/// Extracts the text of one named section from page markup
pub struct ContentExtractor {
    selector: Selector,
    source: String,
}

impl std::fmt::Debug for ContentExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentExtractor")
            .field("selector", &self.source)
            .finish()
    }
}

impl ContentExtractor {
    pub fn new(selector: &str) -> crate::Result<Self> {
        let parsed = Selector::parse(selector).map_err(|e| {
            crate::NewswatchError::Config(format!("Invalid CSS selector '{}': {:?}", selector, e))
        })?;

        Ok(Self {
            selector: parsed,
            source: selector.to_string(),
        })
    }

    pub fn selector(&self) -> &str {
        &self.source
    }

    /// Text of the first matching element, or `None` when there is nothing to report
    pub fn extract(&self, markup: Option<&str>) -> Option<String> {
        self.try_extract(markup).ok()
    }

    /// Like [`extract`](Self::extract) but says why nothing was found
    pub fn try_extract(&self, markup: Option<&str>) -> crate::Result<String> {
        let markup = match markup {
            Some(m) if !m.trim().is_empty() => m,
            _ => {
                return Err(crate::NewswatchError::Extraction(
                    "no markup to parse".to_string(),
                ))
            }
        };

        let document = Html::parse_document(markup);
        let element = document.select(&self.selector).next().ok_or_else(|| {
            crate::NewswatchError::Extraction(format!("no element matches '{}'", self.source))
        })?;

        let text: String = element.text().collect();
        let text = text.trim();
        if text.is_empty() {
            return Err(crate::NewswatchError::Extraction(format!(
                "element '{}' has no text",
                self.source
            )));
        }

        Ok(text.to_string())
    }
}
