//! Browser-driven text retrieval.
//!
//! Every page is loaded through the text-extraction proxy rather than
//! directly, so the browser only ever renders the proxy's stripped-down
//! text view. One element locator, supplied by the user and validated once
//! against a sample page, is applied to every link in the run.
//!
//! ```text
//! normalized link → proxy URL → page load → poll locator → text lines
//! ```

mod chrome;
pub mod retry;

pub use chrome::ChromeScraper;

use async_trait::async_trait;

use crate::app::Result;

/// Result of extracting one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Non-empty text lines of the located element, in document order.
    Lines(Vec<String>),
    /// The locator never matched within the per-link deadline.
    TimedOut,
}

/// Trait for locator-based page text extraction.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Load `link` (already normalized, `//host/path` form) through the
    /// proxy and extract the text of the element `locator` points at.
    async fn extract(&self, link: &str, locator: &str) -> Result<Extraction>;
}
