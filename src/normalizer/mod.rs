//! Link normalization for the text-extraction proxy.
//!
//! textise.net wants links without a scheme, starting at `//host`. Links
//! whose scheme it cannot handle, and links that point at non-text content,
//! are discarded up front so the retrieval loop never sees them.

/// Result of a normalization pass. Both lists preserve input order;
/// discarded links keep their lowercased original form for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLinks {
    pub links: Vec<String>,
    pub discarded: Vec<String>,
}

#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite raw links into the proxy's expected form.
    ///
    /// Per link: lowercase, strip a trailing slash for processing (restored
    /// afterwards, since it can change what a site serves), rewrite the
    /// scheme prefix to `//`, and drop PDF and feed links.
    pub fn normalize(&self, raw: &[String]) -> NormalizedLinks {
        let mut links = Vec::new();
        let mut discarded = Vec::new();

        for link in raw {
            let link = link.to_lowercase();

            let (body, had_slash) = match link.strip_suffix('/') {
                Some(stripped) => (stripped, true),
                None => (link.as_str(), false),
            };

            let rewritten = if let Some(rest) = body.strip_prefix("https://") {
                format!("//{}", rest)
            } else if let Some(rest) = body.strip_prefix("http://") {
                format!("//{}", rest)
            } else if let Some(rest) = body.strip_prefix("www.") {
                format!("//{}", rest)
            } else {
                discarded.push(link);
                continue;
            };

            // Non-text or feed content the proxy can't render
            if link.ends_with(".pdf") || link.ends_with("rss=1") || link.ends_with("atom=1") {
                discarded.push(link);
                continue;
            }

            if had_slash {
                links.push(format!("{}/", rewritten));
            } else {
                links.push(rewritten);
            }
        }

        NormalizedLinks { links, discarded }
    }
}
