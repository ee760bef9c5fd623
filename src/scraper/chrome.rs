use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::app::{GleanerError, Result};
use crate::config::RetrieverConfig;
use crate::scraper::retry::{poll_until, PollOutcome};
use crate::scraper::{Extraction, Scraper};

/// Chrome-based scraper using chromiumoxide.
///
/// Holds a single browser and a single page; links are navigated
/// sequentially, never in parallel. This matches how textise.net tolerates
/// being driven and keeps the timeout bookkeeping simple.
pub struct ChromeScraper {
    browser: Browser,
    page: Page,
    config: RetrieverConfig,
    handler_task: JoinHandle<()>,
}

impl ChromeScraper {
    /// Launch the browser and open the shared page.
    pub async fn launch(config: RetrieverConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--incognito")
            // Some of the target sites serve mixed content or stale certs
            .arg("--allow-running-insecure-content")
            .arg("--ignore-certificate-errors");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| GleanerError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            GleanerError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Drain browser events
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| GleanerError::Browser(format!("Failed to create page: {}", e)))?;

        Ok(Self {
            browser,
            page,
            config,
            handler_task,
        })
    }

    /// Shut the browser down. Safe to skip on error paths; the process
    /// exiting kills the child browser anyway.
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| GleanerError::Browser(format!("Failed to close browser: {}", e)))?;
        self.handler_task.abort();
        Ok(())
    }

    fn proxy_url(&self, link: &str) -> String {
        format!("{}{}", self.config.proxy_prefix, link)
    }

    async fn element_text(&self, locator: &str) -> std::result::Result<String, CdpError> {
        let element = self.page.find_xpath(locator).await?;
        let text = element.inner_text().await?;
        // An element with no text is a real answer (zero lines), not a
        // failure; the prober decides what to do with it.
        Ok(text.unwrap_or_default())
    }
}

/// Whether a CDP error corresponds to the element not being on the page
/// yet, or being detached by a reload. Both resolve themselves once the
/// proxy finishes rendering, so the poll loop retries them silently.
fn is_transient(err: &CdpError) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("could not find node")
        || msg.contains("no node found")
        || msg.contains("no search results")
        || msg.contains("detached")
}

#[async_trait]
impl Scraper for ChromeScraper {
    async fn extract(&self, link: &str, locator: &str) -> Result<Extraction> {
        let url = self.proxy_url(link);
        tracing::debug!(%url, "loading link through proxy");

        self.page
            .goto(url)
            .await
            .map_err(|e| GleanerError::Browser(format!("Navigation failed: {}", e)))?;

        let outcome = poll_until(
            self.config.timeout(),
            self.config.poll_interval(),
            is_transient,
            || self.element_text(locator),
        )
        .await
        .map_err(|e| GleanerError::Browser(format!("Extraction failed: {}", e)))?;

        match outcome {
            PollOutcome::Completed(text) => {
                let lines: Vec<String> = text
                    .split('\n')
                    .filter(|l| !l.is_empty())
                    .map(|l| l.to_string())
                    .collect();
                tracing::debug!(link, lines = lines.len(), "extracted");
                Ok(Extraction::Lines(lines))
            }
            PollOutcome::DeadlineExpired => {
                tracing::debug!(link, "deadline expired, link skipped");
                Ok(Extraction::TimedOut)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(is_transient(&CdpError::msg("Could not find node with given id")));
        assert!(is_transient(&CdpError::msg("Node with given id does not belong to the document (detached)")));
        assert!(is_transient(&CdpError::msg("No search results for given query")));
        assert!(!is_transient(&CdpError::msg("Target crashed")));
    }

    #[test]
    fn test_dead_session_errors_are_fatal() {
        // A lost browser session must propagate, not be re-polled until
        // the deadline and recorded as an ordinary skipped link.
        assert!(!is_transient(&CdpError::msg("Session with given id not found")));
        assert!(!is_transient(&CdpError::msg("Frame with given id not found")));
        assert!(!is_transient(&CdpError::msg("No target with given id found")));
    }
}
