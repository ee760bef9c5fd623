//! Pipeline orchestration.
//!
//! Control flows strictly input → normalize → probe → retrieve → clean →
//! export; each stage consumes the previous stage's output in full before
//! the next begins. The browser session is owned here and driven
//! sequentially, never from more than one flow at a time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

use crate::app::{AppContext, GleanerError, Result};
use crate::cleaner::{clean_lines, CleanOptions};
use crate::cli::Cli;
use crate::config::RetrieverConfig;
use crate::export;
use crate::input;
use crate::interact::Interact;
use crate::normalizer::Normalizer;
use crate::scraper::{ChromeScraper, Extraction, Scraper};

/// Output of the bulk retrieval pass.
#[derive(Debug, Default)]
pub struct Retrieved {
    /// Flat line sequence: for each scraped link, its canonical form
    /// followed by the extracted text lines.
    pub lines: Vec<String>,
    /// Canonical forms of links that timed out.
    pub discarded: Vec<String>,
}

/// Run the whole pipeline.
pub async fn run(ctx: &AppContext, cli: Cli) -> Result<()> {
    let mut config = ctx.config.retriever.clone();
    if let Some(timeout) = cli.timeout_secs {
        config.timeout_secs = timeout;
    }
    if cli.headed {
        config.headless = false;
    }

    let (links, mut discarded, input_dir) = select_input(ctx, cli.input)?;

    ctx.ui.info(&format!(
        "{} links ready for extraction ({} discarded by normalization)",
        links.len(),
        discarded.len()
    ));

    let scraper = ChromeScraper::launch(config.clone()).await?;

    let result = drive(ctx, &scraper, &config, cli.locator, &links).await;

    // Always try to shut the browser down, even when the probe failed.
    if let Err(e) = scraper.close().await {
        tracing::warn!("browser shutdown failed: {}", e);
    }

    let retrieved = result?;
    discarded.extend(retrieved.discarded);

    finish(ctx, cli.output, &retrieved.lines, &discarded, &input_dir, cli.no_open)
}

/// Probe on the first link, then retrieve everything.
async fn drive(
    ctx: &AppContext,
    scraper: &dyn Scraper,
    config: &RetrieverConfig,
    initial_locator: Option<String>,
    links: &[String],
) -> Result<Retrieved> {
    let locator = probe(
        scraper,
        ctx.ui.as_ref(),
        &links[0],
        initial_locator,
        config.preview_lines,
    )
    .await?;

    let bar = ProgressBar::new(links.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} {bar:40.green} {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("Link processing");

    let retrieved = retrieve_all(scraper, &locator, links, config, &bar).await?;
    bar.finish();

    Ok(retrieved)
}

/// Input selection loop: read and normalize a link file, re-prompting on
/// unusable files until the user either supplies a good one or gives up.
fn select_input(
    ctx: &AppContext,
    initial: Option<PathBuf>,
) -> Result<(Vec<String>, Vec<String>, PathBuf)> {
    let normalizer = Normalizer::new();
    let mut next_path = initial;

    loop {
        let path = match next_path.take() {
            Some(path) => path,
            None => ctx
                .ui
                .prompt_path("File containing links (.xml sitemap or .txt)", None)?
                .ok_or(GleanerError::Aborted)?,
        };

        let raw = match input::read_links(&path) {
            Ok(raw) => raw,
            Err(e @ (GleanerError::InputFile(_) | GleanerError::Io(_))) => {
                ctx.ui.warn(&e.to_string());
                if ctx.ui.confirm("Would you like to select a different file?", true)? {
                    continue;
                }
                return Err(GleanerError::Aborted);
            }
            Err(e) => return Err(e),
        };

        let normalized = normalizer.normalize(&raw);

        if normalized.links.is_empty() {
            ctx.ui.warn(
                "No suitable links were found. Please check that the file \
                 has links suitable for extraction.",
            );
            if ctx.ui.confirm("Would you like to select a different file?", true)? {
                continue;
            }
            return Err(GleanerError::Aborted);
        }

        let input_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        return Ok((normalized.links, normalized.discarded, input_dir));
    }
}

/// Validate a locator against one sample link.
///
/// Probe failure semantics differ from the bulk pass: a timeout here is
/// fatal, because a locator that can't be confirmed on the sample would
/// time out on every link.
pub async fn probe(
    scraper: &dyn Scraper,
    ui: &dyn Interact,
    sample_link: &str,
    initial: Option<String>,
    preview_lines: usize,
) -> Result<String> {
    let mut locator = match initial {
        Some(locator) => locator,
        None => ui.prompt_locator(false)?.ok_or(GleanerError::Aborted)?,
    };

    loop {
        tracing::debug!(%locator, "probing locator on sample link");

        match scraper.extract(sample_link, &locator).await? {
            Extraction::TimedOut => {
                return Err(GleanerError::Browser(
                    "Link extraction timeout: either the link or the locator is invalid".into(),
                ));
            }
            Extraction::Lines(lines) => {
                let preview: Vec<String> = lines.iter().take(preview_lines).cloned().collect();

                if preview.is_empty() {
                    ui.info("No text has been extracted. Please try another locator.");
                } else if ui.confirm_preview(&preview)? {
                    return Ok(locator);
                }

                locator = ui.prompt_locator(true)?.ok_or(GleanerError::Aborted)?;
            }
        }
    }
}

/// Apply the accepted locator to every link, skipping links that time out.
///
/// Progress advances exactly once per link regardless of outcome. After
/// each successful link a small random pause keeps the proxy's bot
/// protection quiet; skipped links move on immediately.
pub async fn retrieve_all(
    scraper: &dyn Scraper,
    locator: &str,
    links: &[String],
    config: &RetrieverConfig,
    bar: &ProgressBar,
) -> Result<Retrieved> {
    let mut retrieved = Retrieved::default();

    for link in links {
        let canonical = format!("https:{}", link);

        match scraper.extract(link, locator).await? {
            Extraction::Lines(lines) => {
                retrieved.lines.push(canonical);
                retrieved.lines.extend(lines);
                bar.inc(1);

                let jitter_ms = rand::thread_rng()
                    .gen_range(config.jitter_min_ms..=config.jitter_max_ms.max(config.jitter_min_ms));
                tokio::time::sleep(Duration::from_millis(jitter_ms)).await;
            }
            Extraction::TimedOut => {
                tracing::info!(%link, "link timed out, recorded as discarded");
                retrieved.discarded.push(canonical);
                bar.inc(1);
            }
        }
    }

    Ok(retrieved)
}

/// Cleaning options, output persistence, discarded-link reporting.
fn finish(
    ctx: &AppContext,
    output: Option<PathBuf>,
    lines: &[String],
    discarded: &[String],
    input_dir: &Path,
    no_open: bool,
) -> Result<()> {
    let options = CleanOptions {
        strip_measurements: ctx.ui.confirm(
            "Remove lines that contain only numbers and measurements? \
             (they are usually not translatable)",
            false,
        )?,
        strip_source_links: ctx.ui.confirm(
            "Remove the source links recorded above each page's text? \
             (you won't be able to tell where lines came from)",
            false,
        )?,
    };

    let cleaned = clean_lines(lines, options);

    let output = match output {
        Some(path) => path,
        None => ctx
            .ui
            .prompt_path(
                "Save extracted text to (.xlsx or .txt)",
                Some("extracted_text.xlsx"),
            )?
            .ok_or(GleanerError::Aborted)?,
    };

    export::save_lines(&output, &cleaned)?;
    ctx.ui
        .info(&format!("Saved {} lines to {}", cleaned.len(), output.display()));

    if !discarded.is_empty() {
        let prompt = format!(
            "{} links were discarded. Save them to {}?",
            discarded.len(),
            export::DISCARDED_FILE_NAME
        );
        if ctx.ui.confirm(&prompt, true)? {
            let path = export::save_discarded(input_dir, discarded)?;
            ctx.ui
                .info(&format!("Discarded links saved to {}", path.display()));
        }
    }

    if !no_open {
        if let Err(e) = open::that(&output) {
            ctx.ui
                .warn(&format!("Could not open {}: {}", output.display(), e));
        }
    }

    Ok(())
}
