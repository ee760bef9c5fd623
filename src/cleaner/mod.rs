//! Post-processing of the aggregated scraped text.
//!
//! The proxy's text view leaks a few artifacts that are useless for
//! translation: Cloudflare's obfuscated-email placeholder and image
//! placeholders of the form `[Image: ...]`. Those are always removed.
//! Two further passes are opt-in per run: dropping lines that are nothing
//! but numbers and measurement units, and dropping the source-link marker
//! lines the retriever inserts above each page's text.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[email protected\]").expect("hard-coded pattern"));

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[Image.*\]").expect("hard-coded pattern"));

// Matches lines consisting entirely of digits, punctuation, and one to
// three short unit suffixes (kg, mm, kW, Mpix, RPM, ...).
static MEASUREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(([\W\d_x])+?(([kdcm]|[kmg]|[dcml]|[tgmkb]|[NVAWP]){1,2}|Mpix|RPM){0,1}){1,3}?$")
        .expect("hard-coded pattern")
});

static SOURCE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https:\S+$").expect("hard-coded pattern"));

/// Which of the optional cleaning passes to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    /// Drop lines that are only numbers/units (not translatable).
    pub strip_measurements: bool,
    /// Drop the source-link lines inserted by the retriever.
    pub strip_source_links: bool,
}

/// Clean the flat line sequence produced by the retriever.
///
/// Steps run in a fixed order: trim, unconditional pattern removal,
/// optional pattern removal, drop empties. The whole pass is idempotent.
pub fn clean_lines(lines: &[String], options: CleanOptions) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !EMAIL.is_match(line) && !IMAGE.is_match(line))
        .filter(|line| !(options.strip_measurements && MEASUREMENT.is_match(line)))
        .filter(|line| !(options.strip_source_links && SOURCE_LINK.is_match(line)))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
