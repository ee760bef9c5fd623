use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "gleaner")]
#[command(
    about = "Extract translatable text from a list of web pages",
    long_about = "Extract translatable text from a list of web pages.\n\n\
                  Links are loaded through textise.net's text-only view in a \
                  headless browser, the element you point at with an XPath \
                  locator is scraped from every page, and the cleaned result \
                  is saved to a spreadsheet or text file.\n\n\
                  Anything not given as a flag is asked for interactively."
)]
pub struct Cli {
    /// File containing links: an .xml sitemap export or a .txt file with
    /// one URL per line. Prompted for when omitted.
    pub input: Option<PathBuf>,

    /// Where to save the extracted text (.xlsx or .txt). Prompted for when
    /// omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// XPath locator for the element containing the page text. Validated
    /// against the first link before bulk extraction either way.
    #[arg(short, long)]
    pub locator: Option<String>,

    /// Per-link timeout in seconds (overrides the config file)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Run the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Don't open the saved output file when done
    #[arg(long)]
    pub no_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["gleaner"]);
        assert!(cli.input.is_none());
        assert!(cli.output.is_none());
        assert!(cli.locator.is_none());
        assert!(cli.timeout_secs.is_none());
        assert!(!cli.headed);
        assert!(!cli.no_open);
    }

    #[test]
    fn test_full_invocation() {
        let cli = Cli::parse_from([
            "gleaner",
            "sitemap.xml",
            "--output",
            "out.xlsx",
            "--locator",
            "/html/body/div[5]",
            "--timeout-secs",
            "30",
            "--headed",
            "--no-open",
        ]);

        assert_eq!(cli.input, Some(PathBuf::from("sitemap.xml")));
        assert_eq!(cli.output, Some(PathBuf::from("out.xlsx")));
        assert_eq!(cli.locator.as_deref(), Some("/html/body/div[5]"));
        assert_eq!(cli.timeout_secs, Some(30));
        assert!(cli.headed);
        assert!(cli.no_open);
    }
}
