//! User-interaction boundary.
//!
//! The pipeline blocks on the user at a few well-defined checkpoints:
//! picking an input file, validating the locator against a sample page,
//! choosing cleaning options, and deciding where results go. All of those
//! go through the [`Interact`] trait, so the pipeline itself never touches
//! a terminal and can be driven by a scripted double in tests.

use std::path::PathBuf;

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::app::Result;

pub trait Interact {
    /// Ask a yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Ask for an XPath locator. Returns `None` if the user enters nothing,
    /// which aborts the run. `retry` distinguishes the initial ask from a
    /// re-prompt after a rejected or empty extraction.
    fn prompt_locator(&self, retry: bool) -> Result<Option<String>>;

    /// Ask for a file path. Returns `None` on empty input.
    fn prompt_path(&self, prompt: &str, default: Option<&str>) -> Result<Option<PathBuf>>;

    /// Show the probe preview and ask whether this is the right text.
    fn confirm_preview(&self, lines: &[String]) -> Result<bool>;

    /// Informational message.
    fn info(&self, msg: &str);

    /// Warning / error message that does not end the run by itself.
    fn warn(&self, msg: &str);
}

/// Terminal implementation backed by dialoguer.
pub struct ConsoleInteract {
    theme: ColorfulTheme,
}

impl ConsoleInteract {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for ConsoleInteract {
    fn default() -> Self {
        Self::new()
    }
}

impl Interact for ConsoleInteract {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn prompt_locator(&self, retry: bool) -> Result<Option<String>> {
        let prompt = if retry {
            "New XPath locator (empty to abort)"
        } else {
            "XPath locator for the text element"
        };

        let input: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim().to_string();
        Ok(if input.is_empty() { None } else { Some(input) })
    }

    fn prompt_path(&self, prompt: &str, default: Option<&str>) -> Result<Option<PathBuf>> {
        let mut builder = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);

        if let Some(default) = default {
            builder = builder.default(default.to_string());
        }

        let input = builder.interact_text()?;
        let input = input.trim().to_string();
        Ok(if input.is_empty() {
            None
        } else {
            Some(PathBuf::from(input))
        })
    }

    fn confirm_preview(&self, lines: &[String]) -> Result<bool> {
        println!();
        println!(
            "{}",
            style("Extracted text (preview is truncated):").bold()
        );
        for line in lines {
            println!("  {}", line);
        }
        println!();

        self.confirm(
            "Is this the text you wanted to extract? ('no' asks for a new locator)",
            true,
        )
    }

    fn info(&self, msg: &str) {
        println!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        eprintln!("{}", style(msg).yellow());
    }
}
