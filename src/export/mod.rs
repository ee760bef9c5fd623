//! Output persistence.
//!
//! The cleaned line sequence goes to a user-chosen `.xlsx` or `.txt` file,
//! one line per row/cell with no header. Discarded links, if the user wants
//! them, go to a fixed `discarded_links.txt` beside the input file.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;

use crate::app::error::{GleanerError, Result};

pub const DISCARDED_FILE_NAME: &str = "discarded_links.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xlsx,
    Txt,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("xlsx") => Ok(Self::Xlsx),
            Some("txt") => Ok(Self::Txt),
            _ => Err(GleanerError::OutputFormat(format!(
                "{} (expected .xlsx or .txt)",
                path.display()
            ))),
        }
    }
}

/// Persist the cleaned lines, format chosen by the file extension.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<()> {
    match OutputFormat::from_path(path)? {
        OutputFormat::Xlsx => {
            let mut workbook = Workbook::new();
            let worksheet = workbook.add_worksheet();
            for (row, line) in lines.iter().enumerate() {
                worksheet.write_string(row as u32, 0, line.as_str())?;
            }
            workbook.save(path)?;
        }
        OutputFormat::Txt => {
            let mut content = lines.join("\n");
            content.push('\n');
            std::fs::write(path, content)?;
        }
    }

    tracing::info!(path = %path.display(), lines = lines.len(), "saved output");
    Ok(())
}

/// Write the discarded links next to the input file.
pub fn save_discarded(input_dir: &Path, discarded: &[String]) -> Result<PathBuf> {
    let path = input_dir.join(DISCARDED_FILE_NAME);

    let mut content = String::from("Discarded links:\n");
    content.push_str(&discarded.join("\n"));
    content.push('\n');

    std::fs::write(&path, content)?;
    tracing::info!(path = %path.display(), count = discarded.len(), "saved discarded links");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.xlsx")).unwrap(),
            OutputFormat::Xlsx
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out.TXT")).unwrap(),
            OutputFormat::Txt
        );
        assert!(OutputFormat::from_path(Path::new("out.csv")).is_err());
        assert!(OutputFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_save_txt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        save_lines(&path, &lines(&["one", "two"])).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn test_save_xlsx_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");

        save_lines(&path, &lines(&["one", "two"])).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_save_discarded() {
        let dir = TempDir::new().unwrap();

        let path = save_discarded(dir.path(), &lines(&["https://a", "https://b"])).unwrap();

        assert_eq!(path.file_name().unwrap(), DISCARDED_FILE_NAME);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Discarded links:\nhttps://a\nhttps://b\n");
    }
}
