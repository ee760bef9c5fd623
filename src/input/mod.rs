//! Link file reading.
//!
//! Two input formats are supported: an XML sitemap export (the `<loc>`
//! entries are what we want, typically from www.xml-sitemaps.com) and a
//! plain text file with one URL per line.

use std::path::Path;

use crate::app::error::{GleanerError, Result};

/// Read an ordered list of raw links from a `.xml` or `.txt` file.
pub fn read_links(path: &Path) -> Result<Vec<String>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("xml") => {
            let content = std::fs::read_to_string(path)?;
            let links = parse_sitemap(&content);
            if links.is_empty() {
                return Err(GleanerError::InputFile(format!(
                    "no <loc> entries found in {}",
                    path.display()
                )));
            }
            Ok(links)
        }
        Some("txt") => {
            let content = std::fs::read_to_string(path)?;
            Ok(content
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect())
        }
        _ => Err(GleanerError::InputFile(format!(
            "unsupported file type: {} (expected .xml or .txt)",
            path.display()
        ))),
    }
}

/// Extract `<loc>` values from a sitemap document.
///
/// Simple regex-free parsing: scan for `<loc>`/`</loc>` pairs and decode
/// any XML entities in between. Good enough for sitemap exports, which are
/// machine-generated and flat.
fn parse_sitemap(content: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("<loc>") {
        rest = &rest[start + "<loc>".len()..];
        let Some(end) = rest.find("</loc>") else {
            break;
        };
        let value = rest[..end].trim();
        if !value.is_empty() {
            links.push(html_escape::decode_html_entities(value).to_string());
        }
        rest = &rest[end + "</loc>".len()..];
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SITEMAP_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-01-01</lastmod>
  </url>
  <url>
    <loc>https://example.com/about?a=1&amp;b=2</loc>
  </url>
</urlset>"#;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_sitemap() {
        let links = parse_sitemap(SITEMAP_SAMPLE);
        assert_eq!(
            links,
            vec![
                "https://example.com/",
                "https://example.com/about?a=1&b=2"
            ]
        );
    }

    #[test]
    fn test_read_xml_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "sitemap.xml", SITEMAP_SAMPLE);

        let links = read_links(&path).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0], "https://example.com/");
    }

    #[test]
    fn test_read_xml_without_loc_entries() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "other.xml", "<root><item>x</item></root>");

        let err = read_links(&path).unwrap_err();
        assert!(matches!(err, GleanerError::InputFile(_)));
    }

    #[test]
    fn test_read_txt_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "links.txt",
            "https://example.com/a\n\n  https://example.com/b  \n",
        );

        let links = read_links(&path).unwrap();
        assert_eq!(links, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "links.csv", "https://example.com");

        let err = read_links(&path).unwrap_err();
        assert!(matches!(err, GleanerError::InputFile(_)));
    }
}
