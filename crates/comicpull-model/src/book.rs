use serde::{Deserialize, Serialize};

/// A comic series as listed on a source site.
///
/// Only issue names are kept here; the per-issue details live in the
/// adapter's [`Catalog`](crate::Catalog) so that issue metadata can be
/// filled in lazily for the issues actually being downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Site-specific slug (e.g., "absolute-martian-manhunter-2025").
    pub name: String,
    /// Issue names in chronological order, earliest issue first.
    pub issue_names: Vec<String>,
}

/// One installment of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Filesystem-safe name, unique within its book.
    pub name: String,
    /// URL of the issue's reader page.
    pub home_link: String,
    /// Pages in reading order. Empty until issue metadata has been fetched.
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// One image of an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based position in reading order.
    pub index: usize,
    /// Sanitized basename of the image URL. Informational only.
    pub name: String,
    /// Absolute URL of the image file.
    pub url: String,
}

impl Issue {
    pub fn new(name: impl Into<String>, home_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            home_link: home_link.into(),
            pages: Vec::new(),
        }
    }
}

impl Page {
    /// On-disk file name for this page within an issue of `page_count` pages.
    ///
    /// The index is zero-padded to at least three digits (more if the issue
    /// is longer) so that a plain lexical sort reproduces reading order. The
    /// extension is taken from the URL basename when it looks like one.
    pub fn file_name(&self, page_count: usize) -> String {
        let width = page_count.max(1).to_string().len().max(3);
        match self.extension() {
            Some(ext) => format!("{:0width$}.{ext}", self.index),
            None => format!("{:0width$}", self.index),
        }
    }

    fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty()
            || ext.is_empty()
            || ext.len() > 5
            || !ext.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(index: usize, name: &str) -> Page {
        Page {
            index,
            name: name.into(),
            url: format!("https://img.example.com/{name}"),
        }
    }

    #[test]
    fn test_file_name_zero_pads() {
        assert_eq!(page(1, "xyz.JPG").file_name(20), "001.jpg");
        assert_eq!(page(12, "a.png").file_name(20), "012.png");
    }

    #[test]
    fn test_file_name_widens_for_long_issues() {
        assert_eq!(page(7, "p.webp").file_name(1200), "0007.webp");
    }

    #[test]
    fn test_file_name_without_extension() {
        assert_eq!(page(3, "image").file_name(10), "003");
        assert_eq!(page(3, ".hidden").file_name(10), "003");
        assert_eq!(page(3, "weird.ext-ension").file_name(10), "003");
    }

    #[test]
    fn test_file_names_sort_in_reading_order() {
        let names = ["z.jpg", "a.jpg", "m.jpg", "b.jpg"];
        let pages: Vec<Page> = names
            .iter()
            .enumerate()
            .map(|(i, n)| page(i + 1, n))
            .collect();
        let mut files: Vec<String> = pages.iter().map(|p| p.file_name(pages.len())).collect();
        let in_order = files.clone();
        files.sort();
        assert_eq!(files, in_order);
    }
}
