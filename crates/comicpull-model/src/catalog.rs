use crate::{Book, Issue, Page, PullError, Result};
use std::collections::HashMap;

/// In-memory metadata gathered by one adapter during one pull.
///
/// Books map to chronological issue-name lists; issues are keyed by name
/// and carry their home link and, once fetched, their pages.
#[derive(Debug, Default)]
pub struct Catalog {
    books: HashMap<String, Book>,
    issues: HashMap<String, Issue>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything known about `book_name` with `issues`.
    ///
    /// `issues` must already be in chronological order. Names that collide
    /// with an earlier issue of the same book get a ` (2)`, ` (3)`, ...
    /// suffix. Returns the stored book.
    pub fn replace_book(&mut self, book_name: &str, issues: Vec<Issue>) -> &Book {
        if let Some(old) = self.books.remove(book_name) {
            for name in &old.issue_names {
                self.issues.remove(name);
            }
        }

        let mut issue_names: Vec<String> = Vec::with_capacity(issues.len());
        for mut issue in issues {
            let base = issue.name.clone();
            let mut n = 1;
            while issue_names.contains(&issue.name) {
                n += 1;
                issue.name = format!("{base} ({n})");
            }
            issue_names.push(issue.name.clone());
            self.issues.insert(issue.name.clone(), issue);
        }

        self.books
            .entry(book_name.to_string())
            .or_insert(Book {
                name: book_name.to_string(),
                issue_names,
            })
    }

    pub fn book(&self, book_name: &str) -> Option<&Book> {
        self.books.get(book_name)
    }

    pub fn issue(&self, issue_name: &str) -> Result<&Issue> {
        self.issues
            .get(issue_name)
            .ok_or_else(|| PullError::NotFound(format!("no home link known for issue '{issue_name}'")))
    }

    /// Record the pages of an issue, replacing any previous list.
    pub fn set_pages(&mut self, issue_name: &str, pages: Vec<Page>) -> Result<()> {
        let issue = self
            .issues
            .get_mut(issue_name)
            .ok_or_else(|| PullError::NotFound(format!("no home link known for issue '{issue_name}'")))?;
        issue.pages = pages;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(names: &[&str]) -> Vec<Issue> {
        names
            .iter()
            .map(|n| Issue::new(*n, format!("https://example.com/{n}")))
            .collect()
    }

    #[test]
    fn test_replace_book_keeps_order() {
        let mut catalog = Catalog::new();
        let book = catalog.replace_book("saga", issues(&["Saga #1", "Saga #2"]));
        assert_eq!(book.issue_names, vec!["Saga #1", "Saga #2"]);
        assert_eq!(
            catalog.issue("Saga #2").unwrap().home_link,
            "https://example.com/Saga #2"
        );
    }

    #[test]
    fn test_replace_book_suffixes_duplicates() {
        let mut catalog = Catalog::new();
        let book = catalog.replace_book("saga", issues(&["Annual", "Annual", "Annual"]));
        assert_eq!(book.issue_names, vec!["Annual", "Annual (2)", "Annual (3)"]);
        assert!(catalog.issue("Annual (3)").is_ok());
    }

    #[test]
    fn test_replace_book_is_idempotent() {
        let mut catalog = Catalog::new();
        catalog.replace_book("saga", issues(&["Saga #1", "Saga #2"]));
        let book = catalog.replace_book("saga", issues(&["Saga #1", "Saga #2"]));
        assert_eq!(book.issue_names, vec!["Saga #1", "Saga #2"]);
    }

    #[test]
    fn test_replace_book_drops_stale_issues() {
        let mut catalog = Catalog::new();
        catalog.replace_book("saga", issues(&["Saga #1", "Old"]));
        catalog.replace_book("saga", issues(&["Saga #1"]));
        assert!(matches!(catalog.issue("Old"), Err(PullError::NotFound(_))));
    }

    #[test]
    fn test_set_pages_requires_known_issue() {
        let mut catalog = Catalog::new();
        let err = catalog.set_pages("Saga #1", Vec::new()).unwrap_err();
        assert!(matches!(err, PullError::NotFound(_)));
    }
}
