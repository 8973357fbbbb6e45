use std::path::{Path, PathBuf};

/// A folder of comics on disk, laid out as `{root}/{book}/{issue}/{page}`.
///
/// An issue counts as present when its directory exists. There is no
/// manifest, so an interrupted download also counts as present.
#[derive(Debug, Clone)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn issue_dir(&self, book_name: &str, issue_name: &str) -> PathBuf {
        self.root.join(book_name).join(issue_name)
    }

    pub fn has_issue(&self, book_name: &str, issue_name: &str) -> bool {
        self.issue_dir(book_name, issue_name).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_dir_layout() {
        let lib = Library::new("/comics");
        assert_eq!(
            lib.issue_dir("saga-2012", "Saga #1"),
            PathBuf::from("/comics/saga-2012/Saga #1")
        );
    }

    #[test]
    fn test_has_issue() {
        let dir = tempfile::tempdir().unwrap();
        let lib = Library::new(dir.path());
        assert!(!lib.has_issue("saga-2012", "Saga #1"));

        std::fs::create_dir_all(lib.issue_dir("saga-2012", "Saga #1")).unwrap();
        assert!(lib.has_issue("saga-2012", "Saga #1"));
        assert!(!lib.has_issue("saga-2012", "Saga #2"));
    }

    #[test]
    fn test_empty_directory_counts_as_present() {
        let dir = tempfile::tempdir().unwrap();
        let lib = Library::new(dir.path());
        std::fs::create_dir_all(lib.issue_dir("saga-2012", "Saga #9")).unwrap();
        assert!(lib.has_issue("saga-2012", "Saga #9"));
    }
}
