use crate::library::Library;
use comicpull_acquire::{registry, Fetch};
use comicpull_model::{PullError, PullReport, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Where issues go and which site they come from.
#[derive(Debug, Clone)]
pub struct PullConfig {
    pub library_path: PathBuf,
    /// Registry identifier of the source site.
    pub source: String,
}

/// One book and the 1-based, inclusive range of its issues to sync.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub book_name: String,
    pub first_issue: usize,
    /// `None` means through the latest issue.
    pub last_issue: Option<usize>,
    /// Stop after working out which issues are missing.
    pub dry_run: bool,
}

impl PullRequest {
    pub fn new(book_name: impl Into<String>) -> Self {
        Self {
            book_name: book_name.into(),
            first_issue: 1,
            last_issue: None,
            dry_run: false,
        }
    }

    pub fn range(mut self, first_issue: usize, last_issue: Option<usize>) -> Self {
        self.first_issue = first_issue;
        self.last_issue = last_issue;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Brings a library up to date with a source site.
pub struct Puller {
    config: PullConfig,
    fetcher: Arc<dyn Fetch>,
}

impl Puller {
    pub fn new(config: PullConfig, fetcher: Arc<dyn Fetch>) -> Self {
        Self { config, fetcher }
    }

    /// Download every issue in the requested range that the library lacks.
    ///
    /// Issues are handled one at a time in listing order. The first error
    /// ends the run; pages already written for the failing issue stay on
    /// disk.
    pub async fn pull(&self, request: &PullRequest) -> Result<PullReport> {
        validate_range(request.first_issue, request.last_issue)?;

        let mut adapter = registry::resolve(&self.config.source, self.fetcher.clone())?;
        let book_name = request.book_name.as_str();
        tracing::info!(source = adapter.source_id(), book = book_name, "Checking for available issues");

        adapter.update_book_metadata(book_name).await?;
        let issue_names = adapter
            .book(book_name)
            .map(|book| book.issue_names.clone())
            .ok_or_else(|| PullError::NotFound(format!("no listing recorded for book '{book_name}'")))?;

        let library = Library::new(&self.config.library_path);
        let mut report = PullReport {
            book: book_name.to_string(),
            source: adapter.source_id().to_string(),
            dry_run: request.dry_run,
            ..PullReport::default()
        };

        let mut missing = Vec::new();
        for issue_name in select_range(&issue_names, request.first_issue, request.last_issue) {
            report.checked.push(issue_name.clone());
            if library.has_issue(book_name, issue_name) {
                tracing::info!(library = %library.root().display(), issue = %issue_name, "Already have issue");
                report.present.push(issue_name.clone());
            } else {
                tracing::info!(library = %library.root().display(), issue = %issue_name, "Missing issue");
                missing.push(issue_name.clone());
            }
        }

        if missing.is_empty() {
            tracing::info!(
                library = %library.root().display(),
                book = book_name,
                source = %report.source,
                "Library already has all requested issues available at this source"
            );
            return Ok(report);
        }

        if request.dry_run {
            tracing::info!(missing = missing.len(), "Dry run, not downloading");
            report.downloaded = missing;
            return Ok(report);
        }

        tracing::info!(missing = missing.len(), "Downloading missing issues");
        for issue_name in missing {
            adapter.update_issue_metadata(&issue_name).await?;
            let dir = library.issue_dir(book_name, &issue_name);
            let pages = adapter.download_issue(&issue_name, &dir).await?;
            tracing::info!(issue = %issue_name, pages, path = %dir.display(), "Downloaded issue");
            report.pages_written += pages;
            report.downloaded.push(issue_name);
        }

        tracing::info!(
            book = book_name,
            issues = report.downloaded.len(),
            pages = report.pages_written,
            "Done"
        );
        Ok(report)
    }
}

fn validate_range(first_issue: usize, last_issue: Option<usize>) -> Result<()> {
    if first_issue < 1 {
        return Err(PullError::InvalidRange(format!(
            "first issue must be 1 or higher, got {first_issue}"
        )));
    }
    if let Some(last) = last_issue {
        if last < 1 {
            return Err(PullError::InvalidRange(format!(
                "last issue must be 1 or higher, got {last}"
            )));
        }
    }
    Ok(())
}

/// Issues at 1-based positions `first..=last`, with `last` clamped to the
/// listing length. A `first` past `last` selects nothing.
fn select_range(issue_names: &[String], first: usize, last: Option<usize>) -> &[String] {
    let last = last
        .filter(|&l| l <= issue_names.len())
        .unwrap_or(issue_names.len());
    if first > last {
        return &[];
    }
    &issue_names[first - 1..last]
}
