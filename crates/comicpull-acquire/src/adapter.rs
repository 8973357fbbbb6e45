use crate::fetch::Fetch;
use crate::normalize::normalize_text;
use crate::sanitize::{clean_filename, is_usable_segment};
use async_trait::async_trait;
use comicpull_model::{Book, Catalog, Issue, Page, PullError, Result};
use reqwest::Url;
use std::path::Path;
use std::sync::Arc;

/// What the puller needs from a source site.
///
/// Calls must come in order: book metadata, then issue metadata for an
/// issue the book listing produced, then the download of that issue.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Registry identifier of the site (e.g., "readcomicsonline.ru").
    fn source_id(&self) -> &'static str;

    /// Fetch the book's listing page and rebuild its chronological issue list.
    async fn update_book_metadata(&mut self, book_name: &str) -> Result<()>;

    /// Resolve the page image URLs of an issue, in reading order.
    async fn update_issue_metadata(&mut self, issue_name: &str) -> Result<()>;

    /// Fetch every page of an issue into `target_dir`, creating it if needed.
    /// Returns the number of pages written.
    async fn download_issue(&self, issue_name: &str, target_dir: &Path) -> Result<usize>;

    /// Book metadata from the last successful `update_book_metadata`.
    fn book(&self, book_name: &str) -> Option<&Book>;

    fn issue(&self, issue_name: &str) -> Result<&Issue>;
}

/// Markup knowledge for one site. [`Adapter`] supplies the rest.
#[async_trait]
pub trait Site: Send + Sync {
    fn id(&self) -> &'static str;

    fn book_url(&self, book_name: &str) -> String;

    /// Issue entries in the order the listing page shows them.
    fn parse_issue_listing(&self, html: &str, page_url: &Url) -> Result<Vec<Issue>>;

    /// Whether the listing page puts the latest issue first.
    fn lists_newest_first(&self) -> bool {
        true
    }

    /// Page image URLs of `issue` in reading order. May take any number of
    /// fetches to get there.
    async fn resolve_page_urls(&self, fetcher: &dyn Fetch, issue: &Issue) -> Result<Vec<Url>>;
}

/// A [`SiteAdapter`] for any [`Site`], holding the metadata of one pull.
pub struct Adapter<S> {
    site: S,
    fetcher: Arc<dyn Fetch>,
    catalog: Catalog,
}

impl<S: Site> Adapter<S> {
    pub fn new(site: S, fetcher: Arc<dyn Fetch>) -> Self {
        Self {
            site,
            fetcher,
            catalog: Catalog::new(),
        }
    }
}

#[async_trait]
impl<S: Site> SiteAdapter for Adapter<S> {
    fn source_id(&self) -> &'static str {
        self.site.id()
    }

    async fn update_book_metadata(&mut self, book_name: &str) -> Result<()> {
        let url = self.site.book_url(book_name);
        tracing::info!(url = %url, book = book_name, "Fetching issue listing");
        let html = self.fetcher.get_text(&url).await?;
        let page_url = parse_url(&url)?;

        let mut issues = self.site.parse_issue_listing(&html, &page_url)?;
        if issues.is_empty() {
            return Err(PullError::parse(&url, "no issue entries found"));
        }
        if self.site.lists_newest_first() {
            issues.reverse();
        }

        let book = self.catalog.replace_book(book_name, issues);
        tracing::info!(book = book_name, issues = book.issue_names.len(), "Parsed issue listing");
        Ok(())
    }

    async fn update_issue_metadata(&mut self, issue_name: &str) -> Result<()> {
        let issue = self.catalog.issue(issue_name)?.clone();
        tracing::info!(issue = issue_name, url = %issue.home_link, "Fetching issue pages");

        let urls = self
            .site
            .resolve_page_urls(self.fetcher.as_ref(), &issue)
            .await?;
        if urls.is_empty() {
            return Err(PullError::parse(&issue.home_link, "no page images found"));
        }

        let pages: Vec<Page> = urls
            .into_iter()
            .enumerate()
            .map(|(i, url)| Page {
                index: i + 1,
                name: page_name(&url, i + 1),
                url: url.to_string(),
            })
            .collect();
        tracing::info!(issue = issue_name, pages = pages.len(), "Resolved page links");
        self.catalog.set_pages(issue_name, pages)
    }

    async fn download_issue(&self, issue_name: &str, target_dir: &Path) -> Result<usize> {
        let issue = self.catalog.issue(issue_name)?;
        if issue.pages.is_empty() {
            return Err(PullError::NotFound(format!(
                "no page links known for issue '{issue_name}'"
            )));
        }

        std::fs::create_dir_all(target_dir).map_err(|e| PullError::io(target_dir, e))?;

        let count = issue.pages.len();
        for page in &issue.pages {
            let bytes = self.fetcher.get_bytes(&page.url).await?;
            let path = target_dir.join(page.file_name(count));
            std::fs::write(&path, &bytes).map_err(|e| PullError::io(&path, e))?;
            tracing::info!(
                issue = issue_name,
                page = page.index,
                of = count,
                bytes = bytes.len(),
                path = %path.display(),
                "Wrote page"
            );
        }

        Ok(count)
    }

    fn book(&self, book_name: &str) -> Option<&Book> {
        self.catalog.book(book_name)
    }

    fn issue(&self, issue_name: &str) -> Result<&Issue> {
        self.catalog.issue(issue_name)
    }
}

/// Build an issue from a listing entry's text and link.
///
/// Returns `None` (with a warning) when the text sanitizes to nothing
/// usable as a directory name.
pub(crate) fn issue_from_entry(text: &str, href: &str, page_url: &Url) -> Result<Option<Issue>> {
    let name = clean_filename(&normalize_text(text));
    if !is_usable_segment(&name) {
        tracing::warn!(text = text, href = href, "Skipping issue entry without a usable name");
        return Ok(None);
    }
    let link = join_url(page_url, href)?;
    Ok(Some(Issue::new(name, link.to_string())))
}

pub(crate) fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| PullError::parse(url, format!("invalid URL: {e}")))
}

/// Resolve a possibly relative link found on `base`.
pub(crate) fn join_url(base: &Url, href: &str) -> Result<Url> {
    base.join(href.trim())
        .map_err(|e| PullError::parse(base.as_str(), format!("invalid link '{href}': {e}")))
}

fn page_name(url: &Url, index: usize) -> String {
    let basename = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(clean_filename)
        .unwrap_or_default();
    if is_usable_segment(&basename) {
        basename
    } else {
        format!("page-{index}")
    }
}
