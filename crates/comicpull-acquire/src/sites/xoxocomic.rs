use crate::adapter::{issue_from_entry, join_url, parse_url, Site};
use crate::fetch::Fetch;
use async_trait::async_trait;
use comicpull_model::{Issue, PullError, Result};
use reqwest::Url;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://xoxocomic.com/comic";

/// xoxocomic.com: the reader shows one page at a time. The issue page only
/// carries a `<select>` of per-page URLs, and each of those pages holds a
/// single image, so an issue of N pages costs N + 1 fetches.
#[derive(Debug, Clone, Default)]
pub struct XoxoComic;

#[async_trait]
impl Site for XoxoComic {
    fn id(&self) -> &'static str {
        "xoxocomic.com"
    }

    fn book_url(&self, book_name: &str) -> String {
        format!("{BASE_URL}/{book_name}")
    }

    fn parse_issue_listing(&self, html: &str, page_url: &Url) -> Result<Vec<Issue>> {
        let document = Html::parse_document(html);
        let row_sel = Selector::parse("div.col-xs-9.chapter").expect("valid selector");
        let a_sel = Selector::parse("a[href]").expect("valid selector");

        let mut issues = Vec::new();
        for row in document.select(&row_sel) {
            let Some(href) = row.select(&a_sel).next().and_then(|a| a.value().attr("href")) else {
                continue;
            };
            let text: String = row.text().collect();
            if let Some(issue) = issue_from_entry(&text, href, page_url)? {
                issues.push(issue);
            }
        }
        Ok(issues)
    }

    async fn resolve_page_urls(&self, fetcher: &dyn Fetch, issue: &Issue) -> Result<Vec<Url>> {
        let html = fetcher.get_text(&issue.home_link).await?;
        let issue_url = parse_url(&issue.home_link)?;
        let page_links = parse_page_selector(&html, &issue_url)?;
        tracing::debug!(issue = %issue.name, pages = page_links.len(), "Found per-page links");

        let mut urls = Vec::with_capacity(page_links.len());
        for link in page_links {
            let html = fetcher.get_text(link.as_str()).await?;
            urls.push(parse_single_page(&html, &link)?);
        }
        Ok(urls)
    }
}

/// Per-page reader URLs from the `select#selectPage` dropdown.
fn parse_page_selector(html: &str, page_url: &Url) -> Result<Vec<Url>> {
    let document = Html::parse_document(html);
    let select_sel = Selector::parse("select#selectPage").expect("valid selector");
    let option_sel = Selector::parse("option").expect("valid selector");

    let select = document
        .select(&select_sel)
        .next()
        .ok_or_else(|| PullError::parse(page_url.as_str(), "could not find select#selectPage"))?;

    select
        .select(&option_sel)
        .map(|option| {
            let value = option
                .value()
                .attr("value")
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| PullError::parse(page_url.as_str(), "page option without a value"))?;
            join_url(page_url, value)
        })
        .collect()
}

/// The image URL on a single reader page.
fn parse_single_page(html: &str, page_url: &Url) -> Result<Url> {
    let document = Html::parse_document(html);
    let chapter_sel = Selector::parse("div.page-chapter").expect("valid selector");
    let img_sel = Selector::parse("a img.single-page").expect("valid selector");

    let chapter = document
        .select(&chapter_sel)
        .next()
        .ok_or_else(|| PullError::parse(page_url.as_str(), "could not find div.page-chapter"))?;
    let img = chapter
        .select(&img_sel)
        .next()
        .ok_or_else(|| PullError::parse(page_url.as_str(), "could not find the page image"))?;

    let src = img
        .value()
        .attr("data-original")
        .or_else(|| img.value().attr("src"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PullError::parse(page_url.as_str(), "page image without a source"))?;
    join_url(page_url, src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{Adapter, SiteAdapter};
    use crate::testing::StaticFetcher;
    use std::sync::Arc;

    const LISTING: &str = r#"
        <html><body>
        <div class="row">
          <div class="col-xs-9 chapter"><a href="https://xoxocomic.com/comic/paper-girls/issue-2">Paper Girls #2</a></div>
          <div class="col-xs-3 text-center">01/02/2016</div>
        </div>
        <div class="row">
          <div class="col-xs-9 chapter"><a href="https://xoxocomic.com/comic/paper-girls/issue-1">Paper Girls #1</a></div>
          <div class="col-xs-3 text-center">10/07/2015</div>
        </div>
        </body></html>
    "#;

    fn issue_page() -> String {
        r#"
        <html><body>
        <select id="selectPage" class="form-control">
          <option value="https://xoxocomic.com/comic/paper-girls/issue-1">1</option>
          <option value="/comic/paper-girls/issue-1/2">2</option>
        </select>
        </body></html>
        "#
        .to_string()
    }

    fn single_page(img: &str) -> String {
        format!(
            r#"<html><body>
            <div class="page-chapter" id="page_1">
              <a href="/next"><img class="single-page lazy" data-original=" {img} " src="loading.gif" /></a>
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_issue_listing() {
        let base = Url::parse("https://xoxocomic.com/comic/paper-girls").unwrap();
        let issues = XoxoComic.parse_issue_listing(LISTING, &base).unwrap();
        let names: Vec<&str> = issues.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Paper Girls #2", "Paper Girls #1"]);
        assert_eq!(issues[1].home_link, "https://xoxocomic.com/comic/paper-girls/issue-1");
    }

    #[test]
    fn test_parse_page_selector() {
        let base = Url::parse("https://xoxocomic.com/comic/paper-girls/issue-1").unwrap();
        let links = parse_page_selector(&issue_page(), &base).unwrap();
        let links: Vec<&str> = links.iter().map(|u| u.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://xoxocomic.com/comic/paper-girls/issue-1",
                "https://xoxocomic.com/comic/paper-girls/issue-1/2",
            ]
        );
    }

    #[test]
    fn test_parse_single_page() {
        let base = Url::parse("https://xoxocomic.com/comic/paper-girls/issue-1/2").unwrap();
        let url = parse_single_page(&single_page("https://cdn.xoxo.net/pg/1/002.jpg"), &base).unwrap();
        assert_eq!(url.as_str(), "https://cdn.xoxo.net/pg/1/002.jpg");
    }

    #[test]
    fn test_parse_single_page_without_image() {
        let base = Url::parse("https://xoxocomic.com/comic/paper-girls/issue-1/2").unwrap();
        let html = r#"<div class="page-chapter"><p>Page removed</p></div>"#;
        let err = parse_single_page(html, &base).unwrap_err();
        assert!(matches!(err, PullError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_issue_metadata_follows_each_page() {
        // The first option points back at the issue page itself, which
        // doubles as page one.
        let first_page = format!(
            "{}{}",
            issue_page(),
            single_page("https://cdn.xoxo.net/pg/1/001.jpg")
        );
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page("https://xoxocomic.com/comic/paper-girls", LISTING)
                .with_page("https://xoxocomic.com/comic/paper-girls/issue-1", &first_page)
                .with_page(
                    "https://xoxocomic.com/comic/paper-girls/issue-1/2",
                    &single_page("https://cdn.xoxo.net/pg/1/002.jpg"),
                ),
        );
        let mut adapter = Adapter::new(XoxoComic, fetcher.clone());

        adapter.update_book_metadata("paper-girls").await.unwrap();
        assert_eq!(
            adapter.book("paper-girls").unwrap().issue_names,
            vec!["Paper Girls #1", "Paper Girls #2"]
        );

        adapter.update_issue_metadata("Paper Girls #1").await.unwrap();
        let pages = &adapter.issue("Paper Girls #1").unwrap().pages;
        let urls: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://cdn.xoxo.net/pg/1/001.jpg", "https://cdn.xoxo.net/pg/1/002.jpg"]
        );
        assert_eq!(pages[1].name, "002.jpg");

        // listing + issue page + two per-page fetches
        assert_eq!(fetcher.request_count(), 4);
    }
}
