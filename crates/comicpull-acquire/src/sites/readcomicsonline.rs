use crate::adapter::{issue_from_entry, join_url, parse_url, Site};
use crate::fetch::Fetch;
use async_trait::async_trait;
use comicpull_model::{Issue, PullError, Result};
use reqwest::Url;
use scraper::{Html, Selector};

const BASE_URL: &str = "https://readcomicsonline.ru/comic";

/// readcomicsonline.ru: the reader page embeds every page image, so one
/// fetch per issue is enough.
#[derive(Debug, Clone, Default)]
pub struct ReadComicsOnline;

#[async_trait]
impl Site for ReadComicsOnline {
    fn id(&self) -> &'static str {
        "readcomicsonline.ru"
    }

    fn book_url(&self, book_name: &str) -> String {
        format!("{BASE_URL}/{book_name}")
    }

    /// Each issue is an `<h5 class="chapter-title-rtl">` wrapping its link.
    fn parse_issue_listing(&self, html: &str, page_url: &Url) -> Result<Vec<Issue>> {
        let document = Html::parse_document(html);
        let h5_sel = Selector::parse("h5.chapter-title-rtl").expect("valid selector");
        let a_sel = Selector::parse("a[href]").expect("valid selector");

        let mut issues = Vec::new();
        for h5 in document.select(&h5_sel) {
            let Some(href) = h5.select(&a_sel).next().and_then(|a| a.value().attr("href")) else {
                tracing::debug!("Skipping chapter title without a link");
                continue;
            };
            let text: String = h5.text().collect();
            if let Some(issue) = issue_from_entry(&text, href, page_url)? {
                issues.push(issue);
            }
        }
        Ok(issues)
    }

    async fn resolve_page_urls(&self, fetcher: &dyn Fetch, issue: &Issue) -> Result<Vec<Url>> {
        let html = fetcher.get_text(&issue.home_link).await?;
        let page_url = parse_url(&issue.home_link)?;
        parse_reader_page(&html, &page_url)
    }
}

/// Collect the lazy-loaded `<img data-src>` entries under `div#all`.
fn parse_reader_page(html: &str, page_url: &Url) -> Result<Vec<Url>> {
    let document = Html::parse_document(html);
    let all_sel = Selector::parse("div#all").expect("valid selector");
    let img_sel = Selector::parse("img").expect("valid selector");

    let container = document
        .select(&all_sel)
        .next()
        .ok_or_else(|| PullError::parse(page_url.as_str(), "could not find div#all"))?;

    let mut urls = Vec::new();
    for img in container.select(&img_sel) {
        let src = img
            .value()
            .attr("data-src")
            .or_else(|| img.value().attr("src"))
            .map(str::trim)
            .unwrap_or_default();
        if src.is_empty() {
            tracing::debug!("Skipping image without a source");
            continue;
        }
        urls.push(join_url(page_url, src)?);
    }
    Ok(urls)
}
