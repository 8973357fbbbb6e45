use crate::adapter::{Adapter, SiteAdapter};
use crate::fetch::Fetch;
use crate::sites::{ReadComicsOnline, XoxoComic};
use comicpull_model::{PullError, Result};
use std::str::FromStr;
use std::sync::Arc;

/// Supported source sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    ReadComicsOnline,
    XoxoComic,
}

impl SourceKind {
    pub const ALL: [SourceKind; 2] = [SourceKind::ReadComicsOnline, SourceKind::XoxoComic];

    pub fn id(self) -> &'static str {
        match self {
            SourceKind::ReadComicsOnline => "readcomicsonline.ru",
            SourceKind::XoxoComic => "xoxocomic.com",
        }
    }

    /// A fresh adapter with no metadata.
    pub fn adapter(self, fetcher: Arc<dyn Fetch>) -> Box<dyn SiteAdapter> {
        match self {
            SourceKind::ReadComicsOnline => Box::new(Adapter::new(ReadComicsOnline, fetcher)),
            SourceKind::XoxoComic => Box::new(Adapter::new(XoxoComic, fetcher)),
        }
    }
}

impl FromStr for SourceKind {
    type Err = PullError;

    /// Accepts the bare identifier or a pasted site URL
    /// (`https://www.xoxocomic.com/`).
    fn from_str(raw: &str) -> Result<Self> {
        let id = normalize_source(raw);
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| PullError::UnsupportedSource {
                requested: raw.to_string(),
                known: known_sources().into_iter().map(String::from).collect(),
            })
    }
}

pub fn known_sources() -> Vec<&'static str> {
    SourceKind::ALL.iter().map(|kind| kind.id()).collect()
}

/// Look up `source` and build a fresh adapter for it.
pub fn resolve(source: &str, fetcher: Arc<dyn Fetch>) -> Result<Box<dyn SiteAdapter>> {
    let kind: SourceKind = source.parse()?;
    tracing::debug!(source = kind.id(), "Resolved source adapter");
    Ok(kind.adapter(fetcher))
}

fn normalize_source(raw: &str) -> String {
    let lower = raw.trim().to_ascii_lowercase();
    let s = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let s = s.strip_prefix("www.").unwrap_or(s);
    s.trim_end_matches('/').to_string()
}
