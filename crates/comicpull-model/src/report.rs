use serde::{Deserialize, Serialize};

/// Outcome of one pull.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullReport {
    pub book: String,
    pub source: String,
    /// Issues inside the requested range, in listing order.
    pub checked: Vec<String>,
    /// Issues already in the library.
    pub present: Vec<String>,
    /// Issues fetched during this run (or, for a dry run, that would be).
    pub downloaded: Vec<String>,
    pub pages_written: usize,
    pub dry_run: bool,
}

impl PullReport {
    /// True when every requested issue was already in the library.
    pub fn is_up_to_date(&self) -> bool {
        self.downloaded.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
