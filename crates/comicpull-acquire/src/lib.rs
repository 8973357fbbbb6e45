pub mod adapter;
pub mod fetch;
pub mod normalize;
pub mod registry;
pub mod sanitize;
pub mod sites;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use adapter::{Adapter, Site, SiteAdapter};
pub use fetch::{Fetch, HttpFetcher};
pub use registry::{known_sources, resolve, SourceKind};
