pub mod library;
pub mod puller;

pub use library::Library;
pub use puller::{PullConfig, PullRequest, Puller};
