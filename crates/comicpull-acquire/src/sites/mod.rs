pub mod readcomicsonline;
pub mod xoxocomic;

pub use readcomicsonline::ReadComicsOnline;
pub use xoxocomic::XoxoComic;
