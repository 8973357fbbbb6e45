pub mod book;
pub mod catalog;
pub mod error;
pub mod report;

pub use book::*;
pub use catalog::*;
pub use error::*;
pub use report::*;
