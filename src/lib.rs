pub mod batch;
pub mod config;
pub mod download;
pub mod error;
pub mod page;

pub use batch::{DirStatus, Downloader, PageOutcome, PageReport};
pub use config::FetchConfig;
pub use error::PageError;
pub use page::Page;
