use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

use crate::page::{Page, PLACEHOLDER};

pub const URL_TEMPLATE: &str =
    "https://file.icve.com.cn/file_gen_doc/663/40/A5F0A298AED66CEA78E34175500E69D6.pptx/{}.png";
pub const TOKEN: &str = "8d251129-ec35-46d0-b9c0-e82314e324c5";
pub const START_PAGE: u32 = 1;
pub const END_PAGE: u32 = 13;
pub const DOWNLOAD_DIR: &str = "downloaded_images8";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url_template: String,
    pub token: String,
    pub start_page: u32,
    pub end_page: u32,
    pub output_dir: PathBuf,
    /// Pause after each page. Off unless the server needs throttling.
    pub delay: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_template: URL_TEMPLATE.to_string(),
            token: TOKEN.to_string(),
            start_page: START_PAGE,
            end_page: END_PAGE,
            output_dir: PathBuf::from(DOWNLOAD_DIR),
            delay: None,
        }
    }
}

impl FetchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url_template.is_empty() {
            anyhow::bail!("URL template is empty");
        }

        let placeholders = self.url_template.matches(PLACEHOLDER).count();
        if placeholders != 1 {
            anyhow::bail!(
                "URL template must contain exactly one {} placeholder, found {}",
                PLACEHOLDER,
                placeholders
            );
        }

        if self.token.is_empty() {
            anyhow::bail!("Token is empty");
        }

        if self.start_page > self.end_page {
            anyhow::bail!(
                "Start page {} is after end page {}",
                self.start_page,
                self.end_page
            );
        }

        if self.output_dir.as_os_str().is_empty() {
            anyhow::bail!("Output directory is empty");
        }

        Ok(())
    }

    pub fn pages(&self) -> impl Iterator<Item = Page> {
        (self.start_page..=self.end_page).map(Page::new)
    }

    pub fn page_count(&self) -> u64 {
        if self.start_page > self.end_page {
            return 0;
        }
        u64::from(self.end_page - self.start_page) + 1
    }
}
