use std::fmt;
use std::path::{Path, PathBuf};

pub const PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Page {
    pub index: u32,
}

impl Page {
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    /// Substitutes the index into the first placeholder and appends the token
    /// query. Neither part is percent-encoded.
    pub fn url(&self, template: &str, token: &str) -> String {
        let image_url = template.replacen(PLACEHOLDER, &self.index.to_string(), 1);
        format!("{}?token={}", image_url, token)
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.index)
    }

    pub fn local_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}
