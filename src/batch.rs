use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::download::download_page;
use crate::error::PageError;
use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    Existed,
}

#[derive(Debug)]
pub enum PageOutcome {
    Saved { bytes: u64 },
    Failed(PageError),
}

impl PageOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PageOutcome::Saved { .. })
    }

    pub fn error(&self) -> Option<&PageError> {
        match self {
            PageOutcome::Failed(err) => Some(err),
            PageOutcome::Saved { .. } => None,
        }
    }
}

/// What happened to one page of the run.
#[derive(Debug)]
pub struct PageReport {
    pub page: Page,
    pub url: String,
    pub path: PathBuf,
    pub outcome: PageOutcome,
}

pub struct Downloader {
    client: Client,
    config: FetchConfig,
}

impl Downloader {
    /// Fails on an invalid config or when the HTTP client cannot be built.
    /// Together with output directory errors from [`Downloader::run`], these
    /// are the only errors that abort a run; page failures never do.
    pub fn new(config: FetchConfig) -> Result<Self> {
        config.validate()?;

        // No request timeout, and no idle connections kept between pages.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .pool_max_idle_per_host(0)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    /// Returns `Err` only when the output directory cannot be prepared.
    pub fn run(&self) -> Result<Vec<PageReport>> {
        log::info!(
            "Fetching pages {}..={} into {:?}",
            self.config.start_page,
            self.config.end_page,
            self.config.output_dir
        );

        let dir = &self.config.output_dir;
        match prepare_output_dir(dir)? {
            DirStatus::Created => println!("Created directory: {}", dir.display()),
            DirStatus::Existed => println!("Directory already exists: {}", dir.display()),
        }

        println!(
            "Starting download of images from page {} to {}...",
            self.config.start_page, self.config.end_page
        );

        let mut reports = Vec::new();

        for page in self.config.pages() {
            let report = self.fetch(page);

            match &report.outcome {
                PageOutcome::Saved { .. } => {
                    println!("Successfully downloaded {}", report.path.display());
                }
                PageOutcome::Failed(PageError::Status(status)) => {
                    println!(
                        "Failed to download page {}. Status code: {}",
                        page,
                        status.as_u16()
                    );
                }
                PageOutcome::Failed(err) => {
                    log::error!("Page {} failed: {}", page, err);
                    println!("An error occurred while downloading page {}: {}", page, err);
                }
            }

            reports.push(report);

            if let Some(delay) = self.config.delay {
                thread::sleep(delay);
            }
        }

        let saved = reports.iter().filter(|r| r.outcome.is_saved()).count();
        log::info!("Fetched {} of {} pages", saved, reports.len());

        Ok(reports)
    }

    fn fetch(&self, page: Page) -> PageReport {
        let url = page.url(&self.config.url_template, &self.config.token);
        let path = page.local_path(&self.config.output_dir);

        println!("Downloading {} -> {}...", url, path.display());

        let outcome = match download_page(&self.client, &url, &path) {
            Ok(bytes) => PageOutcome::Saved { bytes },
            Err(err) => PageOutcome::Failed(err),
        };

        PageReport {
            page,
            url,
            path,
            outcome,
        }
    }
}

/// Creates `dir` and any missing parents if it does not exist yet. An existing
/// directory is left as it is.
pub fn prepare_output_dir(dir: &Path) -> Result<DirStatus> {
    if dir.exists() {
        log::info!("Output directory already exists: {:?}", dir);
        return Ok(DirStatus::Existed);
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {:?}", dir))?;

    log::info!("Created output directory: {:?}", dir);
    Ok(DirStatus::Created)
}
