use anyhow::Result;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs;

use page_fetcher::{Downloader, FetchConfig};

fn setup_logging() -> Result<()> {
    let log_dir = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))?
        .data_local_dir()
        .join("page-fetcher")
        .join("logs");

    fs::create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!(
        "page_fetcher_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .build();

    WriteLogger::init(LevelFilter::Info, config, fs::File::create(log_file)?)?;

    Ok(())
}

fn main() {
    if let Err(e) = setup_logging() {
        eprintln!("logging disabled: {}", e);
    }

    let config = FetchConfig::default();
    info!("page-fetcher starting");
    info!("URL template: {}", config.url_template);

    let result = Downloader::new(config).and_then(|downloader| downloader.run());

    match result {
        Ok(reports) => {
            let saved = reports.iter().filter(|r| r.outcome.is_saved()).count();
            info!("Run finished: {}/{} pages saved", saved, reports.len());
            println!("Download process finished.");
        }
        Err(e) => {
            error!("Run aborted: {:#}", e);
            println!("Download process aborted: {:#}", e);
            std::process::exit(1);
        }
    }
}
