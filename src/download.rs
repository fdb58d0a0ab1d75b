use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::PageError;

/// Fetches `url` and streams a 200 body into `output_path`, returning the
/// number of bytes written. The file is only touched once a 200 has been seen.
pub fn download_page(client: &Client, url: &str, output_path: &Path) -> Result<u64, PageError> {
    log::debug!("GET {}", url);

    let mut response = client.get(url).send()?;

    let status = response.status();
    if status != StatusCode::OK {
        log::warn!("{} answered with status {}", url, status);
        return Err(PageError::Status(status));
    }

    let file = fs::File::create(output_path)?;
    let mut writer = BufWriter::with_capacity(8192, file);

    let written = io::copy(&mut response, &mut writer).map_err(stream_error)?;

    writer.flush()?;

    log::info!("Download completed: {} bytes to {:?}", written, output_path);
    Ok(written)
}

// The blocking body reader surfaces transport failures wrapped in io errors.
fn stream_error(err: io::Error) -> PageError {
    match err.downcast::<reqwest::Error>() {
        Ok(reqwest_err) => PageError::Transport(reqwest_err),
        Err(err) => PageError::Io(err),
    }
}
