use crate::http::{FetchError, HttpClient};
use crate::runtime::Runtime;
use futures_util::StreamExt;
use log::{debug, info};
use reqwest::Response;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix of the staging file a download is streamed into.
pub const STAGING_SUFFIX: &str = ".partial";

/// Path next to `destination` that receives the bytes until the download completes.
pub fn staging_path(destination: &Path) -> PathBuf {
    let mut name = destination.as_os_str().to_os_string();
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Downloads `url` to `destination`, returning the number of bytes written.
///
/// The body is streamed into a staging file which is renamed onto
/// `destination` only once the stream is fully consumed and `mode` (if any)
/// has been applied. On any failure the staging file is removed, so
/// `destination` is either absent or complete with its final permissions.
#[tracing::instrument(skip(runtime, http_client))]
pub async fn fetch_artifact<R: Runtime>(
    runtime: &R,
    http_client: &HttpClient,
    url: &str,
    destination: &Path,
    mode: Option<u32>,
) -> Result<u64, FetchError> {
    info!("Downloading file from {}...", url);

    let response = http_client.get(url).await?;
    let staging = staging_path(destination);

    let result = match stream_to_file(runtime, response, &staging).await {
        Ok(bytes) => promote(runtime, &staging, destination, mode).map(|()| bytes),
        Err(e) => Err(e),
    };

    match &result {
        Ok(bytes) => info!("Download complete ({} bytes).", bytes),
        Err(_) => discard_partial(runtime, &staging),
    }

    result
}

async fn stream_to_file<R: Runtime>(
    runtime: &R,
    response: Response,
    path: &Path,
) -> Result<u64, FetchError> {
    let mut writer = runtime
        .create_file(path)
        .map_err(|e| FetchError::write(path, e))?;

    let mut stream = response.bytes_stream();
    let mut downloaded_bytes: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .map_err(|e| FetchError::write(path, e))?;
        downloaded_bytes += chunk.len() as u64;
    }
    writer.flush().map_err(|e| FetchError::write(path, e))?;

    debug!(
        "Downloaded {:.2} MB",
        downloaded_bytes as f64 / (1024.0 * 1024.0)
    );

    Ok(downloaded_bytes)
}

/// Applies `mode` to the complete staging file, then moves it into place.
fn promote<R: Runtime>(
    runtime: &R,
    staging: &Path,
    destination: &Path,
    mode: Option<u32>,
) -> Result<(), FetchError> {
    if let Some(mode) = mode {
        debug!("Setting mode {:o} on {:?}", mode, staging);
        runtime
            .set_permissions(staging, mode)
            .map_err(|e| FetchError::Permission {
                path: staging.to_path_buf(),
                source: e.into(),
            })?;
    }
    runtime
        .rename(staging, destination)
        .map_err(|e| FetchError::write(destination, e))
}

/// Best-effort removal; the original failure is the one worth reporting.
fn discard_partial<R: Runtime>(runtime: &R, staging: &Path) {
    match runtime.remove_file(staging) {
        Ok(()) => debug!("Removed partial download {:?}", staging),
        Err(e) => debug!("Could not remove partial download {:?}: {:#}", staging, e),
    }
}
