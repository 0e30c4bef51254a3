use std::fs::File;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::info;

use crate::error::{LauncherError, Result};

/// Fetches installers referenced by `InstallStep::DownloadAndRun`.
pub trait Downloader {
    fn download(&self, url: &str, dir: &Path, file_name: &str) -> Result<PathBuf>;
}

/// Downloads over HTTPS with a blocking reqwest client.
#[derive(Debug, Default)]
pub struct HttpDownloader;

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
        download_to(url, dir, file_name)
    }
}

/// Reports the target path without touching the network, for dry runs.
#[derive(Debug, Default)]
pub struct NoopDownloader;

impl Downloader for NoopDownloader {
    fn download(&self, url: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        info!(%url, path = %path.display(), "dry run: skipping download");
        Ok(path)
    }
}

/// Downloads `url` into `dir/file_name` and returns the written path.
///
/// # Arguments
/// * `url` - Installer location.
/// * `dir` - Existing directory to write into.
/// * `file_name` - Name of the file to create.
///
/// # Returns
/// * `Ok(path)` to the downloaded file, executable on Unix.
/// * `Err(LauncherError::Download)` on network errors or a non-success status.
pub fn download_to(url: &str, dir: &Path, file_name: &str) -> Result<PathBuf> {
    let download_err = |reason: String| LauncherError::Download { url: url.to_string(), reason };

    info!(%url, "downloading installer");
    let client = Client::new();
    let mut response = client.get(url).send().map_err(|e| download_err(e.to_string()))?;
    if !response.status().is_success() {
        return Err(download_err(format!("HTTP {}", response.status())));
    }

    let path = dir.join(file_name);
    let mut file = File::create(&path)?;
    std::io::copy(&mut response, &mut file).map_err(|e| download_err(e.to_string()))?;
    make_executable(&path)?;
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
