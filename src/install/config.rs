use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::http::{ClientOptions, HttpClient};
use crate::release::DEFAULT_RELEASE_HOST;
use crate::runtime::Runtime;

/// Version of the release this installer was packaged with.
pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User supplied settings; anything left `None` falls back to a default.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub install_root: Option<PathBuf>,
    pub version: Option<String>,
    pub release_host: Option<String>,
    pub client: ClientOptions,
}

pub struct Config {
    pub install_root: PathBuf,
    pub version: String,
    pub release_host: String,
    pub client: HttpClient,
}

impl Config {
    pub fn new<R: Runtime>(runtime: &R, overrides: Overrides) -> Result<Self> {
        let install_root = match overrides.install_root {
            Some(path) => path,
            None => default_install_root(runtime)?,
        };
        let version = normalize_version(
            overrides
                .version
                .as_deref()
                .unwrap_or(PACKAGE_VERSION),
        )?;
        let release_host = overrides
            .release_host
            .as_deref()
            .unwrap_or(DEFAULT_RELEASE_HOST)
            .trim_end_matches('/')
            .to_string();

        debug!(
            "Install root {:?}, version {}, release host {}",
            install_root, version, release_host
        );

        let client =
            HttpClient::new(&overrides.client).context("Failed to build the HTTP client")?;

        Ok(Self {
            install_root,
            version,
            release_host,
            client,
        })
    }
}

/// The installer lives in `<root>/bin/`, so the root is two levels above the executable.
fn default_install_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let exe = runtime.current_exe()?;
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .with_context(|| format!("Cannot derive an install root from {:?}", exe))
}

fn normalize_version(version: &str) -> Result<String> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    if version.is_empty() {
        anyhow::bail!("Release version must not be empty");
    }
    Ok(version.to_string())
}
