use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

use crate::{
    cleanup::{self, CleanupGuard, INTERRUPTED_EXIT_CODE},
    download::{fetch_artifact, staging_path},
    http::FetchError,
    platform::{self, HostPlatform, UnsupportedPlatform},
    release::{REPOSITORY, ReleaseLocation},
    runtime::Runtime,
};

pub mod config;

pub use config::{Config, Overrides};

/// Base name of the installed binary, before the platform's executable suffix.
pub const BINARY_NAME: &str = "eldrin-core-binary";

/// Mode applied to the installed binary on non-Windows hosts.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Where an operator can fetch the binary by hand, and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualFallback {
    pub url: String,
    pub destination: PathBuf,
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatform),

    #[error("Failed to download {url}")]
    Download {
        url: String,
        #[source]
        source: FetchError,
        fallback: ManualFallback,
    },

    #[error("Failed to make {} executable", .fallback.destination.display())]
    Permission {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
        fallback: ManualFallback,
    },
}

impl InstallError {
    pub fn fallback(&self) -> Option<&ManualFallback> {
        match self {
            Self::UnsupportedPlatform(_) => None,
            Self::Download { fallback, .. } | Self::Permission { fallback, .. } => Some(fallback),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The binary was already present; nothing was downloaded.
    AlreadyInstalled { path: PathBuf },
    Installed { path: PathBuf, bytes: u64 },
}

/// Fixed location of the installed binary under `install_root`.
pub fn binary_path(install_root: &Path, platform: &HostPlatform) -> PathBuf {
    install_root
        .join("bin")
        .join(format!("{}{}", BINARY_NAME, platform.os.exe_suffix()))
}

/// Runs the installer and reports the outcome on the console.
///
/// This is the only place that formats diagnostics for the operator; the
/// returned code is the process exit status.
pub async fn install<R: Runtime>(runtime: R, config: Config) -> ExitCode {
    let installer = Installer::new(runtime, config);

    match installer.install().await {
        Ok(outcome) => {
            print_success(&outcome);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_failure(err);
            ExitCode::FAILURE
        }
    }
}

fn print_success(outcome: &InstallOutcome) {
    match outcome {
        InstallOutcome::AlreadyInstalled { .. } => {
            println!("Eldrin Server binary already installed.")
        }
        InstallOutcome::Installed { .. } => println!("Eldrin Server installed successfully!"),
    }
}

fn print_failure(err: InstallError) {
    let fallback = err.fallback().cloned();

    match err {
        InstallError::UnsupportedPlatform(e) => {
            eprintln!("{}", e);
            eprintln!("Supported platforms: {}", e.supported());
        }
        InstallError::Download { source, .. } => {
            eprintln!(
                "Failed to download Eldrin Server binary: {:#}",
                anyhow::Error::new(source)
            );
        }
        other => eprintln!("{:#}", anyhow::Error::new(other)),
    }

    if let Some(fallback) = fallback {
        eprintln!();
        eprintln!("You can manually download the binary from:");
        eprintln!("  {}", fallback.url);
        eprintln!();
        eprintln!("And place it at:");
        eprintln!("  {}", fallback.destination.display());
    }
}

pub struct Installer<R: Runtime> {
    pub runtime: R,
    pub config: Config,
}

impl<R: Runtime> Installer<R> {
    pub fn new(runtime: R, config: Config) -> Self {
        Self { runtime, config }
    }

    /// Installs the binary for the host platform unless it is already present.
    ///
    /// Only existence is checked: a binary that is present is never replaced,
    /// whatever its version or content.
    #[tracing::instrument(skip(self))]
    pub async fn install(&self) -> Result<InstallOutcome, InstallError> {
        let platform = self.runtime.host_platform();
        let destination = binary_path(&self.config.install_root, &platform);

        if self.runtime.exists(&destination) {
            info!("{:?} already exists. Skipping download.", destination);
            return Ok(InstallOutcome::AlreadyInstalled { path: destination });
        }

        let artifact = platform::resolve(&platform)?;
        let location = ReleaseLocation::new(
            &self.config.release_host,
            REPOSITORY,
            &self.config.version,
            artifact,
        );
        let fallback = ManualFallback {
            url: location.tag_url().to_string(),
            destination: destination.clone(),
        };

        println!("Downloading Eldrin Server for {}...", platform);
        println!("URL: {}", location);

        // Windows decides executability by extension, not mode bits
        let mode = (!platform.is_windows()).then_some(EXECUTABLE_MODE);

        let bytes = self
            .download(location.download_url(), &destination, mode)
            .await
            .map_err(|source| match source {
                FetchError::Permission { source, .. } => {
                    InstallError::Permission { source, fallback }
                }
                source => InstallError::Download {
                    url: location.download_url().to_string(),
                    source,
                    fallback,
                },
            })?;

        Ok(InstallOutcome::Installed {
            path: destination,
            bytes,
        })
    }

    async fn download(
        &self,
        url: &str,
        destination: &Path,
        mode: Option<u32>,
    ) -> Result<u64, FetchError> {
        if let Some(bin_dir) = destination.parent() {
            self.runtime
                .create_dir_all(bin_dir)
                .map_err(|e| FetchError::write(bin_dir, e))?;
        }

        // Ctrl-C kills the process mid-stream, so the staging file is removed here instead
        let cleanup_ctx = cleanup::new_shared();
        let _guard = CleanupGuard::new(Arc::clone(&cleanup_ctx), staging_path(destination));
        let ctrl_c_handler = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nInterrupted, cleaning up...");
                cleanup::lock(&cleanup_ctx).cleanup();
                std::process::exit(INTERRUPTED_EXIT_CODE);
            }
        });

        let result = fetch_artifact(
            &self.runtime,
            &self.config.client,
            url,
            destination,
            mode,
        )
        .await;

        ctrl_c_handler.abort();
        result
    }
}
