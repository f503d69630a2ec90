use clap::Parser;
use eldrin_core_install::http::ClientOptions;
use eldrin_core_install::install::{Config, Overrides, install};
use eldrin_core_install::runtime::RealRuntime;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// eldrin-core-install - Eldrin Server binary installer
///
/// Downloads the Eldrin Server binary built for this platform from its GitHub
/// release and installs it as `bin/eldrin-core-binary` under the install root.
/// Does nothing if the binary is already there.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Install root directory (defaults to the parent of this executable's directory)
    #[arg(
        long = "root",
        short = 'r',
        env = "ELDRIN_INSTALL_ROOT",
        value_name = "PATH"
    )]
    pub install_root: Option<PathBuf>,

    /// Release version to install (defaults to this installer's own version)
    #[arg(long = "release-version", env = "ELDRIN_CORE_VERSION", value_name = "VERSION")]
    pub release_version: Option<String>,

    /// Host serving the releases (defaults to https://github.com)
    #[arg(long = "release-host", env = "ELDRIN_RELEASE_HOST", value_name = "URL")]
    pub release_host: Option<String>,

    /// Seconds allowed for establishing a connection
    #[arg(long = "connect-timeout", env = "ELDRIN_CONNECT_TIMEOUT", value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Seconds allowed for the whole download
    #[arg(long = "timeout", env = "ELDRIN_DOWNLOAD_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    fn overrides(self) -> Overrides {
        Overrides {
            install_root: self.install_root,
            version: self.release_version,
            release_host: self.release_host,
            client: ClientOptions {
                connect_timeout: self.connect_timeout.map(Duration::from_secs),
                timeout: self.timeout.map(Duration::from_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;

    let config = match Config::new(&runtime, cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    install(runtime, config).await
}
