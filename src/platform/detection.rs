use std::fmt;

/// Host operating system, tagged the way release artifacts name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    Darwin,
    Linux,
    Windows,
    FreeBsd,
    OpenBsd,
    Other(&'static str),
}

/// Host CPU architecture, tagged the way release artifacts name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    Arm64,
    X64,
    Ia32,
    Arm,
    Other(&'static str),
}

impl OperatingSystem {
    /// Maps a Rust `target_os` name (see [`std::env::consts::OS`]).
    pub fn from_rust_os(os: &'static str) -> Self {
        match os {
            "macos" => Self::Darwin,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            "freebsd" => Self::FreeBsd,
            "openbsd" => Self::OpenBsd,
            other => Self::Other(other),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
            Self::Windows => "win32",
            Self::FreeBsd => "freebsd",
            Self::OpenBsd => "openbsd",
            Self::Other(os) => *os,
        }
    }

    /// Executable suffix for installed binaries on this OS.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            _ => "",
        }
    }
}

impl Architecture {
    /// Maps a Rust `target_arch` name (see [`std::env::consts::ARCH`]).
    pub fn from_rust_arch(arch: &'static str) -> Self {
        match arch {
            "aarch64" => Self::Arm64,
            "x86_64" => Self::X64,
            "x86" => Self::Ia32,
            "arm" => Self::Arm,
            other => Self::Other(other),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Arm64 => "arm64",
            Self::X64 => "x64",
            Self::Ia32 => "ia32",
            Self::Arm => "arm",
            Self::Other(arch) => *arch,
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// The (OS, architecture) pair of the running host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostPlatform {
    pub os: OperatingSystem,
    pub arch: Architecture,
}

impl HostPlatform {
    pub const fn new(os: OperatingSystem, arch: Architecture) -> Self {
        Self { os, arch }
    }

    /// Detect the platform this binary was compiled for.
    pub fn current() -> Self {
        Self {
            os: OperatingSystem::from_rust_os(std::env::consts::OS),
            arch: Architecture::from_rust_arch(std::env::consts::ARCH),
        }
    }

    pub fn is_windows(&self) -> bool {
        self.os == OperatingSystem::Windows
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}
