use std::fmt;

use thiserror::Error;

use super::detection::{Architecture, HostPlatform, OperatingSystem};

/// Release artifact names, one per supported platform.
const ARTIFACTS: &[(HostPlatform, &str)] = &[
    (
        HostPlatform::new(OperatingSystem::Darwin, Architecture::Arm64),
        "eldrin-core-darwin-arm64",
    ),
    (
        HostPlatform::new(OperatingSystem::Darwin, Architecture::X64),
        "eldrin-core-darwin-x64",
    ),
    (
        HostPlatform::new(OperatingSystem::Linux, Architecture::X64),
        "eldrin-core-linux-x64",
    ),
    (
        HostPlatform::new(OperatingSystem::Linux, Architecture::Arm64),
        "eldrin-core-linux-arm64",
    ),
    (
        HostPlatform::new(OperatingSystem::Windows, Architecture::X64),
        "eldrin-core-win-x64.exe",
    ),
];

/// Name of one platform's build at the release location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(&'static str);

impl ArtifactId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The host has no artifact in the release.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported platform: {platform}")]
pub struct UnsupportedPlatform {
    pub platform: HostPlatform,
}

impl UnsupportedPlatform {
    /// Comma separated list of every platform that does have an artifact.
    pub fn supported(&self) -> String {
        supported_platforms()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn supported_platforms() -> impl Iterator<Item = HostPlatform> {
    ARTIFACTS.iter().map(|(platform, _)| *platform)
}

/// Look up the artifact built for `platform`.
pub fn resolve(platform: &HostPlatform) -> Result<ArtifactId, UnsupportedPlatform> {
    ARTIFACTS
        .iter()
        .find(|(candidate, _)| candidate == platform)
        .map(|(_, name)| ArtifactId(*name))
        .ok_or(UnsupportedPlatform {
            platform: *platform,
        })
}
