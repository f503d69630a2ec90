use std::fmt;

use crate::platform::ArtifactId;

/// Repository that publishes the release artifacts, as `owner/name`.
pub const REPOSITORY: &str = "eldrin-project/eldrin-server";

/// Default host serving the repository's releases.
pub const DEFAULT_RELEASE_HOST: &str = "https://github.com";

/// Download and tag-page URLs for one version/platform artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLocation {
    download_url: String,
    tag_url: String,
}

impl ReleaseLocation {
    /// Build the location of `artifact` in release `v{version}` of `repository` on `host`.
    pub fn new(host: &str, repository: &str, version: &str, artifact: ArtifactId) -> Self {
        let release = format!("{}/{}/releases", host.trim_end_matches('/'), repository);
        Self {
            download_url: format!("{}/download/v{}/{}", release, version, artifact),
            tag_url: format!("{}/tag/v{}", release, version),
        }
    }

    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    /// The release's tag page, offered for manual download when fetching fails.
    pub fn tag_url(&self) -> &str {
        &self.tag_url
    }
}

impl fmt::Display for ReleaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.download_url)
    }
}
