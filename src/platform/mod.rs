//! Platform detection and artifact resolution
//!
//! This module maps the host operating system and CPU architecture to the
//! name of the release artifact built for it. Resolution is a lookup in a
//! static table; anything missing from the table is unsupported.

mod artifact;
mod detection;

pub use artifact::{ArtifactId, UnsupportedPlatform, resolve, supported_platforms};
pub use detection::{Architecture, HostPlatform, OperatingSystem};
