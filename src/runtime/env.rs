//! Host platform and executable location.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use super::RealRuntime;
use crate::platform::HostPlatform;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn host_platform_impl(&self) -> HostPlatform {
        HostPlatform::current()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn current_exe_impl(&self) -> Result<PathBuf> {
        env::current_exe().context("Failed to locate the running executable")
    }
}
