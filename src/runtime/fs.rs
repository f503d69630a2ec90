//! File system operations (existence, streaming writes, rename, permissions).

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_file_impl(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        let file = fs::File::create(path).context("Failed to create file")?;
        Ok(Box::new(file))
    }

    /// Flushes `from` to disk before moving it, so `to` never names a torn file.
    #[tracing::instrument(skip(self))]
    pub(crate) fn rename_impl(&self, from: &Path, to: &Path) -> Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .open(from)
            .and_then(|file| file.sync_all())
            .context("Failed to sync file")?;
        fs::rename(from, to).context("Failed to rename file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_file_impl(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).context("Failed to remove file")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn set_permissions_impl(&self, path: &Path, mode: u32) -> Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(mode);
            fs::set_permissions(path, permissions).context("Failed to set permissions")?;
        }
        #[cfg(not(unix))]
        {
            let _ = (path, mode); // Suppress unused warnings on non-Unix
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_streamed_file() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let staging = dir.path().join("tool.partial");
        let target = dir.path().join("tool");

        {
            let mut writer = runtime.create_file(&staging).unwrap();
            writer.write_all(b"streamed ").unwrap();
            writer.write_all(b"content").unwrap();
        }
        assert!(runtime.exists(&staging));

        runtime.rename(&staging, &target).unwrap();
        assert!(!runtime.exists(&staging));
        assert_eq!(std::fs::read(&target).unwrap(), b"streamed content");

        runtime.remove_file(&target).unwrap();
        assert!(!runtime.exists(&target));
    }

    #[test]
    fn test_real_runtime_create_dir_all() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let bin = dir.path().join("pkg/bin");

        runtime.create_dir_all(&bin).unwrap();
        assert!(bin.is_dir());

        // Existing directories are fine
        runtime.create_dir_all(&bin).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runtime_set_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file = dir.path().join("tool");
        std::fs::write(&file, b"#!/bin/sh\n").unwrap();

        runtime.set_permissions(&file, 0o755).unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_real_runtime_rename_keeps_staged_mode() {
        use std::os::unix::fs::PermissionsExt;

        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let staging = dir.path().join("tool.partial");
        let target = dir.path().join("tool");

        let mut writer = runtime.create_file(&staging).unwrap();
        writer.write_all(b"complete").unwrap();
        drop(writer);
        runtime.set_permissions(&staging, 0o755).unwrap();

        runtime.rename(&staging, &target).unwrap();

        assert_eq!(std::fs::read(&target).unwrap(), b"complete");
        let mode = std::fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn test_real_runtime_errors() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing/dir/file");

        assert!(runtime.create_file(&missing).is_err());
        assert!(runtime.remove_file(&missing).is_err());
        assert!(runtime.rename(&missing, &dir.path().join("other")).is_err());
    }
}
