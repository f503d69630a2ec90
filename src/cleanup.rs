use log::debug;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Exit status used when a download is interrupted with Ctrl-C.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Tracks partial files that must not survive an interruption
#[derive(Default)]
pub struct CleanupContext {
    #[cfg(test)]
    pub paths: Vec<PathBuf>,
    #[cfg(not(test))]
    paths: Vec<PathBuf>,
}

impl CleanupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to be removed on interruption
    pub fn add(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Remove a path from the cleanup list (e.g., when the download finished)
    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    /// Remove all registered files, ignoring failures
    pub fn cleanup(&self) {
        for path in &self.paths {
            debug!("Cleaning up: {:?}", path);
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Type alias for shared cleanup context
pub type SharedCleanupContext = Arc<Mutex<CleanupContext>>;

/// Create a new shared cleanup context
pub fn new_shared() -> SharedCleanupContext {
    Arc::new(Mutex::new(CleanupContext::new()))
}

/// Locks the context even if a previous holder panicked; the path list stays usable.
pub fn lock(ctx: &SharedCleanupContext) -> MutexGuard<'_, CleanupContext> {
    ctx.lock().unwrap_or_else(PoisonError::into_inner)
}

/// RAII guard that keeps a path registered for the duration of one operation.
///
/// Dropping the guard unregisters the path whether or not the operation
/// succeeded: by then the operation has cleaned up after itself.
pub struct CleanupGuard {
    ctx: SharedCleanupContext,
    path: PathBuf,
}

impl CleanupGuard {
    /// Create a new cleanup guard and register the path
    pub fn new(ctx: SharedCleanupContext, path: PathBuf) -> Self {
        lock(&ctx).add(path.clone());
        Self { ctx, path }
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        lock(&self.ctx).remove(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_context_add_remove() {
        let mut ctx = CleanupContext::new();
        let path = PathBuf::from("/tmp/test.partial");

        ctx.add(path.clone());
        assert_eq!(ctx.paths.len(), 1);

        ctx.remove(&path);
        assert_eq!(ctx.paths.len(), 0);
    }

    #[test]
    fn test_cleanup_context_removes_files() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("eldrin-core-binary.partial");
        fs::write(&file_path, "partial").unwrap();

        let mut ctx = CleanupContext::new();
        ctx.add(file_path.clone());
        ctx.add(dir.path().join("never-created.partial"));

        ctx.cleanup();
        assert!(!file_path.exists());
    }

    #[test]
    fn test_cleanup_guard_registers_while_alive() {
        let ctx = new_shared();
        let path = PathBuf::from("/tmp/test.partial");

        {
            let _guard = CleanupGuard::new(Arc::clone(&ctx), path.clone());
            assert_eq!(lock(&ctx).paths, vec![path.clone()]);
        }

        assert!(lock(&ctx).paths.is_empty());
    }
}
