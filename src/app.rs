use std::{
    future::Future,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tokio::fs::metadata;

use crate::workspace::{locate_workspace, visit_files};

/// Application driven by the bootstrap.
pub trait App {
    fn run(&mut self) -> impl Future<Output = anyhow::Result<()>>;
}

#[derive(Debug, Clone)]
pub struct FractalVault {
    verbose: bool,
    start_dir: PathBuf,
}
impl FractalVault {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            start_dir: ".".into(),
        }
    }
    pub fn with_start_dir(mut self, start_dir: impl AsRef<Path>) -> Self {
        self.start_dir = start_dir.as_ref().to_path_buf();
        self
    }
    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
impl App for FractalVault {
    async fn run(&mut self) -> anyhow::Result<()> {
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "fractalvault starting");
        tracing::debug!(verbose = self.verbose, start_dir = ?self.start_dir, "options");

        let Some(workspace) = locate_workspace(&self.start_dir).await? else {
            return Err(anyhow::anyhow!("vault not found from {:?}", self.start_dir));
        };
        let config = workspace.config();
        let work_dir_meta = metadata(&config.work_dir)
            .await
            .with_context(|| format!("{:?}", config.work_dir))?;
        if !work_dir_meta.is_dir() {
            return Err(anyhow::anyhow!("{:?} is not a directory", config.work_dir));
        }
        tracing::debug!(base = ?workspace.base, rel_path = ?workspace.rel_path, "vault located");

        let files = visit_files(&workspace.base)
            .await
            .with_context(|| format!("walk {:?}", workspace.base))?;
        for file in &files {
            let rel = file.strip_prefix(&workspace.base).unwrap_or(file);
            tracing::debug!(file = ?rel, "tracked");
        }
        tracing::info!(base = ?workspace.base, files = files.len(), "vault ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::fs::{canonicalize, create_dir_all, remove_dir_all, symlink, write};

    use crate::workspace::WORKSPACE_DIR_NAME;

    use super::*;

    async fn scratch(name: &str) -> PathBuf {
        let dir = Path::new("./target/test/app").join(name);
        let _ = remove_dir_all(&dir).await;
        create_dir_all(&dir).await.unwrap();
        dir
    }

    #[tokio::test]
    async fn run_in_workspace() {
        let dir = scratch("ok").await;
        create_dir_all(dir.join(WORKSPACE_DIR_NAME)).await.unwrap();
        create_dir_all(dir.join("sub")).await.unwrap();
        write(dir.join("sub/file"), b"data").await.unwrap();

        let mut app = FractalVault::new(true).with_start_dir(dir.join("sub"));
        assert!(app.verbose());
        app.run().await.unwrap();
    }

    #[tokio::test]
    async fn run_with_stray_symlinks() {
        let dir = scratch("symlinks").await;
        create_dir_all(dir.join(WORKSPACE_DIR_NAME)).await.unwrap();
        symlink("does-not-exist", dir.join("stale-link")).await.unwrap();
        symlink(".", dir.join("self")).await.unwrap();

        let mut app = FractalVault::new(false).with_start_dir(&dir);
        app.run().await.unwrap();
    }

    #[tokio::test]
    async fn run_outside_workspace() {
        let dir = scratch("none").await;
        // lookup climbs to `/`; a marker above the scratch dir would be found
        let marked = canonicalize(&dir)
            .await
            .unwrap()
            .ancestors()
            .find(|a| a.join(WORKSPACE_DIR_NAME).exists())
            .map(Path::to_path_buf);
        assert!(marked.is_none(), "{marked:?} holds {WORKSPACE_DIR_NAME}");
        let mut app = FractalVault::new(false).with_start_dir(&dir);
        let err = app.run().await.unwrap_err();
        assert!(err.to_string().contains("vault not found"));
    }

    #[tokio::test]
    async fn marker_is_file() {
        let dir = scratch("file_marker").await;
        write(dir.join(WORKSPACE_DIR_NAME), b"").await.unwrap();
        let mut app = FractalVault::new(false).with_start_dir(&dir);
        let err = app.run().await.unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }
}
