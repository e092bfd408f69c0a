use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tokio::fs::{canonicalize, metadata, read_dir, symlink_metadata, try_exists};

pub const WORKSPACE_DIR_NAME: &str = ".fractalvault";
const WALK_IGNORE_DOT_FILES: bool = true;

#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    pub work_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePath {
    pub base: PathBuf,
    /// Start directory relative to `base`
    pub rel_path: PathBuf,
}
impl WorkspacePath {
    pub fn config(&self) -> WorkspaceConfig {
        WorkspaceConfig {
            work_dir: self.base.join(WORKSPACE_DIR_NAME),
        }
    }
}

/// Walk up from `start` until a directory holding [`WORKSPACE_DIR_NAME`] is found.
pub async fn locate_workspace(start: impl AsRef<Path>) -> anyhow::Result<Option<WorkspacePath>> {
    let start = start.as_ref();
    let path = canonicalize(start)
        .await
        .with_context(|| format!("canonicalize {start:?}"))?;
    let mut search_base: &Path = &path;
    let mut rel_path = PathBuf::new();
    loop {
        let work_dir = search_base.join(WORKSPACE_DIR_NAME);
        if try_exists(&work_dir)
            .await
            .with_context(|| format!("{work_dir:?}"))?
        {
            return Ok(Some(WorkspacePath {
                base: search_base.to_path_buf(),
                rel_path,
            }));
        }
        let (Some(parent), Some(name)) = (search_base.parent(), search_base.file_name()) else {
            break;
        };
        rel_path = Path::new(name).join(rel_path);
        search_base = parent;
    }
    Ok(None)
}

pub async fn visit_files(path: impl AsRef<Path>) -> anyhow::Result<Vec<PathBuf>> {
    let root = path.as_ref().to_path_buf();
    let mut paths_to_visit = VecDeque::from_iter([root.clone()]);
    let mut visited_files = vec![];
    while let Some(path) = paths_to_visit.pop_front() {
        let meta_data = match path == root {
            true => metadata(&path).await,
            false => symlink_metadata(&path).await,
        }
        .with_context(|| format!("{path:?}"))?;
        if meta_data.is_symlink() {
            tracing::debug!(?path, "skip symlink");
            continue;
        }
        if meta_data.is_file() {
            visited_files.push(path);
            continue;
        }
        if !meta_data.is_dir() {
            continue;
        }
        if WALK_IGNORE_DOT_FILES
            && path != root
            && let Some(file_name) = path.file_name()
            && file_name.to_string_lossy().starts_with(".")
        {
            continue;
        }
        let mut read_dir = read_dir(&path)
            .await
            .with_context(|| format!("{path:?}"))?;
        while let Some(entry) = read_dir.next_entry().await? {
            paths_to_visit.push_back(entry.path());
        }
    }
    Ok(visited_files)
}
