use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{MinimalError, MinimalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct DatasetHeader {
    width: u32,
    height: u32,
    premultiplied: bool,
}

/// Append-only store of named RGBA frames under hierarchical groups.
///
/// A frame named `n` in group `a/b` lives at `<root>/a/b/n.rgba` with its header in
/// `<root>/a/b/n.json`. The root group is `""` or `"/"`.
#[derive(Debug, Clone)]
pub struct FrameStore {
    root: PathBuf,
}

impl FrameStore {
    /// Open (or create) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> MinimalResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create frame store '{}'", root.display()))?;
        Ok(Self { root })
    }

    /// Directory backing the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `frame` as `group/name`; an existing key is never overwritten.
    #[tracing::instrument(skip(self, frame), fields(width = frame.width, height = frame.height))]
    pub fn put(&self, group: &str, name: &str, frame: &FrameRGBA) -> MinimalResult<()> {
        let dir = self.group_dir(group)?;
        check_name(name)?;
        let (data_path, header_path) = dataset_paths(&dir, name);
        if header_path.exists() || data_path.exists() {
            return Err(MinimalError::validation(format!(
                "dataset '{group}/{name}' already exists"
            )));
        }
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create group '{}'", dir.display()))?;

        let header = DatasetHeader {
            width: frame.width,
            height: frame.height,
            premultiplied: frame.premultiplied,
        };
        let json = serde_json::to_vec_pretty(&header)
            .map_err(|e| MinimalError::serde(format!("encode dataset header: {e}")))?;
        std::fs::write(&data_path, &frame.data)
            .with_context(|| format!("write dataset '{}'", data_path.display()))?;
        std::fs::write(&header_path, json)
            .with_context(|| format!("write dataset header '{}'", header_path.display()))?;
        Ok(())
    }

    /// Load `group/name`.
    pub fn get(&self, group: &str, name: &str) -> MinimalResult<FrameRGBA> {
        let dir = self.group_dir(group)?;
        check_name(name)?;
        let (data_path, header_path) = dataset_paths(&dir, name);
        let raw = std::fs::read(&header_path)
            .with_context(|| format!("read dataset header '{}'", header_path.display()))?;
        let header: DatasetHeader = serde_json::from_slice(&raw)
            .map_err(|e| MinimalError::serde(format!("decode dataset header: {e}")))?;
        let data = std::fs::read(&data_path)
            .with_context(|| format!("read dataset '{}'", data_path.display()))?;
        FrameRGBA::from_raw(header.width, header.height, data, header.premultiplied)
    }

    /// `true` when `group/name` was stored.
    pub fn contains(&self, group: &str, name: &str) -> bool {
        let Ok(dir) = self.group_dir(group) else {
            return false;
        };
        check_name(name).is_ok() && dataset_paths(&dir, name).1.exists()
    }

    /// Dataset names in `group`, sorted.
    pub fn names(&self, group: &str) -> MinimalResult<Vec<String>> {
        let dir = self.group_dir(group)?;
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in
            std::fs::read_dir(&dir).with_context(|| format!("list group '{}'", dir.display()))?
        {
            let path = entry.context("read group entry")?.path();
            if path.extension().is_some_and(|e| e == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn group_dir(&self, group: &str) -> MinimalResult<PathBuf> {
        let mut dir = self.root.clone();
        for part in group.split('/').filter(|p| !p.is_empty()) {
            check_name(part)?;
            dir.push(part);
        }
        Ok(dir)
    }
}

fn check_name(name: &str) -> MinimalResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(MinimalError::validation(format!(
            "'{name}' is not a valid dataset or group name"
        )));
    }
    Ok(())
}

fn dataset_paths(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{name}.rgba")),
        dir.join(format!("{name}.json")),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/display/store.rs"]
mod tests;
