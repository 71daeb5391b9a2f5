// Batch layout: a root directory of groups, each group a directory of
// instance files

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::solver_service::{KnapsackError, Result};

/// An instance file found in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceFile {
    /// Name of the group directory (for example the item count)
    pub group: String,
    /// File name, as written to the report
    pub name: String,
    pub path: PathBuf,
}

/// List every instance file under `root`, ordered by group then file name.
pub fn discover_instances(root: impl AsRef<Path>) -> Result<Vec<InstanceFile>> {
    let root = root.as_ref();
    let mut files = Vec::new();

    for group_dir in sorted_entries(root)? {
        if !group_dir.is_dir() {
            log::debug!("ignoring {}: not a group directory", group_dir.display());
            continue;
        }
        let group = file_name(&group_dir);

        for path in sorted_entries(&group_dir)? {
            if path.is_file() {
                files.push(InstanceFile {
                    group: group.clone(),
                    name: file_name(&path),
                    path,
                });
            }
        }
    }

    log::info!("found {} instances under {}", files.len(), root.display());
    Ok(files)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| KnapsackError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| KnapsackError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
