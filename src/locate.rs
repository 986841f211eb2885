//! locate.rs
//! File discovery and ordering.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{OrderDirective, TagField};
use crate::error::LocateError;
use crate::tags::TagHandle;

/// Collect every file under `root` whose name ends with `.<suffix>`
/// (exact, case-sensitive), ordered per `order`.
///
/// With `OrderDirective::None` the result keeps raw walk order, which is
/// not guaranteed stable across platforms.
pub fn list(
    root: &Path,
    suffix: &str,
    order: &OrderDirective,
) -> Result<Vec<PathBuf>, LocateError> {
    let dotted = format!(".{suffix}");
    let mut out = Vec::new();
    walk_dir(root, &dotted, &mut out)?;

    match order {
        OrderDirective::None => {}
        OrderDirective::ByFileName => out.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str())),
        OrderDirective::ByTag(field) => out = sort_by_tag(out, *field),
    }
    Ok(out)
}

fn walk_dir(dir: &Path, dotted: &str, out: &mut Vec<PathBuf>) -> Result<(), LocateError> {
    let entries = fs::read_dir(dir).map_err(|source| LocateError::Walk {
        dir: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LocateError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            walk_dir(&path, dotted, out)?;
        } else if matches_suffix(&path, dotted) {
            out.push(path);
        }
    }

    Ok(())
}

fn matches_suffix(path: &Path, dotted: &str) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|name| name.ends_with(dotted))
}

/// Stable sort on a tag field's text. Unreadable files and absent fields
/// sort as the empty string. Each file is opened once to build its key.
fn sort_by_tag(paths: Vec<PathBuf>, field: TagField) -> Vec<PathBuf> {
    let mut keyed: Vec<(String, PathBuf)> = paths
        .into_iter()
        .map(|path| {
            let key = TagHandle::open(&path)
                .ok()
                .and_then(|handle| handle.get(field))
                .unwrap_or_default();
            (key, path)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, path)| path).collect()
}
