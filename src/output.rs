//! Shared helpers for emitting rewritten content.

use crate::error::PatchError;
use similar::TextDiff;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::Builder as TempFileBuilder;

/// How a tool should emit the content it rewrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Replace the file on disk.
    #[default]
    Write,
    /// Report the result without touching the file.
    DryRun,
    /// Print a unified diff without touching the file.
    Diff,
}

impl OutputMode {
    /// Picks the mode from the `--dry-run` / `--diff` flag pair. `--diff` wins.
    pub fn from_flags(dry_run: bool, diff: bool) -> Self {
        if diff {
            OutputMode::Diff
        } else if dry_run {
            OutputMode::DryRun
        } else {
            OutputMode::Write
        }
    }

    pub fn writes(self) -> bool {
        self == OutputMode::Write
    }
}

/// Replaces `path` with `content` through a temporary file in the same directory,
/// so readers never observe a half-written file. An existing file keeps its permissions.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), PatchError> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = TempFileBuilder::new()
        .prefix(".textpatch-")
        .suffix(".tmp")
        .tempfile_in(parent_dir)
        .map_err(|err| PatchError::io(parent_dir, err))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|err| PatchError::io(temp_file.path(), err))?;

    if let Ok(metadata) = fs::metadata(path) {
        temp_file
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|err| PatchError::io(temp_file.path(), err))?;
    }

    temp_file
        .persist(path)
        .map_err(|err| PatchError::io(path, err.error))?;

    Ok(())
}

/// Renders a unified diff between two versions of the file at `path`.
pub fn unified_diff(path: &Path, original: &str, updated: &str) -> String {
    let label = path.display().to_string();
    TextDiff::from_lines(original, updated)
        .unified_diff()
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
