//! Trailing-comma normalization for source files.
//!
//! The normalizer is purely textual: it removes any comma that is followed by
//! optional whitespace and a closing `]` or `}`. A comma inside a string
//! literal or comment that happens to sit in front of a closing bracket is
//! indistinguishable from a structural one and is stripped as well.

use crate::error::PatchError;
use crate::output::{self, OutputMode};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Files rewritten when the tool is invoked without explicit paths.
pub const DEFAULT_FILES: &[&str] = &[
    "RollCallTests/UI/Tokens/ColorContrastMatrixTests.swift",
    "RollCallTests/Core/Models/RestaurantTests.swift",
    "RollCallTests/Core/Services/KeychainServiceTests.swift",
    "RollCallTests/OnboardingViewStateTests.swift",
    "RollCall/UI/Components/SakuraPetal.swift",
    "RollCall/UI/Components/GradientCTAButton.swift",
    "RollCall/UI/Animations/ConfettiPiece.swift",
    "RollCall/Core/Mocks/MockChefData.swift",
    "RollCall/Core/Mocks/MockRestaurantData.swift",
    "RollCall/Core/Mocks/MockRollData.swift",
    "RollCall/Core/Persistence/Repositories/CoreDataRestaurantRepository.swift",
    "RollCall/Core/Services/KeychainService.swift",
    "RollCall/Features/Feed/FeedCoordinator.swift",
];

/// Comma at the end of a multi-line construct: the whitespace run contains a newline.
static MULTILINE_TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*\n\s*[\]}])").unwrap());

/// Run of commas separated only by whitespace, followed by a closing bracket.
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(?:\s*,)*(\s*[\]}])").unwrap());

/// Removes trailing commas that precede a closing `]` or `}`.
///
/// Both passes run in sequence. The second one removes a whole run of commas
/// such as `[1, , ,]`, so normalized text is left unchanged by another run.
///
/// Returns [`Cow::Borrowed`] when nothing was removed.
pub fn normalize(text: &str) -> Cow<'_, str> {
    let first = MULTILINE_TRAILING_COMMA.replace_all(text, "$1");
    let second = match TRAILING_COMMA.replace_all(&first, "$1") {
        Cow::Borrowed(_) => None,
        Cow::Owned(second) => Some(second),
    };
    match second {
        Some(second) => Cow::Owned(second),
        None => first,
    }
}

/// The result of normalizing a single file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file contained trailing commas. `diff` is set in [`OutputMode::Diff`].
    Fixed { diff: Option<String> },
    Unchanged,
    Failed(PatchError),
}

/// Normalizes the file at `path`, writing it back only if its content changed.
pub fn fix_file(path: &Path, mode: OutputMode) -> FileOutcome {
    let original = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => return FileOutcome::Failed(PatchError::io(path, err)),
    };

    let fixed = match normalize(&original) {
        Cow::Borrowed(_) => {
            log::debug!("No trailing commas in {}", path.display());
            return FileOutcome::Unchanged;
        }
        Cow::Owned(fixed) => fixed,
    };

    match mode {
        OutputMode::Write => {
            if let Err(err) = output::write_atomic(path, &fixed) {
                return FileOutcome::Failed(err);
            }
            FileOutcome::Fixed { diff: None }
        }
        OutputMode::DryRun => FileOutcome::Fixed { diff: None },
        OutputMode::Diff => FileOutcome::Fixed {
            diff: Some(output::unified_diff(path, &original, &fixed)),
        },
    }
}

/// A per-file failure recorded in a [`Summary`].
#[derive(Debug, Serialize)]
pub struct FileError {
    pub path: PathBuf,
    pub message: String,
}

/// What happened over a batch of files.
#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub fixed: Vec<PathBuf>,
    pub errors: Vec<FileError>,
    pub fixed_count: usize,
}

/// Runs [`fix_file`] over every path, in order, never stopping on a failure.
///
/// `on_outcome` is called after each file so callers can report progress as it happens.
pub fn fix_files<P, F>(paths: &[P], mode: OutputMode, mut on_outcome: F) -> Summary
where
    P: AsRef<Path>,
    F: FnMut(&Path, &FileOutcome),
{
    let mut summary = Summary::default();

    for path in paths {
        let path = path.as_ref();
        let outcome = fix_file(path, mode);
        on_outcome(path, &outcome);

        match outcome {
            FileOutcome::Fixed { .. } => {
                summary.fixed.push(path.to_path_buf());
                summary.fixed_count += 1;
            }
            FileOutcome::Unchanged => {}
            FileOutcome::Failed(err) => summary.errors.push(FileError {
                path: path.to_path_buf(),
                message: failure_message(&err),
            }),
        }
    }

    summary
}

/// The error detail shown next to the path, without repeating the path.
pub fn failure_message(err: &PatchError) -> String {
    match err {
        PatchError::Io { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
