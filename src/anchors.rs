//! Replacement of anchored blocks inside a Markdown document.
//!
//! An anchor named `NAME` is delimited by the HTML comments `<!-- NAME -->`
//! and `<!-- /NAME -->`. Updating the anchor replaces everything between the
//! start marker and the next end marker with new content.

use crate::error::PatchError;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Source argument meaning "read the replacement from standard input".
pub const STDIN_SENTINEL: &str = "-";

/// Document updated when no `--document` is given.
pub const DEFAULT_DOCUMENT: &str = "ROADMAP.md";

/// A named marker pair in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    name: String,
}

impl Anchor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The `<!-- NAME -->` comment that opens the block.
    pub fn start_marker(&self) -> String {
        format!("<!-- {} -->", self.name)
    }

    /// The `<!-- /NAME -->` comment that closes the block.
    pub fn end_marker(&self) -> String {
        format!("<!-- /{} -->", self.name)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Where the replacement text for an anchor comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Inline(String),
}

impl Source {
    /// Interprets a command-line source argument.
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIN_SENTINEL {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }
}

/// One anchor to update and the content to put in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorUpdate {
    pub anchor: Anchor,
    pub source: Source,
}

impl AnchorUpdate {
    pub fn new(anchor: impl Into<String>, source: Source) -> Self {
        Self {
            anchor: Anchor::new(anchor),
            source,
        }
    }
}

/// Splits a flat `ANCHOR SOURCE ANCHOR SOURCE ...` argument list into updates.
///
/// Fails with [`PatchError::Usage`] when the list is empty or has odd length.
pub fn parse_pairs<S: AsRef<str>>(args: &[S]) -> Result<Vec<AnchorUpdate>, PatchError> {
    if args.is_empty() || args.len() % 2 != 0 {
        return Err(PatchError::Usage);
    }

    Ok(args
        .chunks_exact(2)
        .map(|pair| AnchorUpdate::new(pair[0].as_ref(), Source::from_arg(pair[1].as_ref())))
        .collect())
}

/// Replaces the first block delimited by `anchor` in `text`.
///
/// The new block is the start marker, a newline, the trimmed replacement, a
/// newline and the end marker. Everything outside the block is kept verbatim.
/// Returns `None` when the document has no start marker followed by an end marker.
pub fn replace_block(text: &str, anchor: &Anchor, replacement: &str) -> Option<String> {
    let start = anchor.start_marker();
    let end = anchor.end_marker();

    let block_start = text.find(&start)?;
    let content_start = block_start + start.len();
    let block_end = content_start + text[content_start..].find(&end)? + end.len();
    let replacement = replacement.trim();

    let kept = text.len() - (block_end - block_start);
    let mut result =
        String::with_capacity(kept + start.len() + replacement.len() + end.len() + 2);
    result.push_str(&text[..block_start]);
    result.push_str(&start);
    result.push('\n');
    result.push_str(replacement);
    result.push('\n');
    result.push_str(&end);
    result.push_str(&text[block_end..]);

    Some(result)
}

/// The result of applying a single [`AnchorUpdate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorOutcome {
    Updated,
    /// The document has no complete marker pair for the anchor.
    MarkersNotFound,
    /// The replacement file does not exist.
    SourceMissing(PathBuf),
}

/// Applies anchor updates, in order, to an in-memory document.
///
/// Each update sees the result of every update before it.
pub struct AnchorUpdater<R> {
    content: String,
    stdin: R,
    stdin_consumed: bool,
}

impl<R: Read> AnchorUpdater<R> {
    pub fn new(content: String, stdin: R) -> Self {
        Self {
            content,
            stdin,
            stdin_consumed: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    pub fn apply(&mut self, update: &AnchorUpdate) -> Result<AnchorOutcome, PatchError> {
        let replacement = match &update.source {
            Source::File(path) if !path.exists() => {
                return Ok(AnchorOutcome::SourceMissing(path.clone()));
            }
            source => self.resolve_source(source)?,
        };

        match replace_block(&self.content, &update.anchor, &replacement) {
            Some(updated) => {
                log::debug!(
                    "Replaced block {} ({} bytes of content)",
                    update.anchor,
                    replacement.trim().len()
                );
                self.content = updated;
                Ok(AnchorOutcome::Updated)
            }
            None => Ok(AnchorOutcome::MarkersNotFound),
        }
    }

    fn resolve_source(&mut self, source: &Source) -> Result<String, PatchError> {
        match source {
            Source::Inline(text) => Ok(text.clone()),
            Source::Stdin => {
                if self.stdin_consumed {
                    log::warn!("Standard input was already consumed by an earlier anchor");
                }
                let mut buf = String::new();
                self.stdin
                    .read_to_string(&mut buf)
                    .map_err(|err| PatchError::io("<stdin>", err))?;
                self.stdin_consumed = true;
                Ok(buf)
            }
            Source::File(path) => {
                fs::read_to_string(path).map_err(|err| PatchError::io(path, err))
            }
        }
    }
}
