//! Entry points of the `fix-trailing-commas` and `update-anchors` executables.

use crate::anchors::{self, AnchorOutcome, AnchorUpdater};
use crate::cli::{AnchorsCli, CommasCli};
use crate::commas::{self, FileOutcome};
use crate::error::PatchError;
use crate::manifest::Manifest;
use crate::output::{self, OutputMode};
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Runs `fix-trailing-commas`. Per-file failures are reported, never returned.
pub fn run_fix_trailing_commas() -> anyhow::Result<()> {
    env_logger::init();

    let CommasCli {
        paths,
        dry_run,
        diff,
        json,
    } = CommasCli::parse();

    let mode = OutputMode::from_flags(dry_run, diff);
    let paths = if paths.is_empty() {
        commas::DEFAULT_FILES.iter().map(PathBuf::from).collect()
    } else {
        paths
    };
    log::debug!("Normalizing {} file(s) in {:?} mode", paths.len(), mode);

    let fixed_label = if mode.writes() { "Fixed" } else { "Would fix" };

    let summary = commas::fix_files(&paths, mode, |path, outcome| {
        if json {
            return;
        }
        match outcome {
            FileOutcome::Fixed { diff } => {
                if let Some(diff) = diff {
                    print!("{diff}");
                }
                println!("{fixed_label}: {}", path.display());
            }
            FileOutcome::Unchanged => {}
            FileOutcome::Failed(err) => {
                eprintln!(
                    "Error processing {}: {}",
                    path.display(),
                    commas::failure_message(err)
                );
            }
        }
    });

    if json {
        let rendered = serde_json::to_string_pretty(&summary)?;
        println!("{rendered}");
    } else {
        println!("\n{fixed_label} {} files", summary.fixed_count);
    }

    Ok(())
}

/// Runs `update-anchors`.
///
/// Bad usage and a missing document are fatal; a missing source file or an
/// anchor absent from the document only produces a warning.
pub fn run_update_anchors() -> anyhow::Result<()> {
    env_logger::init();

    let AnchorsCli {
        pairs,
        document,
        manifest,
        dry_run,
        diff,
    } = AnchorsCli::parse();

    let mode = OutputMode::from_flags(dry_run, diff);

    // Argument shape is checked before touching the filesystem.
    let mut updates = if pairs.is_empty() && manifest.is_some() {
        Vec::new()
    } else {
        anchors::parse_pairs(&pairs)?
    };

    let manifest = manifest
        .map(|path| {
            Manifest::load(&path)
                .with_context(|| format!("Failed to load manifest: {}", path.display()))
        })
        .transpose()?
        .unwrap_or_default();

    let document = document
        .or(manifest.document.clone())
        .unwrap_or_else(|| PathBuf::from(anchors::DEFAULT_DOCUMENT));
    updates.extend(manifest.into_updates()?);

    if !document.exists() {
        return Err(PatchError::DocumentNotFound(document).into());
    }

    let original = fs::read_to_string(&document)
        .with_context(|| format!("Failed to read document: {}", document.display()))?;

    let document_name = document.display().to_string();
    let status = |line: String| {
        if mode.writes() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    };

    let mut updater = AnchorUpdater::new(original.clone(), io::stdin());
    for update in &updates {
        match updater.apply(update)? {
            AnchorOutcome::Updated => status(format!("Updated {} block", update.anchor)),
            AnchorOutcome::MarkersNotFound => eprintln!(
                "Warning: Anchor {} not found in {document_name}",
                update.anchor
            ),
            AnchorOutcome::SourceMissing(path) => eprintln!(
                "Warning: {} not found, skipping {}",
                path.display(),
                update.anchor
            ),
        }
    }
    let updated = updater.into_content();

    match mode {
        OutputMode::Write => {
            output::write_atomic(&document, &updated)
                .with_context(|| format!("Failed to write document: {document_name}"))?;
            status(format!("{document_name} updated successfully"));
        }
        OutputMode::DryRun => io::stdout().write_all(updated.as_bytes())?,
        OutputMode::Diff => {
            let diff = output::unified_diff(&document, &original, &updated);
            io::stdout().write_all(diff.as_bytes())?;
        }
    }

    Ok(())
}
