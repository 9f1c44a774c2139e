//! Defines the command-line interfaces of the two tools.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fix-trailing-commas",
    version,
    about = "Remove trailing commas before closing brackets and braces."
)]
pub struct CommasCli {
    /// Files to fix. [default: the built-in list of Swift sources]
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Report which files would change without writing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Print a diff of the pending changes instead of writing files.
    #[arg(long)]
    pub diff: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(
    name = "update-anchors",
    version,
    about = "Replace anchored <!-- NAME --> ... <!-- /NAME --> blocks in a Markdown document.",
    after_help = "Example:\n    update-anchors P0_TASKS new_p0.md METRICS new_metrics.md\n    echo \"new content\" | update-anchors P0_TASKS -"
)]
pub struct AnchorsCli {
    /// Anchor name and content source pairs. Use '-' as source to read from stdin.
    #[arg(value_name = "ANCHOR SOURCE")]
    pub pairs: Vec<String>,

    /// The Markdown document to update. [default: ROADMAP.md]
    #[arg(short, long, value_name = "FILE_PATH")]
    pub document: Option<PathBuf>,

    /// A JSON, YAML or TOML file listing additional updates.
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Print the updated document instead of writing it.
    #[arg(long)]
    pub dry_run: bool,

    /// Show a diff of the pending changes instead of writing the document.
    #[arg(long)]
    pub diff: bool,
}
