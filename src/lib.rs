//! `textpatch` holds the logic behind two small text-rewriting tools.
//!
//! - [`commas`] strips trailing commas that precede a closing `]` or `}`.
//! - [`anchors`] replaces the content of `<!-- NAME -->` ... `<!-- /NAME -->`
//!   blocks in a Markdown document.
//!
//! # Example
//!
//! ```rust
//! use textpatch::anchors::{replace_block, Anchor};
//! use textpatch::commas::normalize;
//!
//! assert_eq!(normalize("[1, 2, 3,\n]"), "[1, 2, 3\n]");
//!
//! let doc = "# Roadmap\n<!-- P0 -->old<!-- /P0 -->\n";
//! let updated = replace_block(doc, &Anchor::new("P0"), "- [ ] ship it\n").unwrap();
//! assert_eq!(updated, "# Roadmap\n<!-- P0 -->\n- [ ] ship it\n<!-- /P0 -->\n");
//! ```

pub mod anchors;
pub mod app;
pub mod cli;
pub mod commas;
pub mod error;
pub mod manifest;
pub mod output;

pub use error::PatchError;
