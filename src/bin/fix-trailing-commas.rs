//! The fix-trailing-commas command-line executable.

fn main() -> anyhow::Result<()> {
    textpatch::app::run_fix_trailing_commas()
}
