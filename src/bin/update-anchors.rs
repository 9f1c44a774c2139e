//! The update-anchors command-line executable.

fn main() -> anyhow::Result<()> {
    textpatch::app::run_update_anchors()
}
