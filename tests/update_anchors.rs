use assert_cmd::Command;
use assert_fs::prelude::*;
use insta::assert_snapshot;
use predicates::prelude::*;

const ROADMAP: &str = "# Roadmap\n\n## P0\n<!-- P0_TASKS -->\n- old task\n<!-- /P0_TASKS -->\n\n## Metrics\n<!-- METRICS -->\nstale\n<!-- /METRICS -->\n";

fn cmd() -> Command {
    Command::cargo_bin("update-anchors").unwrap()
}

fn roadmap_dir() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("ROADMAP.md").write_str(ROADMAP).unwrap();
    temp
}

#[test]
fn replaces_blocks_from_files() {
    let temp = roadmap_dir();
    temp.child("p0.md")
        .write_str("\n- [ ] ship anchors\n- [ ] write docs\n\n")
        .unwrap();
    temp.child("metrics.md").write_str("coverage: 91%").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["P0_TASKS", "p0.md", "METRICS", "metrics.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated P0_TASKS block"))
        .stdout(predicate::str::contains("Updated METRICS block"))
        .stdout(predicate::str::contains("ROADMAP.md updated successfully"));

    let content = std::fs::read_to_string(temp.child("ROADMAP.md").path()).unwrap();
    assert_snapshot!(content, @r###"# Roadmap

## P0
<!-- P0_TASKS -->
- [ ] ship anchors
- [ ] write docs
<!-- /P0_TASKS -->

## Metrics
<!-- METRICS -->
coverage: 91%
<!-- /METRICS -->
"###);
}

#[test]
fn reads_replacement_from_stdin() {
    let temp = roadmap_dir();

    cmd()
        .current_dir(temp.path())
        .args(["METRICS", "-"])
        .write_stdin("from the pipe\n")
        .assert()
        .success();

    let content = std::fs::read_to_string(temp.child("ROADMAP.md").path()).unwrap();
    assert!(content.contains("<!-- METRICS -->\nfrom the pipe\n<!-- /METRICS -->"));
    assert!(content.contains("<!-- P0_TASKS -->\n- old task\n<!-- /P0_TASKS -->"));
}

#[test]
fn inline_block_is_expanded_onto_its_own_lines() {
    let temp = assert_fs::TempDir::new().unwrap();
    let doc = temp.child("ROADMAP.md");
    doc.write_str("before <!-- X -->old<!-- /X --> after").unwrap();
    temp.child("x.md").write_str("  content  ").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["X", "x.md"])
        .assert()
        .success();

    doc.assert("before <!-- X -->\ncontent\n<!-- /X --> after");
}

#[test]
fn unknown_anchor_warns_and_keeps_document() {
    let temp = roadmap_dir();
    temp.child("new.md").write_str("anything").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["MISSING", "new.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: Anchor MISSING not found in ROADMAP.md",
        ))
        .stdout(predicate::str::contains("ROADMAP.md updated successfully"));

    temp.child("ROADMAP.md").assert(ROADMAP);
}

#[test]
fn missing_source_file_is_skipped() {
    let temp = roadmap_dir();
    temp.child("metrics.md").write_str("fresh").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["P0_TASKS", "absent.md", "METRICS", "metrics.md"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: absent.md not found, skipping P0_TASKS",
        ));

    let content = std::fs::read_to_string(temp.child("ROADMAP.md").path()).unwrap();
    assert!(content.contains("- old task"));
    assert!(content.contains("<!-- METRICS -->\nfresh\n<!-- /METRICS -->"));
}

#[test]
fn no_arguments_is_a_usage_error() {
    let temp = roadmap_dir();

    cmd()
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: update-anchors"));

    temp.child("ROADMAP.md").assert(ROADMAP);
}

#[test]
fn odd_argument_count_is_a_usage_error() {
    let temp = roadmap_dir();
    temp.child("p0.md").write_str("new").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["P0_TASKS", "p0.md", "METRICS"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage: update-anchors"));

    temp.child("ROADMAP.md").assert(ROADMAP);
}

#[test]
fn missing_document_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("p0.md").write_str("new").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["P0_TASKS", "p0.md"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ROADMAP.md not found"));

    temp.child("ROADMAP.md").assert(predicate::path::missing());
}

#[test]
fn second_anchor_can_come_from_first_replacement() {
    let temp = assert_fs::TempDir::new().unwrap();
    let doc = temp.child("ROADMAP.md");
    doc.write_str("<!-- OUTER -->\n<!-- /OUTER -->\n").unwrap();
    temp.child("outer.md")
        .write_str("intro\n<!-- INNER -->\n<!-- /INNER -->")
        .unwrap();
    temp.child("inner.md").write_str("nested").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["OUTER", "outer.md", "INNER", "inner.md"])
        .assert()
        .success();

    doc.assert("<!-- OUTER -->\nintro\n<!-- INNER -->\nnested\n<!-- /INNER -->\n<!-- /OUTER -->\n");
}

#[test]
fn document_flag_selects_target() {
    let temp = assert_fs::TempDir::new().unwrap();
    let doc = temp.child("docs/PLAN.md");
    doc.write_str("<!-- A -->x<!-- /A -->").unwrap();
    temp.child("a.md").write_str("y").unwrap();

    cmd()
        .current_dir(temp.path())
        .arg("--document")
        .arg(doc.path())
        .args(["A", "a.md"])
        .assert()
        .success();

    doc.assert("<!-- A -->\ny\n<!-- /A -->");
}

#[test]
fn dry_run_prints_document_without_writing() {
    let temp = roadmap_dir();
    temp.child("metrics.md").write_str("fresh").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["--dry-run", "METRICS", "metrics.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!-- METRICS -->\nfresh\n<!-- /METRICS -->"))
        .stdout(predicate::str::contains("updated successfully").not());

    temp.child("ROADMAP.md").assert(ROADMAP);
}

#[test]
fn diff_shows_pending_changes() {
    let temp = roadmap_dir();
    temp.child("metrics.md").write_str("fresh").unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["--diff", "METRICS", "metrics.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-stale"))
        .stdout(predicate::str::contains("+fresh"));

    temp.child("ROADMAP.md").assert(ROADMAP);
}

#[test]
fn manifest_supplies_updates_and_document() {
    let temp = assert_fs::TempDir::new().unwrap();
    let doc = temp.child("PLAN.md");
    doc.write_str("<!-- A -->1<!-- /A -->\n<!-- B -->2<!-- /B -->\n")
        .unwrap();
    temp.child("b.md").write_str("from file").unwrap();
    temp.child("updates.yaml")
        .write_str(
            "document: PLAN.md\nupdates:\n  - anchor: A\n    content: inline\n  - anchor: B\n    file: b.md\n",
        )
        .unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["--manifest", "updates.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PLAN.md updated successfully"));

    doc.assert("<!-- A -->\ninline\n<!-- /A -->\n<!-- B -->\nfrom file\n<!-- /B -->\n");
}

#[test]
fn manifest_updates_run_after_positional_pairs() {
    let temp = roadmap_dir();
    temp.child("p0.md").write_str("positional").unwrap();
    temp.child("updates.toml")
        .write_str("[[updates]]\nanchor = \"P0_TASKS\"\ncontent = \"manifest\"\n")
        .unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["--manifest", "updates.toml", "P0_TASKS", "p0.md"])
        .assert()
        .success();

    let content = std::fs::read_to_string(temp.child("ROADMAP.md").path()).unwrap();
    assert!(content.contains("<!-- P0_TASKS -->\nmanifest\n<!-- /P0_TASKS -->"));
}

#[test]
fn invalid_manifest_is_fatal() {
    let temp = roadmap_dir();
    temp.child("updates.json")
        .write_str(r#"{"updates": [{"anchor": "P0_TASKS"}]}"#)
        .unwrap();

    cmd()
        .current_dir(temp.path())
        .args(["--manifest", "updates.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("neither 'file' nor 'content'"));

    temp.child("ROADMAP.md").assert(ROADMAP);
}
