mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::Fixture;
use predicates::prelude::*;

fn confglob(fx: &Fixture) -> Result<Command> {
    let mut cmd = Command::cargo_bin("confglob")?;
    cmd.current_dir(fx.path())
        .env("HOME", fx.path())
        .env_remove("RUST_LOG")
        .env("CONFGLOB_SETTINGS", fx.path().join("absent.toml"));
    Ok(cmd)
}

fn site_tree(fx: &Fixture) -> Result<()> {
    fx.file("main.conf", "http {\n    recursive_include sites/*/site.conf;\n}\n")?;
    fx.file("sites/a/site.conf", "server a;\n")?;
    fx.file("sites/b/site.conf", "server b;\n")?;
    Ok(())
}

#[test]
fn test_check_reports_file_count() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;

    confglob(&fx)?
        .args(["check", "main.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 file(s)"));
    Ok(())
}

#[test]
fn test_check_verbose_lists_parsed_files() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;

    confglob(&fx)?
        .args(["--verbose", "check", "main.conf"])
        .assert()
        .success()
        .stderr(predicate::str::contains("sites/a/site.conf"))
        .stderr(predicate::str::contains("sites/b/site.conf"));
    Ok(())
}

#[test]
fn test_check_quiet_prints_nothing() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;

    confglob(&fx)?
        .args(["--quiet", "check", "main.conf"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn test_check_failure_exits_nonzero() -> Result<()> {
    let fx = Fixture::new()?;
    fx.file("main.conf", "recursive_include conf.d/*.conf;\n")?;
    fx.file("conf.d/bad.conf", "server {\n")?;

    confglob(&fx)?
        .args(["check", "main.conf"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("failed to parse"))
        .stderr(predicate::str::contains("bad.conf"));
    Ok(())
}

#[test]
fn test_resolve_prints_matches_in_order() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;

    let assert = confglob(&fx)?
        .args(["resolve", "sites/*/site.conf"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("sites/a/site.conf"));
    assert!(lines[1].ends_with("sites/b/site.conf"));
    Ok(())
}

#[test]
fn test_resolve_uses_prefix_from_settings() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;
    let settings = fx.settings()?;

    let mut cmd = Command::cargo_bin("confglob")?;
    cmd.current_dir(std::env::temp_dir())
        .env("HOME", fx.path())
        .arg("--settings")
        .arg(&settings)
        .args(["resolve", "sites/*/site.conf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sites/a/site.conf"));
    Ok(())
}

#[test]
fn test_resolve_no_matches() -> Result<()> {
    let fx = Fixture::new()?;

    confglob(&fx)?
        .args(["resolve", "nothing/*/x.conf"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No files match"));
    Ok(())
}

#[test]
fn test_dump_splices_includes() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;

    confglob(&fx)?
        .args(["dump", "main.conf"])
        .assert()
        .success()
        .stdout("http {\n    server a;\n    server b;\n}\n");
    Ok(())
}

#[test]
fn test_invalid_settings_rejected() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;
    let settings = fx.file("bad.toml", "[log]\nlevel = \"loud\"\n")?;

    confglob(&fx)?
        .arg("--settings")
        .arg(&settings)
        .args(["check", "main.conf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level"));
    Ok(())
}

#[test]
fn test_unknown_settings_field_warns() -> Result<()> {
    let fx = Fixture::new()?;
    site_tree(&fx)?;
    let settings = fx.file("extra.toml", "[include]\nrecurse = true\n")?;

    confglob(&fx)?
        .arg("--settings")
        .arg(&settings)
        .args(["check", "main.conf"])
        .assert()
        .success()
        .stderr(predicate::str::contains("include.recurse"));
    Ok(())
}

#[test]
fn test_completion_generation() -> Result<()> {
    let fx = Fixture::new()?;

    confglob(&fx)?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("confglob"));
    Ok(())
}
