mod common;

use anyhow::Result;
use common::{Fixture, resolve_all};
use confglob::IncludeError;
use confglob::config::IncludeSettings;
use confglob::resolver::PatternResolver;
use std::fs;
use std::path::{Path, PathBuf};

#[test]
fn test_single_glob_in_lexicographic_order() -> Result<()> {
    let fx = Fixture::new()?;
    let b = fx.file("conf.d/20-b.conf", "")?;
    let a = fx.file("conf.d/10-a.conf", "")?;
    fx.file("conf.d/notes.txt", "")?;

    assert_eq!(resolve_all(&fx.pattern("conf.d/*.conf"))?, vec![a, b]);
    Ok(())
}

#[test]
fn test_tree_pattern_reports_each_match_once() -> Result<()> {
    let fx = Fixture::new()?;
    let x = fx.file("root/x/site.conf", "")?;
    let y = fx.file("root/y/site.conf", "")?;
    fx.file("root/y/other.conf", "")?;
    fx.file("root/site.conf", "")?;

    let matches = resolve_all(&fx.pattern("root/*/site.conf"))?;
    assert_eq!(matches, vec![x, y]);
    Ok(())
}

#[test]
fn test_tree_pattern_skips_directory_without_match() -> Result<()> {
    let fx = Fixture::new()?;
    let x = fx.file("root/x/site.conf", "")?;
    fx.file("root/y/other.conf", "")?;

    assert_eq!(resolve_all(&fx.pattern("root/*/site.conf"))?, vec![x]);
    Ok(())
}

#[test]
fn test_tree_pattern_with_two_wildcard_levels() -> Result<()> {
    let fx = Fixture::new()?;
    let a = fx.file("sites/a/conf.d/1.conf", "")?;
    let b = fx.file("sites/a/conf.d/2.conf", "")?;
    let c = fx.file("sites/b/conf.d/1.conf", "")?;
    fx.file("sites/b/extra/1.conf", "")?;
    fx.file("sites/c/conf.d/deeper/1.conf", "")?;

    let matches = resolve_all(&fx.pattern("sites/*/conf.d/*.conf"))?;
    assert_eq!(matches, vec![a, b, c]);
    Ok(())
}

#[test]
fn test_zero_matches_is_success() -> Result<()> {
    let fx = Fixture::new()?;
    fx.file("conf.d/readme.txt", "")?;

    assert!(resolve_all(&fx.pattern("conf.d/*.conf"))?.is_empty());
    assert!(resolve_all(&fx.pattern("missing/*/site.conf"))?.is_empty());
    Ok(())
}

#[test]
fn test_callback_failure_stops_enumeration() -> Result<()> {
    let fx = Fixture::new()?;
    for dir in ["a", "b", "c"] {
        fx.file(&format!("root/{dir}/site.conf"), "")?;
    }

    let mut seen: Vec<PathBuf> = Vec::new();
    let err = PatternResolver::new()
        .resolve(&fx.pattern("root/*/site.conf"), &mut |path: &Path| {
            seen.push(path.to_path_buf());
            if path.parent().is_some_and(|p| p.ends_with("b")) {
                return Err(IncludeError::parse(path, anyhow::anyhow!("rejected")));
            }
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(err, IncludeError::ParseFailed { .. }));
    assert_eq!(seen.len(), 2);
    assert!(err.path().ends_with("b/site.conf"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_aborts_walk() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new()?;
    fx.file("root/a/conf.d/1.conf", "")?;
    fx.file("root/b/conf.d/1.conf", "")?;
    fx.file("root/c/conf.d/1.conf", "")?;

    let locked = fx.path().join("root/b");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // privileged users can still read the directory
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let mut seen: Vec<PathBuf> = Vec::new();
    let result = PatternResolver::new().resolve(
        &fx.pattern("root/*/conf.d/*.conf"),
        &mut |path: &Path| {
            seen.push(path.to_path_buf());
            Ok(())
        },
    );

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    let err = result.unwrap_err();
    assert!(matches!(err, IncludeError::WalkOpenFailed { .. }));
    assert_eq!(err.path(), locked.as_path());
    assert_eq!(seen.len(), 1);
    assert!(seen[0].ends_with("a/conf.d/1.conf"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_leaf_directory_aborts_walk() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new()?;
    for dir in ["x", "y", "z"] {
        fx.file(&format!("root/{dir}/site.conf"), "")?;
    }

    let locked = fx.path().join("root/y");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let mut outcomes = Vec::new();
    for pattern in ["root/*/site.conf", "root/*/*.conf"] {
        let mut seen: Vec<PathBuf> = Vec::new();
        let result = PatternResolver::new().resolve(&fx.pattern(pattern), &mut |path: &Path| {
            seen.push(path.to_path_buf());
            Ok(())
        });
        outcomes.push((result, seen));
    }

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    for (result, seen) in outcomes {
        let err = result.unwrap_err();
        assert!(matches!(err, IncludeError::WalkOpenFailed { .. }));
        assert_eq!(err.path(), locked.as_path());
        assert_eq!(seen.len(), 1);
        assert!(seen[0].ends_with("x/site.conf"));
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_follow_setting() -> Result<()> {
    let fx = Fixture::new()?;
    let real = fx.file("real/site.conf", "")?;
    fs::create_dir_all(fx.path().join("root"))?;
    std::os::unix::fs::symlink(fx.path().join("real"), fx.path().join("root/link"))?;

    let pattern = fx.pattern("root/*/site.conf");

    let mut default_matches = Vec::new();
    PatternResolver::new().resolve(&pattern, &mut |path: &Path| {
        default_matches.push(path.to_path_buf());
        Ok(())
    })?;
    assert!(default_matches.is_empty());

    let settings = IncludeSettings {
        follow_symlinks: true,
        ..IncludeSettings::default()
    };
    let mut followed = Vec::new();
    PatternResolver::from_settings(&settings).resolve(&pattern, &mut |path: &Path| {
        followed.push(path.to_path_buf());
        Ok(())
    })?;
    assert_eq!(followed.len(), 1);
    assert_eq!(fs::canonicalize(&followed[0])?, fs::canonicalize(real)?);
    Ok(())
}

#[test]
fn test_malformed_directory_segment() -> Result<()> {
    let fx = Fixture::new()?;
    fx.file("root/a/site.conf", "")?;

    let err = resolve_all(&fx.pattern("root/[a/*.conf")).unwrap_err();
    assert!(matches!(err, IncludeError::GlobOpenFailed { .. }));
    Ok(())
}
