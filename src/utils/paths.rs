use std::io;
use std::path::{Path, PathBuf};

/// Resolves an include argument against the configuration prefix
///
/// `~` is expanded, absolute names are returned unchanged and relative names
/// are joined onto `prefix` (itself made absolute against the current
/// directory when needed). The name is not required to exist.
///
/// # Errors
///
/// Returns an error if the name is empty, the home directory is needed but
/// unknown, or the current directory cannot be determined
pub fn full_name(prefix: &Path, name: &str) -> io::Result<PathBuf> {
    if name.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty include path",
        ));
    }

    let path = expand_tilde(Path::new(name))?;
    if path.is_absolute() {
        return Ok(path);
    }

    Ok(make_absolute(prefix)?.join(path))
}

/// Expands tilde in path to home directory
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined
pub fn expand_tilde(path: &Path) -> io::Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if path_str == "~" || path_str.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "could not find home directory")
        })?;
        if path_str == "~" {
            Ok(home)
        } else {
            Ok(home.join(&path_str[2..]))
        }
    } else {
        Ok(path.to_path_buf())
    }
}

/// Makes a path absolute, resolving relative paths from current directory
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined
pub fn make_absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
