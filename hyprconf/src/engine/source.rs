//! Filesystem access for file-backed configuration sources.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use super::{SourceError, SourceHandle};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Open the parent directory of `path` via `cap-std` and extract the file name.
fn open_parent_dir_and_name(path: &Utf8Path) -> std::io::Result<(Dir, String)> {
    let parent = parent_or_dot(path);
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::other("cannot determine file name for configuration file path")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name.to_owned()))
}

/// Read `path` completely and return a handle keyed by its canonical path.
///
/// The directory and file descriptors are dropped before this returns.
pub(super) fn read_file(path: &Utf8Path) -> Result<SourceHandle, SourceError> {
    let text = open_parent_dir_and_name(path)
        .and_then(|(dir, name)| dir.read_to_string(name))
        .map_err(|err| SourceError::from_io(path.to_owned(), err))?;
    let canonical = canonicalise(path)?;
    Ok(SourceHandle::file(canonical, text))
}

/// Canonicalise `path` using platform-specific rules.
///
/// On Windows the [`dunce`](https://docs.rs/dunce/latest/dunce/) crate is
/// used to avoid introducing UNC prefixes in diagnostic messages.
pub(super) fn canonicalise(path: &Utf8Path) -> Result<Utf8PathBuf, SourceError> {
    #[cfg(windows)]
    let resolved = dunce::canonicalize(path);
    #[cfg(not(windows))]
    let resolved = std::fs::canonicalize(path);
    let canonical = resolved.map_err(|err| SourceError::from_io(path.to_owned(), err))?;
    Ok(Utf8PathBuf::from_path_buf(canonical)
        .unwrap_or_else(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned())))
}

/// Normalize a canonical path for case-insensitive cycle detection.
///
/// On Windows and macOS the key is lower-cased so that includes spelled with
/// different casing are recognised as the same file. On strictly
/// case-sensitive platforms the path is returned unchanged.
pub(super) fn normalise_cycle_key(path: &Utf8Path) -> Utf8PathBuf {
    #[cfg(windows)]
    {
        Utf8PathBuf::from(path.as_str().to_ascii_lowercase())
    }

    #[cfg(target_os = "macos")]
    {
        Utf8PathBuf::from(path.as_str().to_lowercase())
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    {
        path.to_path_buf()
    }
}

/// Resolve an include target against `base`, leaving absolute paths alone.
pub(super) fn resolve_include(base: &Utf8Path, target: &str) -> Utf8PathBuf {
    let target_path = Utf8Path::new(target);
    if target_path.is_absolute() {
        target_path.to_path_buf()
    } else {
        base.join(target_path)
    }
}
