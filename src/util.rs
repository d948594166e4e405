//! Utility functions shared across modules.

use colored::*;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::time::Duration;

/// Formats a `std::time::Duration` into a human-readable string using `humantime`.
///
/// Sub-millisecond precision is dropped; a build log does not need it.
#[inline]
pub fn format_duration(duration: Duration) -> String {
    let millis = Duration::from_millis(duration.as_millis() as u64);
    humantime::format_duration(millis).to_string()
}

/// Prints one human-readable status line to stdout (the build log).
pub fn status(message: impl std::fmt::Display) {
    println!("{} {message}", "[prebuild]".bold().cyan());
}

/// What `persist_file` does when something already exists at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replace {
    Overwrite,
    NoClobber,
}

/// Writes `path` through a temporary file in the same directory, then moves
/// it into place. Nothing appears at `path` unless `fill` succeeds, and an
/// overwritten file keeps its old content until the move.
///
/// Returns `Ok(false)` when `Replace::NoClobber` finds something at `path`.
pub fn persist_file(
    path: &Path,
    replace: Replace,
    fill: impl FnOnce(&mut File) -> io::Result<()>,
) -> io::Result<bool> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".prebuild-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Temp files default to 0600; the persisted file gets the umask mode.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    fill(tmp.as_file_mut())?;

    let persisted = match replace {
        Replace::Overwrite => tmp.persist(path),
        Replace::NoClobber => tmp.persist_noclobber(path),
    };
    match persisted {
        Ok(_) => Ok(true),
        Err(e) if replace == Replace::NoClobber && e.error.kind() == io::ErrorKind::AlreadyExists => {
            Ok(false)
        }
        Err(e) => Err(e.error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn disk_full(_: &mut File) -> io::Result<()> {
        Err(io::Error::other("No space left on device"))
    }

    fn entries(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn failed_fill_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");

        assert!(persist_file(&path, Replace::NoClobber, disk_full).is_err());

        assert!(!path.exists());
        assert_eq!(entries(dir.path()), 0);
    }

    #[test]
    fn failed_fill_keeps_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build_info.h");
        fs::write(&path, "#define BUILD_NUMBER 41\n").unwrap();

        assert!(persist_file(&path, Replace::Overwrite, disk_full).is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), "#define BUILD_NUMBER 41\n");
        assert_eq!(entries(dir.path()), 1);
    }

    #[test]
    fn overwrite_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build_info.h");
        fs::write(&path, "old").unwrap();

        let written = persist_file(&path, Replace::Overwrite, |f| f.write_all(b"new")).unwrap();

        assert!(written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn no_clobber_leaves_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");
        fs::write(&path, r#"{"custom": true}"#).unwrap();

        let written = persist_file(&path, Replace::NoClobber, |f| f.write_all(b"{}")).unwrap();

        assert!(!written);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"custom": true}"#);
        assert_eq!(entries(dir.path()), 1);
    }

    #[test]
    fn format_duration_truncates_to_millis() {
        assert_eq!(format_duration(Duration::from_micros(2_500)), "2ms");
        assert_eq!(format_duration(Duration::from_millis(1_250)), "1s 250ms");
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }
}
