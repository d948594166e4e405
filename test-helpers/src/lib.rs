//! Common helper functions for tests.
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// --- Constants ---
pub const HEADER_REL: &str = "src/include/build_info.h";
pub const PROFILES_REL: &str = "data/profiles.json";
pub const SYSTEM_REL: &str = "data/system.json";

// --- Project Fixture ---

/// A throwaway firmware project root backed by a temporary directory.
/// The directory is removed when the fixture is dropped.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Creates an empty project root.
    pub fn new() -> Self {
        TestProject {
            dir: tempfile::tempdir().expect("Failed to create temporary project root"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a project-relative path.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    /// Reads a project-relative file as UTF-8.
    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel))
            .unwrap_or_else(|e| panic!("Failed to read {rel}: {e}"))
    }

    /// Writes a project-relative file, creating parent directories.
    pub fn write(&self, rel: &str, contents: impl AsRef<[u8]>) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, contents).unwrap_or_else(|e| panic!("Failed to write {rel}: {e}"));
    }

    /// The generated header's text.
    pub fn header(&self) -> String {
        self.read(HEADER_REL)
    }

    /// Number of files directly inside a project-relative directory.
    pub fn file_count(&self, rel_dir: &str) -> usize {
        fs::read_dir(self.path(rel_dir))
            .map(|rd| rd.filter_map(Result::ok).count())
            .unwrap_or(0)
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

// --- Header Helpers ---

/// Extracts the value of `#define BUILD_NUMBER` from rendered header text.
/// Independent of the crate's own parser so tests don't grade it against itself.
pub fn build_number_in(header: &str) -> Option<u64> {
    header
        .lines()
        .find_map(|l| l.strip_prefix("#define BUILD_NUMBER "))
        .and_then(|rest| rest.trim().parse().ok())
}

/// Extracts the quoted value of `#define BUILD_DATE`.
pub fn build_date_in(header: &str) -> Option<&str> {
    header
        .lines()
        .find_map(|l| l.strip_prefix("#define BUILD_DATE \""))
        .and_then(|rest| rest.strip_suffix('"'))
}

/// A minimal previously generated header carrying `number_token` verbatim.
pub fn legacy_header(number_token: &str) -> String {
    format!(
        "#ifndef BUILD_INFO_H\n#define BUILD_INFO_H\n#define BUILD_DATE \"2020-01-01 00:00:00\"\n#define BUILD_NUMBER {number_token}\n#endif\n"
    )
}
