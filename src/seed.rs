//! Default asset seeder.
//!
//! Makes sure the firmware's data directory holds the default configuration
//! documents. A seed file is written only when nothing exists at its path;
//! existing content is never read, validated or replaced.

use anyhow::{Context, Result};
use crate::util::{persist_file, Replace};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// A configuration document created once with built-in content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedFile {
    /// File name inside the data directory.
    pub name: &'static str,
    /// Human-readable description used in status messages.
    pub kind: &'static str,
    /// Exact default text written on first creation.
    pub contents: &'static str,
}

/// Incubation profile list (`data/profiles.json`).
pub const PROFILES: SeedFile = SeedFile {
    name: "profiles.json",
    kind: "profile",
    contents: include_str!("assets/profiles.json"),
};

/// System settings document (`data/system.json`).
pub const SYSTEM_SETTINGS: SeedFile = SeedFile {
    name: "system.json",
    kind: "system settings",
    contents: include_str!("assets/system.json"),
};

/// Every seed file, in the order they are attempted.
pub const DEFAULT_SEEDS: [SeedFile; 2] = [PROFILES, SYSTEM_SETTINGS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The file was absent and has been written with its default content.
    Created,
    /// Something already exists at the path; it was left untouched.
    AlreadyPresent,
}

/// Result of one seed attempt.
#[derive(Debug)]
pub struct SeedEntry {
    pub seed: SeedFile,
    pub path: PathBuf,
    pub result: Result<SeedOutcome>,
}

/// Results of a seeding pass, one entry per attempted file.
#[derive(Debug, Default)]
pub struct SeedReport {
    entries: Vec<SeedEntry>,
}

impl SeedReport {
    pub fn entries(&self) -> &[SeedEntry] {
        &self.entries
    }

    /// Entries whose file was newly created.
    pub fn created(&self) -> impl Iterator<Item = &SeedEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(SeedOutcome::Created)))
    }

    /// Entries that could not be created, with their error.
    pub fn failures(&self) -> impl Iterator<Item = (&SeedEntry, &anyhow::Error)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (e, err)))
    }

    /// Outcome for the seed named `name`, if it was attempted and succeeded.
    pub fn outcome(&self, name: &str) -> Option<SeedOutcome> {
        self.entries
            .iter()
            .find(|e| e.seed.name == name)
            .and_then(|e| e.result.as_ref().ok().copied())
    }

    /// Turns the report into an error if any seed failed.
    pub fn into_result(mut self) -> Result<Self> {
        let total = self.entries.len();
        let failed = self.entries.iter().filter(|e| e.result.is_err()).count();
        let Some(pos) = self.entries.iter().position(|e| e.result.is_err()) else {
            return Ok(self);
        };
        let entry = self.entries.swap_remove(pos);
        match entry.result {
            Err(e) => Err(e.context(format!("{failed} of {total} seed files could not be created"))),
            Ok(_) => Ok(self),
        }
    }
}

/// Data directory: `<root>/data`.
pub fn data_dir(project_root: &Path) -> PathBuf {
    project_root.join("data")
}

/// Creates `seed` inside `dir` unless something already exists there.
pub fn seed_file(dir: &Path, seed: &SeedFile) -> Result<SeedOutcome> {
    let path = dir.join(seed.name);
    let exists = path
        .try_exists()
        .with_context(|| format!("Failed to check for {}", path.display()))?;
    if exists {
        debug!(path = %path.display(), "Seed file already present, leaving it untouched");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    // Written via a temp file: a failed write leaves nothing at `path`, so the
    // next run retries the default. A file that showed up after the check is
    // still not clobbered.
    let created = persist_file(&path, Replace::NoClobber, |file| {
        file.write_all(seed.contents.as_bytes())
    })
    .with_context(|| format!("Failed to write {}", path.display()))?;
    if !created {
        debug!(path = %path.display(), "Seed file appeared concurrently, leaving it untouched");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    info!(path = %path.display(), kind = seed.kind, "Seed file created");
    Ok(SeedOutcome::Created)
}

/// Ensures `dir` exists, then attempts every seed independently.
///
/// Failing to create the directory aborts. A failure on one seed is recorded
/// in the report and does not stop the remaining seeds.
pub fn seed_files(dir: &Path, seeds: &[SeedFile]) -> Result<SeedReport> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let entries = seeds
        .iter()
        .map(|seed| {
            let result = seed_file(dir, seed);
            if let Err(e) = &result {
                error!(file = seed.name, error = %format!("{e:#}"), "Failed to seed file");
            }
            SeedEntry {
                seed: *seed,
                path: dir.join(seed.name),
                result,
            }
        })
        .collect();
    Ok(SeedReport { entries })
}

/// Seeds the default profile list and system settings under `<root>/data`.
pub fn seed_defaults(project_root: &Path) -> Result<SeedReport> {
    seed_files(&data_dir(project_root), &DEFAULT_SEEDS)
}
