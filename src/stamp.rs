// Version stamper: keeps the firmware build counter in a generated C header.
//
// The header is the only persisted state. Each run recovers the previous
// number from it (best effort), increments it and rewrites the whole file.


use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::util::{persist_file, Replace};

/// Marker identifying the line that carries the previous build number.
pub const BUILD_NUMBER_MARKER: &str = "#define BUILD_NUMBER";

/// `strftime` format of `BUILD_DATE`.
pub const BUILD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The build number + timestamp pair persisted in the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    pub build_number: u64,
    pub build_date: String,
}

impl BuildRecord {
    pub fn new(build_number: u64, timestamp: NaiveDateTime) -> Self {
        BuildRecord {
            build_number,
            build_date: timestamp.format(BUILD_DATE_FORMAT).to_string(),
        }
    }
}

impl fmt::Display for BuildRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Build #{}", self.build_date, self.build_number)
    }
}

/// What a previous header tells us about the last build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorBuild {
    /// No line contains the marker.
    NoMarker,
    /// The first marker line has no readable number after the marker.
    Malformed(String),
    /// The number found on the first marker line.
    Number(u64),
}

/// Path of the generated header: `<root>/src/include/build_info.h`.
pub fn header_path(project_root: &Path) -> PathBuf {
    project_root.join("src").join("include").join("build_info.h")
}

/// Scans header text for the first `#define BUILD_NUMBER` line.
///
/// Only that first line is considered; later marker lines never override it,
/// even when the first one is malformed. The number is the token right after
/// the macro name, which for a well-formed line is the third
/// whitespace-separated token.
pub fn scan_header(content: &str) -> PriorBuild {
    let Some(line) = content.lines().find(|l| l.contains(BUILD_NUMBER_MARKER)) else {
        return PriorBuild::NoMarker;
    };
    match parse_marker_line(line) {
        Some(n) => PriorBuild::Number(n),
        None => PriorBuild::Malformed(line.to_string()),
    }
}

fn parse_marker_line(line: &str) -> Option<u64> {
    let (_, rest) = line.split_once(BUILD_NUMBER_MARKER)?;
    // Stricter than taking the third token: the marker must be followed by
    // whitespace, so `#define BUILD_NUMBERS 4` names a different macro and
    // resets the counter instead of yielding 5. Well-formed lines read the same.
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    rest.split_whitespace().next()?.parse().ok()
}

/// The build number recorded in `content`, if one can be read.
pub fn previous_build_number(content: &str) -> Option<u64> {
    match scan_header(content) {
        PriorBuild::Number(n) => Some(n),
        PriorBuild::NoMarker | PriorBuild::Malformed(_) => None,
    }
}

/// Computes the number for this build from the previous header text.
///
/// Anything short of a readable previous number restarts the counter at 1.
pub fn next_build_number(existing: Option<&str>) -> u64 {
    let Some(content) = existing else {
        debug!("No previous build header, starting at build 1");
        return 1;
    };
    match scan_header(content) {
        PriorBuild::Number(n) => n.checked_add(1).unwrap_or_else(|| {
            warn!(previous = n, "Build number overflow, resetting counter to 1");
            1
        }),
        PriorBuild::Malformed(line) => {
            warn!(line = %line.trim(), "Unreadable BUILD_NUMBER in previous header, resetting counter to 1");
            1
        }
        PriorBuild::NoMarker => {
            debug!("Previous header has no BUILD_NUMBER define, resetting counter to 1");
            1
        }
    }
}

/// Renders the full contents of `build_info.h`.
pub fn render_header(record: &BuildRecord) -> String {
    format!(
        r#"/**
 * Incubator Control System - automatically generated build information
 *
 * This file is regenerated before every build. Do not edit it by hand.
 */

#ifndef BUILD_INFO_H
#define BUILD_INFO_H

#define BUILD_DATE "{build_date}"
#define BUILD_NUMBER {build_number}

#endif // BUILD_INFO_H
"#,
        build_date = record.build_date,
        build_number = record.build_number,
    )
}

/// Stamps the header using the current local time.
pub fn stamp(project_root: &Path) -> Result<BuildRecord> {
    stamp_at(project_root, Local::now().naive_local())
}

/// Reads the previous header (if any), bumps the counter and rewrites the
/// header with `now` as the build date.
///
/// Filesystem errors are returned; a malformed previous header is not an error.
pub fn stamp_at(project_root: &Path, now: NaiveDateTime) -> Result<BuildRecord> {
    let path = header_path(project_root);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let existing = read_existing(&path)?;
    let record = BuildRecord::new(next_build_number(existing.as_deref()), now);

    // Replaced via a temp file so a failed write keeps the previous number.
    let header = render_header(&record);
    persist_file(&path, Replace::Overwrite, |file| file.write_all(header.as_bytes()))
        .with_context(|| format!("Failed to write build header {}", path.display()))?;
    info!(
        path = %path.display(),
        build_number = record.build_number,
        build_date = %record.build_date,
        "Build header written"
    );
    Ok(record)
}

// Invalid UTF-8 is decoded lossily so it degrades into a malformed header
// instead of failing the build.
fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read build header {}", path.display()))
        }
    }
}
