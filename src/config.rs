use std::path::{Path, PathBuf};

/// Default filter when neither --log-filter nor RUST_LOG is given.
pub const DEFAULT_LOG_FILTER: &str = "incubator_prebuild=info";
const VERBOSE_LOG_FILTER: &str = "incubator_prebuild=debug";

#[derive(Clone, Debug)]
pub struct Config {
    pub project_root: PathBuf,
    pub log_filter:   String,
    pub verbose:      bool,
}

impl Config {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            log_filter:   DEFAULT_LOG_FILTER.to_string(),
            verbose:      false,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Location of the generated build header.
    pub fn header_path(&self) -> PathBuf {
        crate::stamp::header_path(&self.project_root)
    }

    /// Directory holding the seeded configuration documents.
    pub fn data_dir(&self) -> PathBuf {
        crate::seed::data_dir(&self.project_root)
    }
}

impl From<&crate::cli::Args> for Config {
    fn from(a: &crate::cli::Args) -> Self {
        let log_filter = match &a.log_filter {
            Some(filter) => filter.clone(),
            None if a.verbose => VERBOSE_LOG_FILTER.to_string(),
            None => DEFAULT_LOG_FILTER.to_string(),
        };
        Self {
            project_root: a.project_dir.clone(),
            log_filter,
            verbose:      a.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;

    fn args(verbose: bool, log_filter: Option<&str>) -> Args {
        Args {
            project_dir: PathBuf::from("/work/fw"),
            verbose,
            log_filter: log_filter.map(str::to_string),
        }
    }

    #[test]
    fn verbose_lowers_default_filter() {
        assert_eq!(Config::from(&args(false, None)).log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(Config::from(&args(true, None)).log_filter, VERBOSE_LOG_FILTER);
    }

    #[test]
    fn explicit_filter_wins() {
        let cfg = Config::from(&args(true, Some("warn")));
        assert_eq!(cfg.log_filter, "warn");
        assert!(cfg.verbose);
    }

    #[test]
    fn derived_paths() {
        let cfg = Config::new("/work/fw");
        assert_eq!(cfg.header_path(), Path::new("/work/fw/src/include/build_info.h"));
        assert_eq!(cfg.data_dir(), Path::new("/work/fw/data"));
    }
}
