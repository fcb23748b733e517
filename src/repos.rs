//! The list of repository roots remembered between runs, one path per line.

use crate::error::{GitcalError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DOTFILE_NAME: &str = ".gitcal";

/// `~/.gitcal`
pub fn default_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(DOTFILE_NAME))
        .ok_or_else(|| GitcalError::Config("cannot determine the home directory".to_string()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoList {
    paths: Vec<PathBuf>,
}

impl RepoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the list at `file`. A missing or unreadable file is an empty list.
    pub fn load(file: &Path) -> Self {
        match fs::read_to_string(file) {
            Ok(contents) => {
                let list = Self::parse(&contents);
                debug!(file = %file.display(), repos = list.len(), "loaded repository list");
                list
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::new(),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "cannot read repository list, treating it as empty");
                Self::new()
            }
        }
    }

    fn parse(contents: &str) -> Self {
        let mut list = Self::new();
        list.merge(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(PathBuf::from),
        );
        list
    }

    /// Append every path not already present. Returns how many were added.
    pub fn merge<I: IntoIterator<Item = PathBuf>>(&mut self, new: I) -> usize {
        let mut seen: HashSet<PathBuf> = self.paths.iter().cloned().collect();
        let before = self.paths.len();
        for path in new {
            if seen.insert(path.clone()) {
                self.paths.push(path);
            }
        }
        self.paths.len() - before
    }

    pub fn save(&self, file: &Path) -> Result<()> {
        if let Some(parent) = file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = self
            .paths
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join("\n");
        fs::write(file, contents)?;
        Ok(())
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
