use crate::cli::CommonArgs;
use crate::error::{GitcalError, Result};
use crate::repos::RepoList;
use anyhow::Context;
use console::style;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directories never descended into while looking for repositories.
const SKIPPED_DIRS: &[&str] = &[".git", "vendor", "node_modules"];

/// Scan `folder` and remember every repository found in the stored list.
pub fn exec(common: &CommonArgs, folder: &Path) -> anyhow::Result<()> {
    let file = common.repos_file()?;
    let root = folder
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", folder.display()))?;

    let found = scan_folder(&root).context("Failed to scan for repositories")?;

    println!("{}", style("Found repositories:").bold());
    for path in &found {
        println!("  {}", path.display());
    }

    let mut list = RepoList::load(&file);
    let added = list.merge(found.iter().cloned());
    list.save(&file)
        .with_context(|| format!("Failed to write {}", file.display()))?;

    println!(
        "\n{} {} new of {} found, {} stored in {}",
        style("Added").green().bold(),
        added,
        found.len(),
        list.len(),
        file.display()
    );
    Ok(())
}

/// Every directory under `root` (inclusive) that holds a `.git` directory.
pub fn scan_folder(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(GitcalError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} is not a directory", root.display()),
        )));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.depth() > 0 && SKIPPED_DIRS.contains(&name.as_ref()))
        })
        .build();

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
            continue;
        }
        if entry.path().join(".git").is_dir() {
            info!(repo = %entry.path().display(), "found repository");
            found.push(entry.into_path());
        }
    }

    found.sort();
    Ok(found)
}
