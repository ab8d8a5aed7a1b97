use crate::app::models::FileSet;
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};

/// Walks a project tree and collects files by extension.
pub struct Scanner {
    root: PathBuf,
    extensions: Vec<String>,
    prune: Vec<String>,
    exclude_set: GlobSet,
    git_ignore: bool,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            root: root.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            prune: Vec::new(),
            exclude_set: GlobSet::empty(),
            git_ignore: false,
        }
    }

    /// Directories skipped during the walk, by name or by root-relative path.
    pub fn prune<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.prune.extend(dirs.into_iter().filter_map(|d| {
            let d = d.as_ref().trim_start_matches("./").trim_end_matches('/');
            (!d.is_empty()).then(|| d.to_string())
        }));
        self
    }

    /// Glob patterns matched against root-relative paths; matches are skipped.
    pub fn exclude(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude_set = build_globset(patterns)?;
        Ok(self)
    }

    /// Honor `.gitignore` and friends while walking.
    pub fn git_ignore(mut self, enabled: bool) -> Self {
        self.git_ignore = enabled;
        self
    }

    pub fn scan(&self) -> Result<FileSet> {
        let root = self.root.clone();
        let prune = self.prune.clone();
        let exclude_set = self.exclude_set.clone();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .git_ignore(self.git_ignore)
            .git_exclude(self.git_ignore)
            .ignore(self.git_ignore)
            .require_git(false)
            .filter_entry(move |entry| !is_pruned(entry, &root, &prune, &exclude_set))
            .build();

        let mut paths = Vec::new();
        for result in walker {
            let entry = result
                .with_context(|| format!("Failed to walk {}", self.root.display()))?;
            if let Some(relative) = self.process_entry(entry.path()) {
                paths.push(relative);
            }
        }

        log::info!(
            "Found {} file(s) matching {:?} under {}",
            paths.len(),
            self.extensions,
            self.root.display()
        );
        Ok(FileSet::new(paths))
    }

    fn process_entry(&self, path: &Path) -> Option<String> {
        if !path.is_file() {
            return None;
        }

        let file_name = path.file_name()?.to_string_lossy();
        if !self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str())) {
            return None;
        }
        // Make cannot name a file whose path is not UTF-8.
        if path.to_str().is_none() {
            log::warn!("Skipping {:?}: file name is not valid UTF-8", path);
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        if self.exclude_set.is_match(&relative) {
            return None;
        }
        Some(normalize(&relative))
    }
}

fn is_pruned(entry: &DirEntry, root: &Path, prune: &[String], exclude_set: &GlobSet) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if name == ".git" {
        return true;
    }

    let Some(relative) = diff_paths(entry.path(), root) else {
        return false;
    };
    let relative_str = normalize(&relative);

    let pruned = prune.iter().any(|p| *p == name || *p == relative_str)
        || exclude_set.is_match(&relative);
    if pruned {
        log::debug!("Skipping directory {}", relative_str);
    }
    pruned
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
