use crate::testing::{DAT_PATTERN, HTML_PATTERN, TEST_PATTERN};
use crate::types::Result;
use regex::Regex;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DAT_BUCKET: &str = "dat";
pub const TEST_BUCKET: &str = "test";
pub const HTML_BUCKET: &str = "html";

/// A named suffix pattern together with every path that matched it during a walk
#[derive(Debug, Clone)]
pub struct Bucket {
    name: String,
    pattern: Regex,
    paths: Vec<PathBuf>,
}

impl Bucket {
    pub fn new(name: &str, pattern: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
            paths: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    fn offer(&mut self, path: &Path) {
        if self.pattern.is_match(&path.to_string_lossy()) {
            self.paths.push(path.to_path_buf());
        }
    }
}

/// The set of buckets a directory walk sorts files into. Buckets are independent: a path can
/// land in none, one or several of them.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    buckets: Vec<Bucket>,
}

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `dat`, `test` and `html` buckets the acceptance runners consume
    pub fn standard() -> Result<Self> {
        Self::new()
            .with_bucket(DAT_BUCKET, DAT_PATTERN)?
            .with_bucket(TEST_BUCKET, TEST_PATTERN)?
            .with_bucket(HTML_BUCKET, HTML_PATTERN)
    }

    pub fn with_bucket(mut self, name: &str, pattern: &str) -> Result<Self> {
        self.buckets.push(Bucket::new(name, pattern)?);
        Ok(self)
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Paths collected for the named bucket, empty when no such bucket exists
    pub fn paths(&self, name: &str) -> &[PathBuf] {
        self.buckets
            .iter()
            .find(|b| b.name == name)
            .map(Bucket::paths)
            .unwrap_or_default()
    }

    fn offer(&mut self, path: &Path) {
        for bucket in self.buckets.iter_mut() {
            bucket.offer(path);
        }
    }
}

/// Recursively walks `root` and sorts every non-directory entry into the matching buckets of
/// `spec`. Entries are visited in file name order per directory. The first walk error aborts
/// the walk and nothing that was collected so far is returned.
pub fn classify(root: &Path, mut spec: Classification) -> Result<Classification> {
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        spec.offer(entry.path());
    }

    for bucket in spec.buckets() {
        log::debug!(
            "classified {} file(s) into bucket '{}'",
            bucket.paths().len(),
            bucket.name()
        );
    }

    Ok(spec)
}
