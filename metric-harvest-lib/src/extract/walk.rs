use super::LOG_TARGET;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const MAX_FILES: usize = 50_000;
const MAX_FILE_SIZE: u64 = 5_000_000;
const MAX_DEPTH: usize = 64;

/// Directories never worth descending into.
const ALWAYS_SKIPPED_DIRS: &[&str] = &[".git", "vendor", "third_party", "node_modules"];

/// Selects the files an extractor should look at.
#[derive(Debug, Clone)]
pub struct SourceWalker {
    root: PathBuf,
    extensions: Vec<&'static str>,
    file_names: Vec<&'static str>,
    skip_dirs: Vec<&'static str>,
    skip_suffixes: Vec<&'static str>,
    skip_fragments: Vec<&'static str>,
    max_depth: usize,
}

impl SourceWalker {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: Vec::new(),
            file_names: Vec::new(),
            skip_dirs: Vec::new(),
            skip_suffixes: Vec::new(),
            skip_fragments: Vec::new(),
            max_depth: MAX_DEPTH,
        }
    }

    #[must_use]
    pub fn extensions(mut self, extensions: &[&'static str]) -> Self {
        self.extensions.extend_from_slice(extensions);
        self
    }

    /// Only accept files with exactly these names.
    #[must_use]
    pub fn file_names(mut self, names: &[&'static str]) -> Self {
        self.file_names.extend_from_slice(names);
        self
    }

    /// Do not descend into directories with these names.
    #[must_use]
    pub fn skip_dirs(mut self, names: &[&'static str]) -> Self {
        self.skip_dirs.extend_from_slice(names);
        self
    }

    /// Reject files whose name ends with one of these suffixes, such as `_test.go`.
    #[must_use]
    pub fn skip_suffixes(mut self, suffixes: &[&'static str]) -> Self {
        self.skip_suffixes.extend_from_slice(suffixes);
        self
    }

    /// Reject files whose `/`-separated path below the root contains one of these fragments.
    #[must_use]
    pub fn skip_fragments(mut self, fragments: &[&'static str]) -> Self {
        self.skip_fragments.extend_from_slice(fragments);
        self
    }

    /// Only look at files directly inside the root.
    #[must_use]
    pub const fn shallow(mut self) -> Self {
        self.max_depth = 1;
        self
    }

    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect matching files in a deterministic order.
    #[must_use]
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .follow_links(false)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !entry.file_type().is_dir() || !self.is_skipped_dir(entry))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::debug!(target: LOG_TARGET, "Could not walk directory: {err:#}");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.accepts(entry))
            .filter_map(|entry| {
                let metadata = match entry.metadata() {
                    Ok(m) => m,
                    Err(e) => {
                        log::debug!(target: LOG_TARGET, "Could not read metadata for '{}': {e:#}", entry.path().display());
                        return None;
                    }
                };

                if metadata.len() > MAX_FILE_SIZE {
                    log::debug!(target: LOG_TARGET, "Skipping large file '{}' ({} bytes)", entry.path().display(), metadata.len());
                    return None;
                }

                Some(entry.into_path())
            })
            .take(MAX_FILES)
            .collect();

        if files.len() == MAX_FILES {
            log::warn!(target: LOG_TARGET, "File count limit ({MAX_FILES}) reached in '{}', some files are ignored", self.root.display());
        }

        files.sort();
        files
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        ALWAYS_SKIPPED_DIRS.contains(&name.as_ref()) || self.skip_dirs.contains(&name.as_ref())
    }

    fn accepts(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();

        if !self.file_names.is_empty() && !self.file_names.contains(&name.as_ref()) {
            return false;
        }

        if !self.extensions.is_empty() {
            let extension = entry.path().extension().and_then(|s| s.to_str()).unwrap_or_default();
            if !self.extensions.contains(&extension) {
                return false;
            }
        }

        if self.skip_suffixes.iter().any(|suffix| name.ends_with(suffix)) {
            return false;
        }

        if !self.skip_fragments.is_empty() {
            let relative = format!("/{}", relative_path(&self.root, entry.path()));
            if self.skip_fragments.iter().any(|fragment| relative.contains(fragment)) {
                return false;
            }
        }

        true
    }
}

/// `path` relative to `root`, with `/` separators.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
