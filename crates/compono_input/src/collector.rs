//! Input file discovery and concatenation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{InputError, InputResult};

/// File extensions selected when no other allow-list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["yaml", "yml", "comp"];

/// Collects input documents below a root directory.
pub struct FileCollector {
    root: PathBuf,
    extensions: Vec<String>,
}

impl FileCollector {
    /// Create a collector for `root` using [`DEFAULT_EXTENSIONS`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    /// Replace the extension allow-list. A leading dot is ignored.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Find every matching file below the root, in file-name order.
    pub fn find_files(&self) -> InputResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();
            if self.matches(path) {
                debug!("Selected input file {:?}", path);
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Read every matching file and concatenate the contents.
    ///
    /// Each file is followed by a newline unless it already ends in one, so
    /// the last line of one file never runs into the first line of the next.
    pub fn read_all(&self) -> InputResult<Vec<u8>> {
        let files = self.find_files()?;
        let mut data = Vec::new();

        for path in &files {
            let bytes = fs::read(path).map_err(|source| InputError::Io {
                path: path.clone(),
                source,
            })?;
            data.extend_from_slice(&bytes);

            if data.last().is_some_and(|byte| *byte != b'\n') {
                data.push(b'\n');
            }
        }

        info!(
            "Collected {} input file(s) ({} bytes) from {:?}",
            files.len(),
            data.len(),
            self.root
        );
        Ok(data)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }
}
