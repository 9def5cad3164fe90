//! Filesystem probing
//!
//! Injected into the synthesizer and partitioner so the probing policy stays
//! testable. I/O failures degrade to "not found", never to an error.

use std::path::Path;

/// Existence checks and read access used during command synthesis.
pub trait FsProbe {
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    /// Read a file, or `None` when it is missing or unreadable.
    fn read_to_string(&self, path: &Path) -> Option<String>;
}

/// Probe backed by the real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskProbe;

impl FsProbe for DiskProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// In-memory probe for tests.
#[cfg(test)]
pub mod mem {
    use super::FsProbe;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::{Path, PathBuf};

    #[derive(Clone, Debug, Default)]
    pub struct MemProbe {
        files: BTreeMap<PathBuf, String>,
        dirs: BTreeSet<PathBuf>,
    }

    impl MemProbe {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
            self.files.insert(path.into(), contents.into());
            self
        }

        pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
            self.dirs.insert(path.into());
            self
        }
    }

    impl FsProbe for MemProbe {
        fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.contains(path)
        }

        fn read_to_string(&self, path: &Path) -> Option<String> {
            self.files.get(path).cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_disk_probe() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("cucumber.yml");
        fs::write(&file, "parallel: --format progress\n").unwrap();

        let probe = DiskProbe;
        assert!(probe.is_file(&file));
        assert!(probe.is_dir(dir.path()));
        assert!(!probe.is_file(&dir.path().join("missing.yml")));
        assert_eq!(
            probe.read_to_string(&file).as_deref(),
            Some("parallel: --format progress\n")
        );
        assert!(probe.read_to_string(&dir.path().join("missing.yml")).is_none());
    }
}
