//! Filesystem seam used by the resolvers
//!
//! Resolvers only ever probe for existence, read whole files and list
//! directories. Tests swap in an in-memory implementation.

use std::io;
use std::path::Path;

pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Entry names of a directory, in the order the directory yields them
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// The local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl FileSystem for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_fs_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("main.tex");
        std::fs::write(&file, "\\documentclass{article}").unwrap();

        let fs = RealFs;
        assert!(fs.exists(&file));
        assert!(!fs.exists(&temp.path().join("missing.tex")));
        assert_eq!(fs.read_to_string(&file).unwrap(), "\\documentclass{article}");
        assert_eq!(fs.list_dir(temp.path()).unwrap(), vec!["main.tex".to_string()]);
    }

    #[test]
    fn test_real_fs_read_missing_is_not_found() {
        let err = RealFs
            .read_to_string(Path::new("/nonexistent/main.tex"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
