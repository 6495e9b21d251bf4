//! Where level descriptions come from.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;

use super::{parse_level, LevelDescription, LevelError};

/// Supplies levels by number.
pub trait LevelSource: Send + Sync {
    /// Reads and parses level `number`.
    ///
    /// # Errors
    /// Returns [`LevelError`] when the level is missing or malformed.
    fn load(&self, number: u32) -> Result<LevelDescription, LevelError>;
}

impl<T: LevelSource + ?Sized> LevelSource for Arc<T> {
    fn load(&self, number: u32) -> Result<LevelDescription, LevelError> {
        (**self).load(number)
    }
}

/// Reads and parses one level file.
///
/// # Errors
/// Returns [`LevelError::Io`] when the file cannot be read and the parse
/// errors of [`parse_level`].
pub fn load_file(path: &Path) -> Result<LevelDescription, LevelError> {
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let level = parse_level(&text)?;
    info!("loaded level {} ({} items)", path.display(), level.items.len());
    Ok(level)
}

/// Levels stored as `level<N>.xml` in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLevelCatalog {
    directory: PathBuf,
}

impl FileLevelCatalog {
    /// Catalog rooted at `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Path of level `number`.
    #[must_use]
    pub fn path_for(&self, number: u32) -> PathBuf {
        self.directory.join(format!("level{number}.xml"))
    }
}

impl LevelSource for FileLevelCatalog {
    fn load(&self, number: u32) -> Result<LevelDescription, LevelError> {
        load_file(&self.path_for(number))
    }
}

/// A single level file served under one level number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleLevel {
    number: u32,
    path: PathBuf,
}

impl SingleLevel {
    /// Serves `path` as level `number`.
    pub fn new(number: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            number,
            path: path.into(),
        }
    }
}

impl LevelSource for SingleLevel {
    fn load(&self, number: u32) -> Result<LevelDescription, LevelError> {
        if number != self.number {
            return Err(LevelError::NoSuchLevel(number));
        }
        load_file(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_names_files_by_number() {
        let catalog = FileLevelCatalog::new("resources/levels");
        assert_eq!(
            catalog.path_for(3),
            Path::new("resources/levels").join("level3.xml")
        );
    }

    #[test]
    fn missing_files_report_their_path() {
        let catalog = FileLevelCatalog::new("definitely/not/here");
        let Err(LevelError::Io { path, .. }) = catalog.load(1) else {
            panic!("expected an I/O error");
        };
        assert!(path.ends_with("level1.xml"));
    }

    #[test]
    fn single_level_only_serves_its_number() {
        let source = SingleLevel::new(1, "missing.xml");
        assert!(matches!(source.load(2), Err(LevelError::NoSuchLevel(2))));
        assert!(matches!(source.load(1), Err(LevelError::Io { .. })));
    }
}
