//! @ai:module:intent TOML seed catalog loader
//! @ai:module:layer infrastructure
//! @ai:module:public_api CatalogLoader, CatalogLoaderTrait, SeedIssue
//! @ai:module:stateless true

use crate::catalog::algorithm::AlgorithmDraft;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Trait for loading seed algorithm definitions
pub trait CatalogLoaderTrait: Send + Sync {
    /// @ai:intent Load all valid definitions from a catalog directory
    fn load_all(&self, catalog_dir: &Path) -> Result<Vec<AlgorithmDraft>>;

    /// @ai:intent Report every file that would be skipped, with the reason
    fn check(&self, catalog_dir: &Path) -> Result<Vec<SeedIssue>>;
}

/// @ai:intent A seed file that failed to parse or validate
#[derive(Debug, Clone)]
pub struct SeedIssue {
    pub path: PathBuf,
    pub reason: String,
}

/// @ai:intent Raw seed file layout
#[derive(Debug, Deserialize)]
struct AlgorithmFile {
    algorithm: AlgorithmDraft,
}

/// @ai:intent Loads algorithm definitions from TOML files
/// @ai:effects pure (stateless)
pub struct CatalogLoader;

impl CatalogLoader {
    /// @ai:intent Create a new catalog loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Parse and validate a single seed file
    /// @ai:pre path points to a TOML file
    /// @ai:effects fs:read
    fn parse_seed_file(path: &Path) -> Result<AlgorithmDraft> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file: {}", path.display()))?;

        let file: AlgorithmFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;

        file.algorithm
            .validate()
            .with_context(|| format!("Invalid algorithm in {}", path.display()))?;

        Ok(file.algorithm)
    }

    /// @ai:intent Find all TOML files in directory, sorted by path
    /// @ai:effects fs:read
    fn find_seed_files(catalog_dir: &Path) -> Result<Vec<PathBuf>> {
        if !catalog_dir.is_dir() {
            anyhow::bail!("Catalog directory not found: {}", catalog_dir.display());
        }

        let mut files: Vec<PathBuf> = WalkDir::new(catalog_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "toml")
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoaderTrait for CatalogLoader {
    /// @ai:intent Load all valid definitions, skipping bad files
    /// @ai:effects fs:read
    fn load_all(&self, catalog_dir: &Path) -> Result<Vec<AlgorithmDraft>> {
        let files = Self::find_seed_files(catalog_dir)?;
        let mut drafts = Vec::with_capacity(files.len());

        for path in files {
            match Self::parse_seed_file(&path) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    tracing::warn!("Skipping invalid seed file {}: {:#}", path.display(), e);
                }
            }
        }

        Ok(drafts)
    }

    /// @ai:intent Report every file that would be skipped
    /// @ai:effects fs:read
    fn check(&self, catalog_dir: &Path) -> Result<Vec<SeedIssue>> {
        let issues = Self::find_seed_files(catalog_dir)?
            .into_iter()
            .filter_map(|path| {
                Self::parse_seed_file(&path).err().map(|e| SeedIssue {
                    path,
                    reason: format!("{:#}", e),
                })
            })
            .collect();

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::category::AlgorithmCategory;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_seed(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    const BINARY_SEARCH: &str = r#"
[algorithm]
name = "Binary Search"
description = "Halves the search interval each step."
algorithm_type = "searching"
complexity_time = "O(log n)"
complexity_space = "O(1)"
code_sample = "fn binary_search() {}"
"#;

    const QUICK_SORT: &str = r#"
[algorithm]
name = "Quick Sort"
description = "Partitions around a pivot."
algorithm_type = "sorting"
complexity_time = "O(n log n)"
complexity_space = "O(log n)"
code_sample = "fn quick_sort() {}"
"#;

    #[test]
    fn test_load_sorted_by_path() {
        let temp = TempDir::new().unwrap();
        create_seed(temp.path(), "sorting/quick.toml", QUICK_SORT);
        create_seed(temp.path(), "searching/binary.toml", BINARY_SEARCH);

        let drafts = CatalogLoader::new().load_all(temp.path()).unwrap();
        let names: Vec<_> = drafts.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Binary Search", "Quick Sort"]);
        assert_eq!(drafts[0].algorithm_type, AlgorithmCategory::Searching);
    }

    #[test]
    fn test_invalid_files_are_skipped_and_reported() {
        let temp = TempDir::new().unwrap();
        create_seed(temp.path(), "quick.toml", QUICK_SORT);
        create_seed(temp.path(), "broken.toml", "[algorithm]\nname = ");
        create_seed(
            temp.path(),
            "dijkstra.toml",
            &QUICK_SORT
                .replace("Quick Sort", "Dijkstra")
                .replace("\"sorting\"", "\"graph\""),
        );

        let loader = CatalogLoader::new();
        assert_eq!(loader.load_all(temp.path()).unwrap().len(), 1);

        let issues = loader.check(temp.path()).unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_blank_field_fails_validation() {
        let temp = TempDir::new().unwrap();
        create_seed(
            temp.path(),
            "blank.toml",
            &QUICK_SORT.replace("Partitions around a pivot.", " "),
        );

        let issues = CatalogLoader::new().check(temp.path()).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].reason.contains("description"));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(CatalogLoader::new()
            .load_all(&temp.path().join("nope"))
            .is_err());
    }
}
